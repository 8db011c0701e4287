use thiserror::Error;

/// Top-level error type for the stent pipeline.
///
/// Every failure is local to one pipeline invocation: the caller gets either
/// a complete mesh or one of these, never partial geometry.
#[derive(Debug, Error)]
pub enum StentError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Errors detected while validating caller-supplied values, before any
/// geometry is constructed.
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("branch index {index} is out of range (branch set has {count} branches)")]
    InvalidBranch { index: usize, count: usize },

    #[error("resolution must be at least 3 sides, got {sides}")]
    InvalidResolution { sides: usize },

    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("polyline needs at least {min} points, got {actual}")]
    TooFewPoints { min: usize, actual: usize },

    #[error("non-finite coordinate at point {index}")]
    NonFiniteCoordinate { index: usize },

    #[error("branch set is empty")]
    EmptyBranchSet,
}

/// Errors caused by degenerate geometry, detected mid-pipeline.
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("degenerate centerline: {0}")]
    DegenerateCenterline(String),

    #[error("stent has zero length")]
    ZeroLengthStent,
}

impl StentError {
    /// Returns `true` if this error was raised by input validation rather
    /// than by degenerate geometry.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::Input(_))
    }
}

/// Convenience type alias for results using [`StentError`].
pub type Result<T> = std::result::Result<T, StentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_errors_convert_transparently() {
        let err: StentError = InputError::InvalidBranch { index: 5, count: 2 }.into();
        assert!(err.is_input_error());
        assert_eq!(
            err.to_string(),
            "branch index 5 is out of range (branch set has 2 branches)"
        );
    }

    #[test]
    fn geometry_errors_are_not_input_errors() {
        let err: StentError = GeometryError::ZeroLengthStent.into();
        assert!(!err.is_input_error());
        assert_eq!(err.to_string(), "stent has zero length");
    }
}
