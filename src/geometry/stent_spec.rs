use crate::error::{InputError, Result};

/// Minimum number of sides of the tube cross-section.
pub const MIN_RESOLUTION_SIDES: usize = 3;

/// Parameters of a single stent.
///
/// A new value is built per parameter change; the pipeline never mutates it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StentSpec {
    /// Index of the centerline branch the stent is placed on.
    pub branch_index: usize,
    /// Start of the stent as a fraction of the branch length, in `[0, 1]`.
    pub position: f64,
    /// Requested arc length of the stent.
    pub length: f64,
    /// Tube radius.
    pub radius: f64,
    /// Number of sides of the polygonal cross-section.
    pub resolution_sides: usize,
    /// Centerline smoothing factor in `[0, 1]`; `0` disables smoothing.
    pub smoothing: f64,
}

impl Default for StentSpec {
    fn default() -> Self {
        Self {
            branch_index: 0,
            position: 0.0,
            length: 10.0,
            radius: 2.0,
            resolution_sides: 16,
            smoothing: 0.3,
        }
    }
}

impl StentSpec {
    /// Sets the branch index.
    #[must_use]
    pub fn with_branch(mut self, branch_index: usize) -> Self {
        self.branch_index = branch_index;
        self
    }

    /// Sets the start position fraction.
    #[must_use]
    pub fn with_position(mut self, position: f64) -> Self {
        self.position = position;
        self
    }

    /// Sets the requested length.
    #[must_use]
    pub fn with_length(mut self, length: f64) -> Self {
        self.length = length;
        self
    }

    /// Sets the tube radius.
    #[must_use]
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Sets the number of cross-section sides.
    #[must_use]
    pub fn with_resolution(mut self, resolution_sides: usize) -> Self {
        self.resolution_sides = resolution_sides;
        self
    }

    /// Sets the smoothing factor.
    #[must_use]
    pub fn with_smoothing(mut self, smoothing: f64) -> Self {
        self.smoothing = smoothing;
        self
    }

    /// Checks every field against its valid range.
    ///
    /// The branch index is checked later, against the branch set.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint: [`InputError::InvalidResolution`]
    /// for fewer than 3 sides, otherwise [`InputError::ParameterOutOfRange`].
    pub fn validate(&self) -> Result<()> {
        if self.resolution_sides < MIN_RESOLUTION_SIDES {
            return Err(InputError::InvalidResolution {
                sides: self.resolution_sides,
            }
            .into());
        }
        check_unit_interval("position", self.position)?;
        check_positive("length", self.length)?;
        check_positive("radius", self.radius)?;
        check_unit_interval("smoothing", self.smoothing)?;
        Ok(())
    }
}

/// Fails unless `value` lies in `[0, 1]`.
pub(crate) fn check_unit_interval(parameter: &'static str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(InputError::ParameterOutOfRange {
            parameter,
            value,
            min: 0.0,
            max: 1.0,
        }
        .into())
    }
}

/// Fails unless `value` is finite and strictly positive.
pub(crate) fn check_positive(parameter: &'static str, value: f64) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(InputError::ParameterOutOfRange {
            parameter,
            value,
            min: 0.0,
            max: f64::INFINITY,
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StentError;

    #[test]
    fn default_is_valid() {
        assert!(StentSpec::default().validate().is_ok());
    }

    #[test]
    fn builders_set_fields() {
        let spec = StentSpec::default()
            .with_branch(2)
            .with_position(0.5)
            .with_length(50.0)
            .with_radius(3.0)
            .with_resolution(8)
            .with_smoothing(0.0);
        assert_eq!(spec.branch_index, 2);
        assert_eq!(spec.resolution_sides, 8);
        assert!((spec.length - 50.0).abs() < f64::EPSILON);
        assert!((spec.radius - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn two_sides_is_invalid_resolution() {
        let err = StentSpec::default().with_resolution(2).validate();
        assert!(matches!(
            err,
            Err(StentError::Input(InputError::InvalidResolution { sides: 2 }))
        ));
    }

    #[test]
    fn out_of_range_fields_rejected() {
        let cases = [
            StentSpec::default().with_position(1.5),
            StentSpec::default().with_position(-0.1),
            StentSpec::default().with_length(0.0),
            StentSpec::default().with_radius(-2.0),
            StentSpec::default().with_radius(f64::INFINITY),
            StentSpec::default().with_smoothing(f64::NAN),
        ];
        for spec in cases {
            assert!(
                matches!(
                    spec.validate(),
                    Err(StentError::Input(InputError::ParameterOutOfRange { .. }))
                ),
                "{spec:?} should be rejected"
            );
        }
    }
}
