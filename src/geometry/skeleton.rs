use crate::math::{Point3, TOLERANCE};

/// Number of control points in a [`ControlSkeleton`].
pub const SKELETON_POINT_COUNT: usize = 4;

/// Number of samples in a [`SampledCurve`].
pub const SAMPLE_COUNT: usize = 20;

/// Four strategic points (start, two interior, end) that drive the spline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlSkeleton {
    points: [Point3; SKELETON_POINT_COUNT],
}

impl ControlSkeleton {
    /// Creates a skeleton from four points ordered along the stent.
    #[must_use]
    pub fn new(points: [Point3; SKELETON_POINT_COUNT]) -> Self {
        Self { points }
    }

    /// Returns the four control points in order.
    #[must_use]
    pub fn points(&self) -> &[Point3; SKELETON_POINT_COUNT] {
        &self.points
    }

    /// Returns the first control point.
    #[must_use]
    pub fn start(&self) -> Point3 {
        self.points[0]
    }

    /// Returns the last control point.
    #[must_use]
    pub fn end(&self) -> Point3 {
        self.points[SKELETON_POINT_COUNT - 1]
    }

    /// Returns `true` if all four points coincide (a zero-length stent).
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        let start = self.start();
        self.points.iter().all(|p| (p - start).norm() < TOLERANCE)
    }
}

/// A smooth stent axis sampled at [`SAMPLE_COUNT`] points.
///
/// The first and last samples are the skeleton's start and end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampledCurve {
    points: [Point3; SAMPLE_COUNT],
}

impl SampledCurve {
    /// Creates a curve from samples ordered along the stent.
    #[must_use]
    pub fn new(points: [Point3; SAMPLE_COUNT]) -> Self {
        Self { points }
    }

    /// Returns the samples in order.
    #[must_use]
    pub fn points(&self) -> &[Point3; SAMPLE_COUNT] {
        &self.points
    }

    /// Returns the first sample.
    #[must_use]
    pub fn start(&self) -> Point3 {
        self.points[0]
    }

    /// Returns the last sample.
    #[must_use]
    pub fn end(&self) -> Point3 {
        self.points[SAMPLE_COUNT - 1]
    }

    /// Returns the length of the sampled polyline.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.points.windows(2).map(|w| (w[1] - w[0]).norm()).sum()
    }

    /// Returns `true` if the curve has (near) zero length.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.length() < TOLERANCE
    }
}
