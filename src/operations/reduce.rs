use crate::geometry::{ControlSkeleton, Polyline, SKELETON_POINT_COUNT};
use crate::math::arc_length::point_at_distance;

/// Arc-length fractions at which control points are placed.
const SKELETON_FRACTIONS: [f64; SKELETON_POINT_COUNT] = [0.0, 1.0 / 3.0, 2.0 / 3.0, 1.0];

/// Compresses a sub-path into a four-point [`ControlSkeleton`].
///
/// Points are taken at arc-length fractions `0, 1/3, 2/3, 1`, so the result
/// depends only on the shape of the sub-path and not on how densely it was
/// sampled. The start and end are the sub-path's own endpoints.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReduceControlPoints;

impl ReduceControlPoints {
    /// Creates a new `ReduceControlPoints` operation.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Executes the reduction.
    #[must_use]
    pub fn execute(&self, sub_path: &Polyline) -> ControlSkeleton {
        let points = sub_path.points();
        let cumulative = sub_path.cumulative_lengths();
        let total = cumulative.last().copied().unwrap_or(0.0);

        let skeleton = SKELETON_FRACTIONS.map(|f| point_at_distance(points, &cumulative, f * total));
        ControlSkeleton::new(skeleton)
    }
}
