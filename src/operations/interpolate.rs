use crate::geometry::{ControlSkeleton, SampledCurve, SAMPLE_COUNT, SKELETON_POINT_COUNT};
use crate::math::arc_length::cumulative_lengths;
use crate::math::{Point3, Vector3, TOLERANCE};

/// Number of spline spans between the control points.
const SPAN_COUNT: usize = SKELETON_POINT_COUNT - 1;

/// Dense evaluation steps per span used to build the arc-length table.
const STEPS_PER_SPAN: usize = 64;

/// Fits a cardinal (Catmull-Rom) spline through a [`ControlSkeleton`] and
/// samples it at [`SAMPLE_COUNT`] points evenly spaced in arc length.
///
/// Interior tangents are `(P[i+1] - P[i-1]) / 2`; end tangents are the
/// one-sided differences `P[1] - P[0]` and `P[3] - P[2]`. The curve passes
/// through all four control points with C¹ continuity, and the first and last
/// samples are the skeleton's endpoints bit-for-bit.
#[derive(Debug, Default, Clone, Copy)]
pub struct InterpolateSpline;

impl InterpolateSpline {
    /// Creates a new `InterpolateSpline` operation.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Executes the interpolation.
    ///
    /// A skeleton whose points all coincide yields [`SAMPLE_COUNT`] copies of
    /// that point.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn execute(&self, skeleton: &ControlSkeleton) -> SampledCurve {
        let spline = CardinalSpline::new(skeleton.points());
        let start = skeleton.start();
        let end = skeleton.end();

        // Dense table of (parameter, point) pairs for arc-length lookup.
        let dense_count = SPAN_COUNT * STEPS_PER_SPAN + 1;
        let params: Vec<f64> = (0..dense_count)
            .map(|i| i as f64 / STEPS_PER_SPAN as f64)
            .collect();
        let dense: Vec<Point3> = params.iter().map(|&t| spline.evaluate(t)).collect();
        let cumulative = cumulative_lengths(&dense);
        let total = cumulative.last().copied().unwrap_or(0.0);

        if total < TOLERANCE {
            return SampledCurve::new([start; SAMPLE_COUNT]);
        }

        let samples = std::array::from_fn(|k| {
            if k == 0 {
                return start;
            }
            if k == SAMPLE_COUNT - 1 {
                return end;
            }
            let target = total * k as f64 / (SAMPLE_COUNT - 1) as f64;
            let idx = cumulative.partition_point(|&c| c < target).clamp(1, dense_count - 1);
            let seg_len = cumulative[idx] - cumulative[idx - 1];
            let t = if seg_len > f64::EPSILON {
                let u = (target - cumulative[idx - 1]) / seg_len;
                params[idx - 1] + (params[idx] - params[idx - 1]) * u
            } else {
                params[idx]
            };
            spline.evaluate(t)
        });

        SampledCurve::new(samples)
    }
}

/// Cubic Hermite spline with cardinal tangents through four points.
struct CardinalSpline {
    points: [Point3; SKELETON_POINT_COUNT],
    tangents: [Vector3; SKELETON_POINT_COUNT],
}

impl CardinalSpline {
    fn new(points: &[Point3; SKELETON_POINT_COUNT]) -> Self {
        let last = SKELETON_POINT_COUNT - 1;
        let tangents = std::array::from_fn(|i| {
            if i == 0 {
                points[1] - points[0]
            } else if i == last {
                points[last] - points[last - 1]
            } else {
                (points[i + 1] - points[i - 1]) * 0.5
            }
        });
        Self {
            points: *points,
            tangents,
        }
    }

    /// Evaluates the spline at global parameter `t` in `[0, SPAN_COUNT]`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn evaluate(&self, t: f64) -> Point3 {
        let t = t.clamp(0.0, SPAN_COUNT as f64);
        let span = (t.floor() as usize).min(SPAN_COUNT - 1);
        let u = t - span as f64;

        let u2 = u * u;
        let u3 = u2 * u;
        let h00 = 2.0 * u3 - 3.0 * u2 + 1.0;
        let h10 = u3 - 2.0 * u2 + u;
        let h01 = -2.0 * u3 + 3.0 * u2;
        let h11 = u3 - u2;

        let p0 = self.points[span].coords;
        let p1 = self.points[span + 1].coords;
        let m0 = self.tangents[span];
        let m1 = self.tangents[span + 1];
        Point3::from(p0 * h00 + m0 * h10 + p1 * h01 + m1 * h11)
    }
}
