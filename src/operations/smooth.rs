use crate::error::Result;
use crate::geometry::stent_spec::check_unit_interval;
use crate::geometry::Polyline;
use crate::math::Point3;

/// Number of averaging passes.
pub const SMOOTHING_PASSES: usize = 3;

/// Maximum displacement of a point from its original position, as a fraction
/// of the shorter of its two original adjacent segments.
///
/// Must stay below `0.5` so that neighbouring points can never meet.
pub const MAX_DISPLACEMENT_RATIO: f64 = 0.25;

/// Conservative, endpoint-preserving centerline smoothing.
///
/// Each pass moves every interior point towards the centre-weighted average
/// `(prev + 2 * cur + next) / 4` of itself and its neighbours, by `factor`.
/// The first and last points never move, and each point's accumulated
/// displacement is clamped to [`MAX_DISPLACEMENT_RATIO`] of its local
/// segment length so the path keeps its overall shape and position.
#[derive(Debug, Clone, Copy)]
pub struct SmoothCenterline {
    factor: f64,
}

impl SmoothCenterline {
    /// Creates a new smoothing operation with `factor` in `[0, 1]`.
    #[must_use]
    pub fn new(factor: f64) -> Self {
        Self { factor }
    }

    /// Executes the smoothing, returning a new polyline.
    ///
    /// A factor of `0` and polylines with fewer than 3 points are returned
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the factor is outside `[0, 1]`.
    pub fn execute(&self, polyline: &Polyline) -> Result<Polyline> {
        check_unit_interval("smoothing", self.factor)?;

        let original = polyline.points();
        let n = original.len();
        if self.factor <= 0.0 || n < 3 {
            return Ok(polyline.clone());
        }

        let bounds: Vec<f64> = (0..n)
            .map(|i| {
                if i == 0 || i == n - 1 {
                    0.0
                } else {
                    let before = (original[i] - original[i - 1]).norm();
                    let after = (original[i + 1] - original[i]).norm();
                    MAX_DISPLACEMENT_RATIO * before.min(after)
                }
            })
            .collect();

        let mut current = original.to_vec();
        for _ in 0..SMOOTHING_PASSES {
            let mut next = current.clone();
            for i in 1..n - 1 {
                let target = Point3::from(
                    (current[i - 1].coords + current[i].coords * 2.0 + current[i + 1].coords) / 4.0,
                );
                let moved = current[i] + (target - current[i]) * self.factor;
                next[i] = clamp_displacement(original[i], moved, bounds[i]);
            }
            current = next;
        }

        tracing::trace!(
            points = n,
            factor = self.factor,
            passes = SMOOTHING_PASSES,
            "smoothed centerline"
        );
        Polyline::new(current)
    }
}

/// Pulls `moved` back towards `anchor` so it lies within `max_distance`.
fn clamp_displacement(anchor: Point3, moved: Point3, max_distance: f64) -> Point3 {
    let offset = moved - anchor;
    let distance = offset.norm();
    if distance <= max_distance {
        moved
    } else {
        anchor + offset * (max_distance / distance)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::InputError;
    use crate::StentError;
    use approx::assert_relative_eq;

    fn zigzag() -> Polyline {
        Polyline::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(3.0, 1.0, 0.0),
            Point3::new(4.0, 0.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn zero_factor_is_identity() {
        let line = zigzag();
        assert_eq!(SmoothCenterline::new(0.0).execute(&line).unwrap(), line);
    }

    #[test]
    fn endpoints_are_preserved() {
        let line = zigzag();
        let smoothed = SmoothCenterline::new(1.0).execute(&line).unwrap();
        assert_eq!(smoothed.point_count(), line.point_count());
        assert_eq!(smoothed.first(), line.first());
        assert_eq!(smoothed.last(), line.last());
    }

    #[test]
    fn displacement_is_bounded() {
        let line = zigzag();
        let smoothed = SmoothCenterline::new(1.0).execute(&line).unwrap();
        // Every original segment has length sqrt(2).
        let bound = MAX_DISPLACEMENT_RATIO * 2.0_f64.sqrt();
        for (a, b) in line.points().iter().zip(smoothed.points()) {
            assert!((b - a).norm() <= bound + 1e-12);
        }
    }

    #[test]
    fn smoothing_shortens_zigzag_without_collapsing_it() {
        let line = zigzag();
        let smoothed = SmoothCenterline::new(1.0).execute(&line).unwrap();
        assert!(smoothed.length() < line.length());
        assert!(smoothed.length() > 0.5 * line.length());
    }

    #[test]
    fn straight_line_is_unchanged() {
        let line = Polyline::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ])
        .unwrap();
        let smoothed = SmoothCenterline::new(0.7).execute(&line).unwrap();
        for (a, b) in line.points().iter().zip(smoothed.points()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-12);
        }
    }

    #[test]
    fn two_point_line_is_unchanged() {
        let line = Polyline::new(vec![Point3::origin(), Point3::new(0.0, 0.0, 5.0)]).unwrap();
        assert_eq!(SmoothCenterline::new(1.0).execute(&line).unwrap(), line);
    }

    #[test]
    fn factor_out_of_range_fails() {
        let err = SmoothCenterline::new(1.5).execute(&zigzag()).unwrap_err();
        assert!(matches!(
            err,
            StentError::Input(InputError::ParameterOutOfRange { parameter: "smoothing", .. })
        ));
    }
}
