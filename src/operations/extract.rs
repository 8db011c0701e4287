use crate::error::{GeometryError, Result};
use crate::geometry::stent_spec::{check_positive, check_unit_interval};
use crate::geometry::Polyline;
use crate::math::arc_length::point_at_distance;
use crate::math::TOLERANCE;

/// Extracts the arc-length sub-path a stent occupies on a centerline.
///
/// The sub-path starts at `position * L` (where `L` is the centerline length)
/// and runs for `length`, or to the end of the centerline if less remains.
/// Both endpoints are interpolated exactly onto the requested arc-length
/// offsets; every original vertex strictly between them is kept.
#[derive(Debug, Clone, Copy)]
pub struct ExtractSegment {
    position: f64,
    length: f64,
}

impl ExtractSegment {
    /// Creates a new extraction for a start fraction and a target length.
    #[must_use]
    pub fn new(position: f64, length: f64) -> Self {
        Self { position, length }
    }

    /// Executes the extraction, returning the sub-path.
    ///
    /// # Errors
    ///
    /// - `ParameterOutOfRange` if `position` is outside `[0, 1]` or `length`
    ///   is not positive.
    /// - [`GeometryError::DegenerateCenterline`] if the centerline has
    ///   (near) zero total length.
    /// - [`GeometryError::ZeroLengthStent`] if (near) nothing remains after
    ///   the start offset.
    pub fn execute(&self, centerline: &Polyline) -> Result<Polyline> {
        check_unit_interval("position", self.position)?;
        check_positive("length", self.length)?;

        let points = centerline.points();
        let cumulative = centerline.cumulative_lengths();
        let total = cumulative.last().copied().unwrap_or(0.0);
        if total < TOLERANCE {
            return Err(GeometryError::DegenerateCenterline(format!(
                "total length {total} is below tolerance"
            ))
            .into());
        }

        let start = (self.position * total).clamp(0.0, total);
        let end = (start + self.length).min(total);
        if end - start < TOLERANCE {
            return Err(GeometryError::ZeroLengthStent.into());
        }
        if start + self.length > total {
            tracing::debug!(
                requested = self.length,
                available = end - start,
                "stent truncated to the end of the centerline"
            );
        }

        let mut sub_path = Vec::with_capacity(points.len() + 2);
        sub_path.push(point_at_distance(points, &cumulative, start));
        sub_path.extend(
            points
                .iter()
                .zip(&cumulative)
                .filter(|&(_, &d)| d > start + TOLERANCE && d < end - TOLERANCE)
                .map(|(p, _)| *p),
        );
        sub_path.push(point_at_distance(points, &cumulative, end));

        tracing::trace!(
            start,
            end,
            points = sub_path.len(),
            "extracted stent sub-path"
        );
        Polyline::new(sub_path)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::InputError;
    use crate::math::Point3;
    use crate::StentError;
    use approx::assert_relative_eq;

    /// 10 points spanning 100 units along +X.
    #[allow(clippy::cast_precision_loss)]
    fn straight_100() -> Polyline {
        Polyline::new(
            (0..10)
                .map(|i| Point3::new(f64::from(i) * 100.0 / 9.0, 0.0, 0.0))
                .collect(),
        )
        .unwrap()
    }

    /// An L-shaped centerline: 30 units along +X, then 40 units along +Y.
    fn l_shape() -> Polyline {
        Polyline::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(10.0, 0.0, 0.0),
            Point3::new(30.0, 0.0, 0.0),
            Point3::new(30.0, 20.0, 0.0),
            Point3::new(30.0, 40.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn extracts_requested_length_from_start() {
        let sub = ExtractSegment::new(0.0, 50.0).execute(&straight_100()).unwrap();
        assert_relative_eq!(sub.length(), 50.0, epsilon = 1e-9);
        assert_eq!(sub.first(), Point3::new(0.0, 0.0, 0.0));
        assert_relative_eq!(sub.last().x, 50.0, epsilon = 1e-9);
    }

    #[test]
    fn endpoints_land_on_requested_offsets() {
        // Start at 0.2 * 70 = 14, end at 14 + 30 = 44 -> (30, 14).
        let sub = ExtractSegment::new(0.2, 30.0).execute(&l_shape()).unwrap();
        assert_relative_eq!(sub.first().x, 14.0, epsilon = 1e-9);
        assert_relative_eq!(sub.last().x, 30.0, epsilon = 1e-9);
        assert_relative_eq!(sub.last().y, 14.0, epsilon = 1e-9);
        assert_relative_eq!(sub.length(), 30.0, epsilon = 1e-9);
        // The corner vertex is kept.
        assert!(sub.points().contains(&Point3::new(30.0, 0.0, 0.0)));
    }

    #[test]
    fn long_request_truncates_to_remainder() {
        let sub = ExtractSegment::new(0.0, 200.0).execute(&straight_100()).unwrap();
        assert_relative_eq!(sub.length(), 100.0, epsilon = 1e-9);
        assert_eq!(sub.point_count(), 10);
    }

    #[test]
    fn length_is_min_of_request_and_remaining() {
        let line = l_shape();
        for &(position, length) in &[(0.0, 5.0), (0.5, 10.0), (0.5, 60.0), (0.9, 3.0), (0.95, 50.0)] {
            let sub = ExtractSegment::new(position, length).execute(&line).unwrap();
            let remaining = line.length() * (1.0 - position);
            assert_relative_eq!(sub.length(), length.min(remaining), epsilon = 1e-9);
        }
    }

    #[test]
    fn offset_on_vertex_does_not_duplicate_it() {
        // Start exactly on the (10, 0, 0) vertex.
        let sub = ExtractSegment::new(10.0 / 70.0, 20.0).execute(&l_shape()).unwrap();
        assert_eq!(sub.point_count(), 2);
    }

    #[test]
    fn position_one_is_zero_length() {
        let err = ExtractSegment::new(1.0, 10.0).execute(&l_shape()).unwrap_err();
        assert!(matches!(
            err,
            StentError::Geometry(GeometryError::ZeroLengthStent)
        ));
    }

    #[test]
    fn invalid_parameters_fail() {
        assert!(matches!(
            ExtractSegment::new(0.0, -1.0).execute(&l_shape()),
            Err(StentError::Input(InputError::ParameterOutOfRange { parameter: "length", .. }))
        ));
        assert!(matches!(
            ExtractSegment::new(2.0, 1.0).execute(&l_shape()),
            Err(StentError::Input(InputError::ParameterOutOfRange { parameter: "position", .. }))
        ));
    }
}
