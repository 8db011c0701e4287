use crate::error::{GeometryError, InputError, Result};
use crate::math::arc_length::cumulative_lengths;
use crate::math::{Point3, TOLERANCE};

/// An open 3D polyline representing one centerline branch.
///
/// Invariants, established by [`Polyline::new`]:
/// - at least 2 points;
/// - every coordinate is finite;
/// - no two consecutive points are closer than [`TOLERANCE`].
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    points: Vec<Point3>,
}

impl Polyline {
    /// Creates a polyline, collapsing runs of coincident consecutive points.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::TooFewPoints`] for fewer than 2 input points,
    /// [`InputError::NonFiniteCoordinate`] for NaN or infinite coordinates, and
    /// [`GeometryError::DegenerateCenterline`] if fewer than 2 distinct points
    /// remain after collapsing.
    pub fn new(points: Vec<Point3>) -> Result<Self> {
        if points.len() < 2 {
            return Err(InputError::TooFewPoints {
                min: 2,
                actual: points.len(),
            }
            .into());
        }
        if let Some(index) = points
            .iter()
            .position(|p| !(p.x.is_finite() && p.y.is_finite() && p.z.is_finite()))
        {
            return Err(InputError::NonFiniteCoordinate { index }.into());
        }

        let input_len = points.len();
        let mut collapsed: Vec<Point3> = Vec::with_capacity(input_len);
        for p in points {
            match collapsed.last() {
                Some(prev) if (p - prev).norm() < TOLERANCE => {}
                _ => collapsed.push(p),
            }
        }

        if collapsed.len() < 2 {
            return Err(GeometryError::DegenerateCenterline(format!(
                "all {input_len} points are coincident"
            ))
            .into());
        }
        Ok(Self { points: collapsed })
    }

    /// Returns the ordered points.
    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Consumes the polyline, returning its points.
    #[must_use]
    pub fn into_points(self) -> Vec<Point3> {
        self.points
    }

    /// Returns the number of points (always at least 2).
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Returns the number of segments (`point_count - 1`).
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.points.len() - 1
    }

    /// Returns the first point.
    #[must_use]
    pub fn first(&self) -> Point3 {
        self.points[0]
    }

    /// Returns the last point.
    #[must_use]
    pub fn last(&self) -> Point3 {
        self.points[self.points.len() - 1]
    }

    /// Returns the total arc length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.points.windows(2).map(|w| (w[1] - w[0]).norm()).sum()
    }

    /// Returns the cumulative arc length at each point.
    #[must_use]
    pub fn cumulative_lengths(&self) -> Vec<f64> {
        cumulative_lengths(&self.points)
    }

    /// Returns a new polyline running in the opposite direction.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let mut points = self.points.clone();
        points.reverse();
        Self { points }
    }
}
