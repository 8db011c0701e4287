use std::collections::HashMap;

use super::{Point3, TOLERANCE};

/// Spatial hash that merges points lying within a tolerance of each other.
///
/// Points are bucketed by grid cell; a lookup searches the 3x3x3 cells around
/// the query, so every point within `tolerance` is found. When several stored
/// points match, the one inserted first wins.
#[derive(Debug)]
pub(crate) struct PointWelder {
    tolerance: f64,
    cell_size: f64,
    points: Vec<Point3>,
    cells: HashMap<(i64, i64, i64), Vec<usize>>,
}

impl PointWelder {
    pub(crate) fn new(tolerance: f64) -> Self {
        let tolerance = tolerance.max(0.0);
        Self {
            tolerance,
            cell_size: tolerance.max(TOLERANCE),
            points: Vec::new(),
            cells: HashMap::new(),
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn cell_key(&self, p: &Point3) -> (i64, i64, i64) {
        let inv = 1.0 / self.cell_size;
        (
            (p.x * inv).floor() as i64,
            (p.y * inv).floor() as i64,
            (p.z * inv).floor() as i64,
        )
    }

    /// Returns the index of the stored point `p` welds to, inserting `p` if
    /// none is within tolerance.
    pub(crate) fn ensure_point(&mut self, p: Point3) -> usize {
        let key = self.cell_key(&p);
        let tol_sq = self.tolerance * self.tolerance;

        let mut found: Option<usize> = None;
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let neighbor = (key.0 + dx, key.1 + dy, key.2 + dz);
                    let Some(entries) = self.cells.get(&neighbor) else {
                        continue;
                    };
                    for &idx in entries {
                        if (self.points[idx] - p).norm_squared() <= tol_sq
                            && !found.is_some_and(|best| best < idx)
                        {
                            found = Some(idx);
                        }
                    }
                }
            }
        }
        if let Some(idx) = found {
            return idx;
        }

        let idx = self.points.len();
        self.points.push(p);
        self.cells.entry(key).or_default().push(idx);
        idx
    }

    pub(crate) fn into_points(self) -> Vec<Point3> {
        self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearby_points_share_an_index() {
        let mut welder = PointWelder::new(1e-6);
        let a = welder.ensure_point(Point3::new(1.0, 2.0, 3.0));
        let b = welder.ensure_point(Point3::new(1.0 + 5e-7, 2.0, 3.0));
        let c = welder.ensure_point(Point3::new(1.0 + 5e-6, 2.0, 3.0));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(welder.into_points().len(), 2);
    }

    #[test]
    fn matches_across_cell_boundaries() {
        // Straddles the cell boundary at x = 0.
        let mut welder = PointWelder::new(1e-3);
        let a = welder.ensure_point(Point3::new(-2e-4, 0.0, 0.0));
        let b = welder.ensure_point(Point3::new(3e-4, 0.0, 0.0));
        assert_eq!(a, b);
    }

    #[test]
    fn earliest_match_wins() {
        let mut welder = PointWelder::new(1.0);
        let first = welder.ensure_point(Point3::new(0.0, 0.0, 0.0));
        let second = welder.ensure_point(Point3::new(1.5, 0.0, 0.0));
        // Within 1 of both stored points.
        assert_eq!(welder.ensure_point(Point3::new(0.8, 0.0, 0.0)), first);
        assert_ne!(first, second);
    }

    #[test]
    fn zero_tolerance_welds_only_identical_points() {
        let mut welder = PointWelder::new(0.0);
        let a = welder.ensure_point(Point3::new(1.0, 1.0, 1.0));
        assert_eq!(welder.ensure_point(Point3::new(1.0, 1.0, 1.0)), a);
        assert_ne!(welder.ensure_point(Point3::new(1.0, 1.0, 1.0 + 1e-12)), a);
    }
}
