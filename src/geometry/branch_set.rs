use crate::error::{InputError, Result};
use crate::math::{Point3, Vector3};

use super::network::Network;
use super::Polyline;

/// One or more centerline branches indexed `0..N` in detection order.
///
/// A set with a single branch represents an unbranched vessel.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchSet {
    branches: Vec<Polyline>,
}

/// Summary of a single branch, suitable for labelling it in a host UI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchInfo {
    pub index: usize,
    /// Arc length of the branch.
    pub length: f64,
    pub point_count: usize,
    pub start: Point3,
    pub end: Point3,
    /// Unit chord direction from `start` to `end`, or zero for a closed loop.
    pub direction: Vector3,
}

impl BranchSet {
    /// Creates a branch set from already-separated branches.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::EmptyBranchSet`] if `branches` is empty.
    pub fn new(branches: Vec<Polyline>) -> Result<Self> {
        if branches.is_empty() {
            return Err(InputError::EmptyBranchSet.into());
        }
        Ok(Self { branches })
    }

    /// Creates an unbranched set holding a single centerline.
    #[must_use]
    pub fn single(centerline: Polyline) -> Self {
        Self {
            branches: vec![centerline],
        }
    }

    /// Creates one branch per ordered point path.
    ///
    /// Every path becomes a branch, including two-point paths: a single
    /// straight segment is a valid centerline, and keeping it keeps branch
    /// indices stable for the caller.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no paths or any path is not a valid
    /// [`Polyline`].
    pub fn from_point_paths(paths: Vec<Vec<Point3>>) -> Result<Self> {
        let branches = paths
            .into_iter()
            .map(Polyline::new)
            .collect::<Result<Vec<_>>>()?;
        Self::new(branches)
    }

    /// Decomposes an unordered set of line segments into branches.
    ///
    /// Segment endpoints within `weld_tolerance` of each other are treated as
    /// the same network node. The edges are partitioned into maximal simple
    /// paths between vessel ends and bifurcations; closed loops become their
    /// own branch. A path made of one segment is kept as a two-point branch.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::EmptyBranchSet`] if the segments contain no
    /// non-degenerate edge.
    pub fn from_segments(segments: &[(Point3, Point3)], weld_tolerance: f64) -> Result<Self> {
        let network = Network::build(segments, weld_tolerance);
        tracing::trace!(
            nodes = network.nodes.len(),
            edges = network.edges.len(),
            "built centerline network"
        );
        Self::from_point_paths(network.branches())
    }

    /// Returns the number of branches (always at least 1).
    #[must_use]
    pub fn branch_count(&self) -> usize {
        self.branches.len()
    }

    /// Returns the branch at `index`, if any.
    #[must_use]
    pub fn branch(&self, index: usize) -> Option<&Polyline> {
        self.branches.get(index)
    }

    /// Iterates over the branches in index order.
    pub fn iter(&self) -> impl Iterator<Item = &Polyline> {
        self.branches.iter()
    }

    /// Returns a summary of every branch in index order.
    #[must_use]
    pub fn summaries(&self) -> Vec<BranchInfo> {
        self.branches
            .iter()
            .enumerate()
            .map(|(index, branch)| {
                let start = branch.first();
                let end = branch.last();
                BranchInfo {
                    index,
                    length: branch.length(),
                    point_count: branch.point_count(),
                    start,
                    end,
                    direction: (end - start)
                        .try_normalize(f64::EPSILON)
                        .unwrap_or_else(Vector3::zeros),
                }
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::StentError;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn empty_set_fails() {
        let err = BranchSet::new(vec![]).unwrap_err();
        assert!(matches!(err, StentError::Input(InputError::EmptyBranchSet)));
    }

    #[test]
    fn from_point_paths_keeps_order() {
        let set = BranchSet::from_point_paths(vec![
            vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)],
            vec![p(0.0, 0.0, 0.0), p(0.0, 2.0, 0.0)],
        ])
        .unwrap();
        assert_eq!(set.branch_count(), 2);
        assert_relative_eq!(set.branch(1).unwrap().length(), 2.0);
        assert!(set.branch(2).is_none());
    }

    #[test]
    fn from_point_paths_rejects_bad_branch() {
        let result = BranchSet::from_point_paths(vec![vec![p(0.0, 0.0, 0.0)]]);
        assert!(result.is_err());
    }

    #[test]
    fn from_segments_y_shape() {
        let segments = vec![
            (p(0.0, 0.0, 0.0), p(0.0, 0.0, -10.0)),
            (p(0.0, 0.0, -10.0), p(-5.0, 0.0, -20.0)),
            (p(0.0, 0.0, -10.0), p(5.0, 0.0, -20.0)),
        ];
        let set = BranchSet::from_segments(&segments, 1e-6).unwrap();
        assert_eq!(set.branch_count(), 3);
    }

    #[test]
    fn from_segments_empty_fails() {
        let segments = vec![(p(1.0, 1.0, 1.0), p(1.0, 1.0, 1.0))];
        assert!(BranchSet::from_segments(&segments, 1e-6).is_err());
    }

    #[test]
    fn summaries_describe_branches() {
        let set = BranchSet::single(
            Polyline::new(vec![p(0.0, 0.0, 0.0), p(0.0, 0.0, -3.0), p(0.0, 0.0, -4.0)]).unwrap(),
        );
        let info = set.summaries();
        assert_eq!(info.len(), 1);
        assert_eq!(info[0].index, 0);
        assert_eq!(info[0].point_count, 3);
        assert_relative_eq!(info[0].length, 4.0);
        assert_relative_eq!(info[0].direction.z, -1.0);
    }

    #[test]
    fn single_segment_paths_are_kept() {
        let segments = vec![
            (Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 0.0, -10.0)),
            (Point3::new(0.0, 0.0, -10.0), Point3::new(-4.0, 0.0, -20.0)),
            (Point3::new(0.0, 0.0, -10.0), Point3::new(4.0, 0.0, -20.0)),
        ];
        let set = BranchSet::from_segments(&segments, 1e-6).unwrap();
        assert_eq!(set.branch_count(), 3);
        assert!(set.iter().all(|branch| branch.point_count() == 2));
    }
}
