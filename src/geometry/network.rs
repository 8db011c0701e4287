use std::collections::HashSet;

use crate::math::weld::PointWelder;
use crate::math::Point3;

/// Classification of a node in the centerline network by its degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Degree 1: a vessel end.
    DeadEnd,
    /// Degree 2: a point in the middle of a branch.
    Interior,
    /// Degree 3 or more: a bifurcation.
    Junction,
}

/// A welded node of the centerline network.
#[derive(Debug, Clone)]
pub struct Node {
    pub point: Point3,
    pub kind: NodeKind,
}

/// The centerline network: welded nodes plus undirected edges between them.
#[derive(Debug)]
pub struct Network {
    pub nodes: Vec<Node>,
    pub edges: Vec<(usize, usize)>,
    /// node index -> list of (edge index, neighbour node index), in edge order.
    adjacency: Vec<Vec<(usize, usize)>>,
}

impl Network {
    /// Builds a network from raw segments.
    ///
    /// Endpoints closer than `weld_tolerance` become one node. Zero-length
    /// and duplicate edges are dropped.
    #[must_use]
    pub fn build(segments: &[(Point3, Point3)], weld_tolerance: f64) -> Self {
        let mut welder = PointWelder::new(weld_tolerance);
        let mut edges: Vec<(usize, usize)> = Vec::new();
        let mut seen: HashSet<(usize, usize)> = HashSet::with_capacity(segments.len());

        for &(a, b) in segments {
            let si = welder.ensure_point(a);
            let ei = welder.ensure_point(b);
            if si == ei {
                continue;
            }
            if seen.insert((si.min(ei), si.max(ei))) {
                edges.push((si, ei));
            }
        }
        let points = welder.into_points();

        let mut adjacency: Vec<Vec<(usize, usize)>> = vec![Vec::new(); points.len()];
        for (edge_idx, &(si, ei)) in edges.iter().enumerate() {
            adjacency[si].push((edge_idx, ei));
            adjacency[ei].push((edge_idx, si));
        }

        let nodes = points
            .into_iter()
            .zip(&adjacency)
            .map(|(point, adj)| Node {
                point,
                kind: match adj.len() {
                    2 => NodeKind::Interior,
                    0 | 1 => NodeKind::DeadEnd,
                    _ => NodeKind::Junction,
                },
            })
            .collect();

        Self {
            nodes,
            edges,
            adjacency,
        }
    }

    /// Partitions the edges into maximal simple paths.
    ///
    /// Paths start and stop at dead ends and junctions. Edges not reached
    /// that way form closed loops of interior nodes; each loop is emitted
    /// starting and ending at its lowest-index node. The order is
    /// deterministic: by start node index, then by incident edge order.
    #[must_use]
    pub fn branches(&self) -> Vec<Vec<Point3>> {
        let mut used = vec![false; self.edges.len()];
        let mut paths = Vec::new();

        for (node_idx, node) in self.nodes.iter().enumerate() {
            if node.kind == NodeKind::Interior {
                continue;
            }
            for &(edge_idx, _) in &self.adjacency[node_idx] {
                if used[edge_idx] {
                    continue;
                }
                let path = self.walk(node_idx, edge_idx, &mut used);
                paths.push(path);
            }
        }

        // Whatever is left is made of closed loops.
        for edge_idx in 0..self.edges.len() {
            if used[edge_idx] {
                continue;
            }
            let (si, ei) = self.edges[edge_idx];
            let start = si.min(ei);
            paths.push(self.walk(start, edge_idx, &mut used));
        }

        paths
    }

    /// Walks from `start` along `first_edge` until a non-interior node is
    /// reached or the walk returns to `start`.
    fn walk(&self, start: usize, first_edge: usize, used: &mut [bool]) -> Vec<Point3> {
        let mut path = vec![self.nodes[start].point];
        let mut current = start;
        let mut edge = first_edge;

        loop {
            used[edge] = true;
            let (si, ei) = self.edges[edge];
            let next = if si == current { ei } else { si };
            path.push(self.nodes[next].point);
            current = next;

            if current == start || self.nodes[current].kind != NodeKind::Interior {
                break;
            }
            let Some(&(next_edge, _)) = self.adjacency[current]
                .iter()
                .find(|&&(e, _)| !used[e])
            else {
                break;
            };
            edge = next_edge;
        }

        path
    }
}
