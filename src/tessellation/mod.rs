pub mod frame;
mod tessellate_tube;

pub use frame::{rotation_minimizing_frames, Frame};
pub use tessellate_tube::TessellateTube;

use std::collections::HashMap;

use crate::math::weld::PointWelder;
use crate::math::{Point3, Vector3, TOLERANCE};

/// A triangle mesh with per-vertex normals.
///
/// Faces are wound counter-clockwise when seen from outside.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Unit vertex normals, one per vertex.
    pub normals: Vec<Vector3>,
    /// Triangle indices (each triple defines a triangle).
    pub faces: Vec<[u32; 3]>,
}

impl Mesh {
    /// Returns the number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangles.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Returns `true` if the mesh has no faces.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Appends another mesh, offsetting its indices.
    #[allow(clippy::cast_possible_truncation)]
    pub fn merge(&mut self, other: &Mesh) {
        let offset = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.normals.extend_from_slice(&other.normals);
        self.faces
            .extend(other.faces.iter().map(|f| [f[0] + offset, f[1] + offset, f[2] + offset]));
    }

    /// Returns `true` if the mesh is a closed, consistently oriented
    /// 2-manifold: every directed edge appears exactly once and its reverse
    /// appears exactly once, so every undirected edge borders two faces.
    ///
    /// Vertices at the same position (within [`TOLERANCE`]) count as one, so
    /// seams that duplicate vertices for separate normals stay closed.
    #[must_use]
    pub fn is_closed_manifold(&self) -> bool {
        if self.faces.is_empty() {
            return false;
        }
        let mut welder = PointWelder::new(TOLERANCE);
        let canonical: Vec<usize> = self
            .vertices
            .iter()
            .map(|&v| welder.ensure_point(v))
            .collect();

        let mut directed: HashMap<(usize, usize), usize> =
            HashMap::with_capacity(self.faces.len() * 3);
        for face in &self.faces {
            let mut welded = [0usize; 3];
            for (slot, &i) in welded.iter_mut().zip(face) {
                let Some(&c) = canonical.get(i as usize) else {
                    return false;
                };
                *slot = c;
            }
            let [a, b, c] = welded;
            if a == b || b == c || a == c {
                return false;
            }
            for edge in [(a, b), (b, c), (c, a)] {
                *directed.entry(edge).or_insert(0) += 1;
            }
        }
        directed
            .iter()
            .all(|(&(a, b), &count)| count == 1 && directed.get(&(b, a)) == Some(&1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A tetrahedron with outward-facing triangles.
    fn tetrahedron() -> Mesh {
        Mesh {
            vertices: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(0.0, 0.0, 1.0),
            ],
            normals: vec![Vector3::z(); 4],
            faces: vec![[0, 2, 1], [0, 1, 3], [1, 2, 3], [0, 3, 2]],
        }
    }

    #[test]
    fn tetrahedron_is_closed() {
        assert!(tetrahedron().is_closed_manifold());
    }

    #[test]
    fn missing_face_is_open() {
        let mut mesh = tetrahedron();
        mesh.faces.pop();
        assert!(!mesh.is_closed_manifold());
    }

    #[test]
    fn flipped_face_is_not_oriented() {
        let mut mesh = tetrahedron();
        mesh.faces[0] = [0, 1, 2];
        assert!(!mesh.is_closed_manifold());
    }

    #[test]
    fn empty_mesh_is_not_closed() {
        assert!(!Mesh::default().is_closed_manifold());
    }

    #[test]
    fn merge_offsets_indices() {
        let mut mesh = tetrahedron();
        mesh.merge(&tetrahedron());
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.face_count(), 8);
        assert_eq!(mesh.faces[4], [4, 6, 5]);
        assert!(mesh.is_closed_manifold());
    }

    #[test]
    fn duplicated_seam_vertices_are_welded() {
        // Vertex 4 duplicates vertex 1 and is used by one face.
        let mut mesh = tetrahedron();
        mesh.vertices.push(Point3::new(1.0, 0.0, 0.0));
        mesh.normals.push(Vector3::x());
        mesh.faces[2] = [4, 2, 3];
        assert!(mesh.is_closed_manifold());
    }

    #[test]
    fn out_of_range_index_is_not_closed() {
        let mut mesh = tetrahedron();
        mesh.faces[0] = [0, 2, 9];
        assert!(!mesh.is_closed_manifold());
    }
}
