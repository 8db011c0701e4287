use std::f64::consts::TAU;

use crate::error::{GeometryError, InputError, Result};
use crate::geometry::stent_spec::{check_positive, MIN_RESOLUTION_SIDES};
use crate::geometry::SampledCurve;
use crate::math::{Point3, Vector3};

use super::frame::{rotation_minimizing_frames, Frame};
use super::Mesh;

/// Sweeps a regular polygon along a sampled curve, producing a closed tube.
///
/// Each sample gets a ring of `sides` vertices at `radius` from the curve,
/// in the plane perpendicular to the local tangent of a rotation-minimizing
/// frame. Consecutive rings are joined by two triangles per side. Each end
/// is closed by a flat fan around a centre vertex; because the end tangents
/// are the one-sided end directions, both caps lie exactly perpendicular to
/// the curve at its endpoints.
///
/// Vertex layout: ring `i` occupies `i * sides .. (i + 1) * sides` and
/// carries radial normals. Each cap follows as a centre vertex plus its own
/// rim of `sides` vertices at the end ring's positions, all with the flat
/// cap normal (`-tangent` at the start, `+tangent` at the end), so the caps
/// shade flat while the wall shades smooth.
#[derive(Debug, Clone, Copy)]
pub struct TessellateTube {
    radius: f64,
    sides: usize,
}

impl TessellateTube {
    /// Creates a new tube tessellation.
    #[must_use]
    pub fn new(radius: f64, sides: usize) -> Self {
        Self { radius, sides }
    }

    /// Executes the tessellation along `curve`.
    ///
    /// # Errors
    ///
    /// - [`InputError::InvalidResolution`] if `sides < 3`.
    /// - `ParameterOutOfRange` if the radius is not finite and positive.
    /// - [`GeometryError::ZeroLengthStent`] if the curve has zero length.
    pub fn execute(&self, curve: &SampledCurve) -> Result<Mesh> {
        if self.sides < MIN_RESOLUTION_SIDES {
            return Err(InputError::InvalidResolution { sides: self.sides }.into());
        }
        check_positive("radius", self.radius)?;
        if curve.is_degenerate() {
            return Err(GeometryError::ZeroLengthStent.into());
        }

        let frames = rotation_minimizing_frames(curve.points())?;
        let mesh = self.sweep(&frames);
        tracing::trace!(
            vertices = mesh.vertex_count(),
            faces = mesh.face_count(),
            "tessellated tube"
        );
        Ok(mesh)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn sweep(&self, frames: &[Frame]) -> Mesh {
        let n_rings = frames.len();
        let n = self.sides;
        let vertex_total = n_rings * n + 2 * (n + 1);
        let face_total = 2 * n * (n_rings - 1) + 2 * n;

        let mut mesh = Mesh {
            vertices: Vec::with_capacity(vertex_total),
            normals: Vec::with_capacity(vertex_total),
            faces: Vec::with_capacity(face_total),
        };

        let angles: Vec<f64> = (0..n).map(|k| TAU * k as f64 / n as f64).collect();
        for frame in frames {
            for &angle in &angles {
                let radial = frame.radial(angle);
                mesh.vertices.push(frame.origin + radial * self.radius);
                mesh.normals.push(radial);
            }
        }

        // Lateral surface: ring i (a -> b) to ring i + 1 (c -> d).
        for ring in 0..n_rings - 1 {
            let base = ring * n;
            let next_base = base + n;
            for k in 0..n {
                let k1 = (k + 1) % n;
                let a = (base + k) as u32;
                let b = (base + k1) as u32;
                let c = (next_base + k) as u32;
                let d = (next_base + k1) as u32;
                mesh.faces.push([a, b, c]);
                mesh.faces.push([b, d, c]);
            }
        }

        // Caps get their own rims so the wall's radial normals stay off them.
        let first = &frames[0];
        let last = &frames[n_rings - 1];
        let start_rim = mesh.vertices[..n].to_vec();
        let end_rim = mesh.vertices[(n_rings - 1) * n..].to_vec();
        let start_center = push_cap(&mut mesh, first, &start_rim, -first.tangent);
        let end_center = push_cap(&mut mesh, last, &end_rim, last.tangent);

        for k in 0..n {
            let k1 = ((k + 1) % n) as u32;
            let k = k as u32;
            mesh.faces.push([start_center, start_center + 1 + k1, start_center + 1 + k]);
            mesh.faces.push([end_center, end_center + 1 + k, end_center + 1 + k1]);
        }

        mesh
    }
}

/// Appends a cap centre followed by its rim, all carrying the flat cap
/// `normal`, and returns the centre's index.
#[allow(clippy::cast_possible_truncation)]
fn push_cap(mesh: &mut Mesh, frame: &Frame, rim: &[Point3], normal: Vector3) -> u32 {
    let center = mesh.vertices.len() as u32;
    mesh.vertices.push(frame.origin);
    mesh.vertices.extend_from_slice(rim);
    mesh.normals.extend(std::iter::repeat(normal).take(rim.len() + 1));
    center
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
mod tests {
    use super::*;
    use crate::geometry::{ControlSkeleton, SAMPLE_COUNT};
    use crate::operations::InterpolateSpline;
    use crate::StentError;
    use approx::assert_relative_eq;

    fn distance_to_axis(point: &Point3, origin: &Point3, axis: &Vector3) -> f64 {
        let d = point - origin;
        (d - axis * axis.dot(&d)).norm()
    }

    fn straight_curve(length: f64) -> SampledCurve {
        SampledCurve::new(std::array::from_fn(|i| {
            Point3::new(0.0, 0.0, length * i as f64 / (SAMPLE_COUNT - 1) as f64)
        }))
    }

    fn bent_curve() -> SampledCurve {
        InterpolateSpline::new().execute(&ControlSkeleton::new([
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(10.0, 4.0, 0.0),
            Point3::new(18.0, 12.0, -3.0),
            Point3::new(20.0, 25.0, -8.0),
        ]))
    }

    #[test]
    fn straight_tube_counts() {
        let mesh = TessellateTube::new(2.0, 8).execute(&straight_curve(50.0)).unwrap();
        assert_eq!(mesh.vertex_count(), 8 * SAMPLE_COUNT + 2 * (8 + 1));
        assert_eq!(mesh.normals.len(), mesh.vertex_count());
        assert_eq!(mesh.face_count(), 40 * 8);
    }

    #[test]
    fn tube_is_closed_manifold_for_any_resolution() {
        for sides in [3, 4, 7, 16, 64] {
            let mesh = TessellateTube::new(1.5, sides).execute(&bent_curve()).unwrap();
            assert!(mesh.is_closed_manifold(), "{sides} sides");
        }
    }

    #[test]
    fn ring_vertices_lie_at_radius() {
        let curve = bent_curve();
        let sides = 12;
        let mesh = TessellateTube::new(2.5, sides).execute(&curve).unwrap();
        for (ring, center) in curve.points().iter().enumerate() {
            for k in 0..sides {
                let v = mesh.vertices[ring * sides + k];
                assert_relative_eq!((v - center).norm(), 2.5, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn normals_are_unit_and_outward() {
        let curve = bent_curve();
        let sides = 10;
        let mesh = TessellateTube::new(1.0, sides).execute(&curve).unwrap();
        for normal in &mesh.normals {
            assert_relative_eq!(normal.norm(), 1.0, epsilon = 1e-9);
        }
        for (ring, center) in curve.points().iter().enumerate() {
            for k in 0..sides {
                let idx = ring * sides + k;
                let outward = mesh.vertices[idx] - center;
                assert!(mesh.normals[idx].dot(&outward) > 0.0);
            }
        }
    }

    #[test]
    fn faces_wind_outward() {
        let curve = straight_curve(10.0);
        let mesh = TessellateTube::new(1.0, 8).execute(&curve).unwrap();
        let start_center = 8 * SAMPLE_COUNT;
        for face in &mesh.faces {
            let [a, b, c] = face.map(|i| mesh.vertices[i as usize]);
            let face_normal = (b - a).cross(&(c - a));
            let centroid = Point3::from((a.coords + b.coords + c.coords) / 3.0);
            let outward = if face[0] as usize == start_center {
                -Vector3::z()
            } else if face[0] as usize == start_center + 8 + 1 {
                Vector3::z()
            } else {
                Vector3::new(centroid.x, centroid.y, 0.0)
            };
            assert!(face_normal.dot(&outward) > 0.0);
        }
    }

    #[test]
    fn caps_are_perpendicular_to_end_tangents() {
        let curve = bent_curve();
        let sides = 16;
        let mesh = TessellateTube::new(2.0, sides).execute(&curve).unwrap();
        let pts = curve.points();
        let start_dir = (pts[1] - pts[0]).normalize();
        let end_dir = (pts[SAMPLE_COUNT - 1] - pts[SAMPLE_COUNT - 2]).normalize();
        let last_base = (SAMPLE_COUNT - 1) * sides;
        for k in 0..sides {
            assert_relative_eq!((mesh.vertices[k] - pts[0]).dot(&start_dir), 0.0, epsilon = 1e-9);
            assert_relative_eq!(
                (mesh.vertices[last_base + k] - pts[SAMPLE_COUNT - 1]).dot(&end_dir),
                0.0,
                epsilon = 1e-9
            );
        }
        let start_center = SAMPLE_COUNT * sides;
        assert_relative_eq!(mesh.normals[start_center], -start_dir, epsilon = 1e-12);
        assert_relative_eq!(mesh.normals[start_center + sides + 1], end_dir, epsilon = 1e-12);
    }

    #[test]
    fn cap_faces_are_flat_shaded() {
        let sides = 8;
        let mesh = TessellateTube::new(2.0, sides).execute(&straight_curve(30.0)).unwrap();
        let start_center = (SAMPLE_COUNT * sides) as u32;
        let end_center = start_center + sides as u32 + 1;
        let cap_faces: Vec<_> = mesh
            .faces
            .iter()
            .filter(|f| f[0] == start_center || f[0] == end_center)
            .collect();
        assert_eq!(cap_faces.len(), 2 * sides);
        for face in cap_faces {
            let expected = if face[0] == start_center {
                -Vector3::z()
            } else {
                Vector3::z()
            };
            for &i in face {
                assert_relative_eq!(mesh.normals[i as usize], expected, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn cap_rims_coincide_with_end_rings() {
        let sides = 6;
        let mesh = TessellateTube::new(1.0, sides).execute(&bent_curve()).unwrap();
        let start_rim = SAMPLE_COUNT * sides + 1;
        let end_rim = start_rim + sides + 1;
        let last_ring = (SAMPLE_COUNT - 1) * sides;
        for k in 0..sides {
            assert_eq!(mesh.vertices[start_rim + k], mesh.vertices[k]);
            assert_eq!(mesh.vertices[end_rim + k], mesh.vertices[last_ring + k]);
        }
    }

    #[test]
    fn straight_tube_is_a_cylinder() {
        let mesh = TessellateTube::new(2.0, 8).execute(&straight_curve(50.0)).unwrap();
        for v in &mesh.vertices[..8 * SAMPLE_COUNT] {
            let r = distance_to_axis(v, &Point3::origin(), &Vector3::z());
            assert_relative_eq!(r, 2.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn fewer_than_three_sides_fails() {
        let err = TessellateTube::new(1.0, 2).execute(&straight_curve(5.0)).unwrap_err();
        assert!(matches!(
            err,
            StentError::Input(InputError::InvalidResolution { sides: 2 })
        ));
    }

    #[test]
    fn non_positive_radius_fails() {
        assert!(TessellateTube::new(0.0, 8).execute(&straight_curve(5.0)).is_err());
    }

    #[test]
    fn degenerate_curve_is_zero_length_stent() {
        let curve = SampledCurve::new([Point3::new(1.0, 1.0, 1.0); SAMPLE_COUNT]);
        let err = TessellateTube::new(1.0, 8).execute(&curve).unwrap_err();
        assert!(matches!(
            err,
            StentError::Geometry(GeometryError::ZeroLengthStent)
        ));
    }
}
