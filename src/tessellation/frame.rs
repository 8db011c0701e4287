//! Rotation-minimizing frames along a sampled curve.
//!
//! Frames are propagated with the double-reflection method (Wang et al.,
//! "Computation of rotation minimizing frames", 2008), which carries the
//! normal from sample to sample without the flips a per-sample Frenet frame
//! suffers at inflection points and on straight runs.

use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

/// An orthonormal frame at a point on a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Point on the curve.
    pub origin: Point3,
    /// Unit tangent (forward along the curve).
    pub tangent: Vector3,
    /// Unit normal, perpendicular to the tangent.
    pub normal: Vector3,
    /// Unit binormal, `tangent × normal`.
    pub binormal: Vector3,
}

impl Frame {
    /// Creates a frame at `origin` with an arbitrary normal perpendicular to
    /// `tangent`.
    #[must_use]
    pub fn from_tangent(origin: Point3, tangent: Vector3) -> Self {
        let tangent = tangent.try_normalize(f64::EPSILON).unwrap_or_else(Vector3::z);
        let normal = find_perpendicular(&tangent);
        Self {
            origin,
            tangent,
            normal,
            binormal: tangent.cross(&normal),
        }
    }

    /// Returns the unit radial direction at `angle` around the tangent,
    /// measured from the normal towards the binormal.
    #[must_use]
    pub fn radial(&self, angle: f64) -> Vector3 {
        self.normal * angle.cos() + self.binormal * angle.sin()
    }

    /// Carries this frame to `origin` with the new unit `tangent` using a
    /// double reflection.
    fn transport(&self, origin: Point3, tangent: Vector3) -> Self {
        // First reflection: across the bisector plane of the two origins.
        let v1 = origin - self.origin;
        let c1 = v1.norm_squared();
        let (normal_l, tangent_l) = if c1 < TOLERANCE * TOLERANCE {
            (self.normal, self.tangent)
        } else {
            (
                self.normal - v1 * (2.0 / c1 * v1.dot(&self.normal)),
                self.tangent - v1 * (2.0 / c1 * v1.dot(&self.tangent)),
            )
        };

        // Second reflection: maps the reflected tangent onto the new one.
        let v2 = tangent - tangent_l;
        let c2 = v2.norm_squared();
        let normal = if c2 < f64::EPSILON {
            normal_l
        } else {
            normal_l - v2 * (2.0 / c2 * v2.dot(&normal_l))
        };

        // Re-orthonormalize against accumulated rounding.
        let normal = (normal - tangent * tangent.dot(&normal))
            .try_normalize(f64::EPSILON)
            .unwrap_or_else(|| find_perpendicular(&tangent));

        Self {
            origin,
            tangent,
            normal,
            binormal: tangent.cross(&normal),
        }
    }
}

/// Returns a unit vector perpendicular to the unit vector `v`, built from the
/// coordinate axis least aligned with it.
fn find_perpendicular(v: &Vector3) -> Vector3 {
    let (ax, ay, az) = (v.x.abs(), v.y.abs(), v.z.abs());
    let axis = if ax <= ay && ax <= az {
        Vector3::x()
    } else if ay <= az {
        Vector3::y()
    } else {
        Vector3::z()
    };
    v.cross(&axis)
        .try_normalize(f64::EPSILON)
        .unwrap_or_else(Vector3::y)
}

/// Computes a rotation-minimizing frame at every point of a curve.
///
/// The tangent at the first and last point is the one-sided difference to
/// its neighbour, so the end frames are exactly perpendicular to the curve's
/// end direction. Interior tangents are central differences. A repeated
/// point reuses the previous tangent.
///
/// # Errors
///
/// Returns [`GeometryError::ZeroLengthStent`] if the curve has fewer than two
/// points or all its points coincide.
pub fn rotation_minimizing_frames(points: &[Point3]) -> Result<Vec<Frame>> {
    let n = points.len();
    let Some(first_dir) = points
        .windows(2)
        .find_map(|w| (w[1] - w[0]).try_normalize(TOLERANCE))
    else {
        return Err(GeometryError::ZeroLengthStent.into());
    };

    let mut tangents = Vec::with_capacity(n);
    let mut previous = first_dir;
    for i in 0..n {
        let raw = if i == 0 {
            points[1] - points[0]
        } else if i == n - 1 {
            points[n - 1] - points[n - 2]
        } else {
            points[i + 1] - points[i - 1]
        };
        let tangent = raw.try_normalize(TOLERANCE).unwrap_or(previous);
        tangents.push(tangent);
        previous = tangent;
    }

    let mut frames = Vec::with_capacity(n);
    let mut frame = Frame::from_tangent(points[0], tangents[0]);
    frames.push(frame);
    for i in 1..n {
        frame = frame.transport(points[i], tangents[i]);
        frames.push(frame);
    }
    Ok(frames)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_orthonormal(frame: &Frame) {
        assert_relative_eq!(frame.tangent.norm(), 1.0, epsilon = 1e-10);
        assert_relative_eq!(frame.normal.norm(), 1.0, epsilon = 1e-10);
        assert_relative_eq!(frame.binormal.norm(), 1.0, epsilon = 1e-10);
        assert_relative_eq!(frame.tangent.dot(&frame.normal), 0.0, epsilon = 1e-10);
        assert_relative_eq!(frame.tangent.dot(&frame.binormal), 0.0, epsilon = 1e-10);
        assert_relative_eq!(frame.normal.dot(&frame.binormal), 0.0, epsilon = 1e-10);
    }

    fn helix() -> Vec<Point3> {
        (0..40)
            .map(|i| {
                let a = f64::from(i) * 0.2;
                Point3::new(5.0 * a.cos(), 5.0 * a.sin(), f64::from(i) * 0.5)
            })
            .collect()
    }

    #[test]
    fn from_tangent_is_orthonormal() {
        for t in [Vector3::x(), Vector3::y(), Vector3::z(), Vector3::new(1.0, -2.0, 0.5)] {
            assert_orthonormal(&Frame::from_tangent(Point3::origin(), t));
        }
    }

    #[test]
    fn straight_line_has_no_twist() {
        let points: Vec<Point3> = (0..10)
            .map(|i| Point3::new(0.0, 0.0, f64::from(i)))
            .collect();
        let frames = rotation_minimizing_frames(&points).unwrap();
        assert_eq!(frames.len(), 10);
        for frame in &frames {
            assert_relative_eq!(frame.tangent, Vector3::z(), epsilon = 1e-12);
            assert_relative_eq!(frame.normal, frames[0].normal, epsilon = 1e-12);
        }
    }

    #[test]
    fn helix_frames_stay_orthonormal() {
        let frames = rotation_minimizing_frames(&helix()).unwrap();
        for frame in &frames {
            assert_orthonormal(frame);
        }
    }

    #[test]
    fn consecutive_frames_rotate_minimally() {
        // Normals of neighbouring frames turn no further than the tangents
        // (up to discretisation error): there is no spin about the tangent.
        let frames = rotation_minimizing_frames(&helix()).unwrap();
        for w in frames.windows(2) {
            let tangent_turn = w[0].tangent.angle(&w[1].tangent);
            let normal_turn = w[0].normal.angle(&w[1].normal);
            assert!(normal_turn <= tangent_turn * 1.05 + 1e-9);
        }
    }

    #[test]
    fn end_tangents_are_one_sided() {
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
        ];
        let frames = rotation_minimizing_frames(&points).unwrap();
        assert_relative_eq!(frames[0].tangent, Vector3::x(), epsilon = 1e-12);
        assert_relative_eq!(frames[2].tangent, Vector3::y(), epsilon = 1e-12);
    }

    #[test]
    fn coincident_points_fail() {
        let points = vec![Point3::new(1.0, 2.0, 3.0); 5];
        assert!(rotation_minimizing_frames(&points).is_err());
        assert!(rotation_minimizing_frames(&[Point3::origin()]).is_err());
    }
}
