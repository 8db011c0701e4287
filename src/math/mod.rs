pub mod arc_length;
pub(crate) mod weld;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
///
/// Points closer than this are considered coincident, and lengths below it
/// are treated as zero.
pub const TOLERANCE: f64 = 1e-9;
