pub mod branch_set;
pub mod network;
pub mod polyline;
pub mod skeleton;
pub mod stent_spec;

pub use branch_set::{BranchInfo, BranchSet};
pub use polyline::Polyline;
pub use skeleton::{ControlSkeleton, SampledCurve, SAMPLE_COUNT, SKELETON_POINT_COUNT};
pub use stent_spec::StentSpec;
