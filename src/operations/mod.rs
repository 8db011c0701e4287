mod build_stent;
mod extract;
mod interpolate;
mod placement;
mod reduce;
mod select_branch;
mod smooth;

pub use build_stent::{BuildStent, BuildStents, StentStages};
pub use extract::ExtractSegment;
pub use interpolate::InterpolateSpline;
pub use placement::{DistributeStents, STENT_OVERLAP};
pub use reduce::ReduceControlPoints;
pub use select_branch::SelectBranch;
pub use smooth::{SmoothCenterline, MAX_DISPLACEMENT_RATIO, SMOOTHING_PASSES};
