//! Parametric stent tube meshes swept along vessel centerlines.
//!
//! A stent is described by a [`StentSpec`](geometry::StentSpec) and placed on
//! one branch of a [`BranchSet`](geometry::BranchSet). The pipeline in
//! [`operations`] turns the two into a closed, triangulated tube
//! [`Mesh`](tessellation::Mesh).

pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod tessellation;

pub use error::{GeometryError, InputError, Result, StentError};
