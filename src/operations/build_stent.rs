use crate::error::{Result, StentError};
use crate::geometry::{BranchSet, ControlSkeleton, Polyline, SampledCurve, StentSpec};
use crate::tessellation::{Mesh, TessellateTube};

use super::{ExtractSegment, InterpolateSpline, ReduceControlPoints, SelectBranch, SmoothCenterline};

/// Every intermediate product of a single stent build.
#[derive(Debug, Clone)]
pub struct StentStages {
    /// Selected branch after smoothing.
    pub centerline: Polyline,
    /// Portion of the centerline covered by the stent.
    pub sub_path: Polyline,
    /// Four-point control skeleton of the sub-path.
    pub skeleton: ControlSkeleton,
    /// Spline samples the tube is swept along.
    pub curve: SampledCurve,
    /// Resulting tube.
    pub mesh: Mesh,
}

/// Builds one stent tube from a branch set.
///
/// Runs branch selection, smoothing, extraction, reduction, interpolation
/// and tessellation in order. The [`StentSpec`] is validated before any
/// geometry is touched, so a bad parameter never yields a partial result.
///
/// # Example
///
/// ```
/// use stentmesh::geometry::{BranchSet, Polyline, StentSpec};
/// use stentmesh::math::Point3;
/// use stentmesh::operations::BuildStent;
///
/// let line = Polyline::new(vec![Point3::origin(), Point3::new(0.0, 0.0, 100.0)]).unwrap();
/// let spec = StentSpec::default().with_length(30.0).with_resolution(8);
/// let mesh = BuildStent::new(spec).execute(&BranchSet::single(line)).unwrap();
/// assert_eq!(mesh.vertex_count(), 8 * 20 + 2 * (8 + 1));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BuildStent {
    spec: StentSpec,
}

impl BuildStent {
    /// Creates a new stent build.
    #[must_use]
    pub fn new(spec: StentSpec) -> Self {
        Self { spec }
    }

    /// Executes the build and returns the tube mesh.
    ///
    /// # Errors
    ///
    /// Returns an input error for an invalid spec or branch index and a
    /// geometry error if the stent collapses to zero length.
    pub fn execute(&self, branches: &BranchSet) -> Result<Mesh> {
        self.execute_stages(branches).map(|stages| stages.mesh)
    }

    /// Executes the build and returns every intermediate product.
    ///
    /// # Errors
    ///
    /// Same as [`BuildStent::execute`].
    pub fn execute_stages(&self, branches: &BranchSet) -> Result<StentStages> {
        let spec = &self.spec;
        spec.validate()?;

        let branch = SelectBranch::new(spec.branch_index).execute(branches)?;
        let centerline = SmoothCenterline::new(spec.smoothing).execute(&branch)?;
        let sub_path = ExtractSegment::new(spec.position, spec.length).execute(&centerline)?;
        let skeleton = ReduceControlPoints::new().execute(&sub_path);
        let curve = InterpolateSpline::new().execute(&skeleton);
        let mesh = TessellateTube::new(spec.radius, spec.resolution_sides).execute(&curve)?;

        tracing::debug!(
            branch = spec.branch_index,
            position = spec.position,
            stent_length = sub_path.length(),
            vertices = mesh.vertex_count(),
            faces = mesh.face_count(),
            "built stent"
        );

        Ok(StentStages {
            centerline,
            sub_path,
            skeleton,
            curve,
            mesh,
        })
    }
}

/// Builds several stents independently against the same branch set.
///
/// One stent failing has no effect on the others. With the `parallel`
/// feature the stents are built on rayon's global pool; results keep the
/// order of the input either way.
#[derive(Debug, Clone)]
pub struct BuildStents {
    specs: Vec<StentSpec>,
}

impl BuildStents {
    /// Creates a new batch build.
    #[must_use]
    pub fn new(specs: Vec<StentSpec>) -> Self {
        Self { specs }
    }

    /// Executes the batch, returning one result per spec.
    #[must_use]
    pub fn execute(&self, branches: &BranchSet) -> Vec<Result<Mesh>> {
        #[cfg(feature = "parallel")]
        {
            use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
            self.specs
                .par_iter()
                .map(|spec| BuildStent::new(*spec).execute(branches))
                .collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            self.specs
                .iter()
                .map(|spec| BuildStent::new(*spec).execute(branches))
                .collect()
        }
    }

    /// Executes the batch and merges every successful tube into one mesh.
    ///
    /// Failures are returned alongside the merged mesh with the index of the
    /// spec that produced them.
    #[must_use]
    pub fn execute_merged(&self, branches: &BranchSet) -> (Mesh, Vec<(usize, StentError)>) {
        let mut merged = Mesh::default();
        let mut failures = Vec::new();
        for (index, result) in self.execute(branches).into_iter().enumerate() {
            match result {
                Ok(mesh) => merged.merge(&mesh),
                Err(err) => {
                    tracing::warn!(index, error = %err, "stent build failed");
                    failures.push((index, err));
                }
            }
        }
        (merged, failures)
    }
}
