use crate::error::{InputError, Result};
use crate::geometry::{BranchSet, Polyline};

/// Selects one centerline branch from a [`BranchSet`].
#[derive(Debug, Clone, Copy)]
pub struct SelectBranch {
    index: usize,
}

impl SelectBranch {
    /// Creates a new `SelectBranch` operation.
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self { index }
    }

    /// Executes the selection, returning a copy of the branch.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::InvalidBranch`] if the index is outside
    /// `0..branch_count`.
    pub fn execute(&self, branches: &BranchSet) -> Result<Polyline> {
        branches.branch(self.index).cloned().ok_or_else(|| {
            InputError::InvalidBranch {
                index: self.index,
                count: branches.branch_count(),
            }
            .into()
        })
    }
}
