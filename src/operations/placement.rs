use crate::error::{InputError, Result};
use crate::geometry::{BranchSet, StentSpec};

use super::SelectBranch;

/// Fraction of a stent's length that neighbouring stents overlap by.
pub const STENT_OVERLAP: f64 = 0.2;

/// Spreads several copies of a stent along its branch.
///
/// The copies share every parameter of the base spec except `position`.
/// A single stent keeps the base position. For more, the span they need is
/// `(count - 1) * length * (1 - STENT_OVERLAP)`, capped so the last stent
/// still fits on the branch. The span is centred on the base position,
/// clipped to `[0, 1]`, and the positions are spread evenly across it. When
/// the branch is too short for any span, every copy sits at the base
/// position.
#[derive(Debug, Clone, Copy)]
pub struct DistributeStents {
    count: usize,
}

impl DistributeStents {
    /// Creates a new distribution of `count` stents.
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self { count }
    }

    /// Executes the distribution, returning one spec per stent in order of
    /// increasing position.
    ///
    /// # Errors
    ///
    /// - `ParameterOutOfRange` if `count` is zero.
    /// - Any validation error of `base`.
    /// - `InvalidBranch` if `base.branch_index` is out of range.
    #[allow(clippy::cast_precision_loss)]
    pub fn execute(&self, base: &StentSpec, branches: &BranchSet) -> Result<Vec<StentSpec>> {
        if self.count == 0 {
            return Err(InputError::ParameterOutOfRange {
                parameter: "count",
                value: 0.0,
                min: 1.0,
                max: f64::INFINITY,
            }
            .into());
        }
        base.validate()?;
        let centerline = SelectBranch::new(base.branch_index).execute(branches)?;

        if self.count == 1 {
            return Ok(vec![*base]);
        }

        let total = centerline.length();
        let needed = (self.count - 1) as f64 * base.length * (1.0 - STENT_OVERLAP);
        let span = needed.min(total - base.length);
        if span <= 0.0 {
            tracing::debug!(
                count = self.count,
                branch_length = total,
                stent_length = base.length,
                "branch too short to spread stents"
            );
            return Ok(vec![*base; self.count]);
        }

        let half = span / (2.0 * total);
        let from = (base.position - half).max(0.0);
        let to = (base.position + half).min(1.0);
        let last = (self.count - 1) as f64;
        Ok((0..self.count)
            .map(|i| base.with_position(from + (to - from) * i as f64 / last))
            .collect())
    }
}
