//! Draft/committed filter state.
//!
//! Edits land in the draft only. Rendering reads the committed set, which
//! changes in one step on `apply`.

use tracing::debug;

use super::{FilterError, FilterSet};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StagedFilters {
    draft: FilterSet,
    committed: FilterSet,
}

impl StagedFilters {
    /// Start with the same set as draft and committed.
    pub fn new(initial: FilterSet) -> Self {
        Self {
            draft: initial.clone(),
            committed: initial,
        }
    }

    pub fn draft(&self) -> &FilterSet {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut FilterSet {
        &mut self.draft
    }

    pub fn committed(&self) -> &FilterSet {
        &self.committed
    }

    /// True when the draft differs from the committed set.
    pub fn has_pending_edits(&self) -> bool {
        self.draft != self.committed
    }

    /// Commit the draft. Returns whether the committed set changed.
    ///
    /// An invalid draft is left in place and nothing is committed.
    pub fn apply(&mut self) -> Result<bool, FilterError> {
        self.draft.validate()?;
        if !self.has_pending_edits() {
            return Ok(false);
        }
        self.committed = self.draft.clone();
        debug!("Applied filters: {:?}", self.committed);
        Ok(true)
    }

    /// Throw away uncommitted edits.
    pub fn discard(&mut self) {
        self.draft = self.committed.clone();
    }

    /// Return both draft and committed to defaults. Returns whether the
    /// committed set changed.
    pub fn reset(&mut self) -> bool {
        let changed = !self.committed.is_neutral();
        self.draft = FilterSet::default();
        self.committed = FilterSet::default();
        changed
    }
}
