//! Search policy.

use gridwalk_kernel::operators::action::DirectionOrder;

use crate::error::SearchError;

/// Knobs for one search run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPolicy {
    /// Cap on node expansions; `None` runs until a goal or exhaustion.
    pub expansion_budget: Option<u64>,
    /// Successor generation order; decides which equal-cost path wins.
    pub direction_order: DirectionOrder,
    /// Let the move generator drop successors the engine would discard anyway.
    pub prune_known_successors: bool,
}

impl SearchPolicy {
    /// # Errors
    ///
    /// [`SearchError::InvalidPolicy`] for a zero budget or a direction order
    /// that is not a permutation.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.expansion_budget == Some(0) {
            return Err(SearchError::InvalidPolicy {
                detail: "expansion budget must be at least 1".into(),
            });
        }
        if !self.direction_order.is_permutation() {
            return Err(SearchError::InvalidPolicy {
                detail: format!(
                    "direction order {} is not a permutation of U, R, D, L",
                    self.direction_order
                ),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn with_budget(mut self, budget: u64) -> Self {
        self.expansion_budget = Some(budget);
        self
    }
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            expansion_budget: None,
            direction_order: DirectionOrder::URDL,
            prune_known_successors: true,
        }
    }
}
