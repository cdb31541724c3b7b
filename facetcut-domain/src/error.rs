use alloy_primitives::{Address, Selector};
use facetcut_types::cut::Action;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    /// The same contract is named by an `only` and an `except` filter of one action.
    #[error("conflicting filters: {contract} is in both only and except filters for {action}")]
    ConflictingFilters { action: Action, contract: Address },

    #[error("no {action} changes detected")]
    NoChangesDetected { action: Action },

    /// Raised instead of a warning when the planner runs in strict mode.
    #[error("selector {selector} appears in more than one cut (also {action} for {target})")]
    SelectorCollision {
        selector: Selector,
        action: Action,
        target: Address,
    },

    #[error("ledger error: {0:#}")]
    Ledger(#[from] anyhow::Error),
}

impl PlanError {
    /// Errors caused by the caller's inputs rather than by the ledger.
    pub fn is_policy_block(&self) -> bool {
        matches!(
            self,
            PlanError::ConflictingFilters { .. } | PlanError::SelectorCollision { .. }
        )
    }
}
