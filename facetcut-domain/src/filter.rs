use crate::error::PlanError;
use alloy_primitives::{Address, Selector};
use facetcut_types::cut::Action;
use facetcut_types::filter::{ActionFilters, Filter, FilterPair};
use std::collections::BTreeSet;

/// The filter names `contract`, or is the zero-address wildcard.
pub fn contract_matches(filter: &Filter, contract: Address) -> bool {
    filter.is_wildcard() || filter.contract == contract
}

pub fn selector_matches(filter: &Filter, selector: &Selector) -> bool {
    filter.selectors.contains(selector)
}

pub fn matches(filter: &Filter, contract: Address, selector: &Selector) -> bool {
    contract_matches(filter, contract) && selector_matches(filter, selector)
}

/// Decide whether a candidate `(contract, selector)` may become part of the cut.
///
/// A non-empty `only` list wins over `except`; with both empty everything is admitted.
pub fn admits(only: &[Filter], except: &[Filter], contract: Address, selector: &Selector) -> bool {
    if !only.is_empty() {
        return only.iter().any(|f| matches(f, contract, selector));
    }
    if !except.is_empty() {
        return !except.iter().any(|f| matches(f, contract, selector));
    }
    true
}

/// Reject filter sets where one action's `only` and `except` lists name the same contract.
///
/// Only literal address equality counts; a wildcard on one side does not conflict with a
/// concrete address on the other.
pub fn validate(filters: &ActionFilters) -> Result<(), PlanError> {
    for action in Action::ALL {
        validate_pair(action, filters.pair(action))?;
    }
    Ok(())
}

/// Check a single action's pair.
pub fn validate_pair(action: Action, pair: &FilterPair) -> Result<(), PlanError> {
    let only: BTreeSet<Address> = pair.only.iter().map(|f| f.contract).collect();
    if let Some(f) = pair.except.iter().find(|f| only.contains(&f.contract)) {
        return Err(PlanError::ConflictingFilters {
            action,
            contract: f.contract,
        });
    }
    Ok(())
}
