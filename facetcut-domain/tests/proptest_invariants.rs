//! Property-based tests for the filter engine and the cut aggregator.
//!
//! These tests verify that:
//! - Filtering without constraints admits everything
//! - Aggregated output has one group per (action, target) holding the union of its selectors
//! - Groups appear in first-seen order
//! - Conflicting filters are always rejected

use alloy_primitives::{Address, Selector};
use facetcut_domain::{PlanError, admits, aggregate, validate};
use facetcut_types::cut::{Action, FacetCut};
use facetcut_types::filter::{ActionFilters, Filter};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn arb_action() -> impl Strategy<Value = Action> {
    prop_oneof![Just(Action::Add), Just(Action::Replace), Just(Action::Remove)]
}

/// Small pools so that targets and selectors repeat often.
fn arb_address() -> impl Strategy<Value = Address> {
    (1u8..5).prop_map(Address::repeat_byte)
}

fn arb_selector() -> impl Strategy<Value = Selector> {
    (0u8..12).prop_map(|b| Selector::from([b, 0, 0, b]))
}

fn arb_cut() -> impl Strategy<Value = FacetCut> {
    (
        arb_action(),
        arb_address(),
        prop::collection::vec(arb_selector(), 1..6),
    )
        .prop_map(|(action, target, selectors)| match action {
            Action::Add => FacetCut::add(target, selectors),
            Action::Replace => FacetCut::replace(target, selectors),
            Action::Remove => FacetCut::remove(selectors),
        })
}

proptest! {
    /// No filters means no restriction.
    #[test]
    fn unconstrained_filters_admit_everything(
        contract in any::<[u8; 20]>(),
        selector in any::<[u8; 4]>(),
    ) {
        prop_assert!(admits(&[], &[], Address::from(contract), &Selector::from(selector)));
    }

    /// Each (action, target) appears once and carries exactly the union of its selectors.
    #[test]
    fn aggregate_dedups_groups_and_selectors(cuts in prop::collection::vec(arb_cut(), 0..12)) {
        let out = aggregate(cuts.clone());

        let keys: Vec<(Action, Address)> = out.cuts.iter().map(|c| (c.action, c.target)).collect();
        let unique: BTreeSet<(Action, Address)> = keys.iter().copied().collect();
        prop_assert_eq!(keys.len(), unique.len());

        for group in &out.cuts {
            let expected: BTreeSet<Selector> = cuts
                .iter()
                .filter(|c| c.action == group.action && c.target == group.target)
                .flat_map(|c| c.selectors.iter().copied())
                .collect();
            let got: BTreeSet<Selector> = group.selectors.iter().copied().collect();
            prop_assert_eq!(got.len(), group.selectors.len(), "selectors must be unique");
            prop_assert_eq!(got, expected);
        }
    }

    /// Output group order is the order of first appearance in the input.
    #[test]
    fn aggregate_preserves_first_seen_order(cuts in prop::collection::vec(arb_cut(), 0..12)) {
        let out = aggregate(cuts.clone());

        let mut first_seen: Vec<(Action, Address)> = Vec::new();
        for c in &cuts {
            let key = (c.action, c.target);
            if !first_seen.contains(&key) {
                first_seen.push(key);
            }
        }
        let got: Vec<(Action, Address)> = out.cuts.iter().map(|c| (c.action, c.target)).collect();
        prop_assert_eq!(got, first_seen);
    }

    /// Aggregation never invents or mutates groups, even when it warns.
    #[test]
    fn aggregate_is_idempotent(cuts in prop::collection::vec(arb_cut(), 0..12)) {
        let once = aggregate(cuts);
        let twice = aggregate(once.cuts.clone());
        prop_assert_eq!(once.cuts, twice.cuts);
        prop_assert_eq!(once.warnings, twice.warnings);
    }

    /// An only/except pair naming the same contract is always rejected.
    #[test]
    fn shared_contract_is_conflict(
        action in arb_action(),
        contract in arb_address(),
        a in arb_selector(),
        b in arb_selector(),
    ) {
        let filters = ActionFilters::from_filters([
            Filter::only(action, contract, [a]),
            Filter::except(action, contract, [b]),
        ]);
        let rejected = matches!(validate(&filters), Err(PlanError::ConflictingFilters { .. }));
        prop_assert!(rejected);
    }
}
