//! End-to-end planning scenarios against an in-memory ledger.

use alloy_primitives::{Address, Selector};
use facetcut_domain::{
    InMemoryLedger, LedgerView, PlanError, Planner, PlannerConfig, ScanOutcome, aggregate,
    submit_cut,
};
use facetcut_types::cut::{Action, Facet, FacetCut};
use facetcut_types::diagnostics::Warning;
use facetcut_types::filter::{ActionFilters, Filter};
use pretty_assertions::assert_eq;

fn aaa() -> Address {
    Address::repeat_byte(0xaa)
}

fn bbb() -> Address {
    Address::repeat_byte(0xbb)
}

fn diamond() -> Address {
    Address::repeat_byte(0xdd)
}

fn s_1234() -> Selector {
    "0x12345678".parse().expect("selector")
}

fn s_dead() -> Selector {
    "0xdeadbeef".parse().expect("selector")
}

fn planner(filters: Vec<Filter>) -> Planner {
    Planner::new(PlannerConfig {
        diamond: diamond(),
        filters: ActionFilters::from_filters(filters),
        strict: false,
    })
}

#[test]
fn addition_into_empty_diamond() {
    let ledger = InMemoryLedger::new(vec![]);
    let desired = vec![Facet::new(aaa(), [s_1234()])];

    let out = planner(vec![])
        .compute_additions(&ledger, &desired)
        .unwrap();

    assert_eq!(out, ScanOutcome::Found(vec![FacetCut::add(aaa(), [s_1234()])]));
}

#[test]
fn replacement_moves_selector_to_new_facet() {
    let ledger = InMemoryLedger::new(vec![Facet::new(aaa(), [s_1234()])]);
    let desired = vec![Facet::new(bbb(), [s_1234()])];
    let p = planner(vec![]);

    let replaced = p.compute_replacements(&ledger, &desired).unwrap();
    assert_eq!(
        replaced,
        ScanOutcome::Found(vec![FacetCut::replace(bbb(), [s_1234()])])
    );

    let added = p.compute_additions(&ledger, &desired).unwrap();
    assert!(added.is_empty());
    assert!(matches!(
        added.into_cuts_strict(),
        Err(PlanError::NoChangesDetected { action: Action::Add })
    ));
}

#[test]
fn removal_of_orphaned_selector() {
    let ledger = InMemoryLedger::new(vec![Facet::new(aaa(), [s_dead()])]);

    let out = planner(vec![]).compute_removals(&ledger, &[]).unwrap();

    assert_eq!(out, ScanOutcome::Found(vec![FacetCut::remove([s_dead()])]));
}

#[test]
fn except_filter_suppresses_addition() {
    let ledger = InMemoryLedger::new(vec![]);
    let desired = vec![Facet::new(aaa(), [s_1234()])];
    let p = planner(vec![Filter::except(Action::Add, aaa(), [s_1234()])]);

    let out = p.compute_additions(&ledger, &desired).unwrap();
    assert!(out.is_empty());
}

#[test]
fn only_filter_restricts_removals_to_listed_selectors() {
    let ledger = InMemoryLedger::new(vec![Facet::new(aaa(), [s_1234(), s_dead()])]);
    let p = planner(vec![Filter::only(Action::Remove, Address::ZERO, [s_dead()])]);

    let out = p.compute_removals(&ledger, &[]).unwrap();
    assert_eq!(out, ScanOutcome::Found(vec![FacetCut::remove([s_dead()])]));
}

#[test]
fn collision_warning_keeps_both_groups() {
    let out = aggregate([
        FacetCut::add(aaa(), [s_1234()]),
        FacetCut::remove([s_1234()]),
    ]);

    assert_eq!(out.cuts.len(), 2);
    assert_eq!(
        out.warnings,
        vec![Warning::SelectorCollision {
            selector: s_1234(),
            action: Action::Remove,
            target: Address::ZERO,
        }]
    );
}

#[test]
fn diamond_own_facet_is_left_alone() {
    let ledger = InMemoryLedger::new(vec![
        Facet::new(diamond(), [s_dead()]),
        Facet::new(aaa(), [s_1234()]),
    ]);
    let desired = vec![Facet::new(aaa(), [s_1234()])];

    let preview = planner(vec![]).compute_cut(&ledger, &desired).unwrap();
    assert!(preview.cuts.is_empty());
    assert_eq!(preview.warnings.len(), 3);
}

#[test]
fn submitted_plan_converges() {
    let ledger = InMemoryLedger::new(vec![Facet::new(aaa(), [s_1234(), s_dead()])]);
    let desired = vec![Facet::new(bbb(), [s_1234()])];
    let p = planner(vec![]);

    let preview = p.compute_cut(&ledger, &desired).unwrap();
    assert_eq!(
        preview.cuts,
        vec![
            FacetCut::replace(bbb(), [s_1234()]),
            FacetCut::remove([s_dead()]),
        ]
    );
    submit_cut(&ledger, &preview.cuts, None).unwrap();

    assert_eq!(ledger.facet_address(s_1234()).unwrap(), bbb());
    let again = p.compute_cut(&ledger, &desired).unwrap();
    assert!(again.cuts.is_empty());
}
