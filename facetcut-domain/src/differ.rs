use crate::error::PlanError;
use crate::filter::admits;
use crate::snapshot::Snapshot;
use alloy_primitives::{Address, Selector};
use facetcut_types::cut::{Action, Facet, FacetCut};
use facetcut_types::filter::FilterPair;
use std::collections::HashSet;
use tracing::debug;

/// Result of one directional scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    Found(Vec<FacetCut>),
    /// No candidate survived; the scan had nothing to do.
    Empty { action: Action },
}

impl ScanOutcome {
    fn from_cuts(action: Action, cuts: Vec<FacetCut>) -> Self {
        if cuts.is_empty() {
            ScanOutcome::Empty { action }
        } else {
            ScanOutcome::Found(cuts)
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ScanOutcome::Empty { .. })
    }

    /// Cuts found, or nothing.
    pub fn into_cuts(self) -> Vec<FacetCut> {
        match self {
            ScanOutcome::Found(cuts) => cuts,
            ScanOutcome::Empty { .. } => Vec::new(),
        }
    }

    /// Cuts found, treating an empty scan as an error.
    pub fn into_cuts_strict(self) -> Result<Vec<FacetCut>, PlanError> {
        match self {
            ScanOutcome::Found(cuts) => Ok(cuts),
            ScanOutcome::Empty { action } => Err(PlanError::NoChangesDetected { action }),
        }
    }
}

/// Desired selectors nowhere on the ledger.
pub fn scan_additions(
    snapshot: &Snapshot,
    diamond: Address,
    desired: &[Facet],
    filters: &FilterPair,
) -> ScanOutcome {
    let mut cuts = Vec::new();
    for facet in desired {
        if facet.target.is_zero() || facet.target == diamond {
            continue;
        }
        let picked = pick(&facet.selectors, |s| {
            !snapshot.is_registered(s) && admitted(Action::Add, filters, facet.target, s)
        });
        if !picked.is_empty() {
            cuts.push(FacetCut::add(facet.target, picked));
        }
    }
    ScanOutcome::from_cuts(Action::Add, cuts)
}

/// Desired selectors registered to a different facet than the one wanted.
pub fn scan_replacements(
    snapshot: &Snapshot,
    diamond: Address,
    desired: &[Facet],
    filters: &FilterPair,
) -> ScanOutcome {
    let mut cuts = Vec::new();
    for facet in desired {
        if facet.target.is_zero() || facet.target == diamond {
            continue;
        }
        let picked = pick(&facet.selectors, |s| {
            snapshot.is_registered(s)
                && snapshot.owner(s) != facet.target
                && admitted(Action::Replace, filters, facet.target, s)
        });
        if !picked.is_empty() {
            cuts.push(FacetCut::replace(facet.target, picked));
        }
    }
    ScanOutcome::from_cuts(Action::Replace, cuts)
}

/// Ledger selectors no desired facet provides any more.
///
/// Filters are matched against the facet currently holding the selector; the emitted cut always
/// targets the zero address.
pub fn scan_removals(
    snapshot: &Snapshot,
    diamond: Address,
    desired: &[Facet],
    filters: &FilterPair,
) -> ScanOutcome {
    let wanted: HashSet<Selector> = desired
        .iter()
        .flat_map(|f| f.selectors.iter().copied())
        .collect();

    let mut cuts = Vec::new();
    for facet in snapshot.facets() {
        if facet.target.is_zero() || facet.target == diamond {
            continue;
        }
        let picked = pick(&facet.selectors, |s| {
            !wanted.contains(s) && admitted(Action::Remove, filters, facet.target, s)
        });
        if !picked.is_empty() {
            cuts.push(FacetCut::remove(picked));
        }
    }
    ScanOutcome::from_cuts(Action::Remove, cuts)
}

fn pick(selectors: &[Selector], mut keep: impl FnMut(&Selector) -> bool) -> Vec<Selector> {
    selectors.iter().copied().filter(|s| keep(s)).collect()
}

fn admitted(action: Action, filters: &FilterPair, contract: Address, selector: &Selector) -> bool {
    let ok = admits(&filters.only, &filters.except, contract, selector);
    if !ok {
        debug!(%action, %contract, %selector, "candidate filtered out");
    }
    ok
}
