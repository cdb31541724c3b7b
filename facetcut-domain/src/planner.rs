use crate::aggregate::aggregate;
use crate::differ::{ScanOutcome, scan_additions, scan_removals, scan_replacements};
use crate::error::PlanError;
use crate::filter::{validate, validate_pair};
use crate::ports::LedgerView;
use crate::snapshot::Snapshot;
use alloy_primitives::Address;
use facetcut_types::cut::{Action, Facet, FacetCut};
use facetcut_types::diagnostics::Warning;
use facetcut_types::filter::ActionFilters;
use facetcut_types::plan::{CutPlan, PlanSummary, ToolInfo};
use tracing::{debug, warn};

#[derive(Debug, Clone, Default)]
pub struct PlannerConfig {
    /// The diamond itself; its own facet is never added, replaced or removed.
    pub diamond: Address,
    pub filters: ActionFilters,
    /// Turn selector collisions into [`PlanError::SelectorCollision`].
    pub strict: bool,
}

/// Output of the combined planner before it is wrapped into a [`CutPlan`].
#[derive(Debug, Clone)]
pub struct Preview {
    pub cuts: Vec<FacetCut>,
    pub warnings: Vec<Warning>,
    pub snapshot: Snapshot,
}

pub struct Planner {
    config: PlannerConfig,
}

impl Planner {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    pub fn compute_additions(
        &self,
        ledger: &dyn LedgerView,
        desired: &[Facet],
    ) -> Result<ScanOutcome, PlanError> {
        self.single(Action::Add, ledger, desired)
    }

    pub fn compute_replacements(
        &self,
        ledger: &dyn LedgerView,
        desired: &[Facet],
    ) -> Result<ScanOutcome, PlanError> {
        self.single(Action::Replace, ledger, desired)
    }

    pub fn compute_removals(
        &self,
        ledger: &dyn LedgerView,
        desired: &[Facet],
    ) -> Result<ScanOutcome, PlanError> {
        self.single(Action::Remove, ledger, desired)
    }

    /// Run all three scans against one snapshot and aggregate the result.
    ///
    /// An empty scan only contributes a warning. Filter conflicts abort before the ledger is read.
    pub fn compute_cut(
        &self,
        ledger: &dyn LedgerView,
        desired: &[Facet],
    ) -> Result<Preview, PlanError> {
        validate(&self.config.filters)?;
        let snapshot = Snapshot::capture(ledger, desired)?;

        let mut warnings = Vec::new();
        let mut records = Vec::new();
        for action in Action::ALL {
            match self.scan(action, &snapshot, desired) {
                ScanOutcome::Found(mut cuts) => {
                    debug!(%action, cuts = cuts.len(), "scan found changes");
                    records.append(&mut cuts);
                }
                ScanOutcome::Empty { action } => {
                    warn!(%action, "no changes detected");
                    warnings.push(Warning::NoChangesDetected { action });
                }
            }
        }

        let aggregated = aggregate(records);
        for w in &aggregated.warnings {
            if let Warning::SelectorCollision {
                selector,
                action,
                target,
            } = w
            {
                if self.config.strict {
                    return Err(PlanError::SelectorCollision {
                        selector: *selector,
                        action: *action,
                        target: *target,
                    });
                }
                warn!(%selector, %action, %target, "selector appears in more than one cut");
            }
        }
        warnings.extend(aggregated.warnings);

        if aggregated.cuts.is_empty() {
            warn!(diamond = %self.config.diamond, "diamond already matches the desired facets");
        }

        Ok(Preview {
            cuts: aggregated.cuts,
            warnings,
            snapshot,
        })
    }

    pub fn to_plan(&self, preview: Preview, tool: ToolInfo) -> CutPlan {
        let mut plan = CutPlan::new(tool, self.config.diamond);
        plan.filters = self.config.filters.to_filters();
        plan.summary = PlanSummary::from_cuts(&preview.cuts, &preview.warnings);
        plan.cuts = preview.cuts;
        plan.warnings = preview.warnings;
        plan
    }

    pub fn plan(
        &self,
        ledger: &dyn LedgerView,
        desired: &[Facet],
        tool: ToolInfo,
    ) -> Result<CutPlan, PlanError> {
        let preview = self.compute_cut(ledger, desired)?;
        Ok(self.to_plan(preview, tool))
    }

    fn single(
        &self,
        action: Action,
        ledger: &dyn LedgerView,
        desired: &[Facet],
    ) -> Result<ScanOutcome, PlanError> {
        validate_pair(action, self.config.filters.pair(action))?;
        let snapshot = Snapshot::capture(ledger, desired)?;
        Ok(self.scan(action, &snapshot, desired))
    }

    fn scan(&self, action: Action, snapshot: &Snapshot, desired: &[Facet]) -> ScanOutcome {
        let diamond = self.config.diamond;
        let filters = self.config.filters.pair(action);
        match action {
            Action::Add => scan_additions(snapshot, diamond, desired, filters),
            Action::Replace => scan_replacements(snapshot, diamond, desired, filters),
            Action::Remove => scan_removals(snapshot, diamond, desired, filters),
        }
    }
}
