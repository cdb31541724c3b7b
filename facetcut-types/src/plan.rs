use crate::cut::{Action, FacetCut};
use crate::diagnostics::Warning;
use crate::filter::Filter;
use alloy_primitives::{Address, Bytes};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CutPlan {
    pub schema: String,
    pub tool: ToolInfo,

    #[serde(default)]
    pub run: RunInfo,

    /// The diamond the cut is planned against.
    pub diamond: Address,

    #[serde(default)]
    pub inputs: Vec<PlanInput>,

    #[serde(default)]
    pub filters: Vec<Filter>,

    #[serde(default)]
    pub cuts: Vec<FacetCut>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init: Option<Initializer>,

    #[serde(default)]
    pub warnings: Vec<Warning>,

    #[serde(default)]
    pub preconditions: PlanPreconditions,

    pub summary: PlanSummary,
}

impl CutPlan {
    pub fn new(tool: ToolInfo, diamond: Address) -> Self {
        Self {
            schema: crate::schema::FACETCUT_PLAN_V1.to_string(),
            tool,
            run: RunInfo::default(),
            diamond,
            inputs: vec![],
            filters: vec![],
            cuts: vec![],
            init: None,
            warnings: vec![],
            preconditions: PlanPreconditions::default(),
            summary: PlanSummary::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cuts.iter().all(|c| c.selectors.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
}

/// A desired facet that fed the plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanInput {
    pub name: String,
    pub target: Address,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact: Option<String>,

    pub selectors: u64,
}

/// Post-cut initialization call passed alongside the cut.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Initializer {
    pub target: Address,

    #[serde(default)]
    pub calldata: Bytes,
}

impl Initializer {
    /// The `(target, calldata)` pair sent to the ledger; zero and empty when absent.
    pub fn parts(init: Option<&Initializer>) -> (Address, Bytes) {
        match init {
            Some(i) => (i.target, i.calldata.clone()),
            None => (Address::ZERO, Bytes::new()),
        }
    }
}

/// Digests checked by the submit pipeline before anything is sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanPreconditions {
    /// sha256 over the canonical JSON of `cuts`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cut_digest: Option<String>,

    /// sha256 over the ledger facets the plan was computed from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot_digest: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub cuts_total: u64,
    pub selectors_added: u64,
    pub selectors_replaced: u64,
    pub selectors_removed: u64,
    pub warnings: u64,
}

impl PlanSummary {
    pub fn from_cuts(cuts: &[FacetCut], warnings: &[Warning]) -> Self {
        let mut s = PlanSummary {
            cuts_total: cuts.len() as u64,
            warnings: warnings.len() as u64,
            ..PlanSummary::default()
        };
        for c in cuts {
            let n = c.selectors.len() as u64;
            match c.action {
                Action::Add => s.selectors_added += n,
                Action::Replace => s.selectors_replaced += n,
                Action::Remove => s.selectors_removed += n,
            }
        }
        s
    }

    pub fn selectors_total(&self) -> u64 {
        self.selectors_added + self.selectors_replaced + self.selectors_removed
    }
}
