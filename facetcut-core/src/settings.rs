//! Clap-free settings for the plan and submit pipelines.

use camino::Utf8PathBuf;
use facetcut_types::Address;
use facetcut_types::filter::Filter;
use facetcut_types::plan::Initializer;

/// A desired facet: a deployed contract plus the artifact describing its ABI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetSource {
    pub name: String,
    pub address: Address,
    pub artifact: Utf8PathBuf,
}

/// Settings for the plan pipeline.
#[derive(Debug, Clone)]
pub struct PlanSettings {
    pub diamond: Address,
    pub facets: Vec<FacetSource>,
    pub filters: Vec<Filter>,
    pub strict: bool,
    pub init: Option<Initializer>,
    pub out_dir: Utf8PathBuf,
}

impl Default for PlanSettings {
    fn default() -> Self {
        Self {
            diamond: Address::ZERO,
            facets: Vec::new(),
            filters: Vec::new(),
            strict: false,
            init: None,
            out_dir: Utf8PathBuf::from("artifacts/facetcut"),
        }
    }
}

/// Settings for the submit pipeline.
#[derive(Debug, Clone)]
pub struct SubmitSettings {
    /// Directory holding `plan.json`; `submit.json` is written next to it.
    pub out_dir: Utf8PathBuf,

    /// Refuse to submit when the ledger no longer matches the snapshot the plan was computed from.
    pub verify_snapshot: bool,

    /// Diamond the ledger belongs to, when known; a plan for any other diamond is refused.
    pub diamond: Option<Address>,
}

impl Default for SubmitSettings {
    fn default() -> Self {
        Self {
            out_dir: Utf8PathBuf::from("artifacts/facetcut"),
            verify_snapshot: true,
            diamond: None,
        }
    }
}
