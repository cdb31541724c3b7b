use crate::plan::ToolInfo;
use alloy_primitives::{Address, TxHash};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record of one submit run, written as `submit.json` next to the plan it sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitRecord {
    pub schema: String,
    pub tool: ToolInfo,
    pub plan_ref: PlanRef,
    pub diamond: Address,

    /// Absent when the plan held nothing to send.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<TxHash>,

    #[serde(default)]
    pub confirmations: u64,

    #[serde(default)]
    pub cuts_total: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
}

impl SubmitRecord {
    pub fn new(tool: ToolInfo, plan_ref: PlanRef, diamond: Address) -> Self {
        Self {
            schema: crate::schema::FACETCUT_SUBMIT_V1.to_string(),
            tool,
            plan_ref,
            diamond,
            tx_hash: None,
            confirmations: 0,
            cuts_total: 0,
            submitted_at: None,
        }
    }

    pub fn submitted(&self) -> bool {
        self.tx_hash.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRef {
    pub path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
}
