//! Shared DTOs (schemas-as-code) for the facetcut workspace.
//!
//! # Design constraints
//! - These types are intended to be serialized to disk and read back by the submit pipeline.
//! - Be conservative with breaking changes.
//! - Prefer adding optional fields over changing semantics.

pub mod cut;
pub mod diagnostics;
pub mod filter;
pub mod plan;
pub mod submit;

pub use alloy_primitives::{Address, Bytes, Selector, TxHash};

/// Schema identifiers.
pub mod schema {
    pub const FACETCUT_PLAN_V1: &str = "facetcut.plan.v1";
    pub const FACETCUT_LEDGER_V1: &str = "facetcut.ledger.v1";
    pub const FACETCUT_SUBMIT_V1: &str = "facetcut.submit.v1";
}
