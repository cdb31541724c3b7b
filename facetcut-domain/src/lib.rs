//! Domain logic: turn a ledger snapshot + desired facets into a deterministic facet cut.
//!
//! This crate owns *what* should change on the diamond and why. Reading artifacts, writing plan files
//! and talking to a real chain belong to `facetcut-abi` and `facetcut-core`.

mod aggregate;
mod differ;
mod error;
mod filter;
mod planner;
mod ports;
mod snapshot;
mod submit;

pub use aggregate::{Aggregated, aggregate};
pub use differ::{ScanOutcome, scan_additions, scan_removals, scan_replacements};
pub use error::PlanError;
pub use filter::{admits, contract_matches, matches, selector_matches, validate, validate_pair};
pub use planner::{Planner, PlannerConfig, Preview};
pub use ports::{Confirmation, InMemoryLedger, LedgerView, LedgerWriter, Submission};
pub use snapshot::Snapshot;
pub use submit::submit_cut;
