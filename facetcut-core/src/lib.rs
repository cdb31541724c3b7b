//! Embeddable core library for facetcut.
//!
//! Provides a clap-free, I/O-abstracted entry point for planning and submitting diamond cuts.
//!
//! # Port traits
//!
//! Artifact reads and artifact writes go through [`ports`]:
//! - [`ArtifactSource`](ports::ArtifactSource) loads compiled ABI artifacts
//! - [`WritePort`](ports::WritePort) writes files and creates directories
//!
//! The ledger itself is reached through the domain's `LedgerView` / `LedgerWriter`.
//! The [`adapters`] module provides filesystem-backed implementations of all of them.
//!
//! # Entry points
//!
//! - [`run_plan`](pipeline::run_plan) computes a cut plan
//! - [`run_submit`](pipeline::run_submit) verifies a written plan and sends it

pub mod adapters;
pub mod digest;
pub mod pipeline;
pub mod ports;
pub mod settings;

pub use facetcut_domain::{Confirmation, InMemoryLedger, LedgerView, LedgerWriter};

pub use facetcut_abi::{ArtifactLoadError, LoadedArtifact};
