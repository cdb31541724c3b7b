//! Selector extraction and ABI artifact ingestion.
//!
//! facetcut reads compiled artifacts produced by other tools (Hardhat, Foundry, plain `solc --abi`).
//! Loading is tolerant: unknown fields are ignored and a broken artifact is reported next to the good
//! ones instead of failing the whole scan.

mod load;
mod selectors;

pub use load::{ArtifactLoadError, LoadedArtifact, load_artifact, load_artifacts};
pub use selectors::{facet_from_abi, selector_for_signature, selectors, signatures};

pub use alloy_json_abi::JsonAbi;
