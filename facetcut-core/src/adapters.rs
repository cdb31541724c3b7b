//! Default filesystem-backed port implementations.

use crate::ports::{ArtifactSource, WritePort};
use alloy_primitives::{TxHash, keccak256};
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use facetcut_abi::{ArtifactLoadError, JsonAbi, LoadedArtifact};
use facetcut_domain::{Confirmation, InMemoryLedger, LedgerView, LedgerWriter};
use facetcut_types::cut::{Facet, FacetCut};
use facetcut_types::{Address, Bytes, Selector};
use fs_err as fs;
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Loads artifacts from disk via `facetcut_abi::load_artifact`.
#[derive(Debug, Clone, Default)]
pub struct FsArtifactSource;

impl ArtifactSource for FsArtifactSource {
    fn load_artifact(&self, path: &Utf8Path) -> LoadedArtifact {
        facetcut_abi::load_artifact(path)
    }
}

/// In-memory artifact source for embedding and testing.
///
/// Paths that were never registered load as an io error, matching a missing file on disk.
#[derive(Debug, Clone, Default)]
pub struct InMemoryArtifactSource {
    abis: BTreeMap<Utf8PathBuf, JsonAbi>,
}

impl InMemoryArtifactSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: impl Into<Utf8PathBuf>, abi: JsonAbi) -> Self {
        self.abis.insert(path.into(), abi);
        self
    }
}

impl ArtifactSource for InMemoryArtifactSource {
    fn load_artifact(&self, path: &Utf8Path) -> LoadedArtifact {
        let name = path.file_stem().unwrap_or("unknown").to_string();
        let abi = self
            .abis
            .get(path)
            .cloned()
            .ok_or_else(|| ArtifactLoadError::Io {
                message: format!("no artifact registered at {}", path),
            });
        LoadedArtifact {
            path: path.to_path_buf(),
            name,
            abi,
        }
    }
}

/// Filesystem write operations.
#[derive(Debug, Clone, Default)]
pub struct FsWritePort;

impl WritePort for FsWritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create parent dir for {}", path))?;
        }
        fs::write(path, contents).with_context(|| format!("write {}", path))
    }

    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()> {
        fs::create_dir_all(path).with_context(|| format!("create_dir_all {}", path))
    }
}

/// On-disk layout of `ledger.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diamond: Option<Address>,

    /// Number of cuts applied to this file so far.
    #[serde(default)]
    pub nonce: u64,

    #[serde(default)]
    pub facets: Vec<Facet>,
}

/// A diamond's facet registry kept in a JSON file.
///
/// Reads are served from the state loaded at [`JsonLedger::open`]. A successful `diamond_cut`
/// applies the cut with the same rules as [`InMemoryLedger`] and rewrites the file before returning.
#[derive(Debug)]
pub struct JsonLedger {
    path: Utf8PathBuf,
    schema: Option<String>,
    diamond: Option<Address>,
    nonce: Cell<u64>,
    inner: InMemoryLedger,
}

impl JsonLedger {
    pub fn open(path: &Utf8Path) -> anyhow::Result<Self> {
        let path = path.to_path_buf();
        let contents = fs::read_to_string(&path).with_context(|| format!("read ledger {}", path))?;
        let file: LedgerFile =
            serde_json::from_str(&contents).with_context(|| format!("parse ledger {}", path))?;

        if let Some(schema) = &file.schema
            && schema != facetcut_types::schema::FACETCUT_LEDGER_V1
        {
            anyhow::bail!("unsupported ledger schema '{}' in {}", schema, path);
        }

        debug!(path = %path, facets = file.facets.len(), nonce = file.nonce, "opened ledger");
        Ok(Self {
            path,
            schema: file.schema,
            diamond: file.diamond,
            nonce: Cell::new(file.nonce),
            inner: InMemoryLedger::new(file.facets),
        })
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// The diamond address recorded in the file, if any.
    pub fn diamond(&self) -> Option<Address> {
        self.diamond
    }

    fn persist(&self) -> anyhow::Result<()> {
        let file = LedgerFile {
            schema: self
                .schema
                .clone()
                .or_else(|| Some(facetcut_types::schema::FACETCUT_LEDGER_V1.to_string())),
            diamond: self.diamond,
            nonce: self.nonce.get(),
            facets: self.inner.facets()?,
        };
        let json = serde_json::to_string_pretty(&file).context("serialize ledger")?;
        fs::write(&self.path, json).with_context(|| format!("write ledger {}", self.path))
    }
}

impl LedgerView for JsonLedger {
    fn facets(&self) -> anyhow::Result<Vec<Facet>> {
        self.inner.facets()
    }

    fn facet_address(&self, selector: Selector) -> anyhow::Result<Address> {
        self.inner.facet_address(selector)
    }
}

impl LedgerWriter for JsonLedger {
    fn diamond_cut(
        &self,
        cuts: &[FacetCut],
        init_target: Address,
        init_calldata: &Bytes,
    ) -> anyhow::Result<TxHash> {
        self.inner.diamond_cut(cuts, init_target, init_calldata)?;

        let nonce = self.nonce.get() + 1;
        self.nonce.set(nonce);
        self.persist()?;

        let payload = serde_json::to_vec(cuts).context("serialize cuts")?;
        let mut preimage = nonce.to_be_bytes().to_vec();
        preimage.extend_from_slice(&payload);
        let tx = keccak256(preimage);

        info!(ledger = %self.path, %tx, nonce, "cut written to ledger file");
        Ok(tx)
    }

    fn wait_for_confirmations(
        &self,
        tx: TxHash,
        confirmations: u64,
    ) -> anyhow::Result<Confirmation> {
        // The file is rewritten before diamond_cut returns.
        Ok(Confirmation {
            tx_hash: tx,
            confirmations,
        })
    }
}
