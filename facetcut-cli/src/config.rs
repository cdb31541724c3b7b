//! Configuration file loading for facetcut.
//!
//! Discovers and loads `facetcut.toml` from the project root.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::{Context, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use facetcut_core::settings::FacetSource;
use facetcut_types::cut::Action;
use facetcut_types::filter::Filter;
use facetcut_types::plan::Initializer;
use facetcut_types::{Address, Selector};
use fs_err as fs;
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "facetcut.toml";

/// Top-level configuration from facetcut.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FacetcutConfig {
    /// The diamond being cut.
    pub diamond: Option<Address>,

    /// Path of the ledger snapshot, relative to the project root.
    pub ledger: Option<Utf8PathBuf>,

    /// Output directory for plan and submit artifacts.
    pub out_dir: Option<Utf8PathBuf>,

    /// Fail instead of warning when a selector lands in more than one cut.
    pub strict: bool,

    pub facets: Vec<FacetConfig>,

    pub filters: Vec<Filter>,

    pub init: Option<Initializer>,
}

/// A `[[facets]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct FacetConfig {
    pub name: String,
    pub address: Address,
    /// Compiled artifact holding the facet's ABI.
    pub artifact: Utf8PathBuf,
}

/// Discover the facetcut.toml config file.
///
/// Returns `None` if there is none in `root`.
pub fn discover_config(root: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = root.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

pub fn load_config(path: &Utf8Path) -> anyhow::Result<FacetcutConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

pub fn parse_config(contents: &str) -> anyhow::Result<FacetcutConfig> {
    let config: FacetcutConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from `root`, or return default if not found.
pub fn load_or_default(root: &Utf8Path) -> anyhow::Result<FacetcutConfig> {
    match discover_config(root) {
        Some(path) => load_config(&path),
        None => Ok(FacetcutConfig::default()),
    }
}

/// Merged configuration combining config file and CLI arguments.
#[derive(Debug, Clone, Default)]
pub struct MergedConfig {
    pub diamond: Option<Address>,
    pub ledger: Utf8PathBuf,
    pub out_dir: Utf8PathBuf,
    pub strict: bool,
    pub facets: Vec<FacetSource>,
    /// Config file filters followed by CLI filters.
    pub filters: Vec<Filter>,
    pub init: Option<Initializer>,
}

/// CLI overrides accepted by `facetcut plan` and `facetcut submit`.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub diamond: Option<Address>,
    pub ledger: Option<Utf8PathBuf>,
    pub out_dir: Option<Utf8PathBuf>,
    pub strict: bool,
    pub filters: Vec<Filter>,
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: FacetcutConfig,
}

impl ConfigMerger {
    pub fn new(config: FacetcutConfig) -> Self {
        Self { config }
    }

    /// Scalars given on the command line replace config values; CLI filters extend the config
    /// list. Relative paths from the config file resolve against `root`; CLI paths are taken as
    /// given.
    pub fn merge(self, root: &Utf8Path, cli: CliOverrides) -> MergedConfig {
        let resolve = |p: Utf8PathBuf| if p.is_absolute() { p } else { root.join(p) };

        let ledger = cli.ledger.unwrap_or_else(|| {
            resolve(
                self.config
                    .ledger
                    .clone()
                    .unwrap_or_else(|| Utf8PathBuf::from("ledger.json")),
            )
        });
        let out_dir = cli.out_dir.unwrap_or_else(|| {
            resolve(
                self.config
                    .out_dir
                    .clone()
                    .unwrap_or_else(|| Utf8PathBuf::from("artifacts/facetcut")),
            )
        });

        let facets = self
            .config
            .facets
            .iter()
            .map(|f| FacetSource {
                name: f.name.clone(),
                address: f.address,
                artifact: resolve(f.artifact.clone()),
            })
            .collect();

        let mut filters = self.config.filters.clone();
        for f in cli.filters {
            if !filters.contains(&f) {
                filters.push(f);
            }
        }

        MergedConfig {
            diamond: cli.diamond.or(self.config.diamond),
            ledger,
            out_dir,
            strict: cli.strict || self.config.strict,
            facets,
            filters,
            init: self.config.init.clone(),
        }
    }
}

/// Parse a CLI filter of the form `ACTION[@CONTRACT]:SELECTOR[,SELECTOR...]`.
///
/// Without `@CONTRACT` the filter applies to every contract. The selector list may be empty.
pub fn parse_cli_filter(kind_only: bool, raw: &str) -> anyhow::Result<Filter> {
    let (head, list) = raw
        .split_once(':')
        .ok_or_else(|| anyhow!("invalid filter '{}': expected ACTION[@CONTRACT]:SELECTORS", raw))?;

    let (action, contract) = match head.split_once('@') {
        Some((action, contract)) => (
            action,
            contract
                .trim()
                .parse::<Address>()
                .with_context(|| format!("invalid filter '{}': bad contract address", raw))?,
        ),
        None => (head, Address::ZERO),
    };
    let action: Action = action
        .parse()
        .map_err(|e: String| anyhow!("invalid filter '{}': {}", raw, e))?;

    let mut selectors = Vec::new();
    for s in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let selector = s
            .parse::<Selector>()
            .with_context(|| format!("invalid filter '{}': bad selector '{}'", raw, s))?;
        selectors.push(selector);
    }

    Ok(if kind_only {
        Filter::only(action, contract, selectors)
    } else {
        Filter::except(action, contract, selectors)
    })
}
