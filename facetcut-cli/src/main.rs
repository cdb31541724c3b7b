mod config;

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use config::{CliOverrides, ConfigMerger, MergedConfig, parse_cli_filter};
use facetcut_core::adapters::{FsArtifactSource, FsWritePort, JsonLedger};
use facetcut_core::pipeline::{
    ToolError, run_plan, run_submit, write_plan_artifacts, write_submit_artifacts,
};
use facetcut_core::settings::{PlanSettings, SubmitSettings};
use facetcut_types::Address;
use facetcut_types::plan::ToolInfo;
use std::process::ExitCode;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "facetcut",
    version,
    about = "Plans and submits EIP-2535 diamond cuts from compiled facet ABIs."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute the add/replace/remove cut that brings the diamond to the configured facets.
    Plan(PlanArgs),
    /// Verify a written plan against the ledger and submit it.
    Submit(SubmitArgs),
    /// List the function selectors of a compiled artifact.
    Selectors(SelectorsArgs),
}

#[derive(Debug, clap::Args)]
struct CommonArgs {
    /// Project root holding facetcut.toml (default: current directory).
    #[arg(long, default_value = ".")]
    root: Utf8PathBuf,

    /// Config file (default: <root>/facetcut.toml when present).
    #[arg(long)]
    config: Option<Utf8PathBuf>,

    /// Ledger snapshot file (default: <root>/ledger.json).
    #[arg(long)]
    ledger: Option<Utf8PathBuf>,

    /// Output directory for facetcut artifacts (default: <root>/artifacts/facetcut).
    #[arg(long)]
    out_dir: Option<Utf8PathBuf>,
}

#[derive(Debug, Parser)]
struct PlanArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Diamond address (overrides the config file).
    #[arg(long)]
    diamond: Option<Address>,

    /// Fail when a selector appears in more than one cut.
    #[arg(long, default_value_t = false)]
    strict: bool,

    /// Restrict an action to listed selectors: ACTION[@CONTRACT]:SELECTOR[,SELECTOR...].
    #[arg(long)]
    only: Vec<String>,

    /// Exclude listed selectors from an action: ACTION[@CONTRACT]:SELECTOR[,SELECTOR...].
    #[arg(long)]
    except: Vec<String>,
}

#[derive(Debug, Parser)]
struct SubmitArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Submit even if the ledger changed since the plan was computed.
    #[arg(long, default_value_t = false)]
    no_verify_snapshot: bool,
}

#[derive(Debug, Parser)]
struct SelectorsArgs {
    /// Compiled artifact (raw ABI array or an object with an `abi` field), or a directory of them.
    #[arg(long)]
    artifact: Utf8PathBuf,

    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.cmd {
        Command::Plan(args) => cmd_plan(args),
        Command::Submit(args) => cmd_submit(args),
        Command::Selectors(args) => cmd_selectors(args).map_err(ToolError::from),
    };

    match result {
        Ok(()) => ExitCode::from(0),
        Err(ToolError::PolicyBlock(reason)) => {
            error!("{}", reason);
            eprintln!("facetcut: policy block: {}", reason);
            ExitCode::from(2)
        }
        Err(ToolError::Internal(e)) => {
            error!("{:?}", e);
            eprintln!("facetcut: error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

fn load_merged(common: &CommonArgs, overrides: CliOverrides) -> anyhow::Result<MergedConfig> {
    let file_config = match &common.config {
        Some(path) => config::load_config(path)?,
        None => config::load_or_default(&common.root).context("load facetcut.toml config")?,
    };
    let merged = ConfigMerger::new(file_config).merge(&common.root, overrides);
    debug!(
        "merged config: diamond={:?}, ledger={}, facets={}, filters={}, strict={}",
        merged.diamond,
        merged.ledger,
        merged.facets.len(),
        merged.filters.len(),
        merged.strict
    );
    Ok(merged)
}

fn cmd_plan(args: PlanArgs) -> Result<(), ToolError> {
    let mut filters = Vec::new();
    for raw in &args.only {
        filters.push(parse_cli_filter(true, raw)?);
    }
    for raw in &args.except {
        filters.push(parse_cli_filter(false, raw)?);
    }

    let merged = load_merged(
        &args.common,
        CliOverrides {
            diamond: args.diamond,
            ledger: args.common.ledger.clone(),
            out_dir: args.common.out_dir.clone(),
            strict: args.strict,
            filters,
        },
    )?;

    let ledger = JsonLedger::open(&merged.ledger)?;
    let diamond = merged
        .diamond
        .or_else(|| ledger.diamond())
        .context("diamond address not configured (use --diamond or set it in facetcut.toml)")?;

    if merged.facets.is_empty() {
        warn!("no facets configured; every selector outside the diamond's own facet is removed");
    }

    let settings = PlanSettings {
        diamond,
        facets: merged.facets,
        filters: merged.filters,
        strict: merged.strict,
        init: merged.init,
        out_dir: merged.out_dir,
    };

    let outcome = run_plan(&settings, &FsArtifactSource, &ledger, tool_info())?;
    write_plan_artifacts(&outcome, &settings.out_dir, &FsWritePort)?;

    for w in &outcome.plan.warnings {
        info!("{}", w);
    }
    println!(
        "planned {} cut(s) touching {} selector(s); wrote {}",
        outcome.plan.summary.cuts_total,
        outcome.plan.summary.selectors_total(),
        settings.out_dir.join("plan.json")
    );
    Ok(())
}

fn cmd_submit(args: SubmitArgs) -> Result<(), ToolError> {
    let merged = load_merged(
        &args.common,
        CliOverrides {
            ledger: args.common.ledger.clone(),
            out_dir: args.common.out_dir.clone(),
            ..CliOverrides::default()
        },
    )?;

    let ledger = JsonLedger::open(&merged.ledger)?;
    let settings = SubmitSettings {
        out_dir: merged.out_dir,
        verify_snapshot: !args.no_verify_snapshot,
        diamond: ledger.diamond(),
    };

    let outcome = run_submit(&settings, &ledger, &ledger, tool_info())?;
    write_submit_artifacts(&outcome, &settings.out_dir, &FsWritePort)?;

    match &outcome.record.tx_hash {
        Some(tx) => println!(
            "submitted {} cut(s) in {} ({} confirmation(s))",
            outcome.record.cuts_total, tx, outcome.record.confirmations
        ),
        None => println!("nothing to submit"),
    }
    Ok(())
}

fn cmd_selectors(args: SelectorsArgs) -> anyhow::Result<()> {
    let loaded = if args.artifact.is_dir() {
        facetcut_abi::load_artifacts(&args.artifact)
            .with_context(|| format!("load artifacts from {}", args.artifact))?
    } else {
        vec![facetcut_abi::load_artifact(&args.artifact)]
    };

    let mut listed = Vec::with_capacity(loaded.len());
    for artifact in loaded {
        match artifact.abi {
            Ok(abi) => listed.push((artifact.name, facetcut_abi::signatures(&abi))),
            Err(e) if args.artifact.is_dir() => {
                warn!(path = %artifact.path, "skipping artifact: {}", e);
            }
            Err(e) => {
                return Err(e).with_context(|| format!("load artifact {}", artifact.path));
            }
        }
    }

    match args.format {
        OutputFormat::Text => {
            for (name, sigs) in &listed {
                println!("{} ({} selectors)\n", name, sigs.len());
                for (selector, signature) in sigs {
                    println!("  {}  {}", selector, signature);
                }
            }
        }
        OutputFormat::Json => {
            let contracts: Vec<_> = listed
                .iter()
                .map(|(name, sigs)| {
                    let entries: Vec<_> = sigs
                        .iter()
                        .map(|(selector, signature)| {
                            serde_json::json!({
                                "selector": selector.to_string(),
                                "signature": signature,
                            })
                        })
                        .collect();
                    serde_json::json!({
                        "name": name,
                        "selectors": entries,
                    })
                })
                .collect();
            let out = if args.artifact.is_dir() {
                serde_json::Value::Array(contracts)
            } else {
                contracts.into_iter().next().unwrap_or(serde_json::Value::Null)
            };
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }
    Ok(())
}

fn tool_info() -> ToolInfo {
    ToolInfo {
        name: "facetcut".to_string(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
    }
}
