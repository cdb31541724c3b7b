//! Core plan and submit pipelines, extracted from the CLI.
//!
//! Artifact reads and artifact writes go through the port traits; the ledger through the
//! domain's `LedgerView` and `LedgerWriter`.

use crate::digest::{cut_digest, sha256_hex, snapshot_digest};
use crate::ports::{ArtifactSource, WritePort};
use crate::settings::{PlanSettings, SubmitSettings};
use anyhow::{Context, anyhow};
use camino::Utf8Path;
use chrono::Utc;
use facetcut_abi::facet_from_abi;
use facetcut_domain::{LedgerView, LedgerWriter, PlanError, Planner, PlannerConfig, submit_cut};
use facetcut_render::{render_plan_md, render_submit_md};
use facetcut_types::filter::ActionFilters;
use facetcut_types::plan::{CutPlan, PlanInput, PlanPreconditions, RunInfo, ToolInfo};
use facetcut_types::submit::{PlanRef, SubmitRecord};
use fs_err as fs;
use tracing::{debug, info};

/// Error type for pipeline results.  Exit code 2 = policy block, 1 = tool error.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("policy block: {0}")]
    PolicyBlock(String),
    #[error("{0:#}")]
    Internal(#[from] anyhow::Error),
}

impl From<PlanError> for ToolError {
    fn from(err: PlanError) -> Self {
        if err.is_policy_block() {
            return ToolError::PolicyBlock(err.to_string());
        }
        match err {
            PlanError::Ledger(e) => ToolError::Internal(e),
            other => ToolError::Internal(anyhow::Error::new(other)),
        }
    }
}

/// Outcome of `run_plan`.
pub struct PlanOutcome {
    pub plan: CutPlan,
}

/// Run the plan pipeline.
///
/// Every configured artifact must load; a facet whose ABI is unknown would otherwise have its
/// selectors planned for removal. The caller writes artifacts via `write_plan_artifacts`.
pub fn run_plan(
    settings: &PlanSettings,
    artifacts: &dyn ArtifactSource,
    ledger: &dyn LedgerView,
    tool: ToolInfo,
) -> Result<PlanOutcome, ToolError> {
    let started_at = Utc::now();

    let mut desired = Vec::with_capacity(settings.facets.len());
    let mut inputs = Vec::with_capacity(settings.facets.len());
    for source in &settings.facets {
        let loaded = artifacts.load_artifact(&source.artifact);
        let abi = loaded.abi.map_err(|e| {
            anyhow!(
                "load artifact {} for facet '{}': {}",
                source.artifact,
                source.name,
                e
            )
        })?;

        let facet = facet_from_abi(source.address, &abi);
        debug!(
            facet = %source.name,
            target = %source.address,
            selectors = facet.selectors.len(),
            "loaded desired facet"
        );
        inputs.push(PlanInput {
            name: source.name.clone(),
            target: source.address,
            artifact: Some(source.artifact.to_string()),
            selectors: facet.selectors.len() as u64,
        });
        desired.push(facet);
    }

    let planner = Planner::new(PlannerConfig {
        diamond: settings.diamond,
        filters: ActionFilters::from_filters(settings.filters.iter().cloned()),
        strict: settings.strict,
    });

    let preview = planner.compute_cut(ledger, &desired)?;
    let snapshot = snapshot_digest(preview.snapshot.facets())?;

    let mut plan = planner.to_plan(preview, tool);
    plan.inputs = inputs;
    plan.init = settings.init.clone();
    plan.preconditions = PlanPreconditions {
        cut_digest: Some(cut_digest(&plan.cuts)?),
        snapshot_digest: Some(snapshot),
    };
    plan.run = RunInfo {
        started_at: Some(started_at),
        ended_at: Some(Utc::now()),
    };

    info!(
        cuts = plan.summary.cuts_total,
        selectors = plan.summary.selectors_total(),
        warnings = plan.summary.warnings,
        "plan computed"
    );
    Ok(PlanOutcome { plan })
}

/// Write `plan.json` and `plan.md` to the output directory.
pub fn write_plan_artifacts(
    outcome: &PlanOutcome,
    out_dir: &Utf8Path,
    writer: &dyn WritePort,
) -> anyhow::Result<()> {
    writer.create_dir_all(out_dir)?;

    let plan_json = serde_json::to_string_pretty(&outcome.plan).context("serialize plan")?;
    writer.write_file(&out_dir.join("plan.json"), plan_json.as_bytes())?;

    let plan_md = render_plan_md(&outcome.plan);
    writer.write_file(&out_dir.join("plan.md"), plan_md.as_bytes())?;

    info!(out_dir = %out_dir, "wrote plan artifacts");
    Ok(())
}

/// Outcome of `run_submit`.
pub struct SubmitOutcome {
    pub plan: CutPlan,
    pub record: SubmitRecord,
}

/// Run the submit pipeline against the `plan.json` in `settings.out_dir`.
///
/// The plan is refused (policy block) when its cuts no longer match `cut_digest`, when a cut is
/// malformed, when it was computed for a different diamond than `settings.diamond`, or, with
/// `verify_snapshot`, when the ledger moved since the plan was computed.
/// A plan without cuts or initializer is not sent.
pub fn run_submit(
    settings: &SubmitSettings,
    view: &dyn LedgerView,
    writer: &dyn LedgerWriter,
    tool: ToolInfo,
) -> Result<SubmitOutcome, ToolError> {
    let plan_path = settings.out_dir.join("plan.json");
    let plan_str = fs::read_to_string(&plan_path).with_context(|| format!("read {}", plan_path))?;
    let plan: CutPlan = serde_json::from_str(&plan_str).context("parse plan.json")?;

    if plan.schema != facetcut_types::schema::FACETCUT_PLAN_V1 {
        return Err(anyhow!("unsupported plan schema '{}'", plan.schema).into());
    }

    let actual = cut_digest(&plan.cuts)?;
    match plan.preconditions.cut_digest.as_deref() {
        Some(expected) if expected == actual => {}
        Some(_) => {
            return Err(ToolError::PolicyBlock(
                "plan cuts do not match cut_digest".to_string(),
            ));
        }
        None => {
            return Err(ToolError::PolicyBlock(
                "plan has no cut_digest".to_string(),
            ));
        }
    }

    if let Some(bad) = plan.cuts.iter().find(|c| !c.is_well_formed()) {
        return Err(ToolError::PolicyBlock(format!(
            "malformed {} cut for {}",
            bad.action, bad.target
        )));
    }

    if let Some(diamond) = settings.diamond {
        if plan.diamond != diamond {
            return Err(ToolError::PolicyBlock(format!(
                "plan targets diamond {} but the ledger belongs to {}",
                plan.diamond, diamond
            )));
        }
    }

    if settings.verify_snapshot {
        let current = snapshot_digest(&view.facets().context("read ledger facets")?)?;
        if plan.preconditions.snapshot_digest.as_deref() != Some(current.as_str()) {
            return Err(ToolError::PolicyBlock(
                "ledger changed since the plan was computed; re-run plan".to_string(),
            ));
        }
        debug!("ledger snapshot matches plan");
    }

    let mut record = SubmitRecord::new(
        tool,
        PlanRef {
            path: plan_path.to_string(),
            sha256: Some(sha256_hex(plan_str.as_bytes())),
        },
        plan.diamond,
    );
    record.cuts_total = plan.cuts.len() as u64;

    if plan.is_empty() && plan.init.is_none() {
        info!("plan holds no cuts; nothing to submit");
        return Ok(SubmitOutcome { plan, record });
    }

    let confirmation = submit_cut(writer, &plan.cuts, plan.init.as_ref())?;
    record.tx_hash = Some(confirmation.tx_hash);
    record.confirmations = confirmation.confirmations;
    record.submitted_at = Some(Utc::now());

    Ok(SubmitOutcome { plan, record })
}

/// Write `submit.json` and `submit.md` to the output directory.
pub fn write_submit_artifacts(
    outcome: &SubmitOutcome,
    out_dir: &Utf8Path,
    writer: &dyn WritePort,
) -> anyhow::Result<()> {
    writer.create_dir_all(out_dir)?;

    let json = serde_json::to_string_pretty(&outcome.record).context("serialize submit record")?;
    writer.write_file(&out_dir.join("submit.json"), json.as_bytes())?;

    let md = render_submit_md(&outcome.record);
    writer.write_file(&out_dir.join("submit.md"), md.as_bytes())?;

    info!(out_dir = %out_dir, "wrote submit artifacts");
    Ok(())
}
