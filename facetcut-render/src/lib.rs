//! Rendering helpers (markdown) for human-readable artifacts.

use facetcut_types::cut::Action;
use facetcut_types::filter::FilterKind;
use facetcut_types::plan::CutPlan;
use facetcut_types::submit::SubmitRecord;

pub fn render_plan_md(plan: &CutPlan) -> String {
    let mut out = String::new();
    out.push_str("# facetcut plan\n\n");
    out.push_str(&format!("- Diamond: `{}`\n", plan.diamond));
    out.push_str(&format!(
        "- Cuts: {} ({} add, {} replace, {} remove selectors)\n",
        plan.summary.cuts_total,
        plan.summary.selectors_added,
        plan.summary.selectors_replaced,
        plan.summary.selectors_removed
    ));
    out.push_str(&format!("- Inputs: {}\n", plan.inputs.len()));
    if let Some(init) = &plan.init {
        out.push_str(&format!(
            "- Init: `{}` ({} bytes calldata)\n",
            init.target,
            init.calldata.len()
        ));
    }
    out.push('\n');

    if !plan.filters.is_empty() {
        out.push_str("## Filters\n\n");
        for f in &plan.filters {
            let kind = match f.kind {
                FilterKind::Only => "only",
                FilterKind::Except => "except",
            };
            let contract = if f.is_wildcard() {
                "*".to_string()
            } else {
                f.contract.to_string()
            };
            let selectors: Vec<String> = f.selectors.iter().map(|s| s.to_string()).collect();
            out.push_str(&format!(
                "- `{}` {} `{}`: {}\n",
                kind,
                f.action,
                contract,
                selectors.join(", ")
            ));
        }
        out.push('\n');
    }

    out.push_str("## Cuts\n\n");
    if plan.cuts.is_empty() {
        out.push_str("_No changes planned._\n");
    } else {
        for (i, cut) in plan.cuts.iter().enumerate() {
            out.push_str(&format!(
                "### {}. {} `{}`\n\n",
                i + 1,
                action_label(cut.action),
                cut.target
            ));
            for s in &cut.selectors {
                out.push_str(&format!("- `{}`\n", s));
            }
            out.push('\n');
        }
    }

    if !plan.warnings.is_empty() {
        out.push_str("\n## Warnings\n\n");
        for w in &plan.warnings {
            out.push_str(&format!("- {}\n", w));
        }
    }

    out
}

pub fn render_submit_md(record: &SubmitRecord) -> String {
    let mut out = String::new();
    out.push_str("# facetcut submit\n\n");
    out.push_str(&format!("- Diamond: `{}`\n", record.diamond));
    out.push_str(&format!("- Plan: `{}`\n", record.plan_ref.path));
    if let Some(sha) = &record.plan_ref.sha256 {
        out.push_str(&format!("- Plan sha256: `{}`\n", sha));
    }
    out.push_str(&format!("- Cuts: {}\n", record.cuts_total));
    match &record.tx_hash {
        Some(tx) => {
            out.push_str(&format!("- Transaction: `{}`\n", tx));
            out.push_str(&format!("- Confirmations: {}\n", record.confirmations));
        }
        None => out.push_str("\n_Nothing submitted._\n"),
    }
    out
}

fn action_label(a: Action) -> &'static str {
    match a {
        Action::Add => "ADD",
        Action::Replace => "REPLACE",
        Action::Remove => "REMOVE",
    }
}
