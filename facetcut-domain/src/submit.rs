use crate::ports::{Confirmation, LedgerWriter};
use anyhow::Context;
use facetcut_types::cut::FacetCut;
use facetcut_types::plan::Initializer;
use tracing::info;

/// Send a fully computed cut in one `diamond_cut` call and wait for a single confirmation.
///
/// Validation of the cut itself is the ledger's job; its errors are returned unchanged.
pub fn submit_cut(
    writer: &dyn LedgerWriter,
    cuts: &[FacetCut],
    init: Option<&Initializer>,
) -> anyhow::Result<Confirmation> {
    let (init_target, init_calldata) = Initializer::parts(init);

    info!(
        cuts = cuts.len(),
        init = %init_target,
        "submitting diamond cut"
    );
    let tx = writer.diamond_cut(cuts, init_target, &init_calldata)?;
    let confirmation = writer
        .wait_for_confirmations(tx, 1)
        .with_context(|| format!("wait for confirmation of {}", tx))?;

    info!(tx = %confirmation.tx_hash, "diamond cut confirmed");
    Ok(confirmation)
}
