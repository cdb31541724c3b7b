use alloy_primitives::{Address, Bytes, Selector, TxHash, keccak256};
use anyhow::bail;
use facetcut_types::cut::{Action, Facet, FacetCut};
use std::cell::RefCell;

/// Read-only view of a diamond's registered facets.
///
/// facetcut-domain only ever reads through this so planning can run against a live node, a JSON
/// snapshot or an in-memory ledger alike.
pub trait LedgerView {
    fn facets(&self) -> anyhow::Result<Vec<Facet>>;

    /// Current owner of `selector`, or the zero address if unregistered.
    fn facet_address(&self, selector: Selector) -> anyhow::Result<Address>;
}

/// Mutating side of the ledger.
pub trait LedgerWriter {
    fn diamond_cut(
        &self,
        cuts: &[FacetCut],
        init_target: Address,
        init_calldata: &Bytes,
    ) -> anyhow::Result<TxHash>;

    fn wait_for_confirmations(&self, tx: TxHash, confirmations: u64)
    -> anyhow::Result<Confirmation>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub tx_hash: TxHash,
    pub confirmations: u64,
}

/// A recorded `diamond_cut` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub cuts: Vec<FacetCut>,
    pub init_target: Address,
    pub init_calldata: Bytes,
}

/// In-memory ledger for embedding and testing.
///
/// Applies cuts with the same registration rules a diamond enforces, so ledger-side rejections
/// can be exercised without a node.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    facets: RefCell<Vec<Facet>>,
    submissions: RefCell<Vec<Submission>>,
}

impl InMemoryLedger {
    pub fn new(facets: Vec<Facet>) -> Self {
        Self {
            facets: RefCell::new(facets),
            submissions: RefCell::new(Vec::new()),
        }
    }

    pub fn submissions(&self) -> Vec<Submission> {
        self.submissions.borrow().clone()
    }

    fn apply(&self, cuts: &[FacetCut]) -> anyhow::Result<()> {
        let mut facets = self.facets.borrow().clone();

        for cut in cuts {
            if cut.selectors.is_empty() {
                bail!("no selectors in facet to cut");
            }
            for selector in &cut.selectors {
                let owner = owner_of(&facets, selector);
                match cut.action {
                    Action::Add => {
                        if cut.target.is_zero() {
                            bail!("add facet can't be address(0)");
                        }
                        if owner.is_some() {
                            bail!("can't add function that already exists: {}", selector);
                        }
                        insert(&mut facets, cut.target, *selector);
                    }
                    Action::Replace => {
                        if cut.target.is_zero() {
                            bail!("replace facet can't be address(0)");
                        }
                        match owner {
                            None => bail!("can't replace function that doesn't exist: {}", selector),
                            Some(o) if o == cut.target => {
                                bail!("can't replace function with same function: {}", selector)
                            }
                            Some(_) => {
                                detach(&mut facets, selector);
                                insert(&mut facets, cut.target, *selector);
                            }
                        }
                    }
                    Action::Remove => {
                        if !cut.target.is_zero() {
                            bail!("remove facet address must be address(0)");
                        }
                        if owner.is_none() {
                            bail!("can't remove function that doesn't exist: {}", selector);
                        }
                        detach(&mut facets, selector);
                    }
                }
            }
        }

        facets.retain(|f| !f.selectors.is_empty());
        *self.facets.borrow_mut() = facets;
        Ok(())
    }
}

impl LedgerView for InMemoryLedger {
    fn facets(&self) -> anyhow::Result<Vec<Facet>> {
        Ok(self.facets.borrow().clone())
    }

    fn facet_address(&self, selector: Selector) -> anyhow::Result<Address> {
        Ok(owner_of(&self.facets.borrow(), &selector).unwrap_or(Address::ZERO))
    }
}

impl LedgerWriter for InMemoryLedger {
    fn diamond_cut(
        &self,
        cuts: &[FacetCut],
        init_target: Address,
        init_calldata: &Bytes,
    ) -> anyhow::Result<TxHash> {
        if init_target.is_zero() && !init_calldata.is_empty() {
            bail!("init is address(0) but calldata is not empty");
        }
        self.apply(cuts)?;

        let mut submissions = self.submissions.borrow_mut();
        submissions.push(Submission {
            cuts: cuts.to_vec(),
            init_target,
            init_calldata: init_calldata.clone(),
        });
        Ok(keccak256((submissions.len() as u64).to_be_bytes()))
    }

    fn wait_for_confirmations(
        &self,
        tx: TxHash,
        confirmations: u64,
    ) -> anyhow::Result<Confirmation> {
        Ok(Confirmation {
            tx_hash: tx,
            confirmations,
        })
    }
}

fn owner_of(facets: &[Facet], selector: &Selector) -> Option<Address> {
    facets
        .iter()
        .find(|f| f.contains(selector))
        .map(|f| f.target)
}

fn insert(facets: &mut Vec<Facet>, target: Address, selector: Selector) {
    match facets.iter_mut().find(|f| f.target == target) {
        Some(f) => f.selectors.push(selector),
        None => facets.push(Facet::new(target, [selector])),
    }
}

fn detach(facets: &mut [Facet], selector: &Selector) {
    for f in facets.iter_mut() {
        f.selectors.retain(|s| s != selector);
    }
}
