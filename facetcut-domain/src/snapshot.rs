use crate::ports::LedgerView;
use alloy_primitives::{Address, Selector};
use anyhow::Context;
use facetcut_types::cut::Facet;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Frozen view of the ledger for one planning run.
///
/// Every ledger read happens in [`Snapshot::capture`]; scans never go back to the ledger.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    facets: Vec<Facet>,
    registered: HashSet<Selector>,
    owners: HashMap<Selector, Address>,
}

impl Snapshot {
    /// Read the registered facets, then resolve the current owner of every desired selector.
    pub fn capture(ledger: &dyn LedgerView, desired: &[Facet]) -> anyhow::Result<Self> {
        let facets = ledger.facets().context("read ledger facets")?;

        let mut owners = HashMap::new();
        for selector in desired.iter().flat_map(|f| f.selectors.iter()) {
            if owners.contains_key(selector) {
                continue;
            }
            let owner = ledger
                .facet_address(*selector)
                .with_context(|| format!("read facet address of {}", selector))?;
            owners.insert(*selector, owner);
        }

        debug!(
            facets = facets.len(),
            lookups = owners.len(),
            "captured ledger snapshot"
        );
        Ok(Self::from_parts(facets, owners))
    }

    pub fn from_parts(facets: Vec<Facet>, owners: HashMap<Selector, Address>) -> Self {
        let registered = facets
            .iter()
            .flat_map(|f| f.selectors.iter().copied())
            .collect();
        Self {
            facets,
            registered,
            owners,
        }
    }

    pub fn facets(&self) -> &[Facet] {
        &self.facets
    }

    /// Whether any registered facet carries `selector`.
    pub fn is_registered(&self, selector: &Selector) -> bool {
        self.registered.contains(selector)
    }

    /// Owner resolved at capture time; zero if unregistered or never looked up.
    pub fn owner(&self, selector: &Selector) -> Address {
        self.owners.get(selector).copied().unwrap_or(Address::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::InMemoryLedger;

    #[test]
    fn capture_resolves_owners_for_desired_selectors() {
        let a = Address::repeat_byte(0xaa);
        let s1 = Selector::from([1; 4]);
        let s2 = Selector::from([2; 4]);
        let ledger = InMemoryLedger::new(vec![Facet::new(a, [s1])]);

        let desired = vec![Facet::new(Address::repeat_byte(0xbb), [s1, s2])];
        let snap = Snapshot::capture(&ledger, &desired).unwrap();

        assert!(snap.is_registered(&s1));
        assert!(!snap.is_registered(&s2));
        assert_eq!(snap.owner(&s1), a);
        assert!(snap.owner(&s2).is_zero());
    }
}
