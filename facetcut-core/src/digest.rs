//! sha256 digests binding a written plan to its cuts and to the ledger state it was computed from.

use anyhow::Context;
use facetcut_types::cut::{Facet, FacetCut};
use sha2::{Digest, Sha256};

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Digest of the cuts exactly as they will be sent; order matters.
pub fn cut_digest(cuts: &[FacetCut]) -> anyhow::Result<String> {
    let bytes = serde_json::to_vec(cuts).context("serialize cuts for digest")?;
    Ok(sha256_hex(&bytes))
}

/// Digest of a ledger's registered facets.
///
/// Facets are sorted by target and selectors within each facet are sorted, so two reads of the
/// same registrations hash the same regardless of the order the ledger reports them in.
pub fn snapshot_digest(facets: &[Facet]) -> anyhow::Result<String> {
    let mut canonical: Vec<Facet> = facets
        .iter()
        .filter(|f| !f.selectors.is_empty())
        .map(|f| {
            let mut selectors = f.selectors.clone();
            selectors.sort();
            Facet {
                target: f.target,
                selectors,
            }
        })
        .collect();
    canonical.sort_by(|a, b| a.target.cmp(&b.target));

    let bytes = serde_json::to_vec(&canonical).context("serialize snapshot for digest")?;
    Ok(sha256_hex(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use facetcut_types::{Address, Selector};

    fn sel(b: u8) -> Selector {
        Selector::from([b; 4])
    }

    #[test]
    fn sha256_of_empty_input() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn snapshot_digest_ignores_ordering() {
        let a = Address::repeat_byte(0xaa);
        let b = Address::repeat_byte(0xbb);
        let one = vec![Facet::new(a, [sel(1), sel(2)]), Facet::new(b, [sel(3)])];
        let two = vec![Facet::new(b, [sel(3)]), Facet::new(a, [sel(2), sel(1)])];
        assert_eq!(
            snapshot_digest(&one).unwrap(),
            snapshot_digest(&two).unwrap()
        );
    }

    #[test]
    fn snapshot_digest_changes_with_ownership() {
        let a = Address::repeat_byte(0xaa);
        let b = Address::repeat_byte(0xbb);
        let before = vec![Facet::new(a, [sel(1)])];
        let after = vec![Facet::new(b, [sel(1)])];
        assert_ne!(
            snapshot_digest(&before).unwrap(),
            snapshot_digest(&after).unwrap()
        );
    }

    #[test]
    fn cut_digest_is_order_sensitive() {
        let a = Address::repeat_byte(0xaa);
        let cuts = vec![FacetCut::add(a, [sel(1)]), FacetCut::remove([sel(2)])];
        let reversed: Vec<FacetCut> = cuts.iter().rev().cloned().collect();
        assert_ne!(cut_digest(&cuts).unwrap(), cut_digest(&reversed).unwrap());
    }
}
