use alloy_json_abi::JsonAbi;
use alloy_primitives::{Address, Selector, keccak256};
use facetcut_types::cut::Facet;

/// First four bytes of `keccak256(signature)`.
pub fn selector_for_signature(signature: &str) -> Selector {
    let digest = keccak256(signature.as_bytes());
    Selector::from_slice(&digest[..4])
}

/// Distinct selectors of every function in the ABI, in ABI iteration order.
pub fn selectors(abi: &JsonAbi) -> Vec<Selector> {
    signatures(abi).into_iter().map(|(s, _)| s).collect()
}

/// Distinct `(selector, canonical signature)` pairs of every function in the ABI.
pub fn signatures(abi: &JsonAbi) -> Vec<(Selector, String)> {
    let mut out: Vec<(Selector, String)> = Vec::new();
    for f in abi.functions() {
        let selector = f.selector();
        if out.iter().any(|(s, _)| *s == selector) {
            continue;
        }
        out.push((selector, f.signature()));
    }
    out
}

pub fn facet_from_abi(target: Address, abi: &JsonAbi) -> Facet {
    Facet::new(target, selectors(abi))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn erc20_abi() -> JsonAbi {
        serde_json::from_str(
            r#"[
                {"type":"function","name":"transfer","stateMutability":"nonpayable",
                 "inputs":[{"name":"to","type":"address"},{"name":"amount","type":"uint256"}],
                 "outputs":[{"name":"","type":"bool"}]},
                {"type":"function","name":"balanceOf","stateMutability":"view",
                 "inputs":[{"name":"owner","type":"address"}],
                 "outputs":[{"name":"","type":"uint256"}]},
                {"type":"function","name":"totalSupply","stateMutability":"view",
                 "inputs":[],"outputs":[{"name":"","type":"uint256"}]},
                {"type":"event","name":"Transfer","anonymous":false,
                 "inputs":[{"name":"from","type":"address","indexed":true},
                           {"name":"to","type":"address","indexed":true},
                           {"name":"value","type":"uint256","indexed":false}]}
            ]"#,
        )
        .expect("abi json")
    }

    #[test]
    fn signature_hash_matches_known_selectors() {
        assert_eq!(
            selector_for_signature("transfer(address,uint256)"),
            Selector::from([0xa9, 0x05, 0x9c, 0xbb])
        );
        assert_eq!(
            selector_for_signature("balanceOf(address)"),
            Selector::from([0x70, 0xa0, 0x82, 0x31])
        );
        assert_eq!(
            selector_for_signature("totalSupply()"),
            Selector::from([0x18, 0x16, 0x0d, 0xdd])
        );
    }

    #[test]
    fn abi_selectors_skip_events() {
        let got = selectors(&erc20_abi());
        assert_eq!(got.len(), 3);
        assert!(got.contains(&selector_for_signature("transfer(address,uint256)")));
        assert!(got.contains(&selector_for_signature("balanceOf(address)")));
        assert!(got.contains(&selector_for_signature("totalSupply()")));
    }

    #[test]
    fn signatures_are_canonical() {
        let sigs: Vec<String> = signatures(&erc20_abi()).into_iter().map(|(_, s)| s).collect();
        assert!(sigs.contains(&"transfer(address,uint256)".to_string()));
    }

    #[test]
    fn empty_abi_yields_no_selectors() {
        let abi: JsonAbi = serde_json::from_str("[]").unwrap();
        assert!(selectors(&abi).is_empty());
    }

    #[test]
    fn facet_from_abi_uses_target() {
        let target = Address::repeat_byte(0xaa);
        let facet = facet_from_abi(target, &erc20_abi());
        assert_eq!(facet.target, target);
        assert_eq!(facet.selectors.len(), 3);
    }
}
