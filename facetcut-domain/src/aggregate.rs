use alloy_primitives::{Address, Selector};
use facetcut_types::cut::{Action, FacetCut};
use facetcut_types::diagnostics::Warning;
use indexmap::{IndexMap, IndexSet};
use std::collections::HashMap;

/// Grouped cuts plus the diagnostics found while grouping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregated {
    pub cuts: Vec<FacetCut>,
    pub warnings: Vec<Warning>,
}

/// Fold cut records into one group per `(action, target)`.
///
/// Groups keep the position of their first record; selectors are unioned in first-seen order.
/// Groups left without selectors are dropped. A selector present in more than one group is
/// reported once per extra group, naming that group, and the output is left as is.
pub fn aggregate(cuts: impl IntoIterator<Item = FacetCut>) -> Aggregated {
    let mut groups: IndexMap<(Action, Address), IndexSet<Selector>> = IndexMap::new();
    for cut in cuts {
        groups
            .entry((cut.action, cut.target))
            .or_default()
            .extend(cut.selectors);
    }

    let cuts: Vec<FacetCut> = groups
        .into_iter()
        .filter(|(_, selectors)| !selectors.is_empty())
        .map(|((action, target), selectors)| FacetCut {
            target,
            action,
            selectors: selectors.into_iter().collect(),
        })
        .collect();

    let warnings = collisions(&cuts);
    Aggregated { cuts, warnings }
}

fn collisions(cuts: &[FacetCut]) -> Vec<Warning> {
    let mut seen: HashMap<Selector, usize> = HashMap::new();
    let mut out = Vec::new();
    for (idx, cut) in cuts.iter().enumerate() {
        for selector in &cut.selectors {
            match seen.get(selector) {
                Some(first) if *first != idx => out.push(Warning::SelectorCollision {
                    selector: *selector,
                    action: cut.action,
                    target: cut.target,
                }),
                Some(_) => {}
                None => {
                    seen.insert(*selector, idx);
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sel(b: u8) -> Selector {
        Selector::from([b; 4])
    }

    #[test]
    fn merges_same_action_and_target() {
        let a = Address::repeat_byte(0xaa);
        let b = Address::repeat_byte(0xbb);
        let out = aggregate([
            FacetCut::add(a, [sel(1), sel(2)]),
            FacetCut::add(b, [sel(3)]),
            FacetCut::add(a, [sel(2), sel(4)]),
        ]);

        assert_eq!(
            out.cuts,
            vec![
                FacetCut::add(a, [sel(1), sel(2), sel(4)]),
                FacetCut::add(b, [sel(3)]),
            ]
        );
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn same_target_different_action_stays_split() {
        let a = Address::repeat_byte(0xaa);
        let out = aggregate([FacetCut::add(a, [sel(1)]), FacetCut::replace(a, [sel(2)])]);
        assert_eq!(out.cuts.len(), 2);
    }

    #[test]
    fn removals_fold_into_one_zero_target_group() {
        let out = aggregate([FacetCut::remove([sel(1)]), FacetCut::remove([sel(2)])]);
        assert_eq!(out.cuts, vec![FacetCut::remove([sel(1), sel(2)])]);
    }

    #[test]
    fn collision_warns_without_changing_output() {
        let a = Address::repeat_byte(0xaa);
        let input = vec![FacetCut::add(a, [sel(7)]), FacetCut::remove([sel(7)])];
        let out = aggregate(input.clone());

        assert_eq!(out.cuts, input);
        assert_eq!(
            out.warnings,
            vec![Warning::SelectorCollision {
                selector: sel(7),
                action: Action::Remove,
                target: Address::ZERO,
            }]
        );
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(aggregate(Vec::new()), Aggregated::default());
    }
}
