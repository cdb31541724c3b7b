use crate::cut::Action;
use alloy_primitives::{Address, Selector};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Whether a filter restricts candidates to its matches or excludes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    Only,
    Except,
}

/// Inclusion/exclusion rule for one action.
///
/// A zero `contract` is a wildcard matching any contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    #[serde(rename = "type")]
    pub kind: FilterKind,
    pub action: Action,
    #[serde(default)]
    pub contract: Address,
    #[serde(default)]
    pub selectors: BTreeSet<Selector>,
}

impl Filter {
    pub fn only(
        action: Action,
        contract: Address,
        selectors: impl IntoIterator<Item = Selector>,
    ) -> Self {
        Self {
            kind: FilterKind::Only,
            action,
            contract,
            selectors: selectors.into_iter().collect(),
        }
    }

    pub fn except(
        action: Action,
        contract: Address,
        selectors: impl IntoIterator<Item = Selector>,
    ) -> Self {
        Self {
            kind: FilterKind::Except,
            action,
            contract,
            selectors: selectors.into_iter().collect(),
        }
    }

    pub fn is_wildcard(&self) -> bool {
        self.contract.is_zero()
    }
}

/// The `only` / `except` lists that apply to a single action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterPair {
    #[serde(default)]
    pub only: Vec<Filter>,
    #[serde(default)]
    pub except: Vec<Filter>,
}

impl FilterPair {
    pub fn is_empty(&self) -> bool {
        self.only.is_empty() && self.except.is_empty()
    }
}

/// Three independent filter pairs, one per action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionFilters {
    #[serde(default)]
    pub add: FilterPair,
    #[serde(default)]
    pub replace: FilterPair,
    #[serde(default)]
    pub remove: FilterPair,
}

impl ActionFilters {
    /// Partition a flat filter list by action and kind, preserving order.
    pub fn from_filters(filters: impl IntoIterator<Item = Filter>) -> Self {
        let mut out = Self::default();
        for f in filters {
            let pair = out.pair_mut(f.action);
            match f.kind {
                FilterKind::Only => pair.only.push(f),
                FilterKind::Except => pair.except.push(f),
            }
        }
        out
    }

    pub fn pair(&self, action: Action) -> &FilterPair {
        match action {
            Action::Add => &self.add,
            Action::Replace => &self.replace,
            Action::Remove => &self.remove,
        }
    }

    pub fn pair_mut(&mut self, action: Action) -> &mut FilterPair {
        match action {
            Action::Add => &mut self.add,
            Action::Replace => &mut self.replace,
            Action::Remove => &mut self.remove,
        }
    }

    /// Flatten back into a single list in add, replace, remove order.
    pub fn to_filters(&self) -> Vec<Filter> {
        Action::ALL
            .iter()
            .flat_map(|a| {
                let p = self.pair(*a);
                p.only.iter().chain(p.except.iter()).cloned()
            })
            .collect()
    }
}
