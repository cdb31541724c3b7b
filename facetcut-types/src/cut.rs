use alloy_primitives::{Address, Selector};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Facet cut action, in EIP-2535 order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Add,
    Replace,
    Remove,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::Add, Action::Replace, Action::Remove];

    /// Numeric code used by `IDiamondCut.FacetCutAction`.
    pub fn code(self) -> u8 {
        match self {
            Action::Add => 0,
            Action::Replace => 1,
            Action::Remove => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Add => "add",
            Action::Replace => "replace",
            Action::Remove => "remove",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "add" => Ok(Action::Add),
            "replace" => Ok(Action::Replace),
            "remove" => Ok(Action::Remove),
            other => Err(format!(
                "unknown action '{}' (expected add, replace or remove)",
                other
            )),
        }
    }
}

/// A contract address and the selectors it implements.
///
/// Selectors are unique; construction keeps the first occurrence of each.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facet {
    pub target: Address,
    pub selectors: Vec<Selector>,
}

impl Facet {
    pub fn new(target: Address, selectors: impl IntoIterator<Item = Selector>) -> Self {
        Self {
            target,
            selectors: dedup(selectors),
        }
    }

    pub fn contains(&self, selector: &Selector) -> bool {
        self.selectors.contains(selector)
    }
}

/// A single add/replace/remove operation on a diamond.
///
/// The target is the zero address if and only if the action is [`Action::Remove`].
/// [`FacetCut::remove`] always uses the zero target; `add` and `replace` expect a non-zero one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetCut {
    pub target: Address,
    pub action: Action,
    pub selectors: Vec<Selector>,
}

impl FacetCut {
    pub fn add(target: Address, selectors: impl IntoIterator<Item = Selector>) -> Self {
        Self {
            target,
            action: Action::Add,
            selectors: dedup(selectors),
        }
    }

    pub fn replace(target: Address, selectors: impl IntoIterator<Item = Selector>) -> Self {
        Self {
            target,
            action: Action::Replace,
            selectors: dedup(selectors),
        }
    }

    pub fn remove(selectors: impl IntoIterator<Item = Selector>) -> Self {
        Self {
            target: Address::ZERO,
            action: Action::Remove,
            selectors: dedup(selectors),
        }
    }

    /// Whether the zero-target-iff-remove invariant holds.
    ///
    /// Records deserialized from disk can violate it; the submit pipeline checks before sending.
    pub fn is_well_formed(&self) -> bool {
        (self.action == Action::Remove) == self.target.is_zero()
    }
}

fn dedup(selectors: impl IntoIterator<Item = Selector>) -> Vec<Selector> {
    let mut out: Vec<Selector> = Vec::new();
    for s in selectors {
        if !out.contains(&s) {
            out.push(s);
        }
    }
    out
}
