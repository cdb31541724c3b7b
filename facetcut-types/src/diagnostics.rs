use crate::cut::Action;
use alloy_primitives::{Address, Selector};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-fatal planner diagnostics, surfaced to the caller instead of logged in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Warning {
    /// A scan found no qualifying candidates.
    NoChangesDetected { action: Action },

    /// A selector ended up in more than one output group.
    ///
    /// `action` and `target` name the later group holding the selector.
    SelectorCollision {
        selector: Selector,
        action: Action,
        target: Address,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::NoChangesDetected { action } => {
                write!(f, "no {} changes detected", action)
            }
            Warning::SelectorCollision {
                selector,
                action,
                target,
            } => write!(
                f,
                "selector {} also appears in {} cut for {}",
                selector, action, target
            ),
        }
    }
}
