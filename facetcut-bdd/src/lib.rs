//! BDD harness (cucumber-rs).
//!
//! Scenarios name contracts by letter (`A`, `B`, ...) instead of spelling out addresses.
//! `*` and `0` both stand for the zero address.

use anyhow::{Context, bail};
use facetcut_types::{Address, Selector};

/// Address a scenario refers to by name: a single letter `X` becomes `0xXXXX...`.
pub fn named_address(name: &str) -> anyhow::Result<Address> {
    match name {
        "*" | "0" => return Ok(Address::ZERO),
        _ => {}
    }
    let mut chars = name.chars();
    let (Some(c), None) = (chars.next(), chars.next()) else {
        return name
            .parse::<Address>()
            .with_context(|| format!("unknown contract name '{}'", name));
    };
    let Some(nibble) = c.to_digit(16) else {
        bail!("contract name '{}' is not a hex letter", name);
    };
    let byte = (nibble as u8) << 4 | nibble as u8;
    Ok(Address::repeat_byte(byte))
}

/// Comma-separated selector list; `none` is the empty list.
pub fn parse_selectors(list: &str) -> anyhow::Result<Vec<Selector>> {
    if list == "none" {
        return Ok(Vec::new());
    }
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<Selector>()
                .with_context(|| format!("bad selector '{}'", s))
        })
        .collect()
}
