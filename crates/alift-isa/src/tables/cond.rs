//! Condition code names.

use crate::types::Condition;

const CONDITION_NAMES: [&str; 16] = [
    "eq", "ne", "cs", "cc", "mi", "pl", "vs", "vc", "hi", "ls", "ge", "lt", "gt", "le", "al", "nv",
];

/// Get the mnemonic suffix for a condition code.
#[must_use]
pub const fn condition_name(cond: Condition) -> &'static str {
    CONDITION_NAMES[(cond.0 & 0xF) as usize]
}
