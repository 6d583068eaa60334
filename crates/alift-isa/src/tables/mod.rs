//! Read-only symbol tables for system registers, hints, barriers, and
//! condition codes.
//!
//! Tables are `const` slices bundled into a `'static` [`SymbolTables`]; all
//! lookups are total and fall back to generic names on a miss.

mod barrier;
mod cond;
mod hint;
mod sysreg;

use std::borrow::Cow;

pub use barrier::{BARRIER_OPTIONS, OPTION_SY};
pub use cond::condition_name;
pub use hint::{HINTS, HintEntry};
pub use sysreg::{SYSREGS, SysRegEntry};

use crate::types::{Condition, SysRegSelector};

/// Standard tables.
pub static STANDARD_TABLES: SymbolTables = SymbolTables::new(SYSREGS, HINTS, &BARRIER_OPTIONS);

/// Symbol tables consulted by the lifter and disassembler.
#[derive(Debug)]
pub struct SymbolTables {
    sysregs: &'static [SysRegEntry],
    hints: &'static [HintEntry],
    barrier_options: &'static [Option<&'static str>; 16],
}

impl SymbolTables {
    #[must_use]
    pub const fn new(
        sysregs: &'static [SysRegEntry],
        hints: &'static [HintEntry],
        barrier_options: &'static [Option<&'static str>; 16],
    ) -> Self {
        Self {
            sysregs,
            hints,
            barrier_options,
        }
    }

    /// The standard tables.
    #[must_use]
    pub fn standard() -> &'static Self {
        &STANDARD_TABLES
    }

    /// Canonical system-register name, or `s<op0>_<op1>_c<n>_c<m>_<op2>`.
    #[must_use]
    pub fn sysreg_name(&self, selector: SysRegSelector) -> Cow<'static, str> {
        self.sysregs
            .iter()
            .find(|entry| entry.selector == selector)
            .map_or_else(
                || Cow::Owned(selector.to_string()),
                |entry| Cow::Borrowed(entry.name),
            )
    }

    /// Named hint for an immediate.
    #[must_use]
    pub fn hint(&self, imm: u8) -> Option<&'static HintEntry> {
        self.hints.iter().find(|entry| entry.imm == imm)
    }

    /// Intrinsic name for a hint: `SystemHintOp_<Name>` or
    /// `SystemHintOp_HINT_<n>`.
    #[must_use]
    pub fn hint_intrinsic(&self, imm: u8) -> String {
        match self.hint(imm) {
            Some(entry) => format!("SystemHintOp_{}", entry.name),
            None => format!("SystemHintOp_HINT_{imm}"),
        }
    }

    /// Assembly text for a hint: its alias or `hint #<n>`.
    #[must_use]
    pub fn hint_mnemonic(&self, imm: u8) -> Cow<'static, str> {
        self.hint(imm).map_or_else(
            || Cow::Owned(format!("hint #{imm:#x}")),
            |entry| Cow::Borrowed(entry.mnemonic),
        )
    }

    /// Barrier option mnemonic, or `#<n>`.
    #[must_use]
    pub fn barrier_option(&self, option: u8) -> Cow<'static, str> {
        self.barrier_options[(option & 0xF) as usize]
            .map_or_else(|| Cow::Owned(format!("#{option}")), Cow::Borrowed)
    }

    /// Condition code suffix.
    #[must_use]
    pub const fn condition(&self, cond: Condition) -> &'static str {
        condition_name(cond)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sysreg_fallback_is_total() {
        let tables = SymbolTables::standard();
        assert_eq!(tables.sysreg_name(SysRegSelector::new(3, 6, 12, 0, 0)), "vbar_el3");
        assert_eq!(tables.sysreg_name(SysRegSelector::new(3, 6, 1, 0, 0)), "sctlr_el3");
        assert_eq!(tables.sysreg_name(SysRegSelector::pstate(3, 7)), "daifclr");
        assert_eq!(
            tables.sysreg_name(SysRegSelector::new(3, 7, 15, 2, 3)),
            "s3_7_c15_c2_3"
        );
    }

    #[test]
    fn test_hint_lookup() {
        let tables = SymbolTables::standard();
        assert_eq!(tables.hint(0x22).map(|h| h.name), Some("BTI"));
        assert_eq!(tables.hint(0x11).map(|h| h.mnemonic), Some("psb csync"));
        assert!(tables.hint(0x15).is_none());
        assert!(tables.hint(0x7f).is_none());
    }

    #[test]
    fn test_hint_names() {
        let tables = SymbolTables::standard();
        assert_eq!(tables.hint_intrinsic(0x22), "SystemHintOp_BTI");
        assert_eq!(tables.hint_intrinsic(0), "SystemHintOp_NOP");
        assert_eq!(tables.hint_intrinsic(0x15), "SystemHintOp_HINT_21");
        assert_eq!(tables.hint_mnemonic(0x15), "hint #0x15");
        assert_eq!(tables.hint_mnemonic(0x24), "bti j");
    }

    #[test]
    fn test_barrier_fallback() {
        let tables = SymbolTables::standard();
        assert_eq!(tables.barrier_option(11), "ish");
        assert_eq!(tables.barrier_option(4), "#4");
    }
}
