//! Hint-space names.

/// One named hint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HintEntry {
    /// `CRm:op2`.
    pub imm: u8,
    /// Symbolic name used in intrinsic names.
    pub name: &'static str,
    /// Assembly text.
    pub mnemonic: &'static str,
}

const fn hint(imm: u8, name: &'static str, mnemonic: &'static str) -> HintEntry {
    HintEntry {
        imm,
        name,
        mnemonic,
    }
}

/// Named hints. The BTI variants share a name and differ in mnemonic.
pub const HINTS: &[HintEntry] = &[
    hint(0x00, "NOP", "nop"),
    hint(0x01, "YIELD", "yield"),
    hint(0x02, "WFE", "wfe"),
    hint(0x03, "WFI", "wfi"),
    hint(0x04, "SEV", "sev"),
    hint(0x05, "SEVL", "sevl"),
    hint(0x06, "DGH", "dgh"),
    hint(0x07, "XPACLRI", "xpaclri"),
    hint(0x08, "PACIA1716", "pacia1716"),
    hint(0x0a, "PACIB1716", "pacib1716"),
    hint(0x0c, "AUTIA1716", "autia1716"),
    hint(0x0e, "AUTIB1716", "autib1716"),
    hint(0x10, "ESB", "esb"),
    hint(0x11, "PSB", "psb csync"),
    hint(0x12, "TSB", "tsb csync"),
    hint(0x14, "CSDB", "csdb"),
    hint(0x18, "PACIAZ", "paciaz"),
    hint(0x19, "PACIASP", "paciasp"),
    hint(0x1a, "PACIBZ", "pacibz"),
    hint(0x1b, "PACIBSP", "pacibsp"),
    hint(0x1c, "AUTIAZ", "autiaz"),
    hint(0x1d, "AUTIASP", "autiasp"),
    hint(0x1e, "AUTIBZ", "autibz"),
    hint(0x1f, "AUTIBSP", "autibsp"),
    hint(0x20, "BTI", "bti"),
    hint(0x22, "BTI", "bti c"),
    hint(0x24, "BTI", "bti j"),
    hint(0x26, "BTI", "bti jc"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_immediates_fit_and_unique() {
        for (i, a) in HINTS.iter().enumerate() {
            assert!(a.imm < 0x80);
            assert!(HINTS[i + 1..].iter().all(|b| b.imm != a.imm));
        }
    }
}
