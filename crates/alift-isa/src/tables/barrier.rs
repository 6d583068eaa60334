//! Barrier option names.

/// Option mnemonics indexed by CRm. `None` entries print as `#<n>`.
pub const BARRIER_OPTIONS: [Option<&str>; 16] = [
    None,
    Some("oshld"),
    Some("oshst"),
    Some("osh"),
    None,
    Some("nshld"),
    Some("nshst"),
    Some("nsh"),
    None,
    Some("ishld"),
    Some("ishst"),
    Some("ish"),
    None,
    Some("ld"),
    Some("st"),
    Some("sy"),
];

/// Option value meaning the full system.
pub const OPTION_SY: u8 = 15;
