//! System-register and PSTATE field names.

use crate::types::SysRegSelector;

/// One named system register.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SysRegEntry {
    pub selector: SysRegSelector,
    pub name: &'static str,
}

const fn entry(op0: u8, op1: u8, crn: u8, crm: u8, op2: u8, name: &'static str) -> SysRegEntry {
    SysRegEntry {
        selector: SysRegSelector::new(op0, op1, crn, crm, op2),
        name,
    }
}

const fn pstate(op1: u8, op2: u8, name: &'static str) -> SysRegEntry {
    SysRegEntry {
        selector: SysRegSelector::pstate(op1, op2),
        name,
    }
}

/// Named system registers and PSTATE fields.
pub const SYSREGS: &[SysRegEntry] = &[
    // Identification
    entry(3, 0, 0, 0, 0, "midr_el1"),
    entry(3, 0, 0, 0, 5, "mpidr_el1"),
    entry(3, 0, 0, 0, 6, "revidr_el1"),
    entry(3, 0, 0, 4, 0, "id_aa64pfr0_el1"),
    entry(3, 0, 0, 6, 0, "id_aa64isar0_el1"),
    entry(3, 0, 0, 7, 0, "id_aa64mmfr0_el1"),
    entry(3, 3, 0, 0, 1, "ctr_el0"),
    entry(3, 3, 0, 0, 7, "dczid_el0"),
    // Debug
    entry(2, 0, 0, 2, 2, "mdscr_el1"),
    entry(2, 0, 1, 0, 4, "oslar_el1"),
    // System control
    entry(3, 0, 1, 0, 0, "sctlr_el1"),
    entry(3, 0, 1, 0, 1, "actlr_el1"),
    entry(3, 0, 1, 0, 2, "cpacr_el1"),
    entry(3, 4, 1, 0, 0, "sctlr_el2"),
    entry(3, 4, 1, 1, 0, "hcr_el2"),
    entry(3, 6, 1, 0, 0, "sctlr_el3"),
    entry(3, 6, 1, 1, 0, "scr_el3"),
    entry(3, 6, 1, 1, 2, "cptr_el3"),
    // Translation
    entry(3, 0, 2, 0, 0, "ttbr0_el1"),
    entry(3, 0, 2, 0, 1, "ttbr1_el1"),
    entry(3, 0, 2, 0, 2, "tcr_el1"),
    entry(3, 4, 2, 0, 0, "ttbr0_el2"),
    entry(3, 4, 2, 0, 2, "tcr_el2"),
    entry(3, 4, 2, 1, 0, "vttbr_el2"),
    entry(3, 6, 2, 0, 0, "ttbr0_el3"),
    entry(3, 6, 2, 0, 2, "tcr_el3"),
    // Exception state
    entry(3, 0, 4, 0, 0, "spsr_el1"),
    entry(3, 0, 4, 0, 1, "elr_el1"),
    entry(3, 0, 4, 1, 0, "sp_el0"),
    entry(3, 0, 4, 2, 0, "spsel"),
    entry(3, 0, 4, 2, 2, "currentel"),
    entry(3, 3, 4, 2, 0, "nzcv"),
    entry(3, 3, 4, 2, 1, "daif"),
    entry(3, 3, 4, 4, 0, "fpcr"),
    entry(3, 3, 4, 4, 1, "fpsr"),
    entry(3, 4, 4, 0, 0, "spsr_el2"),
    entry(3, 4, 4, 0, 1, "elr_el2"),
    entry(3, 4, 4, 1, 0, "sp_el1"),
    entry(3, 6, 4, 0, 0, "spsr_el3"),
    entry(3, 6, 4, 0, 1, "elr_el3"),
    entry(3, 6, 4, 1, 0, "sp_el2"),
    // Faults
    entry(3, 0, 5, 1, 0, "afsr0_el1"),
    entry(3, 0, 5, 2, 0, "esr_el1"),
    entry(3, 4, 5, 2, 0, "esr_el2"),
    entry(3, 6, 5, 2, 0, "esr_el3"),
    entry(3, 0, 6, 0, 0, "far_el1"),
    entry(3, 4, 6, 0, 0, "far_el2"),
    entry(3, 6, 6, 0, 0, "far_el3"),
    entry(3, 0, 7, 4, 0, "par_el1"),
    // Memory attributes
    entry(3, 0, 10, 2, 0, "mair_el1"),
    entry(3, 4, 10, 2, 0, "mair_el2"),
    entry(3, 6, 10, 2, 0, "mair_el3"),
    // Vectors
    entry(3, 0, 12, 0, 0, "vbar_el1"),
    entry(3, 4, 12, 0, 0, "vbar_el2"),
    entry(3, 6, 12, 0, 0, "vbar_el3"),
    entry(3, 0, 12, 1, 0, "isr_el1"),
    // Thread and context IDs
    entry(3, 0, 13, 0, 1, "contextidr_el1"),
    entry(3, 0, 13, 0, 4, "tpidr_el1"),
    entry(3, 3, 13, 0, 2, "tpidr_el0"),
    entry(3, 3, 13, 0, 3, "tpidrro_el0"),
    entry(3, 4, 13, 0, 2, "tpidr_el2"),
    entry(3, 6, 13, 0, 2, "tpidr_el3"),
    // Generic timer
    entry(3, 0, 14, 1, 0, "cntkctl_el1"),
    entry(3, 3, 14, 0, 0, "cntfrq_el0"),
    entry(3, 3, 14, 0, 1, "cntpct_el0"),
    entry(3, 3, 14, 0, 2, "cntvct_el0"),
    entry(3, 3, 14, 2, 0, "cntp_tval_el0"),
    entry(3, 3, 14, 2, 1, "cntp_ctl_el0"),
    entry(3, 3, 14, 2, 2, "cntp_cval_el0"),
    entry(3, 3, 14, 3, 1, "cntv_ctl_el0"),
    // PSTATE fields (msr immediate)
    pstate(0, 3, "uao"),
    pstate(0, 4, "pan"),
    pstate(0, 5, "spsel"),
    pstate(3, 1, "ssbs"),
    pstate(3, 2, "dit"),
    pstate(3, 4, "tco"),
    pstate(3, 6, "daifset"),
    pstate(3, 7, "daifclr"),
];
