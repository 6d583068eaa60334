//! Core types for decoded A64 instructions.

use std::fmt;

/// A general-purpose register operand.
///
/// Register 31 means either the zero register or the stack pointer depending
/// on the instruction; `sp` records which form the encoding selected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Gpr {
    /// Register number (0..=31).
    pub index: u8,
    /// 64-bit (`x`) view when true, 32-bit (`w`) view otherwise.
    pub wide: bool,
    /// Register 31 is the stack pointer rather than the zero register.
    pub sp: bool,
}

impl Gpr {
    /// Operand whose register 31 is the zero register.
    #[must_use]
    pub const fn zr_form(index: u8, wide: bool) -> Self {
        Self {
            index,
            wide,
            sp: false,
        }
    }

    /// Operand whose register 31 is the stack pointer.
    #[must_use]
    pub const fn sp_form(index: u8, wide: bool) -> Self {
        Self {
            index,
            wide,
            sp: true,
        }
    }

    /// True when this operand names the zero register.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.index == 31 && !self.sp
    }

    /// Width of the operand in bytes.
    #[must_use]
    pub const fn size(self) -> u8 {
        if self.wide { 8 } else { 4 }
    }
}

/// Condition code (bits [3:0] of a condition field).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Condition(pub u8);

/// Memory barrier kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BarrierKind {
    /// Data memory barrier.
    Dmb,
    /// Data synchronization barrier.
    Dsb,
    /// Instruction synchronization barrier.
    Isb,
}

impl BarrierKind {
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Dmb => "dmb",
            Self::Dsb => "dsb",
            Self::Isb => "isb",
        }
    }

    /// Intrinsic name used when lifting.
    #[must_use]
    pub const fn intrinsic(self) -> &'static str {
        match self {
            Self::Dmb => "__dmb",
            Self::Dsb => "__dsb",
            Self::Isb => "__isb",
        }
    }
}

/// Exception-generating instructions other than `svc`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExceptionKind {
    /// Hypervisor call.
    Hvc,
    /// Secure monitor call.
    Smc,
    /// Breakpoint.
    Brk,
}

impl ExceptionKind {
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Hvc => "hvc",
            Self::Smc => "smc",
            Self::Brk => "brk",
        }
    }
}

/// Move-wide operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveWideKind {
    /// `movn`: write the inverted shifted immediate.
    Not,
    /// `movz`: write the shifted immediate, zeroing other bits.
    Zero,
    /// `movk`: replace one 16-bit slice, keeping other bits.
    Keep,
}

impl MoveWideKind {
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Not => "movn",
            Self::Zero => "movz",
            Self::Keep => "movk",
        }
    }
}

/// Direction of a system-register move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// `mrs`: system register to general-purpose register.
    Read,
    /// `msr`: general-purpose register to system register.
    Write,
}

/// System-register selector `(op0, op1, CRn, CRm, op2)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SysRegSelector {
    pub op0: u8,
    pub op1: u8,
    pub crn: u8,
    pub crm: u8,
    pub op2: u8,
}

impl SysRegSelector {
    #[must_use]
    pub const fn new(op0: u8, op1: u8, crn: u8, crm: u8, op2: u8) -> Self {
        Self {
            op0,
            op1,
            crn,
            crm,
            op2,
        }
    }

    /// Selector for a PSTATE field addressed by `(op1, op2)`.
    ///
    /// PSTATE fields are identified by op0=0 and CRn=4; CRm carries the
    /// immediate and is not part of the name.
    #[must_use]
    pub const fn pstate(op1: u8, op2: u8) -> Self {
        Self::new(0, op1, 4, 0, op2)
    }

    /// Packed 16-bit form: `op0:op1:CRn:CRm:op2`.
    #[must_use]
    pub const fn encoded(self) -> u16 {
        ((self.op0 as u16) << 14)
            | ((self.op1 as u16) << 11)
            | ((self.crn as u16) << 7)
            | ((self.crm as u16) << 3)
            | (self.op2 as u16)
    }
}

impl fmt::Display for SysRegSelector {
    /// Generic name `s<op0>_<op1>_c<n>_c<m>_<op2>`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "s{}_{}_c{}_c{}_{}",
            self.op0, self.op1, self.crn, self.crm, self.op2
        )
    }
}

/// Second operand of a conditional compare.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompareOperand {
    /// 5-bit unsigned immediate.
    Imm(u8),
    /// Register.
    Reg(Gpr),
}

/// A decoded A64 instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Instr {
    /// `svc #imm`.
    Syscall { imm: u16 },
    /// `hvc`, `smc`, or `brk`.
    Exception { kind: ExceptionKind, imm: u16 },
    /// `dmb`, `dsb`, or `isb` with its CRm option.
    Barrier { kind: BarrierKind, option: u8 },
    /// Hint space (`nop`, `yield`, `wfi`, `bti`, ...), imm = CRm:op2.
    Hint { imm: u8 },
    /// `msr <sysreg>, xt` / `mrs xt, <sysreg>`.
    SystemRegisterMove {
        direction: Direction,
        rt: Gpr,
        sysreg: SysRegSelector,
    },
    /// `msr <pstatefield>, #imm`.
    PstateMove { field: SysRegSelector, imm: u8 },
    /// `ccmp` / `ccmn`.
    ConditionalCompare {
        negate: bool,
        rn: Gpr,
        operand: CompareOperand,
        cond: Condition,
        nzcv: u8,
    },
    /// `movz`, `movn`, `movk`.
    MoveImmediate {
        kind: MoveWideKind,
        rd: Gpr,
        imm16: u16,
        shift: u8,
    },
    /// `mov rd, rm` (ORR with the zero register).
    MoveRegister { rd: Gpr, rm: Gpr },
    /// `add`, `adds`, `sub`, `subs` with a 12-bit immediate.
    AddSubImmediate {
        sub: bool,
        set_flags: bool,
        rd: Gpr,
        rn: Gpr,
        imm12: u16,
        shift12: bool,
    },
    /// `b` / `bl` with a byte offset from the instruction address.
    Branch { link: bool, offset: i64 },
    /// `br` / `blr`.
    BranchRegister { link: bool, rn: Gpr },
    /// `ret`.
    Return { rn: Gpr },
    /// Any word not claimed by a decoder group.
    Unrecognized { raw: u32 },
}

impl Instr {
    /// Short class tag.
    #[must_use]
    pub const fn class(&self) -> &'static str {
        match self {
            Self::Syscall { .. } => "syscall",
            Self::Exception { .. } => "exception",
            Self::Barrier { .. } => "barrier",
            Self::Hint { .. } => "hint",
            Self::SystemRegisterMove { .. } => "sysreg",
            Self::PstateMove { .. } => "pstate",
            Self::ConditionalCompare { .. } => "ccmp",
            Self::MoveImmediate { .. } => "movw",
            Self::MoveRegister { .. } => "movr",
            Self::AddSubImmediate { .. } => "addsub",
            Self::Branch { .. } => "branch",
            Self::BranchRegister { .. } => "branch-reg",
            Self::Return { .. } => "ret",
            Self::Unrecognized { .. } => "unknown",
        }
    }

    #[must_use]
    pub const fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_encoding() {
        // vbar_el3
        let sel = SysRegSelector::new(3, 6, 12, 0, 0);
        assert_eq!(sel.encoded(), 0xF600);
        assert_eq!(sel.to_string(), "s3_6_c12_c0_0");
    }

    #[test]
    fn test_gpr_forms() {
        assert!(Gpr::zr_form(31, true).is_zero());
        assert!(!Gpr::sp_form(31, true).is_zero());
        assert!(!Gpr::zr_form(30, false).is_zero());
        assert_eq!(Gpr::zr_form(0, false).size(), 4);
    }
}
