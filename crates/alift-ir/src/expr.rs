//! Expression IR.

use std::borrow::Cow;
use std::fmt::{self, Display};

use crate::reg::{Flag, Reg};

/// Binary operations.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BinaryOp {
    Add,
    Sub,
    And,
    Or,
    CmpE,
    CmpSlt,
    CmpUlt,
    CmpUge,
}

impl BinaryOp {
    /// Canonical operation name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::And => "AND",
            Self::Or => "OR",
            Self::CmpE => "CMP_E",
            Self::CmpSlt => "CMP_SLT",
            Self::CmpUlt => "CMP_ULT",
            Self::CmpUge => "CMP_UGE",
        }
    }

    const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::And => "&",
            Self::Or => "|",
            Self::CmpE => "==",
            Self::CmpSlt => "s<",
            Self::CmpUlt => "u<",
            Self::CmpUge => "u>=",
        }
    }

    /// Whether the result is a single-bit comparison.
    #[must_use]
    pub const fn is_compare(self) -> bool {
        matches!(
            self,
            Self::CmpE | Self::CmpSlt | Self::CmpUlt | Self::CmpUge
        )
    }
}

/// Expression tree node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    /// Constant with its width in bytes.
    Const { value: u64, size: u8 },
    /// Constant code address.
    ConstPtr(u64),
    Reg(Reg),
    Flag(Flag),
    /// System register named as data, never dereferenced.
    SysReg(Cow<'static, str>),
    Binary {
        op: BinaryOp,
        left: Box<Self>,
        right: Box<Self>,
        size: u8,
    },
}

// These are factory methods, not trait implementations
#[allow(clippy::should_implement_trait)]
impl Expr {
    /// Create a constant.
    #[must_use]
    pub const fn constant(value: u64, size: u8) -> Self {
        Self::Const { value, size }
    }

    /// Create a code pointer constant.
    #[must_use]
    pub const fn const_ptr(addr: u64) -> Self {
        Self::ConstPtr(addr)
    }

    /// Create a register read.
    #[must_use]
    pub const fn reg(reg: Reg) -> Self {
        Self::Reg(reg)
    }

    /// Create a flag read.
    #[must_use]
    pub const fn flag(flag: Flag) -> Self {
        Self::Flag(flag)
    }

    /// Create a literal system-register operand.
    #[must_use]
    pub fn sysreg(name: impl Into<Cow<'static, str>>) -> Self {
        Self::SysReg(name.into())
    }

    fn binary(op: BinaryOp, left: Self, right: Self) -> Self {
        let size = if op.is_compare() {
            0
        } else {
            left.size().max(right.size())
        };
        Self::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
            size,
        }
    }

    #[must_use]
    pub fn add(left: Self, right: Self) -> Self {
        Self::binary(BinaryOp::Add, left, right)
    }

    #[must_use]
    pub fn sub(left: Self, right: Self) -> Self {
        Self::binary(BinaryOp::Sub, left, right)
    }

    #[must_use]
    pub fn and(left: Self, right: Self) -> Self {
        Self::binary(BinaryOp::And, left, right)
    }

    #[must_use]
    pub fn or(left: Self, right: Self) -> Self {
        Self::binary(BinaryOp::Or, left, right)
    }

    #[must_use]
    pub fn cmp_e(left: Self, right: Self) -> Self {
        Self::binary(BinaryOp::CmpE, left, right)
    }

    #[must_use]
    pub fn cmp_slt(left: Self, right: Self) -> Self {
        Self::binary(BinaryOp::CmpSlt, left, right)
    }

    #[must_use]
    pub fn cmp_ult(left: Self, right: Self) -> Self {
        Self::binary(BinaryOp::CmpUlt, left, right)
    }

    #[must_use]
    pub fn cmp_uge(left: Self, right: Self) -> Self {
        Self::binary(BinaryOp::CmpUge, left, right)
    }

    /// Width of the value in bytes (0 for single-bit results).
    #[must_use]
    pub fn size(&self) -> u8 {
        match self {
            Self::Const { size, .. } | Self::Binary { size, .. } => *size,
            Self::ConstPtr(_) | Self::SysReg(_) => 8,
            Self::Reg(reg) => reg.size(),
            Self::Flag(_) => 0,
        }
    }

    /// Visit every register read by this expression.
    pub fn for_each_reg(&self, f: &mut impl FnMut(&Reg)) {
        match self {
            Self::Reg(reg) => f(reg),
            Self::Binary { left, right, .. } => {
                left.for_each_reg(f);
                right.for_each_reg(f);
            }
            Self::Const { .. } | Self::ConstPtr(_) | Self::Flag(_) | Self::SysReg(_) => {}
        }
    }
}

/// Short operand text, as embedded in `<il: ...>` parameter lists.
impl Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Const { value, .. } | Self::ConstPtr(value) => {
                if *value < 10 {
                    write!(f, "{value}")
                } else {
                    write!(f, "{value:#x}")
                }
            }
            Self::Reg(reg) => write!(f, "{reg}"),
            Self::Flag(flag) => write!(f, "{flag}"),
            Self::SysReg(name) => f.write_str(name),
            Self::Binary {
                op, left, right, ..
            } => write!(f, "{left} {} {right}", op.symbol()),
        }
    }
}
