//! Statement IR.

use std::borrow::Cow;

use crate::expr::Expr;
use crate::reg::{Flag, Reg};

/// Ordered input parameters of an intrinsic call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CallParams(pub Vec<Expr>);

impl CallParams {
    /// No parameters.
    #[must_use]
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    /// A single parameter.
    #[must_use]
    pub fn one(expr: Expr) -> Self {
        Self(vec![expr])
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Statement kinds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Stmt {
    /// Write a register.
    SetReg { dest: Reg, value: Expr },
    /// Write a condition flag.
    SetFlag { flag: Flag, value: Expr },
    /// Expression evaluated for its value only.
    Eval(Expr),
    /// Conditional branch to statement indices within the function.
    If {
        cond: Expr,
        then_target: usize,
        else_target: usize,
    },
    /// Unconditional branch to a statement index within the function.
    Goto(usize),
    /// Jump to a computed or constant address.
    Jump(Expr),
    /// Call a subroutine at a computed or constant address.
    Call(Expr),
    /// Hardware primitive with named outputs and inputs.
    Intrinsic {
        outputs: Vec<Reg>,
        name: Cow<'static, str>,
        params: CallParams,
    },
    /// System-call dispatch.
    Syscall,
    /// Return through the given address.
    Ret(Expr),
    /// Software breakpoint / trap with its immediate.
    Trap(u64),
    /// Undefined instruction.
    Undefined,
    /// Recognized instruction without lifting semantics.
    Unimplemented,
}

impl Stmt {
    /// Create a register write.
    #[must_use]
    pub const fn set_reg(dest: Reg, value: Expr) -> Self {
        Self::SetReg { dest, value }
    }

    /// Create a flag write.
    #[must_use]
    pub const fn set_flag(flag: Flag, value: Expr) -> Self {
        Self::SetFlag { flag, value }
    }

    /// Create an intrinsic call.
    #[must_use]
    pub fn intrinsic(
        outputs: Vec<Reg>,
        name: impl Into<Cow<'static, str>>,
        params: CallParams,
    ) -> Self {
        Self::Intrinsic {
            outputs,
            name: name.into(),
            params,
        }
    }

    /// Check if this statement ends straight-line execution of its block.
    #[must_use]
    pub const fn is_terminator(&self) -> bool {
        matches!(
            self,
            Self::If { .. } | Self::Goto(_) | Self::Jump(_) | Self::Ret(_) | Self::Undefined
        )
    }

    /// Check if removing this statement could never change observable state.
    ///
    /// Only register writes and bare arithmetic qualify; whether such a
    /// statement is actually dead depends on its context.
    #[must_use]
    pub const fn is_pure(&self) -> bool {
        matches!(self, Self::SetReg { .. } | Self::Eval(_))
    }
}
