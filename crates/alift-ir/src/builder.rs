//! IR builder fluent API.

use std::borrow::Cow;

use crate::expr::Expr;
use crate::reg::{Flag, Reg};
use crate::stmt::{CallParams, Stmt};

/// Builder for the statements of a single instruction.
#[derive(Default)]
pub struct IRBuilder {
    statements: Vec<Stmt>,
}

impl IRBuilder {
    /// Create a new IR builder.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            statements: Vec::new(),
        }
    }

    /// Write to a register. `None` discards the write.
    #[must_use]
    pub fn write_reg(mut self, dest: Option<Reg>, value: Expr) -> Self {
        if let Some(dest) = dest {
            self.statements.push(Stmt::set_reg(dest, value));
        }
        self
    }

    /// Write to a flag.
    #[must_use]
    pub fn write_flag(mut self, flag: Flag, value: Expr) -> Self {
        self.statements.push(Stmt::set_flag(flag, value));
        self
    }

    /// Call an intrinsic.
    #[must_use]
    pub fn intrinsic(
        mut self,
        outputs: Vec<Reg>,
        name: impl Into<Cow<'static, str>>,
        params: CallParams,
    ) -> Self {
        self.statements
            .push(Stmt::intrinsic(outputs, name, params));
        self
    }

    /// Dispatch a system call.
    #[must_use]
    pub fn syscall(mut self) -> Self {
        self.statements.push(Stmt::Syscall);
        self
    }

    /// Jump to an address.
    #[must_use]
    pub fn jump(mut self, target: Expr) -> Self {
        self.statements.push(Stmt::Jump(target));
        self
    }

    /// Call a subroutine.
    #[must_use]
    pub fn call(mut self, target: Expr) -> Self {
        self.statements.push(Stmt::Call(target));
        self
    }

    /// Return through an address.
    #[must_use]
    pub fn ret(mut self, target: Expr) -> Self {
        self.statements.push(Stmt::Ret(target));
        self
    }

    /// Add a raw statement.
    #[must_use]
    pub fn stmt(mut self, stmt: Stmt) -> Self {
        self.statements.push(stmt);
        self
    }

    /// Finish and return the statements.
    #[must_use]
    pub fn build(self) -> Vec<Stmt> {
        self.statements
    }
}
