//! Basic block and function IR.

use thiserror::Error;

use crate::expr::Expr;
use crate::stmt::Stmt;

/// Structural invariant violation. Always a lifter defect.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum MalformedIr {
    #[error("register with empty name")]
    EmptyRegName,
    #[error("register {0} has zero size")]
    ZeroSizedReg(String),
    #[error("intrinsic with empty name")]
    EmptyIntrinsicName,
    #[error("branch target {target} outside function of {len} statements")]
    TargetOutOfRange { target: usize, len: usize },
    #[error("block end {end:#x} precedes start {start:#x}")]
    InvertedBlock { start: u64, end: u64 },
}

/// IR for a basic block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BasicBlock {
    /// Address of the first instruction.
    pub start: u64,
    /// Address past the last instruction.
    pub end: u64,
    /// Statements in execution order.
    pub statements: Vec<Stmt>,
}

impl BasicBlock {
    /// Create an empty block.
    #[must_use]
    pub const fn new(start: u64) -> Self {
        Self {
            start,
            end: start,
            statements: Vec::new(),
        }
    }

    /// Append a statement.
    pub fn push(&mut self, stmt: Stmt) {
        self.statements.push(stmt);
    }

    /// Append the statements of one instruction and advance the end address.
    ///
    /// The end address wraps like the program counter; `validate` reports a
    /// block that wrapped as inverted.
    pub fn push_instr(&mut self, size: u8, stmts: impl IntoIterator<Item = Stmt>) {
        self.statements.extend(stmts);
        self.end = self.end.wrapping_add(u64::from(size));
    }

    /// Get the last statement.
    #[must_use]
    pub fn last(&self) -> Option<&Stmt> {
        self.statements.last()
    }

    /// Check if the block ends in a terminator.
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.last().is_some_and(Stmt::is_terminator)
    }

    /// Get block size in bytes.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.end.wrapping_sub(self.start)
    }

    /// Get number of statements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Check if block is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Check structural well-formedness; `stmt_count` bounds branch targets.
    pub fn validate(&self, stmt_count: usize) -> Result<(), MalformedIr> {
        if self.end < self.start {
            return Err(MalformedIr::InvertedBlock {
                start: self.start,
                end: self.end,
            });
        }
        self.statements
            .iter()
            .try_for_each(|stmt| validate_stmt(stmt, stmt_count))
    }
}

/// A lifted function: entry address and its blocks in address order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Function {
    pub entry: u64,
    pub blocks: Vec<BasicBlock>,
}

impl Function {
    #[must_use]
    pub const fn new(entry: u64) -> Self {
        Self {
            entry,
            blocks: Vec::new(),
        }
    }

    /// Iterate all statements across blocks.
    pub fn statements(&self) -> impl Iterator<Item = &Stmt> {
        self.blocks.iter().flat_map(|b| b.statements.iter())
    }

    /// Total statement count.
    #[must_use]
    pub fn stmt_count(&self) -> usize {
        self.blocks.iter().map(BasicBlock::len).sum()
    }

    /// Check structural well-formedness of every block.
    pub fn validate(&self) -> Result<(), MalformedIr> {
        let count = self.stmt_count();
        self.blocks.iter().try_for_each(|b| b.validate(count))
    }
}

fn validate_stmt(stmt: &Stmt, stmt_count: usize) -> Result<(), MalformedIr> {
    let check_target = |target: usize| {
        if target < stmt_count {
            Ok(())
        } else {
            Err(MalformedIr::TargetOutOfRange {
                target,
                len: stmt_count,
            })
        }
    };
    match stmt {
        Stmt::SetReg { dest, value } => {
            validate_reg(dest.name(), dest.size())?;
            validate_expr(value)
        }
        Stmt::SetFlag { value, .. }
        | Stmt::Eval(value)
        | Stmt::Jump(value)
        | Stmt::Call(value)
        | Stmt::Ret(value) => validate_expr(value),
        Stmt::If {
            cond,
            then_target,
            else_target,
        } => {
            validate_expr(cond)?;
            check_target(*then_target)?;
            check_target(*else_target)
        }
        Stmt::Goto(target) => check_target(*target),
        Stmt::Intrinsic {
            outputs,
            name,
            params,
        } => {
            if name.is_empty() {
                return Err(MalformedIr::EmptyIntrinsicName);
            }
            outputs
                .iter()
                .try_for_each(|reg| validate_reg(reg.name(), reg.size()))?;
            params.0.iter().try_for_each(validate_expr)
        }
        Stmt::Syscall | Stmt::Trap(_) | Stmt::Undefined | Stmt::Unimplemented => Ok(()),
    }
}

fn validate_expr(expr: &Expr) -> Result<(), MalformedIr> {
    let mut result = Ok(());
    expr.for_each_reg(&mut |reg| {
        if result.is_ok() {
            result = validate_reg(reg.name(), reg.size());
        }
    });
    result
}

fn validate_reg(name: &str, size: u8) -> Result<(), MalformedIr> {
    if name.is_empty() {
        Err(MalformedIr::EmptyRegName)
    } else if size == 0 {
        Err(MalformedIr::ZeroSizedReg(name.to_string()))
    } else {
        Ok(())
    }
}
