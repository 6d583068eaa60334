//! Canonical text form of IR, used for byte-exact comparison.
//!
//! Every node renders as `NAME(operand,operand,...)`. List operands render
//! as `[a,b]`: output register lists by name, input parameter lists as
//! `<il: text>` with the short operand text of each expression. Statements
//! are joined with `"; "`.

use crate::block::{BasicBlock, Function};
use crate::expr::Expr;
use crate::stmt::Stmt;

/// Separator between serialized statements.
pub const STMT_SEPARATOR: &str = "; ";

/// Serializer options.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Prefix prepended to every operation name (e.g. `LLIL_`).
    pub op_prefix: String,
}

impl SerializeOptions {
    /// Options producing the `LLIL_`-prefixed dialect.
    #[must_use]
    pub fn llil() -> Self {
        Self {
            op_prefix: "LLIL_".to_string(),
        }
    }

    /// Set the operation prefix.
    #[must_use]
    pub fn with_op_prefix(mut self, prefix: &str) -> Self {
        self.op_prefix = prefix.to_string();
        self
    }
}

/// Serialize a statement with default options.
#[must_use]
pub fn serialize_stmt(stmt: &Stmt) -> String {
    Serializer::new(&SerializeOptions::default()).stmt(stmt)
}

/// Serialize an expression with default options.
#[must_use]
pub fn serialize_expr(expr: &Expr) -> String {
    Serializer::new(&SerializeOptions::default()).expr(expr)
}

/// Serialize the statements of a block, joined with `"; "`.
#[must_use]
pub fn serialize_block(block: &BasicBlock, options: &SerializeOptions) -> String {
    Serializer::new(options).stmts(block.statements.iter())
}

/// Serialize every statement of a function in block order.
#[must_use]
pub fn serialize_function(func: &Function, options: &SerializeOptions) -> String {
    Serializer::new(options).stmts(func.statements())
}

/// Stateless renderer bound to a set of options.
pub struct Serializer<'a> {
    options: &'a SerializeOptions,
}

impl<'a> Serializer<'a> {
    #[must_use]
    pub const fn new(options: &'a SerializeOptions) -> Self {
        Self { options }
    }

    /// Render statements joined with the statement separator.
    pub fn stmts<'s>(&self, stmts: impl Iterator<Item = &'s Stmt>) -> String {
        let mut out = String::new();
        for (i, stmt) in stmts.enumerate() {
            if i > 0 {
                out.push_str(STMT_SEPARATOR);
            }
            self.write_stmt(&mut out, stmt);
        }
        out
    }

    /// Render one statement.
    #[must_use]
    pub fn stmt(&self, stmt: &Stmt) -> String {
        let mut out = String::new();
        self.write_stmt(&mut out, stmt);
        out
    }

    /// Render one expression.
    #[must_use]
    pub fn expr(&self, expr: &Expr) -> String {
        let mut out = String::new();
        self.write_expr(&mut out, expr);
        out
    }

    fn op(&self, out: &mut String, name: &str) {
        out.push_str(&self.options.op_prefix);
        out.push_str(name);
        out.push('(');
    }

    fn write_stmt(&self, out: &mut String, stmt: &Stmt) {
        match stmt {
            Stmt::SetReg { dest, value } => {
                self.op(out, "SET_REG");
                out.push_str(dest.name());
                out.push(',');
                self.write_expr(out, value);
                out.push(')');
            }
            Stmt::SetFlag { flag, value } => {
                self.op(out, "SET_FLAG");
                out.push_str(flag.name());
                out.push(',');
                self.write_expr(out, value);
                out.push(')');
            }
            Stmt::Eval(expr) => self.write_expr(out, expr),
            Stmt::If {
                cond,
                then_target,
                else_target,
            } => {
                self.op(out, "IF");
                self.write_expr(out, cond);
                out.push_str(&format!(",{then_target},{else_target})"));
            }
            Stmt::Goto(target) => {
                self.op(out, "GOTO");
                out.push_str(&target.to_string());
                out.push(')');
            }
            Stmt::Jump(target) => self.unary(out, "JUMP", target),
            Stmt::Call(target) => self.unary(out, "CALL", target),
            Stmt::Ret(target) => self.unary(out, "RET", target),
            Stmt::Intrinsic {
                outputs,
                name,
                params,
            } => {
                self.op(out, "INTRINSIC");
                out.push('[');
                for (i, reg) in outputs.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    out.push_str(reg.name());
                }
                out.push_str("],");
                out.push_str(name);
                out.push(',');
                self.op(out, "CALL_PARAM");
                out.push('[');
                for (i, param) in params.0.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    out.push_str(&format!("<il: {param}>"));
                }
                out.push_str("]))");
            }
            Stmt::Syscall => self.nullary(out, "SYSCALL"),
            Stmt::Trap(imm) => {
                self.op(out, "TRAP");
                out.push_str(&imm.to_string());
                out.push(')');
            }
            Stmt::Undefined => self.nullary(out, "UNDEF"),
            Stmt::Unimplemented => self.nullary(out, "UNIMPL"),
        }
    }

    fn write_expr(&self, out: &mut String, expr: &Expr) {
        match expr {
            Expr::Const { value, .. } => {
                self.op(out, "CONST");
                out.push_str(&value.to_string());
                out.push(')');
            }
            Expr::ConstPtr(addr) => {
                self.op(out, "CONST_PTR");
                out.push_str(&addr.to_string());
                out.push(')');
            }
            Expr::Reg(reg) => {
                self.op(out, "REG");
                out.push_str(reg.name());
                out.push(')');
            }
            Expr::Flag(flag) => {
                self.op(out, "FLAG");
                out.push_str(flag.name());
                out.push(')');
            }
            Expr::SysReg(name) => out.push_str(name),
            Expr::Binary {
                op, left, right, ..
            } => {
                self.op(out, op.name());
                self.write_expr(out, left);
                out.push(',');
                self.write_expr(out, right);
                out.push(')');
            }
        }
    }

    fn unary(&self, out: &mut String, name: &str, operand: &Expr) {
        self.op(out, name);
        self.write_expr(out, operand);
        out.push(')');
    }

    fn nullary(&self, out: &mut String, name: &str) {
        self.op(out, name);
        out.push(')');
    }
}

#[cfg(test)]
mod tests;
