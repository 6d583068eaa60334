//! Dead register-write and dead-evaluation elimination.

use alift_ir::{BasicBlock, Expr, Reg, Stmt};
use rustc_hash::FxHashSet;

/// Remove dead statements from a block. Returns the number removed.
///
/// A single backward pass with every register live at block exit. Removes
/// full-width self-moves, register writes whose storage is overwritten
/// before any read, and `Eval` statements. Flag writes are kept; any
/// statement other than a register or flag write makes every register live.
pub fn optimize(block: &mut BasicBlock) -> usize {
    let keep = live_statements(&block.statements);
    let before = block.statements.len();
    let mut keep = keep.into_iter();
    block
        .statements
        .retain(|_| keep.next().unwrap_or(true));
    before - block.statements.len()
}

/// Per-statement keep mask.
fn live_statements(stmts: &[Stmt]) -> Vec<bool> {
    let mut keep = vec![true; stmts.len()];
    // Storage written later in the block with no read in between.
    let mut overwritten: FxHashSet<&str> = FxHashSet::default();

    for (i, stmt) in stmts.iter().enumerate().rev() {
        match stmt {
            Stmt::SetReg { dest, value } => {
                if is_self_move(dest, value) || overwritten.contains(dest.storage()) {
                    keep[i] = false;
                    continue;
                }
                // Partial writes zero-extend into the parent.
                overwritten.insert(dest.storage());
                value.for_each_reg(&mut |reg| {
                    overwritten.remove(reg.storage());
                });
            }
            Stmt::SetFlag { value, .. } => value.for_each_reg(&mut |reg| {
                overwritten.remove(reg.storage());
            }),
            // Value discarded, nothing written.
            _ if stmt.is_pure() => keep[i] = false,
            _ => overwritten.clear(),
        }
    }
    keep
}

/// `SET_REG(r, REG(r))` on a full-width register.
fn is_self_move(dest: &Reg, value: &Expr) -> bool {
    !dest.is_partial() && matches!(value, Expr::Reg(src) if src == dest)
}
