//! Block-local peephole optimizer for lifted IR.

mod peephole;

use alift_ir::Function;
use tracing::debug;

pub use peephole::optimize;

/// Optimize every block of a function. Returns the number of statements
/// removed.
pub fn optimize_function(func: &mut Function) -> usize {
    let mut removed = 0;
    for block in &mut func.blocks {
        let n = optimize(block);
        if n > 0 {
            debug!(start = block.start, removed = n, "dead statements removed");
        }
        removed += n;
    }
    removed
}
