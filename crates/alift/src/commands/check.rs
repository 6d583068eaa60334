//! Golden table check.

use alift::oracle::{self, GOLDEN_CASES};
use tracing::info;

use crate::cli::{EXIT_FAILURE, EXIT_SUCCESS};
use crate::terminal;

/// Handle the `check` command.
pub fn cmd_check(silent: bool) -> i32 {
    let pipeline = oracle::golden_pipeline();
    info!(cases = GOLDEN_CASES.len(), "running golden table");
    if !silent {
        terminal::info(&format!("checking {} golden cases", GOLDEN_CASES.len()));
    }
    let outcomes = oracle::run_golden(&pipeline);

    let mut failed = 0usize;
    for (i, outcome) in outcomes.iter().enumerate() {
        if outcome.passed() {
            continue;
        }
        failed += 1;
        terminal::error(&format!("MISMATCH AT TEST {i} ({})", outcome.case.note));
        terminal::indent(&format!("input:    {}", outcome.case.input));
        terminal::indent(&format!("expected: {:?}", outcome.case.expected));
        terminal::indent(&format!("actual:   {:?}", outcome.actual_text()));
    }

    let total = outcomes.len();
    if failed == 0 {
        if !silent {
            terminal::success(&format!("{total} golden cases passed"));
        }
        EXIT_SUCCESS
    } else {
        terminal::warning(&format!("{failed} of {total} golden cases failed"));
        terminal::dim("rerun with -v for lifting details");
        EXIT_FAILURE
    }
}
