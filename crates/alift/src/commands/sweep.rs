//! Encoding-space sweep.

use alift::Lifter;
use alift::sweep::{SweepRange, sweep};
use tracing::info;

use crate::cli::{EXIT_FAILURE, EXIT_SUCCESS};
use crate::terminal;

/// Handle the `sweep` command.
pub fn cmd_sweep(range: SweepRange, silent: bool) -> i32 {
    info!(
        start = range.start,
        end = range.end,
        step = range.step,
        "sweeping encoding space"
    );
    if !silent {
        terminal::info(&format!("sweeping {} words", range.len()));
    }
    let report = sweep(&Lifter::standard(), range);

    for (raw, text) in &report.samples {
        println!("{raw:08x}: {text}");
    }
    for (raw, err) in &report.malformed {
        terminal::error(&format!("{raw:08x}: {err}"));
    }

    if !silent {
        for (class, count) in &report.classes {
            terminal::dim(&format!("{class:<10} {count}"));
        }
    }
    if report.is_clean() {
        if !silent {
            terminal::success(&format!(
                "{} words swept, {} recognized",
                report.words, report.recognized
            ));
        }
        EXIT_SUCCESS
    } else {
        terminal::warning(&format!(
            "{} of {} words lifted to malformed IR",
            report.malformed.len(),
            report.words
        ));
        EXIT_FAILURE
    }
}
