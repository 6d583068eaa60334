//! Command implementations.
//!
//! Each submodule handles a specific CLI command.

mod check;
mod lift;
mod sweep;

use alift::sweep::SweepRange;

use crate::cli::{Cli, Commands};

/// Dispatch CLI command to the appropriate handler.
pub fn run_command(cli: &Cli) -> i32 {
    match &cli.command {
        Commands::Lift { .. } => handle_lift(cli),
        Commands::Disasm { .. } => handle_disasm(cli),
        Commands::Check => check::cmd_check(cli.silent),
        Commands::Sweep { .. } => handle_sweep(cli),
    }
}

fn handle_lift(cli: &Cli) -> i32 {
    let Commands::Lift { inputs, file, lift } = &cli.command else {
        unreachable!("lift command variant mismatch");
    };
    lift::cmd_lift(inputs, file.as_deref(), lift)
}

fn handle_disasm(cli: &Cli) -> i32 {
    let Commands::Disasm { inputs, base } = &cli.command else {
        unreachable!("disasm command variant mismatch");
    };
    lift::cmd_disasm(inputs, *base)
}

fn handle_sweep(cli: &Cli) -> i32 {
    let Commands::Sweep { start, end, step } = &cli.command else {
        unreachable!("sweep command variant mismatch");
    };
    sweep::cmd_sweep(SweepRange::new(*start, *end, *step), cli.silent)
}
