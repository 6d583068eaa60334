//! alift CLI - A64 system-instruction lifter

mod cli;
mod commands;
mod terminal;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing with appropriate level based on flags and command
    let default_level = if cli.silent {
        "alift=error"
    } else if cli.verbose {
        "alift=debug"
    } else {
        match &cli.command {
            Commands::Check => "alift=warn",
            _ => "alift=info",
        }
    };
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = default_level.parse() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = commands::run_command(&cli);
    std::process::exit(exit_code);
}
