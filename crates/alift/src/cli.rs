//! CLI definitions and argument types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Exit code for success.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code for failure.
pub const EXIT_FAILURE: i32 = 1;

#[derive(Parser)]
#[command(name = "alift")]
#[command(about = "A64 system-instruction lifter - decodes machine words to canonical IR")]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (sets RUST_LOG=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output (only show errors)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub silent: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Lift hex-encoded instruction bytes to IR
    Lift {
        /// Little-endian instruction bytes, e.g. "1f2003d5"
        #[arg(value_name = "HEX", required_unless_present = "file")]
        inputs: Vec<String>,

        /// Read hex inputs from a file, one per line
        #[arg(short, long, conflicts_with = "inputs")]
        file: Option<PathBuf>,

        #[command(flatten)]
        lift: LiftArgs,
    },
    /// Disassemble hex-encoded instruction bytes
    Disasm {
        /// Little-endian instruction bytes
        #[arg(value_name = "HEX", required = true)]
        inputs: Vec<String>,

        /// Address of the first instruction (hex with 0x prefix, or decimal)
        #[arg(long, default_value = "0", value_parser = parse_addr)]
        base: u64,
    },
    /// Run the built-in golden table
    Check,
    /// Sweep the encoding space through decode, disassembly and lifting
    Sweep {
        /// First word (hex with 0x prefix, or decimal)
        #[arg(long, default_value = "0", value_parser = parse_word)]
        start: u32,

        /// Last word, inclusive
        #[arg(long, default_value = "0xffffffff", value_parser = parse_word)]
        end: u32,

        /// Distance between visited words
        #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
        step: u32,
    },
}

/// Options shared by lifting commands.
#[derive(Args, Clone, Debug)]
pub struct LiftArgs {
    /// Skip the dead-code pass
    #[arg(long)]
    pub no_optimize: bool,

    /// Address of the first instruction (hex with 0x prefix, or decimal)
    #[arg(long, default_value = "0", value_parser = parse_addr)]
    pub base: u64,

    /// Prefix operation names with LLIL_
    #[arg(long)]
    pub llil: bool,

    /// Print the text before the final ret, as the golden table compares it
    #[arg(long)]
    pub oracle: bool,
}

/// Parse an address given as `0x`-prefixed hex or decimal.
pub fn parse_addr(s: &str) -> Result<u64, String> {
    let s = s.trim();
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid address {s:?}: {e}"))
}

/// Parse a 32-bit instruction word given like an address.
pub fn parse_word(s: &str) -> Result<u32, String> {
    parse_addr(s).and_then(|value| {
        u32::try_from(value).map_err(|_| format!("word {s:?} does not fit in 32 bits"))
    })
}
