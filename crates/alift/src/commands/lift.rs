//! Lift and disasm commands.

use std::path::Path;

use alift::oracle::instr_to_il;
use alift::{LiftConfig, Pipeline, Result, SerializeOptions, parse_hex, serialize_block};
use tracing::{debug, info};

use crate::cli::{EXIT_FAILURE, EXIT_SUCCESS, LiftArgs};
use crate::terminal;

/// Handle the `lift` command.
pub fn cmd_lift(inputs: &[String], file: Option<&Path>, args: &LiftArgs) -> i32 {
    let inputs = match file {
        Some(path) => match read_inputs(path) {
            Ok(lines) => lines,
            Err(err) => {
                terminal::error(&format!("{}: {err}", path.display()));
                return EXIT_FAILURE;
            }
        },
        None => inputs.to_vec(),
    };

    let serialize = if args.llil {
        SerializeOptions::llil()
    } else {
        SerializeOptions::default()
    };
    let config = LiftConfig::new()
        .with_base(args.base)
        .with_optimize(!args.no_optimize)
        .with_serialize_options(serialize);
    let pipeline = Pipeline::new(config);
    info!(inputs = inputs.len(), base = args.base, "lifting");

    let mut failed = 0usize;
    for input in &inputs {
        let result = if args.oracle {
            lift_oracle(&pipeline, input)
        } else {
            lift_blocks(&pipeline, input)
        };
        match result {
            Ok(lines) => {
                for line in lines {
                    println!("{line}");
                }
            }
            Err(err) => {
                terminal::error(&format!("{input}: {err}"));
                failed += 1;
            }
        }
    }

    if failed == 0 {
        EXIT_SUCCESS
    } else {
        EXIT_FAILURE
    }
}

/// Handle the `disasm` command.
pub fn cmd_disasm(inputs: &[String], base: u64) -> i32 {
    let pipeline = Pipeline::new(LiftConfig::new().with_base(base));
    let mut failed = 0usize;
    for input in inputs {
        match parse_hex(input).and_then(|bytes| pipeline.disassemble(&bytes)) {
            Ok(lines) => {
                for line in lines {
                    println!("{line}");
                }
            }
            Err(err) => {
                terminal::error(&format!("{input}: {err}"));
                failed += 1;
            }
        }
    }

    if failed == 0 {
        EXIT_SUCCESS
    } else {
        EXIT_FAILURE
    }
}

/// One `start: text` line per block.
fn lift_blocks(pipeline: &Pipeline<'_>, input: &str) -> Result<Vec<String>> {
    let bytes = parse_hex(input)?;
    let func = pipeline.lift_function(&bytes)?;
    debug!(input, blocks = func.blocks.len(), "lifted");
    Ok(func
        .blocks
        .iter()
        .map(|block| {
            format!(
                "{:#010x}: {}",
                block.start,
                serialize_block(block, &pipeline.config().serialize)
            )
        })
        .collect())
}

fn lift_oracle(pipeline: &Pipeline<'_>, input: &str) -> Result<Vec<String>> {
    let bytes = parse_hex(input)?;
    Ok(vec![instr_to_il(pipeline, &bytes)?])
}

/// Non-empty lines of `path`, with `#` comments removed.
fn read_inputs(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)?;
    Ok(text
        .lines()
        .map(|line| line.split('#').next().unwrap_or_default().trim())
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}
