//! A64 instruction decoding, symbol tables, and lifting.
//!
//! This crate covers the system/control subset of A64: exception
//! generation, barriers, hints, system-register and PSTATE moves, plus the
//! branches and data-processing forms that surround them. Each encoding
//! group is self-contained in its own module under `groups/`.

mod decode;
mod encode;
pub mod groups;
mod lift;
mod reader;
mod regs;
pub mod tables;
mod types;

pub use decode::*;
pub use encode::*;
pub use groups::{CompositeDecoder, InstructionGroup};
pub use lift::Lifter;
pub use reader::{ReadError, WordReader};
pub use regs::*;
pub use tables::SymbolTables;
pub use types::*;

/// Decode a word using the standard groups.
///
/// This is a convenience wrapper around `CompositeDecoder::standard().decode()`.
#[must_use]
pub fn decode(raw: u32) -> Instr {
    CompositeDecoder::standard().decode(raw)
}
