//! A64 encoding groups.
//!
//! Each group provides decode, lift, and disasm for its instructions in a
//! single file. Groups claim disjoint encodings; a word no group claims is
//! `Instr::Unrecognized`.

mod branch;
mod data;
mod system;

pub use branch::BranchGroup;
pub use data::DataGroup;
pub use system::SystemGroup;

use alift_ir::Stmt;
use tracing::trace;

use crate::decode::{DecodedInstr, InstrWord};
use crate::tables::SymbolTables;
use crate::types::Instr;

/// Extension point for instruction decoding and lifting.
pub trait InstructionGroup: Send + Sync {
    /// Group name for diagnostics.
    fn name(&self) -> &'static str;

    /// Try to decode a word. Return None to fall through to the next group.
    fn decode32(&self, raw: u32) -> Option<Instr>;

    /// True if this group lifts and disassembles `instr`.
    fn handles(&self, instr: &Instr) -> bool;

    /// Lift an instruction to IR statements.
    fn lift(&self, instr: &DecodedInstr, tables: &SymbolTables) -> Vec<Stmt>;

    /// Disassembly string.
    fn disasm(&self, instr: &DecodedInstr, tables: &SymbolTables) -> String;
}

/// Composite decoder that chains multiple groups.
///
/// Tries groups in order until one claims the word.
pub struct CompositeDecoder {
    groups: Vec<Box<dyn InstructionGroup>>,
}

impl CompositeDecoder {
    /// Create a new composite decoder with the given groups.
    #[must_use]
    pub fn new(groups: Vec<Box<dyn InstructionGroup>>) -> Self {
        Self { groups }
    }

    /// Create a composite decoder with all standard groups.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(SystemGroup),
            Box::new(BranchGroup),
            Box::new(DataGroup),
        ])
    }

    /// Add a group to the decoder chain.
    #[must_use]
    pub fn with_group(mut self, group: impl InstructionGroup + 'static) -> Self {
        self.groups.push(Box::new(group));
        self
    }

    /// Decode a raw word. Total: unclaimed words are `Unrecognized`.
    #[must_use]
    pub fn decode(&self, raw: u32) -> Instr {
        self.groups
            .iter()
            .find_map(|group| group.decode32(raw))
            .unwrap_or(Instr::Unrecognized { raw })
    }

    /// Decode a word read from memory.
    #[must_use]
    pub fn decode_word(&self, word: InstrWord) -> DecodedInstr {
        DecodedInstr::new(word, self.decode(word.raw))
    }

    /// Lift an instruction using the group that handles it.
    ///
    /// Unrecognized words lift to `UNDEF()`.
    #[must_use]
    pub fn lift(&self, instr: &DecodedInstr, tables: &SymbolTables) -> Vec<Stmt> {
        match self.group_for(&instr.instr) {
            Some(group) => {
                trace!(group = group.name(), addr = instr.addr, "lift");
                group.lift(instr, tables)
            }
            None => vec![Stmt::Undefined],
        }
    }

    /// Disassemble an instruction.
    #[must_use]
    pub fn disasm(&self, instr: &DecodedInstr, tables: &SymbolTables) -> String {
        self.group_for(&instr.instr).map_or_else(
            || format!(".inst {:#010x}", instr.raw),
            |group| group.disasm(instr, tables),
        )
    }

    fn group_for(&self, instr: &Instr) -> Option<&dyn InstructionGroup> {
        self.groups
            .iter()
            .find(|group| group.handles(instr))
            .map(|group| &**group)
    }
}

impl Default for CompositeDecoder {
    fn default() -> Self {
        Self::standard()
    }
}
