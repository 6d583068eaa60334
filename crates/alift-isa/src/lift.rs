//! Lifter: appends the IR of decoded instructions to basic blocks.

use alift_ir::BasicBlock;

use crate::decode::{DecodedInstr, INSTR_SIZE, InstrWord};
use crate::groups::CompositeDecoder;
use crate::tables::SymbolTables;

/// Decoder and symbol tables bound together.
pub struct Lifter<'t> {
    decoder: CompositeDecoder,
    tables: &'t SymbolTables,
}

impl Lifter<'static> {
    /// Lifter over the standard groups and tables.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(CompositeDecoder::standard(), SymbolTables::standard())
    }
}

impl Default for Lifter<'static> {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'t> Lifter<'t> {
    #[must_use]
    pub const fn new(decoder: CompositeDecoder, tables: &'t SymbolTables) -> Self {
        Self { decoder, tables }
    }

    #[must_use]
    pub const fn tables(&self) -> &'t SymbolTables {
        self.tables
    }

    /// Decode a word read from memory.
    #[must_use]
    pub fn decode(&self, word: InstrWord) -> DecodedInstr {
        self.decoder.decode_word(word)
    }

    /// Append the statements of `instr` to `block` and advance its end.
    ///
    /// Never removes or reorders existing statements.
    pub fn lift(&self, instr: &DecodedInstr, block: &mut BasicBlock) {
        let stmts = self.decoder.lift(instr, self.tables);
        block.push_instr(INSTR_SIZE, stmts);
    }

    /// Disassembly text of `instr`.
    #[must_use]
    pub fn disasm(&self, instr: &DecodedInstr) -> String {
        self.decoder.disasm(instr, self.tables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alift_ir::{SerializeOptions, Stmt, serialize_block};

    #[test]
    fn test_lift_appends() {
        let lifter = Lifter::standard();
        let mut block = BasicBlock::new(0x100);

        let svc = lifter.decode(InstrWord::new(0x100, 0xD400_0021));
        lifter.lift(&svc, &mut block);
        let ret = lifter.decode(InstrWord::new(0x104, 0xD65F_03C0));
        lifter.lift(&ret, &mut block);

        assert_eq!(block.end, 0x108);
        assert_eq!(block.len(), 3);
        assert!(block.is_terminated());
        assert_eq!(
            serialize_block(&block, &SerializeOptions::default()),
            "SET_REG(syscall_imm,CONST(1)); SYSCALL(); RET(REG(x30))"
        );
    }

    #[test]
    fn test_unrecognized_is_undefined() {
        let lifter = Lifter::standard();
        let mut block = BasicBlock::new(0);
        let instr = lifter.decode(InstrWord::new(0, 0xFFFF_FFFF));
        lifter.lift(&instr, &mut block);
        assert_eq!(block.statements, vec![Stmt::Undefined]);
        assert_eq!(block.end, 4);
    }

    #[test]
    fn test_discarded_write_still_advances() {
        let lifter = Lifter::standard();
        let mut block = BasicBlock::new(0);
        // movz wzr, #5
        let instr = lifter.decode(InstrWord::new(0, 0x5280_00BF));
        lifter.lift(&instr, &mut block);
        assert!(block.is_empty());
        assert_eq!(block.size(), 4);
    }

    #[test]
    fn test_disasm() {
        let lifter = Lifter::standard();
        let instr = lifter.decode(InstrWord::from_le_bytes(0, [0x5f, 0x24, 0x03, 0xd5]));
        assert_eq!(lifter.disasm(&instr), "bti c");
    }
}
