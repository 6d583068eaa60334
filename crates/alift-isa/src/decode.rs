//! Decoded instruction container types.

use crate::types::Instr;

/// Size of every A64 instruction in bytes.
pub const INSTR_SIZE: u8 = 4;

/// A raw 32-bit instruction word and the address it was read from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InstrWord {
    /// Address of the first byte.
    pub addr: u64,
    /// Word assembled little-endian.
    pub raw: u32,
}

impl InstrWord {
    #[must_use]
    pub const fn new(addr: u64, raw: u32) -> Self {
        Self { addr, raw }
    }

    /// Assemble a word from four little-endian bytes.
    #[must_use]
    pub const fn from_le_bytes(addr: u64, bytes: [u8; 4]) -> Self {
        Self::new(addr, u32::from_le_bytes(bytes))
    }
}

/// Decoded instruction with its location.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodedInstr {
    /// Instruction address.
    pub addr: u64,
    /// Raw instruction word.
    pub raw: u32,
    /// Decoded form.
    pub instr: Instr,
}

impl DecodedInstr {
    #[must_use]
    pub const fn new(word: InstrWord, instr: Instr) -> Self {
        Self {
            addr: word.addr,
            raw: word.raw,
            instr,
        }
    }
}
