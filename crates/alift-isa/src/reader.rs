//! Little-endian instruction word reader.

use thiserror::Error;

use crate::decode::{INSTR_SIZE, InstrWord};

/// Errors produced while splitting a buffer into instruction words.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    #[error("truncated instruction at {addr:#x}: {remaining} trailing byte(s)")]
    Truncated { addr: u64, remaining: usize },
}

/// Iterator over the 32-bit instruction words of a byte buffer.
///
/// Words are read from consecutive 4-byte groups starting at offset 0. A
/// partial group at the end yields a single [`ReadError::Truncated`] and
/// ends iteration.
#[derive(Clone, Debug)]
pub struct WordReader<'a> {
    bytes: &'a [u8],
    base: u64,
    offset: usize,
    done: bool,
}

impl<'a> WordReader<'a> {
    /// Create a reader whose first word sits at `base`.
    #[must_use]
    pub const fn new(bytes: &'a [u8], base: u64) -> Self {
        Self {
            bytes,
            base,
            offset: 0,
            done: false,
        }
    }

    /// Number of complete words left.
    #[must_use]
    pub const fn remaining_words(&self) -> usize {
        (self.bytes.len() - self.offset) / INSTR_SIZE as usize
    }

    /// Address of the next word.
    #[must_use]
    pub const fn addr(&self) -> u64 {
        self.base.wrapping_add(self.offset as u64)
    }
}

impl Iterator for WordReader<'_> {
    type Item = Result<InstrWord, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let rest = &self.bytes[self.offset..];
        if rest.is_empty() {
            self.done = true;
            return None;
        }
        let addr = self.addr();
        match rest.first_chunk::<4>() {
            Some(chunk) => {
                self.offset += INSTR_SIZE as usize;
                Some(Ok(InstrWord::from_le_bytes(addr, *chunk)))
            }
            None => {
                self.done = true;
                Some(Err(ReadError::Truncated {
                    addr,
                    remaining: rest.len(),
                }))
            }
        }
    }
}
