use alift_isa::ReadError;
use thiserror::Error;

/// Lifter errors.
#[derive(Error, Debug)]
pub enum Error {
    #[error("truncated input: {len} byte(s) is not a positive multiple of 4")]
    TruncatedInput { len: usize },
    #[error("{len} byte(s) at base {base:#x} run past the end of the address space")]
    AddressOverflow { base: u64, len: usize },
    #[error("read error: {0}")]
    Read(#[from] ReadError),
    #[error("invalid hex input: {0}")]
    InvalidHex(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{input} did not lift to a function ending in ret, got: {actual}")]
    MissingReturn { input: String, actual: String },
}

pub type Result<T> = std::result::Result<T, Error>;
