//! alift - A64 system-instruction lifter
//!
//! Decodes little-endian A64 words, lifts them to a small IR, removes dead
//! register writes, and renders the result in a canonical text form.
//!
//! # Example
//!
//! ```
//! use alift::Pipeline;
//!
//! // svc #0; ret
//! let bytes = [0x01, 0x00, 0x00, 0xd4, 0xc0, 0x03, 0x5f, 0xd6];
//! let text = Pipeline::default().lift_to_string(&bytes)?;
//! assert_eq!(text, "SET_REG(syscall_imm,CONST(0)); SYSCALL(); RET(REG(x30))");
//! # Ok::<(), alift::Error>(())
//! ```

// Re-export from sub-crates
pub use alift_ir::{
    BasicBlock, Expr, Flag, Function, IRBuilder, MalformedIr, Reg, SerializeOptions, Serializer,
    Stmt, serialize_block, serialize_function,
};
pub use alift_isa::{
    CompositeDecoder, DecodedInstr, Instr, InstrWord, InstructionGroup, Lifter, ReadError,
    SymbolTables, WordReader, decode,
};
pub use alift_opt::{optimize, optimize_function};

mod error;
pub use error::*;

mod hex;
pub use hex::{parse_hex, to_hex};

mod pipeline;
pub use pipeline::*;

pub mod oracle;
pub mod sweep;
