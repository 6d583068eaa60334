//! Intermediate representation for the A64 lifter.
//!
//! This crate provides pure IR types with no A64-specific knowledge.
//! Decoding and lifting of A64 instructions is implemented in `alift-isa`.

mod block;
mod builder;
mod expr;
mod reg;
mod serialize;
mod stmt;

pub use block::*;
pub use builder::*;
pub use expr::*;
pub use reg::*;
pub use serialize::*;
pub use stmt::*;
