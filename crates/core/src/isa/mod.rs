//! Instruction model: opcode table, bytecode codec, register aliases, and
//! the canonical decoded instruction form shared by every pipeline stage.

pub mod codec;
pub mod instruction;
pub mod opcode;
pub mod registers;

pub use instruction::{decode, Blob, Icode, Instruction, VectorInst};
pub use opcode::OpCode;
