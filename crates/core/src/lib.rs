//! The BatBridge instruction-set model and pipeline simulation kernel.
//!
//! This crate has no I/O and no CLI surface: [`engine`] is the pipeline
//! (register file, memory, pipeline stages, branch predictor, cache
//! hierarchy), [`isa`] is the instruction model (opcode table, bytecode
//! codec, decoder), [`sim`] wires stages into the three step drivers and
//! the run loop, and [`image`] turns a JSON program image into memory
//! contents. `crates/cli` is the only consumer that touches a filesystem
//! or a process exit code.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod common;
pub mod engine;
pub mod image;
pub mod isa;
pub mod output;
pub mod sim;
