//! Fatal simulator errors (spec.md §7).
//!
//! Data hazards and mispredictions are recovered locally by the pipeline
//! stages and never reach this type; cycle-bound exhaustion is reported as
//! a [`crate::sim::RunOutcome`] value, not an error — running out of cycles
//! isn't a crash, it's a question the run loop answers honestly.

use thiserror::Error;

/// A fatal condition that halts the run loop immediately, preserving the
/// state at the point of failure for diagnosis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SimError {
    /// Execute dispatched an icode with no semantic function: either a raw
    /// opcode field the decoder couldn't classify, or one of the v1
    /// stack/interrupt opcodes that decode but have no execute contract.
    #[error("invalid opcode {icode:#04x} at pc={pc:#x}")]
    InvalidOpcode { icode: u8, pc: u32 },

    /// `div`/`mod` with a zero divisor.
    #[error("arithmetic trap (division by zero) at pc={pc:#x}")]
    ArithmeticTrap { pc: u32 },

    /// A register field decoded outside 0..31. Only reachable from a
    /// hand-built (corrupted) vector-form program image; word-form register
    /// fields are bit-masked to 5 bits and can never be out of range.
    #[error("invalid register index {idx}")]
    InvalidRegister { idx: u8 },
}
