//! The processor state record (spec.md §3 "Processor state").
//!
//! A single explicit struct with named, typed latch slots, replacing the
//! source's loose map with late-added fields (spec.md §9). Optional latches
//! are `Option<T>`, never "absence of a map key".

use std::collections::VecDeque;

use crate::engine::memory::Memory;
use crate::engine::semantics::WritebackCmd;
use crate::engine::units::bru::GSharePredictor;
use crate::isa::{Blob, Instruction};
use crate::output::{OutputSink, StdoutSink};

/// What `fetch` hands to `decode`: an undecoded blob plus the pc it was
/// fetched from and the naive next pc.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchLatch {
    pub blob: Blob,
    pub pc: u32,
    pub npc: u32,
}

/// The inter-stage latches plus the stall counter and pending-ops queue,
/// all owned by [`ProcessorState`] (spec.md §3, §9 "Macro-expansion queue").
#[derive(Debug, Default)]
pub struct Latches {
    pub fetch_result: Option<FetchLatch>,
    pub decode_ops: VecDeque<Instruction>,
    pub decode_result: Option<Instruction>,
    pub execute_result: Option<WritebackCmd>,
    pub fetch_stall: u32,
}

/// A processor's complete architectural and micro-architectural state.
///
/// The single-cycle driver only ever touches `registers`, `memory` and
/// `halted`; the pipelined and predicted drivers also exercise `latches`
/// and (for the predicted variant) `predictor`.
pub struct ProcessorState {
    pub registers: [i32; 32],
    pub memory: Memory,
    pub halted: bool,
    pub latches: Latches,
    pub predictor: Option<GSharePredictor>,
    pub output: Box<dyn OutputSink>,
}

impl std::fmt::Debug for ProcessorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessorState")
            .field("registers", &self.registers)
            .field("halted", &self.halted)
            .field("latches", &self.latches)
            .field("predictor", &self.predictor)
            .finish_non_exhaustive()
    }
}

impl ProcessorState {
    /// Builds a fresh processor with all registers zero, `pc = 0`, no
    /// predictor, and output sent to stdout.
    #[must_use]
    pub fn new(memory: Memory) -> Self {
        Self {
            registers: [0; 32],
            memory,
            halted: false,
            latches: Latches::default(),
            predictor: None,
            output: Box::new(StdoutSink),
        }
    }

    /// Enables the GShare predictor, for the predicted pipeline variant.
    #[must_use]
    pub fn with_predictor(mut self) -> Self {
        self.predictor = Some(GSharePredictor::new());
        self
    }

    /// Redirects side-channel output, for tests that need to observe it.
    #[must_use]
    pub fn with_output(mut self, sink: Box<dyn OutputSink>) -> Self {
        self.output = sink;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_has_zeroed_registers_and_is_not_halted() {
        let state = ProcessorState::new(Memory::new());
        assert_eq!(state.registers, [0; 32]);
        assert!(!state.halted);
        assert!(state.predictor.is_none());
    }

    #[test]
    fn with_predictor_installs_a_default_gshare_table() {
        let state = ProcessorState::new(Memory::new()).with_predictor();
        assert!(state.predictor.is_some());
    }
}
