//! Shared helpers for the cross-cutting scenario tests in this directory:
//! assembling a word program into memory and driving it to completion under
//! a chosen simulator variant.

use batbridge_core::engine::{Memory, ProcessorState};
use batbridge_core::sim::{run, RunOutcome, Variant};

/// Loads `words` at addresses `0, 4, 8, ...` and runs them to halt (or the
/// bound) under `variant`, returning the final state.
pub fn run_words(words: &[u32], variant: Variant, bound: u32) -> (ProcessorState, RunOutcome) {
    let mut memory = Memory::new();
    memory.load(words.iter().enumerate().map(|(i, &w)| ((i * 4) as u32, w as i32)));
    let mut state = ProcessorState::new(memory);
    if variant.needs_predictor() {
        state = state.with_predictor();
    }
    let outcome = run(&mut state, variant, bound).expect("program should not trap");
    (state, outcome)
}

pub fn expect_halted(outcome: RunOutcome) -> u32 {
    match outcome {
        RunOutcome::Halted { cycles } => cycles,
        RunOutcome::BoundReached { cycles } => panic!("did not halt within {cycles} cycles"),
    }
}
