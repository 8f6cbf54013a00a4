//! The five-stage pipelined driver (spec.md §4.10): stages run in
//! *reverse* order within a step, so each consumer runs before its
//! producer and the state snapshot after the step holds the latches the
//! next step will consume.

use crate::common::SimError;
use crate::engine::pipeline::{stages, Mode};
use crate::engine::state::ProcessorState;

pub fn step(state: &mut ProcessorState) -> Result<(), SimError> {
    stages::writeback(state, Mode::Pipelined);
    stages::execute(state)?;
    stages::decode(state, Mode::Pipelined)?;
    stages::fetch(state, Mode::Pipelined);
    stages::stall_dec(state);
    Ok(())
}
