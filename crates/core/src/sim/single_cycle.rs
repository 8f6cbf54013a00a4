//! The single-cycle in-order driver (spec.md §4.10): one full instruction
//! retires per call, stages run in program order.

use crate::common::SimError;
use crate::engine::pipeline::{stages, Mode};
use crate::engine::state::ProcessorState;

pub fn step(state: &mut ProcessorState) -> Result<(), SimError> {
    stages::fetch(state, Mode::SingleCycle);
    stages::decode(state, Mode::SingleCycle)?;
    stages::execute(state)?;
    stages::writeback(state, Mode::SingleCycle);
    Ok(())
}
