//! The predicted pipeline driver (spec.md §4.10, §4.11): the pipelined
//! driver plus a GShare predictor consulted from fetch and trained from
//! writeback.

use crate::common::SimError;
use crate::engine::pipeline::{stages, Mode};
use crate::engine::state::ProcessorState;

pub fn step(state: &mut ProcessorState) -> Result<(), SimError> {
    stages::writeback(state, Mode::Predicted);
    stages::execute(state)?;
    stages::decode(state, Mode::Predicted)?;
    stages::fetch(state, Mode::Predicted);
    stages::stall_dec(state);
    Ok(())
}
