//! The run loop (spec.md §2 item 8): drives a [`super::Variant`]'s step
//! function to completion or to a caller-supplied cycle bound, whichever
//! comes first.

use tracing::info;

use crate::common::SimError;
use crate::engine::state::ProcessorState;

use super::{step, Variant};

/// How a run terminated: the program halted on its own, or the cycle
/// bound was exhausted first.
///
/// Hitting the bound is an ordinary outcome, not a [`SimError`] — a
/// non-terminating or merely slow program is ordinary input, and the run
/// loop's job is to say so rather than crash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Halted { cycles: u32 },
    BoundReached { cycles: u32 },
}

/// Steps `state` under `variant` until it halts or `bound` cycles elapse.
///
/// # Errors
///
/// Returns whatever [`SimError`] the underlying step function surfaces;
/// `state` is left exactly as it was at the failing cycle.
pub fn run(state: &mut ProcessorState, variant: Variant, bound: u32) -> Result<RunOutcome, SimError> {
    let mut cycles = 0;
    while cycles < bound {
        if state.halted {
            info!(cycles, "halted");
            return Ok(RunOutcome::Halted { cycles });
        }
        step(state, variant)?;
        cycles += 1;
    }
    if state.halted {
        info!(cycles, "halted");
        return Ok(RunOutcome::Halted { cycles });
    }
    info!(cycles, bound, "cycle bound reached");
    Ok(RunOutcome::BoundReached { cycles })
}
