//! The three step drivers (spec.md §4.10) and the run loop (spec.md §2
//! item 8) that ties a driver to an external cycle bound.

mod pipelined;
mod predicted;
mod run;
mod single_cycle;

pub use run::{run, RunOutcome};

use crate::common::SimError;
use crate::engine::pipeline::Mode;
use crate::engine::state::ProcessorState;

/// Which of the three simulator variants a run targets.
///
/// All three must produce identical architectural results for any legal
/// program (spec.md §1); they differ only in cycle count and transient
/// micro-architectural state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Single,
    Pipelined,
    Predicted,
}

impl Variant {
    #[must_use]
    pub const fn mode(self) -> Mode {
        match self {
            Self::Single => Mode::SingleCycle,
            Self::Pipelined => Mode::Pipelined,
            Self::Predicted => Mode::Predicted,
        }
    }

    /// Whether this variant needs a [`crate::engine::units::bru::GSharePredictor`]
    /// installed on the state before stepping.
    #[must_use]
    pub const fn needs_predictor(self) -> bool {
        matches!(self, Self::Predicted)
    }
}

/// Advances `state` by exactly one clock edge under `variant`'s driver.
pub fn step(state: &mut ProcessorState, variant: Variant) -> Result<(), SimError> {
    match variant {
        Variant::Single => single_cycle::step(state),
        Variant::Pipelined => pipelined::step(state),
        Variant::Predicted => predicted::step(state),
    }
}
