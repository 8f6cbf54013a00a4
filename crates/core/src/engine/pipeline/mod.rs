//! Stage functions shared by every step driver, and the plug-in policy
//! point (`Mode`) that separates the single-cycle pipeline from the
//! pipelined/predicted ones (spec.md §9: "stage functions as rebindable
//! globals" becomes a small configuration enum instead of mutated state).

pub mod stages;

/// Which collaborator behaviors the writeback and decode stages apply.
///
/// This is the struct-of-policy replacement for the source's habit of
/// rebinding top-level stage functions per variant: the stage bodies stay
/// fixed, only the branch/flush/predictor policy varies by `Mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Stages run in program order within one step; no latches to flush.
    SingleCycle,
    /// Stages run in reverse order within one step; branches flush fetch
    /// and decode latches.
    Pipelined,
    /// Like `Pipelined`, plus the GShare predictor is consulted in fetch
    /// and trained in writeback.
    Predicted,
}

pub use stages::{decode, execute, fetch, stall_dec, writeback};
