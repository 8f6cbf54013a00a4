//! GShare branch predictor (spec.md §4.11).
//!
//! Combines a global taken/not-taken history with the branch address via
//! XOR to index a table of saturating 2-bit counters. Consulted from fetch,
//! trained from writeback; owned by the processor state, never by a stage.

use std::collections::HashMap;

const HISTORY_LEN: usize = 10;
const TABLE_BITS: u32 = 9;
const TABLE_SIZE: usize = 1 << TABLE_BITS;
const TABLE_MASK: u32 = (TABLE_SIZE as u32) - 1;
const COUNTER_MAX: u8 = 3;
const COUNTER_DEFAULT: u8 = 2;

/// A 2-bit saturating counter table indexed by `pc XOR history`, a global
/// history ring, and a `pc -> last observed target` side table.
#[derive(Debug, Clone)]
pub struct GSharePredictor {
    table: Vec<u8>,
    /// Most-recent-first: `history[0]` is the outcome of the last trained
    /// branch.
    history: [bool; HISTORY_LEN],
    jump_map: HashMap<u32, u32>,
}

impl Default for GSharePredictor {
    fn default() -> Self {
        Self {
            table: vec![COUNTER_DEFAULT; TABLE_SIZE],
            history: [false; HISTORY_LEN],
            jump_map: HashMap::new(),
        }
    }
}

impl GSharePredictor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds the history ring into a small integer, oldest bit at the LSB.
    fn history_bits(&self) -> u32 {
        let mut bits = 0u32;
        for &taken in self.history.iter().rev() {
            bits = (bits << 1) | u32::from(taken);
        }
        bits
    }

    fn index(&self, pc: u32) -> usize {
        (((pc & TABLE_MASK) ^ (self.history_bits() & TABLE_MASK)) & TABLE_MASK) as usize
    }

    /// True iff the counter at `pc`'s index has saturated into the taken
    /// half of its range.
    #[must_use]
    pub fn predict_taken(&self, pc: u32) -> bool {
        self.table[self.index(pc)] >= 2
    }

    /// The most recently observed branch target for `pc`, if one has ever
    /// been trained.
    #[must_use]
    pub fn target_for(&self, pc: u32) -> Option<u32> {
        self.jump_map.get(&pc).copied()
    }

    pub fn train_taken(&mut self, pc: u32, target: u32) {
        let idx = self.index(pc);
        self.table[idx] = (self.table[idx] + 1).min(COUNTER_MAX);
        self.shift_history(true);
        self.jump_map.insert(pc, target);
    }

    /// Reinforces a correct prediction without touching the jump-map: the
    /// writeback hook for the `v == npc` case (spec.md §4.11), which counts
    /// as "taken" in the training sense regardless of the branch's actual
    /// direction.
    pub fn confirm_taken(&mut self, pc: u32) {
        let idx = self.index(pc);
        self.table[idx] = (self.table[idx] + 1).min(COUNTER_MAX);
        self.shift_history(true);
    }

    pub fn train_not_taken(&mut self, pc: u32) {
        let idx = self.index(pc);
        self.table[idx] = self.table[idx].saturating_sub(1);
        self.shift_history(false);
    }

    fn shift_history(&mut self, taken: bool) {
        self.history.copy_within(0..HISTORY_LEN - 1, 1);
        self.history[0] = taken;
    }
}
