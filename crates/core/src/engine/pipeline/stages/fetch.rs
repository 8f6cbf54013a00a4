//! Stage: Fetch (spec.md §4.5).

use tracing::trace;

use crate::engine::pipeline::Mode;
use crate::engine::state::{FetchLatch, ProcessorState};
use crate::isa::registers;
use crate::isa::Blob;

/// Reads the instruction at `registers[PC]`, latches it for decode, and
/// advances `registers[PC]`. A halted machine or a stalled fetch stage emit
/// no new work.
pub fn fetch(state: &mut ProcessorState, mode: Mode) {
    if state.halted {
        let pc = state.registers[registers::PC as usize] as u32;
        state.latches.fetch_result = Some(FetchLatch {
            blob: Blob::Word(crate::isa::codec::NOP_WORD),
            pc,
            npc: pc,
        });
        return;
    }

    if state.latches.fetch_stall > 0 {
        trace!(stall = state.latches.fetch_stall, "fetch bubbled");
        return;
    }

    let pc = state.registers[registers::PC as usize] as u32;
    let fallthrough = pc.wrapping_add(4);
    let word = state.memory.get(pc) as u32;

    let mut npc = fallthrough;
    state.registers[registers::PC as usize] = fallthrough as i32;

    if mode == Mode::Predicted {
        if let Some(predictor) = &state.predictor {
            if let Some(target) = predictor.target_for(pc) {
                if predictor.predict_taken(pc) {
                    npc = target;
                    state.registers[registers::PC as usize] = target as i32;
                }
            }
        }
    }

    trace!(pc, npc, word = format!("{word:#010x}"), "fetch");
    state.latches.fetch_result = Some(FetchLatch {
        blob: Blob::Word(word),
        pc,
        npc,
    });
}
