//! Stage: Decode, both the single-cycle contract (spec.md §4.6) and the
//! pipelined hazard check layered on top of it (spec.md §4.7).

use tracing::debug;

use crate::common::SimError;
use crate::engine::pipeline::Mode;
use crate::engine::semantics::{self, Dst};
use crate::engine::state::ProcessorState;
use crate::isa::registers;
use crate::isa::{self, Icode};

/// Decodes the latched fetch result (or drains one queued micro-op while
/// stalled), applying macro expansion for push/pop.
pub fn decode(state: &mut ProcessorState, mode: Mode) -> Result<(), SimError> {
    if state.latches.fetch_stall > 0 {
        state.latches.decode_result = state.latches.decode_ops.pop_front();
        return Ok(());
    }

    let Some(fetched) = state.latches.fetch_result.take() else {
        state.latches.decode_result = None;
        return Ok(());
    };

    let mut decoded = isa::decode(fetched.blob, fetched.pc, fetched.npc)?;

    if let Icode::Known(op) = decoded.icode {
        if op.is_macro() {
            let mut ops = semantics::expand_macro(&decoded).into_iter();
            let count = ops.len() as u32;
            if let Some(first) = ops.next() {
                decoded = first;
            }
            state.latches.decode_ops.extend(ops);
            state.latches.fetch_stall += count.saturating_sub(1);
            debug!(op = ?op, count, "macro expanded");
        }
    }

    state.latches.decode_result = Some(decoded);

    if mode == Mode::Pipelined || mode == Mode::Predicted {
        apply_hazard_check(state);
    }

    Ok(())
}

fn apply_hazard_check(state: &mut ProcessorState) {
    let Some(decoded) = &state.latches.decode_result else {
        return;
    };
    let hazard = state.latches.execute_result.as_ref().is_some_and(|wb| {
        wb.dst == Dst::Registers
            && (wb.addr == u32::from(decoded.a) || wb.addr == u32::from(decoded.b))
            && wb.addr != u32::from(registers::ZERO)
            && wb.addr != u32::from(registers::IMM)
    });
    if !hazard {
        return;
    }
    debug!(pc = decoded.pc, "data hazard, stalling");
    state.latches.decode_result = None;
    state.latches.fetch_result = None;
    state.latches.fetch_stall += 1;
    state.registers[registers::PC as usize] = state.registers[registers::PC as usize].wrapping_sub(4);
}
