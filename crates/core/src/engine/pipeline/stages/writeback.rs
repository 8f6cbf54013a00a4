//! Stage: Writeback (spec.md §4.9), plus the branch/flush/predictor policy
//! that varies by [`Mode`] (spec.md §4.11).

use tracing::{debug, info};

use crate::common::Addr;
use crate::engine::pipeline::Mode;
use crate::engine::semantics::Dst;
use crate::engine::state::ProcessorState;
use crate::isa::registers;

/// Applies the latched execute result to architectural state: register or
/// memory writes, the halt flag, the r29/r30 output side channel, and
/// (for branches) the PC update plus whatever flush/predictor policy `mode`
/// calls for.
pub fn writeback(state: &mut ProcessorState, mode: Mode) {
    let Some(cmd) = state.latches.execute_result.take() else {
        return;
    };

    if cmd.addr == u32::from(registers::PC) && matches!(cmd.dst, Dst::Registers) {
        branch(state, mode, cmd.val as u32, cmd.pc, cmd.npc);
        return;
    }

    match cmd.dst {
        Dst::Halt => {
            info!(pc = cmd.pc, "halt");
            state.halted = true;
        }
        Dst::Registers if cmd.addr == u32::from(registers::ZERO) => {
            if cmd.val != 0 {
                state.output.write_char((cmd.val & 0xFF) as u8);
            }
        }
        Dst::Registers if cmd.addr == u32::from(registers::IMM) => {
            if cmd.val != 0 {
                state.output.write_hex(cmd.val);
            }
        }
        Dst::Registers => state.registers[cmd.addr as usize] = cmd.val,
        Dst::Memory => state.memory.write(cmd.addr, cmd.val),
    }
}

fn branch(state: &mut ProcessorState, mode: Mode, raw_target: u32, pc: u32, npc: u32) {
    let target = Addr::new(raw_target).normalize().raw();
    state.registers[registers::PC as usize] = target as i32;

    match mode {
        Mode::SingleCycle => {}
        Mode::Pipelined => {
            state.latches.fetch_result = None;
            state.latches.decode_result = None;
        }
        Mode::Predicted => {
            if target == npc {
                if let Some(predictor) = &mut state.predictor {
                    predictor.confirm_taken(pc);
                }
            } else {
                debug!(pc, target, npc, "misprediction, flushing");
                state.latches.fetch_result = None;
                state.latches.decode_result = None;
                if let Some(predictor) = &mut state.predictor {
                    predictor.train_taken(pc, target);
                }
            }
        }
    }
}
