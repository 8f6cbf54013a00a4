//! Stage: Execute (spec.md §4.8).

use tracing::trace;

use crate::common::SimError;
use crate::engine::semantics;
use crate::engine::state::ProcessorState;

/// Resolves operands and dispatches the latched decode result to its
/// opcode function. An unknown opcode or arithmetic trap is fatal and
/// propagates immediately, leaving the rest of state untouched.
pub fn execute(state: &mut ProcessorState) -> Result<(), SimError> {
    let Some(decoded) = state.latches.decode_result.take() else {
        state.latches.execute_result = None;
        return Ok(());
    };

    let cmd = semantics::execute(&decoded, &state.registers, &mut state.memory)?;
    trace!(pc = decoded.pc, dst = ?cmd.dst, addr = cmd.addr, val = cmd.val, "execute");
    state.latches.execute_result = Some(cmd);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::semantics::Dst;
    use crate::engine::Memory;
    use crate::isa::{Icode, Instruction, OpCode};

    #[test]
    fn no_decode_result_produces_no_execute_result() {
        let mut state = ProcessorState::new(Memory::new());
        execute(&mut state).unwrap();
        assert!(state.latches.execute_result.is_none());
    }

    #[test]
    fn executes_the_latched_instruction() {
        let mut state = ProcessorState::new(Memory::new());
        state.registers[1] = 3;
        state.registers[2] = 4;
        state.latches.decode_result = Some(Instruction {
            icode: Icode::Known(OpCode::Add),
            d: 5,
            a: 1,
            b: 2,
            i: 0,
            pc: 0,
            npc: 4,
        });
        execute(&mut state).unwrap();
        let cmd = state.latches.execute_result.unwrap();
        assert_eq!((cmd.dst, cmd.addr, cmd.val), (Dst::Registers, 5, 7));
        assert!(state.latches.decode_result.is_none());
    }

    #[test]
    fn arithmetic_trap_propagates_as_an_error() {
        let mut state = ProcessorState::new(Memory::new());
        state.latches.decode_result = Some(Instruction {
            icode: Icode::Known(OpCode::Div),
            d: 0,
            a: 0,
            b: 0,
            i: 0,
            pc: 8,
            npc: 12,
        });
        let err = execute(&mut state).unwrap_err();
        assert_eq!(err, SimError::ArithmeticTrap { pc: 8 });
    }
}
