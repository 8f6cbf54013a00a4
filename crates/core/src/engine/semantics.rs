//! Per-opcode semantic functions (spec.md §4.4) and the push/pop macro
//! expansion.
//!
//! Every opcode is a pure function of `(pc, i, x, y, d)` producing a
//! [`WritebackCmd`]; the only opcode that additionally reads memory is
//! `ld`, threaded through explicitly rather than hidden behind a closure.

use crate::common::{Addr, SimError};
use crate::engine::memory::Memory;
use crate::engine::resolve::read_reg;
use crate::isa::registers;
use crate::isa::{Icode, Instruction, OpCode};

/// The destination a writeback command targets, the tagged-variant
/// replacement for the source's `:registers`/`:memory`/`:halt` symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dst {
    Registers,
    Memory,
    Halt,
}

/// The result of executing one instruction: where it writes, and what.
///
/// For `Dst::Registers`, `addr` is a register index (29/30/31 carry the
/// side-channel and branch meanings from spec.md §4.9); for `Dst::Memory`
/// it's a normalized byte address; for `Dst::Halt` both are unused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WritebackCmd {
    pub dst: Dst,
    pub addr: u32,
    pub val: i32,
    pub pc: u32,
    pub npc: u32,
}

impl WritebackCmd {
    const fn new(dst: Dst, addr: u32, val: i32, pc: u32, npc: u32) -> Self {
        Self {
            dst,
            addr,
            val,
            pc,
            npc,
        }
    }
}

/// Executes a decoded instruction against the given register file and
/// memory, producing its writeback command.
///
/// `registers` and `memory` are read-only here; only the writeback stage
/// mutates architectural state (spec.md §5).
pub fn execute(inst: &Instruction, registers: &[i32; 32], memory: &mut Memory) -> Result<WritebackCmd, SimError> {
    let Icode::Known(op) = inst.icode else {
        let icode = match inst.icode {
            Icode::Unknown(raw) => raw,
            Icode::Known(_) => unreachable!(),
        };
        return Err(SimError::InvalidOpcode { icode, pc: inst.pc });
    };

    let x = read_reg(registers, inst.a, inst.npc, inst.i);
    let y = read_reg(registers, inst.b, inst.npc, inst.i);
    let pc = inst.pc;
    let npc = inst.npc;
    let d = inst.d;
    let i = inst.i;

    let cmd = match op {
        OpCode::Hlt => WritebackCmd::new(Dst::Halt, 0, 0, pc, npc),

        OpCode::Ld => {
            let addr = Addr::new((x.wrapping_add(4_i32.wrapping_mul(y))) as u32).normalize();
            let val = memory.get(addr.raw());
            WritebackCmd::new(Dst::Registers, u32::from(d), val, pc, npc)
        }
        OpCode::St => {
            let addr = Addr::new((x.wrapping_add(4_i32.wrapping_mul(y))) as u32).normalize();
            let val = read_reg(registers, d, npc, i);
            WritebackCmd::new(Dst::Memory, addr.raw(), val, pc, npc)
        }

        // The "taken" arm lands on npc, the ordinary fallthrough; "not
        // taken" skips one further instruction (npc + 4). This is the
        // classic skip-next-on-false idiom, not a conventional branch:
        // the real control transfers elsewhere in a program are the
        // `add/sub r_PC, r_PC, r_IMM, N` absolute-jump instructions that
        // these conditionals are used to skip over or fall into.
        OpCode::IfLt | OpCode::IfLe | OpCode::IfEq | OpCode::IfNe => {
            let taken = match op {
                OpCode::IfLt => x < y,
                OpCode::IfLe => x <= y,
                OpCode::IfEq => x == y,
                OpCode::IfNe => x != y,
                _ => unreachable!(),
            };
            let target = if taken { npc } else { npc.wrapping_add(4) };
            WritebackCmd::new(Dst::Registers, u32::from(registers::PC), target as i32, pc, npc)
        }

        OpCode::Add => alu(Dst::Registers, d, x.wrapping_add(y), pc, npc),
        OpCode::Sub => alu(Dst::Registers, d, x.wrapping_sub(y), pc, npc),
        OpCode::Mul => alu(Dst::Registers, d, x.wrapping_mul(y), pc, npc),
        OpCode::Div => {
            if y == 0 {
                return Err(SimError::ArithmeticTrap { pc });
            }
            alu(Dst::Registers, d, x.wrapping_div(y), pc, npc)
        }
        OpCode::Mod => {
            if y == 0 {
                return Err(SimError::ArithmeticTrap { pc });
            }
            alu(Dst::Registers, d, x.wrapping_rem(y), pc, npc)
        }

        OpCode::And => alu(Dst::Registers, d, x & y, pc, npc),
        OpCode::Or => alu(Dst::Registers, d, x | y, pc, npc),
        OpCode::Nand => alu(Dst::Registers, d, !(x & y), pc, npc),
        OpCode::Xor => alu(Dst::Registers, d, x ^ y, pc, npc),

        OpCode::Sl => alu(Dst::Registers, d, shift_logical_left(x, y), pc, npc),
        OpCode::Sr => alu(Dst::Registers, d, shift_logical_right(x, y), pc, npc),
        OpCode::Sal => alu(Dst::Registers, d, shift_arithmetic_left(x, y), pc, npc),
        OpCode::Sar => alu(Dst::Registers, d, shift_arithmetic_right(x, y), pc, npc),

        // Push/pop are expanded away at decode time (expand_macro below);
        // the v1 stack/interrupt opcodes never got a semantic function.
        OpCode::Push
        | OpCode::Pop
        | OpCode::PushAll
        | OpCode::PopAll
        | OpCode::Call
        | OpCode::Intr => return Err(SimError::InvalidOpcode { icode: op.to_u8(), pc }),
    };
    Ok(cmd)
}

const fn alu(dst: Dst, d: u8, val: i32, pc: u32, npc: u32) -> WritebackCmd {
    WritebackCmd::new(dst, d as u32, val, pc, npc)
}

fn shift_logical_left(x: i32, amount: i32) -> i32 {
    ((x as u32).wrapping_shl(shift_amount(amount))) as i32
}

fn shift_logical_right(x: i32, amount: i32) -> i32 {
    ((x as u32).wrapping_shr(shift_amount(amount))) as i32
}

fn shift_arithmetic_left(x: i32, amount: i32) -> i32 {
    x.wrapping_shl(shift_amount(amount))
}

fn shift_arithmetic_right(x: i32, amount: i32) -> i32 {
    x.wrapping_shr(shift_amount(amount))
}

fn shift_amount(amount: i32) -> u32 {
    (amount as u32) & 0x1F
}

/// Expands a `push`/`pop` macro into its two-instruction form (spec.md
/// §4.4). The caller is responsible for enqueuing the result and bumping
/// `fetch.stall` by `expansion_count - 1`.
///
/// Both micro-ops inherit `inst`'s `pc`/`npc`: they are not independently
/// fetched, just drained one per cycle from the pending-ops queue.
#[must_use]
pub fn expand_macro(inst: &Instruction) -> Vec<Instruction> {
    let Icode::Known(op) = inst.icode else {
        return Vec::new();
    };
    let stack_reg = inst.a;
    let value_reg = inst.d;
    let pc = inst.pc;
    let npc = inst.npc;

    let micro = |icode: OpCode, d: u8, a: u8, b: u8, i: i32| Instruction {
        icode: Icode::Known(icode),
        d,
        a,
        b,
        i,
        pc,
        npc,
    };

    match op {
        OpCode::Push => vec![
            micro(OpCode::Sub, stack_reg, stack_reg, registers::IMM, 4),
            micro(OpCode::St, value_reg, stack_reg, registers::ZERO, 0),
        ],
        OpCode::Pop => vec![
            micro(OpCode::Ld, value_reg, stack_reg, registers::ZERO, 0),
            micro(OpCode::Add, stack_reg, stack_reg, registers::IMM, 4),
        ],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn inst(op: OpCode, d: u8, a: u8, b: u8, i: i32) -> Instruction {
        Instruction {
            icode: Icode::Known(op),
            d,
            a,
            b,
            i,
            pc: 0,
            npc: 4,
        }
    }

    #[test]
    fn hlt_produces_a_halt_command() {
        let mut mem = Memory::new();
        let cmd = execute(&inst(OpCode::Hlt, 0, 0, 0, 0), &[0; 32], &mut mem).unwrap();
        assert_eq!(cmd.dst, Dst::Halt);
    }

    #[rstest]
    #[case(OpCode::Add, 3, 4, 7)]
    #[case(OpCode::Sub, 10, 4, 6)]
    #[case(OpCode::Mul, 6, 7, 42)]
    #[case(OpCode::And, 0b1100, 0b1010, 0b1000)]
    #[case(OpCode::Or, 0b1100, 0b1010, 0b1110)]
    #[case(OpCode::Xor, 0b1100, 0b1010, 0b0110)]
    #[case(OpCode::Nand, 0b1100, 0b1010, !0b1000)]
    fn alu_opcode_table(#[case] op: OpCode, #[case] x: i32, #[case] y: i32, #[case] expected: i32) {
        let mut regs = [0i32; 32];
        regs[1] = x;
        regs[2] = y;
        let mut mem = Memory::new();
        let cmd = execute(&inst(op, 0, 1, 2, 0), &regs, &mut mem).unwrap();
        assert_eq!((cmd.dst, cmd.addr, cmd.val), (Dst::Registers, 0, expected));
    }

    #[test]
    fn div_by_zero_traps() {
        let mut regs = [0i32; 32];
        regs[1] = 10;
        let mut mem = Memory::new();
        let err = execute(&inst(OpCode::Div, 0, 1, 2, 0), &regs, &mut mem).unwrap_err();
        assert_eq!(err, SimError::ArithmeticTrap { pc: 0 });
    }

    #[test]
    fn mod_takes_the_sign_of_the_dividend() {
        let mut regs = [0i32; 32];
        regs[1] = -7;
        regs[2] = 3;
        let mut mem = Memory::new();
        let cmd = execute(&inst(OpCode::Mod, 0, 1, 2, 0), &regs, &mut mem).unwrap();
        assert_eq!(cmd.val, -1);
    }

    #[test]
    fn conditional_taken_targets_npc_not_taken_skips_to_npc_plus_four() {
        let mut regs = [0i32; 32];
        regs[1] = 5;
        regs[2] = 5;
        let mut mem = Memory::new();
        let mut branch = inst(OpCode::IfEq, 0, 1, 2, 0);
        branch.pc = 40;
        branch.npc = 44;
        let cmd = execute(&branch, &regs, &mut mem).unwrap();
        assert_eq!(cmd.val, 44);

        regs[2] = 9;
        let cmd = execute(&branch, &regs, &mut mem).unwrap();
        assert_eq!(cmd.val, 48);
    }

    #[test]
    fn ld_reads_normalized_address_from_memory() {
        let mut mem = Memory::new();
        mem.write(100, 77);
        let regs = [0i32; 32];
        let cmd = execute(&inst(OpCode::Ld, 5, registers::ZERO, registers::IMM, 25), &regs, &mut mem).unwrap();
        // a=ZERO -> x=0, b=IMM -> y=25, addr = normalize(0 + 4*25) = 100
        assert_eq!((cmd.dst, cmd.addr, cmd.val), (Dst::Registers, 5, 77));
    }

    #[test]
    fn st_uses_d_as_the_source_value_register() {
        let mut regs = [0i32; 32];
        regs[5] = 1234;
        let mut mem = Memory::new();
        let cmd = execute(&inst(OpCode::St, 5, registers::ZERO, registers::ZERO, 0), &regs, &mut mem).unwrap();
        assert_eq!((cmd.dst, cmd.addr, cmd.val), (Dst::Memory, 0, 1234));
    }

    #[test]
    fn shifts_mask_the_amount_to_five_bits() {
        assert_eq!(shift_logical_left(1, 33), 2);
        assert_eq!(shift_arithmetic_right(-8, 1), -4);
        assert_eq!(shift_logical_right(-1, 28), 0xF);
    }

    #[test]
    fn unknown_opcode_fails_in_execute() {
        let inst = Instruction {
            icode: Icode::Unknown(0x02),
            d: 0,
            a: 0,
            b: 0,
            i: 0,
            pc: 8,
            npc: 12,
        };
        let mut mem = Memory::new();
        let err = execute(&inst, &[0; 32], &mut mem).unwrap_err();
        assert_eq!(err, SimError::InvalidOpcode { icode: 0x02, pc: 8 });
    }

    #[test]
    fn v1_opcodes_with_no_semantic_function_fail_in_execute() {
        let mut mem = Memory::new();
        let err = execute(&inst(OpCode::Call, 0, 0, 0, 0), &[0; 32], &mut mem).unwrap_err();
        assert_eq!(err, SimError::InvalidOpcode { icode: OpCode::Call.to_u8(), pc: 0 });
    }

    #[test]
    fn push_expands_to_decrement_then_store() {
        let push = inst(OpCode::Push, 0, 28, 0, 0);
        let expanded = expand_macro(&push);
        assert_eq!(expanded.len(), 2);
        assert_eq!(expanded[0].icode, Icode::Known(OpCode::Sub));
        assert_eq!((expanded[0].d, expanded[0].a, expanded[0].b, expanded[0].i), (28, 28, registers::IMM, 4));
        assert_eq!(expanded[1].icode, Icode::Known(OpCode::St));
        assert_eq!((expanded[1].d, expanded[1].a, expanded[1].b, expanded[1].i), (0, 28, registers::ZERO, 0));
    }

    #[test]
    fn pop_expands_to_load_then_increment() {
        let pop = inst(OpCode::Pop, 3, 28, 0, 0);
        let expanded = expand_macro(&pop);
        assert_eq!(expanded[0].icode, Icode::Known(OpCode::Ld));
        assert_eq!((expanded[0].d, expanded[0].a, expanded[0].b), (3, 28, registers::ZERO));
        assert_eq!(expanded[1].icode, Icode::Known(OpCode::Add));
        assert_eq!((expanded[1].d, expanded[1].a, expanded[1].b, expanded[1].i), (28, 28, registers::IMM, 4));
    }

    #[test]
    fn push_pop_end_to_end_matches_concrete_scenario() {
        // r0 = 1000, r28 = 2000; push 0 28 -> r28 = 1996, mem[1996] = 1000.
        let mut regs = [0i32; 32];
        regs[0] = 1000;
        regs[28] = 2000;
        let mut mem = Memory::new();
        let push = inst(OpCode::Push, 0, 28, 0, 0);
        for micro in expand_macro(&push) {
            let cmd = execute(&micro, &regs, &mut mem).unwrap();
            match cmd.dst {
                Dst::Registers => regs[cmd.addr as usize] = cmd.val,
                Dst::Memory => mem.write(cmd.addr, cmd.val),
                Dst::Halt => unreachable!(),
            }
        }
        assert_eq!(regs[28], 1996);
        assert_eq!(mem.get(1996), 1000);
    }
}
