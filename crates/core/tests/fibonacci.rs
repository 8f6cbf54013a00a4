//! End-to-end scenario: iterative Fibonacci via the absolute-jump idiom.
//!
//! Hand-traced against the corrected register-31 read contract (reading
//! `r_PC` yields the executing instruction's `npc`, not its own `pc`): the
//! `ifeq`/`add r_PC, ...` pair at addresses 12/16 only terminates the loop
//! correctly under that contract.

mod common;

use batbridge_core::isa::{codec, registers, OpCode};
use batbridge_core::sim::Variant;
use common::{expect_halted, run_words};

fn program() -> Vec<u32> {
    let r = registers::ZERO;
    let im = registers::IMM;
    let pc = registers::PC;
    vec![
        codec::pack(OpCode::Add.to_u8(), 0, r, im, 14),
        codec::pack(OpCode::Add.to_u8(), 1, r, im, 1),
        codec::pack(OpCode::Add.to_u8(), 2, r, im, 0),
        codec::pack(OpCode::IfEq.to_u8(), 0, 0, r, 0),
        codec::pack(OpCode::Add.to_u8(), pc, pc, im, 20),
        codec::pack(OpCode::Sub.to_u8(), 0, 0, im, 1),
        codec::pack(OpCode::Add.to_u8(), 3, 1, 2, 0),
        codec::pack(OpCode::Add.to_u8(), 2, 1, r, 0),
        codec::pack(OpCode::Add.to_u8(), 1, 3, r, 0),
        codec::pack(OpCode::Sub.to_u8(), pc, pc, im, 28),
        codec::pack(OpCode::Hlt.to_u8(), 0, 0, 0, 0),
    ]
}

#[test]
fn fib_14_lands_in_r1_within_300_cycles() {
    let (state, outcome) = run_words(&program(), Variant::Single, 300);
    let cycles = expect_halted(outcome);
    assert_eq!(state.registers[1], 610);
    assert!(cycles <= 300, "took {cycles} cycles");
}

#[test]
fn fib_14_agrees_under_the_pipelined_driver() {
    let (state, outcome) = run_words(&program(), Variant::Pipelined, 300);
    expect_halted(outcome);
    assert_eq!(state.registers[1], 610);
}
