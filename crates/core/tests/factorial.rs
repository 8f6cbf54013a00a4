//! End-to-end scenario: iterative factorial via a bottom-checked loop.

mod common;

use batbridge_core::isa::{codec, registers, OpCode};
use batbridge_core::sim::Variant;
use common::{expect_halted, run_words};

fn program() -> Vec<u32> {
    let r = registers::ZERO;
    let im = registers::IMM;
    let pc = registers::PC;
    vec![
        codec::pack(OpCode::Add.to_u8(), 0, r, im, 1),
        codec::pack(OpCode::Add.to_u8(), 1, r, im, 10),
        codec::pack(OpCode::Mul.to_u8(), 0, 0, 1, 0),
        codec::pack(OpCode::Sub.to_u8(), 1, 1, im, 1),
        codec::pack(OpCode::IfNe.to_u8(), 0, 1, r, 0),
        codec::pack(OpCode::Add.to_u8(), pc, r, im, 8),
        codec::pack(OpCode::Hlt.to_u8(), 0, 0, 0, 0),
    ]
}

#[test]
fn factorial_10_lands_3_628_800_in_r0() {
    let (state, outcome) = run_words(&program(), Variant::Single, 200);
    expect_halted(outcome);
    assert_eq!(state.registers[0], 3_628_800);
}

#[test]
fn factorial_10_agrees_under_every_driver() {
    for variant in [Variant::Single, Variant::Pipelined, Variant::Predicted] {
        let (state, outcome) = run_words(&program(), variant, 400);
        expect_halted(outcome);
        assert_eq!(state.registers[0], 3_628_800, "mismatch under {variant:?}");
    }
}
