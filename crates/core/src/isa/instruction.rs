//! The canonical decoded instruction and the two undecoded wire forms that
//! feed it, per spec.md §3 "Instruction — three interchangeable
//! representations" and §4.2.

use super::codec;
use super::opcode::OpCode;
use super::registers;
use crate::common::error::SimError;

/// An opcode as carried by a decoded [`Instruction`].
///
/// `Unknown` exists because `decode` never fails on an unrecognized opcode
/// field — spec.md §4.2 says to "clamp unknown opcodes to themselves" and
/// let the caller (the execute stage) surface the error. Dispatching an
/// `Unknown` icode in execute always produces
/// [`SimError::InvalidOpcode`](crate::common::error::SimError::InvalidOpcode).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icode {
    Known(OpCode),
    Unknown(u8),
}

impl Icode {
    #[must_use]
    pub const fn known(self) -> Option<OpCode> {
        match self {
            Self::Known(op) => Some(op),
            Self::Unknown(_) => None,
        }
    }
}

/// The symbolic vector form: an ordered 5-tuple `(opcode, d, a, b, i)`.
///
/// `d`/`a`/`b` are raw register indices (0..31); aliases are resolved to
/// indices by the caller before construction, or via
/// [`VectorInst::with_alias`]. For conditional and halt forms the unused
/// slots are conventionally zero, matching spec.md's `{icode, a, b, i, d=0}`
/// and `{icode}` shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VectorInst {
    pub icode: OpCode,
    pub d: u8,
    pub a: u8,
    pub b: u8,
    pub i: i32,
}

impl VectorInst {
    /// Builds the general `{icode, d, a, b, i}` shape used by loads, stores,
    /// macros and ALU ops.
    #[must_use]
    pub const fn new(icode: OpCode, d: u8, a: u8, b: u8, i: i32) -> Self {
        Self { icode, d, a, b, i }
    }

    /// Builds a conditional branch instruction: `{icode, a, b, i}`, `d` forced
    /// to 0 since conditionals have no destination slot (spec.md §4.2).
    ///
    /// # Panics
    /// Panics if `icode` is not one of the four conditional opcodes; this is
    /// a programmer error in the caller, not a runtime condition.
    #[must_use]
    pub const fn branch(icode: OpCode, a: u8, b: u8, i: i32) -> Self {
        assert!(icode.is_conditional(), "not a conditional opcode");
        Self {
            icode,
            d: 0,
            a,
            b,
            i,
        }
    }

    /// Builds the `hlt` instruction: `{icode}`, all other slots zero.
    #[must_use]
    pub const fn hlt() -> Self {
        Self {
            icode: OpCode::Hlt,
            d: 0,
            a: 0,
            b: 0,
            i: 0,
        }
    }
}

/// An undecoded instruction blob: either a packed word or a symbolic vector.
///
/// Every simulator variant must accept either form and normalize internally
/// via [`decode`] (spec.md §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blob {
    Word(u32),
    Vector(VectorInst),
}

impl From<u32> for Blob {
    fn from(word: u32) -> Self {
        Self::Word(word)
    }
}

impl From<VectorInst> for Blob {
    fn from(v: VectorInst) -> Self {
        Self::Vector(v)
    }
}

/// The canonical internal decoded form, carried through every pipeline
/// stage. `pc`/`npc` are metadata filled in by the fetch stage, not part of
/// the instruction's own encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub icode: Icode,
    pub d: u8,
    pub a: u8,
    pub b: u8,
    pub i: i32,
    pub pc: u32,
    pub npc: u32,
}

impl Instruction {
    /// The canonical bubble: a decoded no-op with the given pc/npc metadata.
    #[must_use]
    pub const fn nop(pc: u32, npc: u32) -> Self {
        Self {
            icode: Icode::Known(OpCode::Add),
            d: registers::ZERO,
            a: registers::ZERO,
            b: registers::ZERO,
            i: 0,
            pc,
            npc,
        }
    }
}

fn check_register(idx: u8) -> Result<u8, SimError> {
    if idx > 31 {
        Err(SimError::InvalidRegister { idx })
    } else {
        Ok(idx)
    }
}

/// Decodes an undecoded blob into the canonical map form.
///
/// `pc`/`npc` are supplied by the fetch stage and stamped onto the result;
/// they are not part of the wire encoding. Returns `Ok(None)` only when
/// there is genuinely nothing to decode (the caller passed no blob at all);
/// an unrecognized opcode still decodes successfully into `Icode::Unknown`
/// (spec.md §4.2) — only a structurally invalid register index is rejected
/// here, since a 5-bit word field can never be out of range but a
/// hand-built vector instruction can.
pub fn decode(blob: Blob, pc: u32, npc: u32) -> Result<Instruction, SimError> {
    match blob {
        Blob::Word(w) => {
            let icode = match OpCode::from_u8(codec::opcode(w)) {
                Some(op) => Icode::Known(op),
                None => Icode::Unknown(codec::opcode(w)),
            };
            Ok(Instruction {
                icode,
                d: codec::d(w),
                a: codec::a(w),
                b: codec::b(w),
                i: codec::imm(w),
                pc,
                npc,
            })
        }
        Blob::Vector(v) => {
            let (d, a, b) = match v.icode {
                op if op.is_conditional() => (0, check_register(v.a)?, check_register(v.b)?),
                OpCode::Hlt => (0, 0, 0),
                _ => (
                    check_register(v.d)?,
                    check_register(v.a)?,
                    check_register(v.b)?,
                ),
            };
            Ok(Instruction {
                icode: Icode::Known(v.icode),
                d,
                a,
                b,
                i: v.i,
                pc,
                npc,
            })
        }
    }
}
