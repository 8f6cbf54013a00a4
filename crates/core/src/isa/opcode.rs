//! The closed BatBridge opcode set.
//!
//! Every instruction the decoder can ever produce carries one of these
//! variants as its `icode`. This is the tagged-variant replacement for the
//! dynamic keyword-tagged opcode symbols of the source implementation: the
//! symbol-to-integer table becomes an exhaustive `match` in [`OpCode::from_u8`]
//! / [`OpCode::to_u8`].

/// A decoded BatBridge opcode.
///
/// `PushAll`, `PopAll`, `Call` and `Intr` are the v1 stack/interrupt opcodes:
/// they decode to a recognized variant but have no semantic function in
/// [`crate::engine::semantics`] — dispatching one to `execute_opcode` fails
/// with `InvalidOpcode`, matching spec's "not part of this core's execute
/// contract".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpCode {
    Hlt,
    Ld,
    St,
    Push,
    Pop,
    PushAll,
    PopAll,
    IfLt,
    IfLe,
    IfEq,
    IfNe,
    Call,
    Intr,
    Add,
    Sub,
    Div,
    Mod,
    Mul,
    And,
    Or,
    Nand,
    Xor,
    Sl,
    Sr,
    Sal,
    Sar,
}

impl OpCode {
    /// Maps a raw 6-bit opcode field to its symbolic form.
    ///
    /// Returns `None` for unassigned codes; the caller (the decoder) is
    /// responsible for surfacing that as an error rather than guessing.
    #[must_use]
    pub const fn from_u8(code: u8) -> Option<Self> {
        Some(match code {
            0x00 => Self::Hlt,
            0x10 => Self::Ld,
            0x11 => Self::St,
            0x12 => Self::Push,
            0x13 => Self::Pop,
            0x14 => Self::PushAll,
            0x15 => Self::PopAll,
            0x20 => Self::IfLt,
            0x21 => Self::IfLe,
            0x22 => Self::IfEq,
            0x23 => Self::IfNe,
            0x24 => Self::Call,
            0x25 => Self::Intr,
            0x30 => Self::Add,
            0x31 => Self::Sub,
            0x32 => Self::Div,
            0x33 => Self::Mod,
            0x34 => Self::Mul,
            0x35 => Self::And,
            0x36 => Self::Or,
            0x37 => Self::Nand,
            0x38 => Self::Xor,
            0x3A => Self::Sl,
            0x3B => Self::Sr,
            0x3C => Self::Sal,
            0x3D => Self::Sar,
            _ => return None,
        })
    }

    /// The raw 6-bit opcode field for this symbol, inverse of [`Self::from_u8`].
    #[must_use]
    pub const fn to_u8(self) -> u8 {
        match self {
            Self::Hlt => 0x00,
            Self::Ld => 0x10,
            Self::St => 0x11,
            Self::Push => 0x12,
            Self::Pop => 0x13,
            Self::PushAll => 0x14,
            Self::PopAll => 0x15,
            Self::IfLt => 0x20,
            Self::IfLe => 0x21,
            Self::IfEq => 0x22,
            Self::IfNe => 0x23,
            Self::Call => 0x24,
            Self::Intr => 0x25,
            Self::Add => 0x30,
            Self::Sub => 0x31,
            Self::Div => 0x32,
            Self::Mod => 0x33,
            Self::Mul => 0x34,
            Self::And => 0x35,
            Self::Or => 0x36,
            Self::Nand => 0x37,
            Self::Xor => 0x38,
            Self::Sl => 0x3A,
            Self::Sr => 0x3B,
            Self::Sal => 0x3C,
            Self::Sar => 0x3D,
        }
    }

    /// True for the four conditional branch opcodes, which use the `{a, b,
    /// i}` slot layout rather than `{d, a, b, i}` (spec.md §4.2).
    #[must_use]
    pub const fn is_conditional(self) -> bool {
        matches!(self, Self::IfLt | Self::IfLe | Self::IfEq | Self::IfNe)
    }

    /// True for the two opcodes that expand into a two-instruction macro
    /// sequence at decode time (spec.md §4.4).
    #[must_use]
    pub const fn is_macro(self) -> bool {
        matches!(self, Self::Push | Self::Pop)
    }

    /// Parses a lowercase mnemonic, as used by the program-image JSON
    /// format's symbolic `icode` field.
    #[must_use]
    pub fn from_mnemonic(name: &str) -> Option<Self> {
        Some(match name {
            "hlt" => Self::Hlt,
            "ld" => Self::Ld,
            "st" => Self::St,
            "push" => Self::Push,
            "pop" => Self::Pop,
            "pushall" => Self::PushAll,
            "popall" => Self::PopAll,
            "iflt" => Self::IfLt,
            "ifle" => Self::IfLe,
            "ifeq" => Self::IfEq,
            "ifne" => Self::IfNe,
            "call" => Self::Call,
            "intr" => Self::Intr,
            "add" => Self::Add,
            "sub" => Self::Sub,
            "div" => Self::Div,
            "mod" => Self::Mod,
            "mul" => Self::Mul,
            "and" => Self::And,
            "or" => Self::Or,
            "nand" => Self::Nand,
            "xor" => Self::Xor,
            "sl" => Self::Sl,
            "sr" => Self::Sr,
            "sal" => Self::Sal,
            "sar" => Self::Sar,
            _ => return None,
        })
    }
}
