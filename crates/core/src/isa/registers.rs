//! Register index constants and the architectural assembler aliases.
//!
//! BatBridge has 32 general-purpose registers; three indices are
//! architecturally special (spec.md §3). `read_reg` in
//! [`crate::engine::resolve`] is the only place that interprets them — this
//! module just names the indices.

/// Reading yields the executing instruction's `npc`: fetch advances the
/// PC register to `npc` before this instruction reaches decode, so that's
/// the value "the PC register" holds by the time anything reads it as an
/// operand. Writing transfers control.
pub const PC: u8 = 31;
/// Reading always yields 0; writing emits the low byte as a character.
pub const ZERO: u8 = 30;
/// Reading yields the executing instruction's sign-extended immediate;
/// writing emits the value in hexadecimal.
pub const IMM: u8 = 29;

/// Resolves an assembler register alias name to its architectural index.
///
/// Returns `None` for anything that isn't one of the three named aliases —
/// callers fall back to parsing a plain numeric index.
#[must_use]
pub fn alias_index(name: &str) -> Option<u8> {
    match name {
        "r_PC" => Some(PC),
        "r_ZERO" => Some(ZERO),
        "r_IMM" => Some(IMM),
        _ => None,
    }
}
