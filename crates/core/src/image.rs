//! The program-image JSON loader.
//!
//! A program image is a JSON object mapping decimal word addresses to
//! either a raw packed word or a symbolic `{icode, d, a, b, i}` instruction
//! object. This is strictly a convenience for hand-written fixtures and
//! example programs — parsing never reaches the decoder, it only ever
//! produces the `(address, word)` pairs `Memory::load` expects, reducing
//! symbolic entries to their packed-word encoding via the same `codec::pack`
//! the wire codec uses everywhere else.

use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;

use crate::isa::{codec, registers, OpCode};

/// Everything that can go wrong turning a program-image document into
/// memory contents.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("malformed program image: {0}")]
    Json(#[from] serde_json::Error),
    #[error("address key {0:?} is not a decimal word address")]
    BadAddress(String),
    #[error("unrecognized opcode mnemonic {0:?}")]
    UnknownMnemonic(String),
    #[error("unrecognized register {0:?}")]
    UnknownRegister(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Word(i64),
    Symbolic(SymbolicEntry),
}

#[derive(Debug, Deserialize)]
struct SymbolicEntry {
    icode: String,
    #[serde(default)]
    d: RegisterField,
    #[serde(default)]
    a: RegisterField,
    #[serde(default)]
    b: RegisterField,
    #[serde(default)]
    i: i32,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RegisterField {
    Index(u8),
    Alias(String),
}

impl Default for RegisterField {
    fn default() -> Self {
        Self::Index(0)
    }
}

fn resolve_register(field: &RegisterField) -> Result<u8, ImageError> {
    match field {
        RegisterField::Index(idx) => Ok(*idx),
        RegisterField::Alias(name) => registers::alias_index(name).ok_or_else(|| ImageError::UnknownRegister(name.clone())),
    }
}

fn encode_entry(entry: RawEntry) -> Result<i32, ImageError> {
    match entry {
        RawEntry::Word(w) => Ok(w as i32),
        RawEntry::Symbolic(sym) => {
            let icode = OpCode::from_mnemonic(&sym.icode).ok_or(ImageError::UnknownMnemonic(sym.icode.clone()))?;
            let d = resolve_register(&sym.d)?;
            let a = resolve_register(&sym.a)?;
            let b = resolve_register(&sym.b)?;
            Ok(codec::pack(icode.to_u8(), d, a, b, sym.i) as i32)
        }
    }
}

/// Parses a program-image JSON document into `(address, word)` pairs ready
/// for [`crate::engine::Memory::load`].
///
/// # Errors
///
/// Returns [`ImageError`] if the document isn't valid JSON, an address key
/// isn't a decimal word address, or a symbolic entry names an unrecognized
/// opcode or register.
pub fn parse(json: &str) -> Result<Vec<(u32, i32)>, ImageError> {
    let raw: BTreeMap<String, RawEntry> = serde_json::from_str(json)?;
    raw.into_iter()
        .map(|(key, entry)| {
            let addr: u32 = key.parse().map_err(|_| ImageError::BadAddress(key.clone()))?;
            Ok((addr, encode_entry(entry)?))
        })
        .collect()
}
