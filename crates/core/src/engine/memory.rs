//! The word-addressed memory store (spec.md §3 "Memory").
//!
//! Instruction and data share this one address space. Reads of an address
//! that was never written return 0 — jumping into unset memory therefore
//! decodes as `hlt` (opcode 0x00) and halts cleanly, an intentional
//! consequence rather than a special case (spec.md §7).

use std::collections::HashMap;

use crate::common::Addr;
use crate::engine::units::cache::CacheHierarchy;

/// A sparse word-addressed store, optionally fronted by a latency-only
/// cache hierarchy (spec.md §4.12). The cache never changes what a read
/// returns, only how the access is accounted for; `Memory` itself is always
/// the authority for the returned value.
#[derive(Debug, Default, Clone)]
pub struct Memory {
    store: HashMap<u32, i32>,
    cache: Option<CacheHierarchy>,
}

impl Memory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a memory backed by the given cache hierarchy for latency
    /// accounting.
    #[must_use]
    pub fn with_cache(cache: CacheHierarchy) -> Self {
        Self {
            store: HashMap::new(),
            cache: Some(cache),
        }
    }

    /// Seeds the store from a program image, for constructing initial state.
    pub fn load(&mut self, image: impl IntoIterator<Item = (u32, i32)>) {
        self.store.extend(image);
    }

    /// Reads the word at `addr`, normalized to a multiple of 4. Unset
    /// addresses read as 0.
    #[must_use]
    pub fn get(&mut self, addr: u32) -> i32 {
        let addr = Addr::new(addr).normalize().raw();
        let value = self.store.get(&addr).copied().unwrap_or(0);
        if let Some(cache) = &mut self.cache {
            cache.touch(addr, value);
        }
        value
    }

    /// Writes the word at `addr`, normalized to a multiple of 4.
    pub fn write(&mut self, addr: u32, value: i32) {
        let addr = Addr::new(addr).normalize().raw();
        self.store.insert(addr, value);
        if let Some(cache) = &mut self.cache {
            cache.write_through(addr, value);
        }
    }
}
