//! Multi-level LFU memory cache (spec.md §4.12, optional collaborator).
//!
//! Capacity, latency and an eviction policy per level; the only externally
//! visible property is accumulated latency, never the architectural result
//! of a program — [`crate::engine::memory::Memory`] remains the single
//! authority for what a read returns.

use std::collections::HashMap;

#[derive(Debug, Clone)]
struct CacheLevel {
    capacity: usize,
    latency: u32,
    store: HashMap<u32, i32>,
    counters: HashMap<u32, u32>,
}

impl CacheLevel {
    fn new(capacity: usize, latency: u32) -> Self {
        Self {
            capacity,
            latency,
            store: HashMap::new(),
            counters: HashMap::new(),
        }
    }

    fn get(&mut self, addr: u32) -> Option<i32> {
        let value = self.store.get(&addr).copied()?;
        *self.counters.entry(addr).or_insert(0) += 1;
        Some(value)
    }

    /// Installs `(addr, value)`, evicting the least-frequently-used key if
    /// the level is at capacity.
    fn install(&mut self, addr: u32, value: i32) {
        if !self.store.contains_key(&addr) && self.store.len() >= self.capacity {
            if let Some((&victim, _)) = self.counters.iter().min_by_key(|(_, count)| **count) {
                self.store.remove(&victim);
                self.counters.remove(&victim);
            }
        }
        self.store.insert(addr, value);
        self.counters.entry(addr).or_insert(0);
    }

    fn write(&mut self, addr: u32, value: i32) {
        self.store.insert(addr, value);
        self.counters.entry(addr).or_insert(0);
    }
}

/// An ordered chain of [`CacheLevel`]s in front of main memory.
#[derive(Debug, Clone)]
pub struct CacheHierarchy {
    levels: Vec<CacheLevel>,
    pub hits: u64,
    pub misses: u64,
    pub latency_cycles: u64,
}

impl CacheHierarchy {
    /// Builds a hierarchy from `(capacity, latency)` pairs, nearest level
    /// first.
    #[must_use]
    pub fn new(levels: impl IntoIterator<Item = (usize, u32)>) -> Self {
        Self {
            levels: levels
                .into_iter()
                .map(|(cap, lat)| CacheLevel::new(cap, lat))
                .collect(),
            hits: 0,
            misses: 0,
            latency_cycles: 0,
        }
    }

    /// Records a read of `addr`; `authoritative_value` is what
    /// [`crate::engine::memory::Memory`] actually holds, used to populate a
    /// cache miss since the hierarchy has no store of its own to fall back
    /// to.
    pub fn touch(&mut self, addr: u32, authoritative_value: i32) {
        for level in &mut self.levels {
            if level.get(addr).is_some() {
                self.hits += 1;
                self.latency_cycles += u64::from(level.latency);
                return;
            }
        }
        self.misses += 1;
        for level in &mut self.levels {
            self.latency_cycles += u64::from(level.latency);
            level.install(addr, authoritative_value);
        }
    }

    pub fn write_through(&mut self, addr: u32, value: i32) {
        for level in &mut self.levels {
            level.write(addr, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_touch_is_a_miss_then_a_hit() {
        let mut cache = CacheHierarchy::new([(4, 1)]);
        cache.touch(100, 42);
        assert_eq!((cache.hits, cache.misses), (0, 1));
        cache.touch(100, 42);
        assert_eq!((cache.hits, cache.misses), (1, 1));
    }

    #[test]
    fn eviction_removes_the_least_frequently_used_key() {
        let mut cache = CacheHierarchy::new([(2, 1)]);
        cache.touch(0, 1);
        cache.touch(4, 2);
        cache.touch(4, 2); // bump 4's frequency above 0's
        cache.touch(8, 3); // evicts 0, the coldest key
        cache.touch(0, 1);
        assert_eq!(cache.misses, 4); // 0, 4, 8, 0-again
    }

    #[test]
    fn write_through_reaches_every_level() {
        let mut cache = CacheHierarchy::new([(4, 1), (4, 5)]);
        cache.write_through(16, 7);
        assert_eq!(cache.levels[0].get(16), Some(7));
        assert_eq!(cache.levels[1].get(16), Some(7));
    }
}
