//! A strong type for BatBridge's single word-addressed address space.
//!
//! BatBridge is Von Neumann (instruction and data share one address space),
//! so unlike the teacher's `VirtAddr`/`PhysAddr` split there is only one
//! address kind here. What's shared is the normalization rule: spec.md §3
//! requires every load/store/branch-target address to be rounded down to a
//! multiple of 4 before use.

/// A 32-bit BatBridge address, word-aligned on normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Addr(pub u32);

impl Addr {
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Rounds down to the nearest multiple of 4.
    #[must_use]
    pub const fn normalize(self) -> Self {
        Self(self.0 & !0x3)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for Addr {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl From<Addr> for u32 {
    fn from(a: Addr) -> Self {
        a.0
    }
}
