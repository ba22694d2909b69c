//! Pending-unstep set.

use core::sync::atomic::{AtomicU32, Ordering};

/// Fixed-capacity set of axis indices whose step line is asserted and still
/// awaiting its trailing edge.
///
/// Backed by a single atomic bitmask so the primary tick handler can insert
/// while the lower-priority trailer handler drains, without a lock. Capacity
/// is 32 axes; the engine enforces this bound at compile time.
#[derive(Debug)]
pub(crate) struct UnstepSet {
    bits: AtomicU32,
}

impl UnstepSet {
    /// Create an empty set.
    pub(crate) const fn new() -> Self {
        Self {
            bits: AtomicU32::new(0),
        }
    }

    /// Record that `axis` was stepped this tick.
    #[inline]
    pub(crate) fn insert(&self, axis: usize) {
        self.bits.fetch_or(1 << axis, Ordering::AcqRel);
    }

    /// Whether any axis is awaiting a trailing edge.
    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.bits.load(Ordering::Acquire) == 0
    }

    /// Drain the set, returning the bitmask of pending axes.
    #[inline]
    pub(crate) fn take(&self) -> u32 {
        self.bits.swap(0, Ordering::AcqRel)
    }
}
