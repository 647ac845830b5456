// crates/stackflow-core/src/ids.rs
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static ITEM_ID_COUNTER: AtomicU64 = AtomicU64::new(1);
static STACK_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Opaque handle of a pushed stack item. Unique per push, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(u64);

impl ItemId {
    pub fn next() -> Self {
        Self(ITEM_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

/// Identity of one stack controller instance. Items use it to check that a
/// notification really comes from the stack that owns them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StackId(u64);

impl StackId {
    pub fn next() -> Self {
        Self(STACK_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for StackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stack#{}", self.0)
    }
}
