//! Shared "active tooltip" slot
//!
//! Every controller on a page holds a clone of the same registry. Showing a
//! panel claims the slot; any other controller that still thinks it is visible
//! notices it lost the slot and closes itself.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Slot value meaning "no tooltip is open"
const NONE: u64 = 0;

/// Identity of one controller within a registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TooltipId(u64);

impl TooltipId {
    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
struct Inner {
    active: AtomicU64,
    next_id: AtomicU64,
}

/// Shared registry owning the single active tooltip id
#[derive(Debug, Clone, Default)]
pub struct TooltipRegistry {
    inner: Arc<Inner>,
}

impl TooltipRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out a fresh id (never the empty sentinel)
    pub fn register(&self) -> TooltipId {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        TooltipId(id)
    }

    /// Make `id` the only open tooltip
    pub fn activate(&self, id: TooltipId) {
        let previous = self.inner.active.swap(id.0, Ordering::AcqRel);
        if previous != NONE && previous != id.0 {
            tracing::debug!(closed = previous, opened = id.0, "tooltip slot taken over");
        }
    }

    /// Free the slot, but only if `id` still owns it
    pub fn release(&self, id: TooltipId) {
        let _ = self
            .inner
            .active
            .compare_exchange(id.0, NONE, Ordering::AcqRel, Ordering::Acquire);
    }

    pub fn is_active(&self, id: TooltipId) -> bool {
        self.inner.active.load(Ordering::Acquire) == id.0
    }

    /// Currently open tooltip, if any
    pub fn active(&self) -> Option<TooltipId> {
        match self.inner.active.load(Ordering::Acquire) {
            NONE => None,
            id => Some(TooltipId(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let registry = TooltipRegistry::new();
        let a = registry.register();
        let b = registry.clone().register();
        assert_ne!(a, b);
    }

    #[test]
    fn test_activate_takes_over_slot() {
        let registry = TooltipRegistry::new();
        let a = registry.register();
        let b = registry.register();

        registry.activate(a);
        assert!(registry.is_active(a));

        registry.activate(b);
        assert!(!registry.is_active(a));
        assert_eq!(registry.active(), Some(b));
    }

    #[test]
    fn test_release_by_non_owner_is_ignored() {
        let registry = TooltipRegistry::new();
        let a = registry.register();
        let b = registry.register();

        registry.activate(b);
        registry.release(a);
        assert_eq!(registry.active(), Some(b));

        registry.release(b);
        assert_eq!(registry.active(), None);
    }
}
