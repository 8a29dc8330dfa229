// ─────────────────────────────────────────────────────────────────────
// Q-Core Kernel — Snapshot Publication
// ─────────────────────────────────────────────────────────────────────
//! Single-writer, many-reader publication of completed ticks.
//!
//! The writer swaps in a whole `Arc<TickSnapshot>`; readers clone the
//! `Arc` under a short read lock and then work lock-free on an immutable
//! copy. No reader ever holds a half-written tick.

use std::sync::Arc;

use parking_lot::RwLock;

use qcore_types::TickSnapshot;

/// Latest published snapshot.
///
/// Thread-safe: the slot is guarded by a `parking_lot::RwLock`.
pub struct SnapshotCell {
    latest: RwLock<Arc<TickSnapshot>>,
}

impl SnapshotCell {
    pub fn new(initial: TickSnapshot) -> Self {
        Self {
            latest: RwLock::new(Arc::new(initial)),
        }
    }

    /// Replace the published snapshot and return the shared handle.
    pub fn publish(&self, snapshot: TickSnapshot) -> Arc<TickSnapshot> {
        let snapshot = Arc::new(snapshot);
        *self.latest.write() = Arc::clone(&snapshot);
        snapshot
    }

    pub fn load(&self) -> Arc<TickSnapshot> {
        Arc::clone(&self.latest.read())
    }

    /// Tick stamp of the latest snapshot.
    pub fn tick(&self) -> u64 {
        self.latest.read().tick
    }
}
