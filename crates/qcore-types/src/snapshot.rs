// ─────────────────────────────────────────────────────────────────────
// Q-Core Kernel — Tick Snapshot
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use crate::state::StateVector;

/// Immutable copy of the whole state, stamped with the tick that produced it.
///
/// This is the only form in which presentation collaborators see the
/// state: a snapshot is built after a tick completes, so it never mixes
/// values from two ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickSnapshot {
    /// Ticks completed when the snapshot was taken (0 = initial state).
    pub tick: u64,
    pub state: StateVector,
}

impl TickSnapshot {
    pub fn new(tick: u64, state: StateVector) -> Self {
        Self { tick, state }
    }

    pub fn time(&self) -> f32 {
        self.state.time
    }

    pub fn to_json(&self) -> String {
        // StateVector contains only plain numbers and bools.
        serde_json::to_string(self).unwrap_or_default()
    }
}
