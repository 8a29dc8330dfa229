// ─────────────────────────────────────────────────────────────────────
// Q-Core Kernel — Runtime
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Runtime around the metriplectic engine: acoustic input, operator
//! control and tick-stamped snapshot publication.
//!
//! # Invariants
//!
//! 1. **Ticks are atomic to readers**: presentation threads only ever see
//!    a complete [`TickSnapshot`](qcore_types::TickSnapshot). A snapshot
//!    is published after the engine returns, or not at all.
//!
//! 2. **Control input lands between ticks**: a shear setpoint written
//!    through a [`ControlHandle`] is applied at the start of the next
//!    tick, never mid-step.
//!
//! 3. **Audio gaps hold the last sample**: a source that has nothing new
//!    leaves the previous (energy, coherence) pair in force.
//!
//! 4. **Rejected ticks leave no trace**: if the state goes non-finite the
//!    tick is rolled back, nothing is published, and the caller gets
//!    `QcoreError::Numerical`. Inputs consumed by the rejected tick are
//!    kept: a taken shear setpoint goes back to the control handle and a
//!    polled acoustic sample stays held for the retry.

pub mod acoustic;
pub mod control;
pub mod simulation;
pub mod snapshot;

pub use acoustic::{AcousticSource, ExternalAcoustic, PcmAnalyzer, PcmFeed, SilentSource};
pub use control::ControlHandle;
pub use simulation::Simulation;
pub use snapshot::SnapshotCell;
