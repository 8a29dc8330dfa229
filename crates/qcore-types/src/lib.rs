// ─────────────────────────────────────────────────────────────────────
// Q-Core Kernel — Types
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! State vector, configuration, snapshot and error types shared by the
//! Q-Core engine and the runtime around it.

pub mod config;
pub mod error;
pub mod snapshot;
pub mod state;

pub use config::CoreConfig;
pub use error::{QcoreError, QcoreResult};
pub use snapshot::TickSnapshot;
pub use state::{
    clamp_metric, BusState, ControllerState, FieldCell, StateVector, ToroidalField,
    AMBIENT_TEMPERATURE, N_CORES, PHI, TORUS_DIM,
};
