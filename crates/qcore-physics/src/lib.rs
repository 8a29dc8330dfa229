// ─────────────────────────────────────────────────────────────────────
// Q-Core Kernel — Metriplectic Physics Engine
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Toroidal field integrator, shear stability model, solenoid RMS
//! controller, thermal model, Lyapunov monitor and inter-core bus,
//! orchestrated by [`solve_step`].

pub mod acoustic;
pub mod bus;
pub mod diagnostics;
pub mod engine;
pub mod lyapunov;
pub mod operators;
pub mod params;
pub mod shear;
pub mod solenoid;
pub mod thermal;
pub mod toroidal;
pub mod transport;

pub use acoustic::{apply_acoustic, AcousticSample};
pub use engine::{init_system, init_system_with, solve_step, INITIAL_STABILITY};
pub use operators::{golden_operator, phase_lock};
