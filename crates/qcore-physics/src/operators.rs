// ─────────────────────────────────────────────────────────────────────
// Q-Core Kernel — Quasi-Periodic Operators
// ─────────────────────────────────────────────────────────────────────
//! Phase-lock and golden operators:
//!
//!   L(n) = cos(π·n)·cos(π·φ·n)
//!   O(n) = L(n)·L(n·φ)
//!
//! Both are bounded in [-1, 1] and never exactly periodic, since φ is
//! irrational. They gate every subsystem of the engine.

use crate::params::{PHI, PI};

/// Phase-lock operator L(n).
#[inline]
pub fn phase_lock(n: f32) -> f32 {
    (PI * n).cos() * (PI * PHI * n).cos()
}

/// Golden operator O(n) = L(n)·L(n·φ).
#[inline]
pub fn golden_operator(n: f32) -> f32 {
    phase_lock(n) * phase_lock(n * PHI)
}
