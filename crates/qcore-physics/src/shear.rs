// ─────────────────────────────────────────────────────────────────────
// Q-Core Kernel — Shear Stability Model
// ─────────────────────────────────────────────────────────────────────
//! Relaxation of the stability metric ρ toward a shear-driven target:
//!
//!   target = 100               if shear ≥ 9.9
//!          = 8·shear           otherwise
//!   ρ ← ρ + ((target - ρ)·0.2 + boost)·L(t)²·dt
//!   boost = 10·sync_clock      if sync_clock > 0
//!
//! L(t)² is an on/off-ish admission gate: corrections are only admitted
//! while the phase-lock operator is away from its zeros. The caller clamps
//! ρ once the whole tick has run.

use crate::operators::phase_lock;
use crate::params::{
    RELAXATION_RATE, SHEAR_TARGET_SLOPE, STABILITY_MAX, STABLE_SHEAR, TOROIDAL_BOOST,
};

/// Stability the shear setpoint asks for.
#[inline]
pub fn target_stability(shear_flow: f32) -> f32 {
    if shear_flow >= STABLE_SHEAR {
        STABILITY_MAX
    } else {
        shear_flow * SHEAR_TARGET_SLOPE
    }
}

/// L(t)², always in [0, 1].
#[inline]
pub fn correction_gate(time: f32) -> f32 {
    let l = phase_lock(time);
    l * l
}

#[inline]
pub fn toroidal_boost(sync_clock: f32) -> f32 {
    if sync_clock > 0.0 {
        TOROIDAL_BOOST * sync_clock
    } else {
        0.0
    }
}

/// Metriplectic stability coupling. Returns the unclamped new stability.
pub fn couple(stability: f32, target: f32, sync_clock: f32, time: f32, dt: f32) -> f32 {
    let correction = (target - stability) * RELAXATION_RATE + toroidal_boost(sync_clock);
    stability + correction * correction_gate(time) * dt
}
