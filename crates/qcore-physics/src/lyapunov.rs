// ─────────────────────────────────────────────────────────────────────
// Q-Core Kernel — Lyapunov Monitor
// ─────────────────────────────────────────────────────────────────────
//! Energy-like candidate over the two tracking errors:
//!
//!   e_ρ = 100 - ρ,   e_φ = rms - target
//!   V   = ½·(e_ρ² + e_φ²)  ≥ 0
//!   V̇   ≈ (V_new - V_old)/dt
//!
//! LaSalle lock: ρ > 98 and e_φ² < 0.001.
//! V decays statistically, not monotonically; the gated shear coupling and
//! the binary pulse train make individual ticks go either way.

use qcore_types::StateVector;

use crate::params::{LOCK_PHI_ERR_SQ, LOCK_STABILITY, STABILITY_MAX};

/// V(ρ, rms, target).
#[inline]
pub fn candidate(stability: f32, current_rms: f32, target_rms: f32) -> f32 {
    let rho_err = STABILITY_MAX - stability;
    let phi_err = current_rms - target_rms;
    0.5 * (rho_err * rho_err + phi_err * phi_err)
}

/// Inside the maximal invariant set.
#[inline]
pub fn is_locked(stability: f32, current_rms: f32, target_rms: f32) -> bool {
    let phi_err = current_rms - target_rms;
    stability > LOCK_STABILITY && phi_err * phi_err < LOCK_PHI_ERR_SQ
}

/// Refresh V, V̇ and the lock flag. Runs before the stability clamp.
pub fn update(state: &mut StateVector, dt: f32) {
    let ctrl = &state.controller;
    let v_new = candidate(state.stability, ctrl.current_rms, ctrl.target_rms);
    state.is_locked = is_locked(state.stability, ctrl.current_rms, ctrl.target_rms);
    state.lyapunov_dot = (v_new - state.lyapunov_v) / dt;
    state.lyapunov_v = v_new;
}
