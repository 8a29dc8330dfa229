// ─────────────────────────────────────────────────────────────────────
// Q-Core Kernel — Protocol-Alpha Diagnostics
// ─────────────────────────────────────────────────────────────────────
//! Benchmarks the field against a classical Navier–Stokes baseline:
//!
//!   baseline  = 0.0625·min(1, shear/10)
//!   l2_error  ← 0.99·l2_error + 0.01·(sync - baseline)²
//!   η_thermal = 1.5·ρ / (1 + max(0, T - 22)·0.01 + entropy_rate)

use qcore_types::StateVector;

use crate::params::{
    AMBIENT_TEMPERATURE, EFFICIENCY_SCALE, HEAT_PENALTY_RATE, L2_RETENTION, MAX_SHEAR,
    NS_BASELINE,
};

#[inline]
pub fn ns_baseline(shear_flow: f32) -> f32 {
    NS_BASELINE * (shear_flow / MAX_SHEAR).min(1.0)
}

/// Exponentially smoothed squared deviation from the baseline.
#[inline]
pub fn smoothed_l2(previous: f32, sync_clock: f32, baseline: f32) -> f32 {
    let d = sync_clock - baseline;
    L2_RETENTION * previous + (1.0 - L2_RETENTION) * d * d
}

#[inline]
pub fn thermal_efficiency(stability: f32, temperature: f32, entropy_rate: f32) -> f32 {
    let heat_penalty = (temperature - AMBIENT_TEMPERATURE).max(0.0) * HEAT_PENALTY_RATE;
    EFFICIENCY_SCALE * stability / (1.0 + heat_penalty + entropy_rate)
}

pub fn update(state: &mut StateVector) {
    let baseline = ns_baseline(state.shear_flow);
    state.l2_error = smoothed_l2(state.l2_error, state.sync_clock, baseline);
    state.thermal_eff = thermal_efficiency(state.stability, state.temperature, state.entropy_rate);
}
