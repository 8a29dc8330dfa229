// ─────────────────────────────────────────────────────────────────────
// Q-Core Kernel — Toroidal Field Integrator
// ─────────────────────────────────────────────────────────────────────
//! Metriplectic integrator for the N×N complex order parameter ψ:
//!
//!   symplectic:  ψ ← e^{i·dθ}·ψ,            dθ = 2·O(t)·dt
//!   metric:      ψ ← ψ + ψ·(drive - decay)·dt
//!                drive = (1 - |ψ|²)·(shear/10)·0.1
//!                decay = (100 - ρ)·0.002
//!
//! The rotation preserves |ψ|; the metric term pulls |ψ|² toward 1 while
//! stability ρ is high and bleeds amplitude when it is low.
//!
//! Observable:  sync_clock = ⟨|ψ|²⟩·O(t)²  (non-negative).

use qcore_types::{FieldCell, ToroidalField};

use crate::operators::golden_operator;
use crate::params::{
    DECAY_RATE, MAX_SHEAR, N_CELLS, PHI, PUMP_SCALE, ROTATION_GAIN, STABILITY_MAX, TAU,
    TORUS_DIM,
};

/// Initial field: re = cos(θ_i), im = cos(φ·ψ_j) on the periodic grid.
pub fn initial_field() -> ToroidalField {
    let step = TAU / TORUS_DIM as f32;
    let mut field = [[FieldCell::default(); TORUS_DIM]; TORUS_DIM];
    for (i, row) in field.iter_mut().enumerate() {
        let theta = i as f32 * step;
        for (j, cell) in row.iter_mut().enumerate() {
            let psi = j as f32 * step;
            *cell = FieldCell::new(theta.cos(), (PHI * psi).cos());
        }
    }
    field
}

/// Rotation angle for this tick.
#[inline]
pub fn rotation_angle(time: f32, dt: f32) -> f32 {
    golden_operator(time) * dt * ROTATION_GAIN
}

/// Rotate every cell by `d_theta` (norm-preserving).
pub fn rotate(field: &mut ToroidalField, d_theta: f32) {
    let (sin, cos) = d_theta.sin_cos();
    for cell in field.iter_mut().flat_map(|row| row.iter_mut()) {
        let re = cell.re * cos - cell.im * sin;
        let im = cell.re * sin + cell.im * cos;
        cell.re = re;
        cell.im = im;
    }
}

/// Dissipative drive toward unit intensity.
pub fn drive(field: &mut ToroidalField, dt: f32, stability: f32, shear_flow: f32) {
    let pump = (shear_flow / MAX_SHEAR) * PUMP_SCALE;
    let decay = (STABILITY_MAX - stability) * DECAY_RATE;
    for cell in field.iter_mut().flat_map(|row| row.iter_mut()) {
        let gain = (1.0 - cell.intensity()) * pump - decay;
        cell.re += cell.re * gain * dt;
        cell.im += cell.im * gain * dt;
    }
}

/// ⟨|ψ|²⟩·O(t)².
pub fn sync_observable(field: &ToroidalField, time: f32) -> f32 {
    let coherence = golden_operator(time);
    let gate = coherence * coherence;
    let total: f32 = field
        .iter()
        .flat_map(|row| row.iter())
        .map(|cell| cell.intensity() * gate)
        .sum();
    total / N_CELLS as f32
}

/// Advance the field by one tick and return the new `sync_clock`.
pub fn update(
    field: &mut ToroidalField,
    time: f32,
    dt: f32,
    stability: f32,
    shear_flow: f32,
) -> f32 {
    rotate(field, rotation_angle(time, dt));
    drive(field, dt, stability, shear_flow);
    sync_observable(field, time)
}
