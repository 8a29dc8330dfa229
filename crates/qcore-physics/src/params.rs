// ─────────────────────────────────────────────────────────────────────
// Q-Core Kernel — Canonical Parameters
// ─────────────────────────────────────────────────────────────────────
//! Fixed gains, rates and thresholds of the metriplectic engine.
//!
//! The numbers are part of the observable contract: trajectories are
//! compared bit-for-bit, so none of these are runtime-configurable.

pub use qcore_types::{AMBIENT_TEMPERATURE, N_CORES, PHI, TORUS_DIM};

pub const PI: f32 = std::f32::consts::PI;
pub const TAU: f32 = std::f32::consts::TAU;

/// Cells in the toroidal grid.
pub const N_CELLS: usize = TORUS_DIM * TORUS_DIM;

// ── Toroidal field ──────────────────────────────────────────────────

/// dθ = O(t)·dt·ROTATION_GAIN.
pub const ROTATION_GAIN: f32 = 2.0;
/// Pump at full shear (shear_flow = 10).
pub const PUMP_SCALE: f32 = 0.1;
/// Amplitude decay per point of missing stability.
pub const DECAY_RATE: f32 = 0.002;
/// global_identity accumulates only above this sync level.
pub const RESONANCE_THRESHOLD: f32 = 0.5;

// ── Shear stability ─────────────────────────────────────────────────

pub const MAX_SHEAR: f32 = 10.0;
/// At or above this shear the target saturates at 100.
pub const STABLE_SHEAR: f32 = 9.9;
pub const SHEAR_TARGET_SLOPE: f32 = 8.0;
pub const RELAXATION_RATE: f32 = 0.2;
pub const TOROIDAL_BOOST: f32 = 10.0;
pub const STABILITY_MAX: f32 = 100.0;

// ── Solenoid controller ─────────────────────────────────────────────

/// High level of the pulse output (V).
pub const PULSE_HIGH: f32 = 5.0;
pub const DUTY_MIN: f32 = 0.01;
pub const DUTY_MAX: f32 = 0.50;
pub const DEFAULT_GAIN: f32 = 0.001;
/// EMA retention of the squared-pulse accumulator.
pub const RMS_RETENTION: f32 = 0.9995;
pub const RMS_WEIGHT: f32 = 0.0005;
/// solenoid_filter = 1 / (1 + pulse·FILTER_DAMPING).
pub const FILTER_DAMPING: f32 = 0.1;

/// Duty cycle whose pulse RMS equals φ: PULSE_HIGH·√d = φ.
pub fn nominal_duty() -> f32 {
    (PHI * PHI) / (PULSE_HIGH * PULSE_HIGH)
}

// ── Thermal ─────────────────────────────────────────────────────────

pub const PULSE_HEAT_DIVISOR: f32 = 10.0;
pub const ACOUSTIC_HEAT_GAIN: f32 = 20.0;
pub const COOLING_RATE: f32 = 0.05;
pub const OVERHEAT_THRESHOLD: f32 = 60.0;
pub const OVERHEAT_PENALTY: f32 = 0.01;

// ── Acoustic coupling ───────────────────────────────────────────────

pub const ACOUSTIC_HEALING: f32 = 5.0;
pub const SHOCK_THRESHOLD: f32 = 0.5;
pub const SHOCK_GAIN: f32 = 10.0;

// ── Lyapunov monitor ────────────────────────────────────────────────

pub const LOCK_STABILITY: f32 = 98.0;
pub const LOCK_PHI_ERR_SQ: f32 = 0.001;

// ── Photonic transport ──────────────────────────────────────────────

pub const DECOHERENCE_OFFSET: f32 = 105.0;
pub const DECOHERENCE_RATE: f32 = 0.005;
pub const TRANSMIT_STABILITY: f32 = 90.0;
pub const TURBULENT_RETENTION: f32 = 0.95;
pub const PACKET_THRESHOLD: f32 = 0.5;
/// Amplitude of a raw binary packet (V).
pub const PACKET_VOLTAGE: f32 = 5.0;
pub const GOLDEN_FILTER_CEILING: f32 = 10.0;
/// cos(2π·t) below this resets the golden filter.
pub const PARITY_GATE: f32 = -0.99;

// ── Protocol-Alpha diagnostics ──────────────────────────────────────

/// Classical Navier–Stokes baseline at full shear.
pub const NS_BASELINE: f32 = 0.0625;
pub const L2_RETENTION: f32 = 0.99;
pub const HEAT_PENALTY_RATE: f32 = 0.01;
pub const EFFICIENCY_SCALE: f32 = 1.5;
