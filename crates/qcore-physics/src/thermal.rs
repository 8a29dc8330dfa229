// ─────────────────────────────────────────────────────────────────────
// Q-Core Kernel — Thermal Model
// ─────────────────────────────────────────────────────────────────────
//! Heat balance of the solenoid stack:
//!
//!   heating = pulse²/10 + 20·audio_energy
//!   cooling = 0.05·(T - 22)
//!   entropy_rate = heating + cooling
//!   T ← T + (heating - cooling)·dt
//!
//! Above 60 °C the excess bleeds stability: ρ -= 0.01·(T - 60)·dt.

use qcore_types::StateVector;

use crate::params::{
    ACOUSTIC_HEAT_GAIN, AMBIENT_TEMPERATURE, COOLING_RATE, OVERHEAT_PENALTY, OVERHEAT_THRESHOLD,
    PULSE_HEAT_DIVISOR,
};

/// Heating and cooling terms for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatBalance {
    pub heating: f32,
    pub cooling: f32,
}

impl HeatBalance {
    pub fn compute(last_pulse: f32, audio_energy: f32, temperature: f32) -> Self {
        Self {
            heating: last_pulse * last_pulse / PULSE_HEAT_DIVISOR + audio_energy * ACOUSTIC_HEAT_GAIN,
            cooling: (temperature - AMBIENT_TEMPERATURE) * COOLING_RATE,
        }
    }

    #[inline]
    pub fn entropy_rate(&self) -> f32 {
        self.heating + self.cooling
    }

    #[inline]
    pub fn net(&self) -> f32 {
        self.heating - self.cooling
    }
}

/// Stability lost to overheating this tick (≥ 0).
#[inline]
pub fn overheat_penalty(temperature: f32, dt: f32) -> f32 {
    if temperature > OVERHEAT_THRESHOLD {
        (temperature - OVERHEAT_THRESHOLD) * OVERHEAT_PENALTY * dt
    } else {
        0.0
    }
}

/// Integrate temperature and apply the overheat feedback to stability.
pub fn update(state: &mut StateVector, dt: f32) {
    let balance = HeatBalance::compute(
        state.controller.last_pulse,
        state.audio_energy,
        state.temperature,
    );
    state.entropy_rate = balance.entropy_rate();
    state.temperature += balance.net() * dt;
    state.stability -= overheat_penalty(state.temperature, dt);
}
