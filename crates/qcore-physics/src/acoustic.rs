// ─────────────────────────────────────────────────────────────────────
// Q-Core Kernel — Acoustic Coupling
// ─────────────────────────────────────────────────────────────────────
//! The engine's side of the acoustic interface. It does no signal
//! processing: a collaborator supplies an (energy, coherence) pair and the
//! engine stores it, holding the last sample across gaps.
//!
//! Feedback on stability, applied after the thermal model:
//!   ρ += 5·coherence·dt              (healing)
//!   ρ -= 10·energy·dt  if energy > 0.5  (shock)

use serde::{Deserialize, Serialize};

use qcore_types::{clamp_metric, StateVector};

use crate::params::{ACOUSTIC_HEALING, SHOCK_GAIN, SHOCK_THRESHOLD};

/// One acoustic reading: energy ≥ 0, coherence ∈ [0, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AcousticSample {
    pub energy: f32,
    pub coherence: f32,
}

impl AcousticSample {
    pub fn new(energy: f32, coherence: f32) -> Self {
        Self { energy, coherence }
    }

    /// Force the sample into range. Collaborators call this before handing
    /// a reading to the engine; non-finite values collapse to 0.
    pub fn sanitized(self) -> Self {
        Self {
            energy: clamp_metric(self.energy, 0.0, f32::MAX),
            coherence: clamp_metric(self.coherence, 0.0, 1.0),
        }
    }
}

/// Store a fresh sample, or hold the previous one when `None`.
pub fn apply_acoustic(state: &mut StateVector, sample: Option<AcousticSample>) {
    if let Some(s) = sample {
        debug_assert!(s.energy >= 0.0, "acoustic energy must be non-negative");
        state.audio_energy = s.energy;
        state.audio_coherence = s.coherence;
    }
}

/// Healing minus shock for this tick.
pub fn stability_feedback(energy: f32, coherence: f32, dt: f32) -> f32 {
    let healing = coherence * ACOUSTIC_HEALING * dt;
    let shock = if energy > SHOCK_THRESHOLD {
        energy * SHOCK_GAIN * dt
    } else {
        0.0
    };
    healing - shock
}

/// Apply the acoustic feedback to stability.
pub fn couple(state: &mut StateVector, dt: f32) {
    state.stability += stability_feedback(state.audio_energy, state.audio_coherence, dt);
}
