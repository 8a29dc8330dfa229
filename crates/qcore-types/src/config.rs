// ─────────────────────────────────────────────────────────────────────
// Q-Core Kernel — Runtime Configuration
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use crate::error::{QcoreError, QcoreResult};
use crate::state::PHI;

/// Runtime configuration for a simulation.
///
/// The engine constants (gains, rates, thresholds) are fixed; this is the
/// subset a host chooses per run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Fixed integration step in seconds.
    /// Default: 0.05.
    pub dt: f32,

    /// Shear setpoint written into the state at construction.
    /// Default: 10.0 (the stable regime).
    pub initial_shear_flow: f32,

    /// Solenoid RMS setpoint in volts.
    /// Default: φ.
    pub target_rms: f32,

    /// Proportional gain of the duty-cycle law.
    /// Default: 0.001.
    pub controller_gain: f32,

    /// Emit a trace line every N ticks. 0 disables the trace.
    pub trace_interval: u64,

    /// Log transitions into and out of the locked set.
    pub lock_logging: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            dt: 0.05,
            initial_shear_flow: 10.0,
            target_rms: PHI,
            controller_gain: 0.001,
            trace_interval: 0,
            lock_logging: true,
        }
    }
}

impl CoreConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> QcoreResult<()> {
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(QcoreError::Config(format!(
                "dt must be finite and > 0, got {}",
                self.dt
            )));
        }
        if !(0.0..=10.0).contains(&self.initial_shear_flow) {
            return Err(QcoreError::Config(format!(
                "initial_shear_flow must be in [0, 10], got {}",
                self.initial_shear_flow
            )));
        }
        if !self.target_rms.is_finite() || self.target_rms < 0.0 {
            return Err(QcoreError::Config(format!(
                "target_rms must be finite and >= 0, got {}",
                self.target_rms
            )));
        }
        if !self.controller_gain.is_finite() || self.controller_gain <= 0.0 {
            return Err(QcoreError::Config(format!(
                "controller_gain must be finite and > 0, got {}",
                self.controller_gain
            )));
        }
        Ok(())
    }

    /// Load from JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> QcoreResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| QcoreError::Config(format!("JSON parse error: {e}")))
    }
}
