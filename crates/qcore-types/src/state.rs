// ─────────────────────────────────────────────────────────────────────
// Q-Core Kernel — State Vector
// ─────────────────────────────────────────────────────────────────────
//! The single mutable aggregate advanced by the engine.
//!
//! Pure data: every subsystem reads and writes these fields in the fixed
//! tick order. Presentation code gets read-only copies through
//! [`crate::TickSnapshot`].

use serde::{Deserialize, Serialize};

/// Golden ratio φ, used as the RMS setpoint and as quasi-periodicity modulus.
pub const PHI: f32 = 1.618_034;

/// Side length of the toroidal grid.
pub const TORUS_DIM: usize = 8;

/// Number of synthetic cores on the inter-core bus.
pub const N_CORES: usize = 4;

/// Ambient reference temperature (°C).
pub const AMBIENT_TEMPERATURE: f32 = 22.0;

/// Clamp a value to [lo, hi], mapping NaN to lo and Inf to nearest bound.
#[inline]
pub fn clamp_metric(value: f32, lo: f32, hi: f32) -> f32 {
    if value.is_nan() {
        log::warn!("clamp_metric: NaN detected, clamping to {lo:.4}");
        return lo;
    }
    if value.is_infinite() {
        let boundary = if value > 0.0 { hi } else { lo };
        log::warn!("clamp_metric: Inf detected, clamping to {boundary:.4}");
        return boundary;
    }
    value.clamp(lo, hi)
}

/// One cell of the toroidal order-parameter field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldCell {
    pub re: f32,
    pub im: f32,
}

impl FieldCell {
    pub fn new(re: f32, im: f32) -> Self {
        Self { re, im }
    }

    /// re² + im².
    #[inline]
    pub fn intensity(&self) -> f32 {
        self.re * self.re + self.im * self.im
    }
}

/// N×N periodic complex grid, row-major by (i, j).
pub type ToroidalField = [[FieldCell; TORUS_DIM]; TORUS_DIM];

/// Sub-state owned by the solenoid controller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ControllerState {
    /// RMS setpoint (V).
    pub target_rms: f32,
    /// Rolling RMS estimate (V).
    pub current_rms: f32,
    /// PWM duty cycle ∈ [0.01, 0.50].
    pub duty_cycle: f32,
    /// Proportional gain on the RMS error.
    pub gain: f32,
    /// Last emitted pulse: 0 V or 5 V.
    pub last_pulse: f32,
    /// Exponential moving average of the squared pulse.
    pub rms_accumulator: f32,
    /// Controller steps taken (one per tick).
    pub step_count: u64,
}

/// Inter-core bus observables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusState {
    /// Per-core synchronisation score ∈ [0, 1].
    pub core_sync: [f32; N_CORES],
    pub throughput: f32,
    /// ∈ [0, 1].
    pub packet_loss: f32,
}

/// Aggregate of every scalar and field variable of the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateVector {
    /// Simulation clock (s).
    pub time: f32,
    /// Primary health metric ∈ [0, 100].
    pub stability: f32,
    /// External control input ∈ [0, 10]; the engine only reads it.
    pub shear_flow: f32,

    pub field: ToroidalField,
    /// Energy-weighted field intensity gated by the golden operator.
    pub sync_clock: f32,
    /// Accumulated phase while the field is resonant.
    pub global_identity: f32,

    // Information-flow metrics
    pub node_density: f32,
    pub bit_stream: f32,
    pub causal_flux: f32,
    pub golden_filter: f32,

    pub controller: ControllerState,
    /// Magnetic-damping factor ∈ (0, 1] derived from the last pulse.
    pub solenoid_filter: f32,

    /// °C.
    pub temperature: f32,
    pub entropy_rate: f32,

    // Protocol-Alpha diagnostics
    pub l2_error: f32,
    pub thermal_eff: f32,

    /// Lyapunov candidate V ≥ 0.
    pub lyapunov_v: f32,
    /// dV/dt estimate over the last tick.
    pub lyapunov_dot: f32,
    /// Inside the maximal invariant set.
    pub is_locked: bool,

    /// Last acoustic sample; held between polls.
    pub audio_energy: f32,
    pub audio_coherence: f32,

    pub bus: BusState,
}

impl StateVector {
    /// Mean re² + im² over the grid.
    pub fn mean_intensity(&self) -> f32 {
        let sum: f32 = self
            .field
            .iter()
            .flat_map(|row| row.iter())
            .map(FieldCell::intensity)
            .sum();
        sum / (TORUS_DIM * TORUS_DIM) as f32
    }

    /// Name of the first non-finite quantity, if any.
    pub fn first_non_finite(&self) -> Option<&'static str> {
        let scalars: [(&'static str, f32); 25] = [
            ("time", self.time),
            ("stability", self.stability),
            ("shear_flow", self.shear_flow),
            ("sync_clock", self.sync_clock),
            ("global_identity", self.global_identity),
            ("node_density", self.node_density),
            ("bit_stream", self.bit_stream),
            ("causal_flux", self.causal_flux),
            ("golden_filter", self.golden_filter),
            ("controller.target_rms", self.controller.target_rms),
            ("controller.current_rms", self.controller.current_rms),
            ("controller.duty_cycle", self.controller.duty_cycle),
            ("controller.rms_accumulator", self.controller.rms_accumulator),
            ("solenoid_filter", self.solenoid_filter),
            ("temperature", self.temperature),
            ("entropy_rate", self.entropy_rate),
            ("l2_error", self.l2_error),
            ("thermal_eff", self.thermal_eff),
            ("lyapunov_v", self.lyapunov_v),
            ("lyapunov_dot", self.lyapunov_dot),
            ("audio_energy", self.audio_energy),
            ("audio_coherence", self.audio_coherence),
            ("bus.throughput", self.bus.throughput),
            ("bus.packet_loss", self.bus.packet_loss),
            ("controller.gain", self.controller.gain),
        ];
        if let Some((name, _)) = scalars.iter().find(|(_, v)| !v.is_finite()) {
            return Some(name);
        }
        if self.bus.core_sync.iter().any(|v| !v.is_finite()) {
            return Some("bus.core_sync");
        }
        let field_ok = self
            .field
            .iter()
            .flat_map(|row| row.iter())
            .all(|c| c.re.is_finite() && c.im.is_finite());
        if !field_ok {
            return Some("field");
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank() -> StateVector {
        StateVector {
            time: 0.0,
            stability: 50.0,
            shear_flow: 10.0,
            field: [[FieldCell::new(1.0, 0.0); TORUS_DIM]; TORUS_DIM],
            sync_clock: 0.0,
            global_identity: 0.0,
            node_density: 0.0,
            bit_stream: 0.0,
            causal_flux: 0.0,
            golden_filter: PHI,
            controller: ControllerState::default(),
            solenoid_filter: 1.0,
            temperature: AMBIENT_TEMPERATURE,
            entropy_rate: 0.0,
            l2_error: 0.0,
            thermal_eff: 0.0,
            lyapunov_v: 0.0,
            lyapunov_dot: 0.0,
            is_locked: false,
            audio_energy: 0.0,
            audio_coherence: 0.0,
            bus: BusState::default(),
        }
    }

    #[test]
    fn test_clamp_nan() {
        assert_eq!(clamp_metric(f32::NAN, 0.0, 100.0), 0.0);
    }

    #[test]
    fn test_clamp_pos_inf() {
        assert_eq!(clamp_metric(f32::INFINITY, 0.0, 100.0), 100.0);
    }

    #[test]
    fn test_clamp_neg_inf() {
        assert_eq!(clamp_metric(f32::NEG_INFINITY, 0.0, 1.0), 0.0);
    }

    #[test]
    fn test_clamp_normal() {
        assert_eq!(clamp_metric(0.75, 0.0, 1.0), 0.75);
    }

    #[test]
    fn test_cell_intensity() {
        let c = FieldCell::new(0.6, 0.8);
        assert!((c.intensity() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_mean_intensity_unit_field() {
        let s = blank();
        assert!((s.mean_intensity() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_first_non_finite_clean() {
        assert_eq!(blank().first_non_finite(), None);
    }

    #[test]
    fn test_first_non_finite_reports_field() {
        let mut s = blank();
        s.field[3][5].im = f32::NAN;
        assert_eq!(s.first_non_finite(), Some("field"));
    }

    #[test]
    fn test_first_non_finite_reports_scalar() {
        let mut s = blank();
        s.temperature = f32::INFINITY;
        assert_eq!(s.first_non_finite(), Some("temperature"));
    }
}
