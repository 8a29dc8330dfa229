// ─────────────────────────────────────────────────────────────────────
// Q-Core Kernel — Solenoid Controller
// ─────────────────────────────────────────────────────────────────────
//! Proportional pulse controller with a rolling RMS estimator.
//!
//! Each tick:
//!   1. duty += (target_rms - current_rms)·gain, clamped to [0.01, 0.50]
//!   2. threshold = cos(π·duty)
//!   3. carrier   = cos(2π·t + π·O(t))
//!   4. pulse     = 5 V if carrier > threshold else 0 V
//!   5. acc       = 0.9995·acc + 0.0005·pulse²
//!   6. rms       = √acc
//!
//! With the small default gain the loop is over-damped: the RMS settles
//! asymptotically around the setpoint rather than exactly on it.

use qcore_types::ControllerState;

use crate::operators::golden_operator;
use crate::params::{
    nominal_duty, DUTY_MAX, DUTY_MIN, FILTER_DAMPING, PI, PULSE_HIGH, RMS_RETENTION, RMS_WEIGHT,
    TAU,
};

/// Fresh controller: duty at the nominal φ-RMS value, empty accumulator.
pub fn new_controller(target_rms: f32, gain: f32) -> ControllerState {
    ControllerState {
        target_rms,
        current_rms: 0.0,
        duty_cycle: nominal_duty(),
        gain,
        last_pulse: 0.0,
        rms_accumulator: 0.0,
        step_count: 0,
    }
}

/// Apply the proportional law to the duty cycle and return it.
pub fn correct_duty(ctrl: &mut ControllerState) -> f32 {
    let error = ctrl.target_rms - ctrl.current_rms;
    ctrl.duty_cycle = (ctrl.duty_cycle + error * ctrl.gain).clamp(DUTY_MIN, DUTY_MAX);
    ctrl.duty_cycle
}

/// Comparator level for a given duty cycle.
#[inline]
pub fn pulse_threshold(duty_cycle: f32) -> f32 {
    (PI * duty_cycle).cos()
}

/// Phase-modulated 1 Hz carrier.
#[inline]
pub fn carrier(time: f32) -> f32 {
    let phase_mod = golden_operator(time) * PI;
    (time * TAU + phase_mod).cos()
}

/// Advance the controller one tick. Returns the emitted pulse.
pub fn step(ctrl: &mut ControllerState, time: f32) -> f32 {
    ctrl.step_count += 1;

    let duty = correct_duty(ctrl);
    ctrl.last_pulse = if carrier(time) > pulse_threshold(duty) {
        PULSE_HIGH
    } else {
        0.0
    };

    let power = ctrl.last_pulse * ctrl.last_pulse;
    ctrl.rms_accumulator = RMS_RETENTION * ctrl.rms_accumulator + RMS_WEIGHT * power;
    ctrl.current_rms = ctrl.rms_accumulator.sqrt();

    ctrl.last_pulse
}

/// Magnetic damping factor in (0, 1].
#[inline]
pub fn solenoid_filter(last_pulse: f32) -> f32 {
    1.0 / (1.0 + last_pulse * FILTER_DAMPING)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{DEFAULT_GAIN, PHI};

    #[test]
    fn test_new_controller_defaults() {
        let c = new_controller(PHI, DEFAULT_GAIN);
        assert_eq!(c.current_rms, 0.0);
        assert_eq!(c.step_count, 0);
        assert!((c.duty_cycle - 0.1047).abs() < 1e-3, "duty={}", c.duty_cycle);
    }

    #[test]
    fn test_correct_duty_positive_error() {
        let mut c = new_controller(PHI, DEFAULT_GAIN);
        let before = c.duty_cycle;
        let after = correct_duty(&mut c);
        // error = φ, step = φ·0.001
        assert!((after - before - PHI * DEFAULT_GAIN).abs() < 1e-6);
    }

    #[test]
    fn test_duty_clamped_high() {
        let mut c = new_controller(1000.0, 1.0);
        correct_duty(&mut c);
        assert_eq!(c.duty_cycle, DUTY_MAX);
    }

    #[test]
    fn test_duty_clamped_low() {
        let mut c = new_controller(0.0, 1.0);
        c.current_rms = 100.0;
        correct_duty(&mut c);
        assert_eq!(c.duty_cycle, DUTY_MIN);
    }

    #[test]
    fn test_pulse_is_binary() {
        let mut c = new_controller(PHI, DEFAULT_GAIN);
        let mut t = 0.0;
        for _ in 0..2000 {
            t += 0.05;
            let p = step(&mut c, t);
            assert!(p == 0.0 || p == PULSE_HIGH, "pulse={p}");
        }
        assert_eq!(c.step_count, 2000);
    }

    #[test]
    fn test_rms_matches_accumulator() {
        let mut c = new_controller(PHI, DEFAULT_GAIN);
        let mut t = 0.0;
        for _ in 0..500 {
            t += 0.05;
            step(&mut c, t);
            assert!((c.current_rms * c.current_rms - c.rms_accumulator).abs() < 1e-5);
        }
    }

    #[test]
    fn test_zero_target_silences_output() {
        let mut c = new_controller(0.0, DEFAULT_GAIN);
        c.rms_accumulator = PHI * PHI;
        c.current_rms = PHI;
        let mut t = 0.0;
        for _ in 0..2000 {
            t += 0.05;
            step(&mut c, t);
        }
        // threshold = cos(0.01π) ≈ 0.9995; pulses become rare and the RMS drains
        assert_eq!(c.duty_cycle, DUTY_MIN);
        assert!(c.current_rms < 0.8 * PHI, "rms={} should drain", c.current_rms);
    }

    #[test]
    fn test_filter_values() {
        assert_eq!(solenoid_filter(0.0), 1.0);
        assert!((solenoid_filter(5.0) - 1.0 / 1.5).abs() < 1e-6);
    }
}
