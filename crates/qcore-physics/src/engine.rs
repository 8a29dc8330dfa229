// ─────────────────────────────────────────────────────────────────────
// Q-Core Kernel — Metriplectic Engine
// ─────────────────────────────────────────────────────────────────────
//! `init_system` / `solve_step`: the fixed-order tick over the shared
//! state vector.
//!
//! Tick order (observable, do not reorder):
//!
//!    1. t += dt
//!    2. shear target
//!    3. toroidal field → sync_clock
//!    4. global_identity
//!    5. shear stability coupling
//!    6. photonic transport
//!    7. solenoid controller, solenoid filter
//!    8. thermal model, acoustic feedback
//!    9. golden filter, causal flux
//!   10. Protocol-Alpha diagnostics
//!   11. Lyapunov monitor
//!   12. inter-core bus
//!   13. clamp stability
//!
//! No I/O, no allocation, no logging. A non-finite value survives the
//! clamps untouched so the caller's finiteness check can see it.

use qcore_types::{BusState, CoreConfig, StateVector, AMBIENT_TEMPERATURE};

use crate::params::{PHI, RESONANCE_THRESHOLD, STABILITY_MAX};
use crate::{acoustic, bus, diagnostics, lyapunov, shear, solenoid, thermal, toroidal, transport};

/// Stability at power-on.
pub const INITIAL_STABILITY: f32 = 50.0;

/// State with the default configuration.
pub fn init_system() -> StateVector {
    init_system_with(&CoreConfig::default())
}

/// State seeded from a (validated) configuration.
pub fn init_system_with(config: &CoreConfig) -> StateVector {
    let controller = solenoid::new_controller(config.target_rms, config.controller_gain);
    // Seed V with the power-on errors so the first V̇ is not a spike.
    let lyapunov_v = lyapunov::candidate(INITIAL_STABILITY, 0.0, config.target_rms);

    StateVector {
        time: 0.0,
        stability: INITIAL_STABILITY,
        shear_flow: config.initial_shear_flow,
        field: toroidal::initial_field(),
        sync_clock: 0.0,
        global_identity: 0.0,
        node_density: 0.0,
        bit_stream: 0.0,
        causal_flux: 0.0,
        golden_filter: PHI,
        controller,
        solenoid_filter: 1.0,
        temperature: AMBIENT_TEMPERATURE,
        entropy_rate: 0.0,
        l2_error: 0.0,
        thermal_eff: 0.0,
        lyapunov_v,
        lyapunov_dot: 0.0,
        is_locked: false,
        audio_energy: 0.0,
        audio_coherence: 0.0,
        bus: BusState::default(),
    }
}

/// Advance the system by one fixed step.
pub fn solve_step(state: &mut StateVector, dt: f32) {
    debug_assert!(dt > 0.0, "dt must be positive");
    debug_assert!(state.audio_energy >= 0.0, "acoustic energy must be non-negative");

    state.time += dt;
    let t = state.time;

    let target = shear::target_stability(state.shear_flow);

    state.sync_clock = toroidal::update(&mut state.field, t, dt, state.stability, state.shear_flow);
    if state.sync_clock > RESONANCE_THRESHOLD {
        state.global_identity += state.sync_clock * dt;
    }

    state.stability = shear::couple(state.stability, target, state.sync_clock, t, dt);

    transport::update(
        &mut state.node_density,
        &mut state.bit_stream,
        t,
        state.stability,
        dt,
    );

    let pulse = solenoid::step(&mut state.controller, t);
    state.solenoid_filter = solenoid::solenoid_filter(pulse);

    thermal::update(state, dt);
    acoustic::couple(state, dt);

    state.golden_filter = transport::golden_filter(state.golden_filter, t);
    state.causal_flux = transport::causal_flux(state.node_density, state.golden_filter);

    diagnostics::update(state);
    lyapunov::update(state, dt);
    bus::update(&mut state.bus, t, state.stability, state.node_density);

    state.stability = state.stability.clamp(0.0, STABILITY_MAX);
}
