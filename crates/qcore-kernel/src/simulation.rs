// ─────────────────────────────────────────────────────────────────────
// Q-Core Kernel — Simulation Driver
// ─────────────────────────────────────────────────────────────────────
//! Owns one state vector and drives it tick by tick:
//!
//!   1. apply the pending shear setpoint
//!   2. poll audio (non-blocking), apply or hold
//!   3. solve_step
//!   4. finiteness check
//!   5. lock-transition and trace logging
//!   6. publish the snapshot
//!
//! The engine never fails; everything that can go wrong is checked here,
//! at the boundary.

use std::sync::Arc;

use qcore_physics::{apply_acoustic, init_system_with, solve_step};
use qcore_types::{CoreConfig, QcoreError, QcoreResult, StateVector, TickSnapshot};

use crate::acoustic::{AcousticSource, SilentSource};
use crate::control::ControlHandle;
use crate::snapshot::SnapshotCell;

pub struct Simulation {
    config: CoreConfig,
    state: StateVector,
    ticks: u64,
    source: Box<dyn AcousticSource>,
    control: ControlHandle,
    snapshots: Arc<SnapshotCell>,
}

impl Simulation {
    /// Simulation with no acoustic input.
    pub fn new(config: CoreConfig) -> QcoreResult<Self> {
        Self::with_source(config, Box::new(SilentSource))
    }

    pub fn with_source(config: CoreConfig, source: Box<dyn AcousticSource>) -> QcoreResult<Self> {
        config.validate()?;
        let state = init_system_with(&config);
        let snapshots = Arc::new(SnapshotCell::new(TickSnapshot::new(0, state.clone())));
        log::info!(
            "Q-Core simulation started: dt={}, shear_flow={}, target_rms={:.4}",
            config.dt,
            config.initial_shear_flow,
            config.target_rms
        );
        Ok(Self {
            config,
            state,
            ticks: 0,
            source,
            control: ControlHandle::new(),
            snapshots,
        })
    }

    /// Advance one tick at the configured `dt`.
    pub fn tick(&mut self) -> QcoreResult<Arc<TickSnapshot>> {
        self.advance(self.config.dt)
    }

    /// Advance one tick with a caller-chosen step.
    pub fn tick_with(&mut self, dt: f32) -> QcoreResult<Arc<TickSnapshot>> {
        if !dt.is_finite() || dt <= 0.0 {
            log::error!("Tick rejected: dt={dt}");
            return Err(QcoreError::Validation(format!(
                "dt must be finite and > 0, got {dt}"
            )));
        }
        self.advance(dt)
    }

    /// Advance `n` ticks; returns the last snapshot.
    pub fn run(&mut self, n: u64) -> QcoreResult<Arc<TickSnapshot>> {
        let mut last = self.snapshots.load();
        for _ in 0..n {
            last = self.tick()?;
        }
        Ok(last)
    }

    fn advance(&mut self, dt: f32) -> QcoreResult<Arc<TickSnapshot>> {
        let previous = self.state.clone();

        let setpoint = self.control.take_shear_flow();
        if let Some(shear) = setpoint {
            log::info!("Shear setpoint {:.3} → {:.3}", self.state.shear_flow, shear);
            self.state.shear_flow = shear;
        }

        let sample = self.source.poll_audio().map(|s| s.sanitized());
        if sample.is_none() {
            log::debug!(
                "No new acoustic sample, holding energy={:.4} coherence={:.4}",
                self.state.audio_energy,
                self.state.audio_coherence
            );
        }
        apply_acoustic(&mut self.state, sample);

        solve_step(&mut self.state, dt);

        if let Some(field) = self.state.first_non_finite() {
            log::error!(
                "Tick {} rejected: non-finite {field} at t={}",
                self.ticks + 1,
                self.state.time
            );
            // Roll back the physics but keep the inputs consumed for this
            // tick: the sample stays held and the setpoint waits again.
            self.state = previous;
            apply_acoustic(&mut self.state, sample);
            if let Some(shear) = setpoint {
                self.control.restore_shear_flow(shear);
            }
            return Err(QcoreError::Numerical(format!(
                "non-finite {field} after tick {}",
                self.ticks + 1
            )));
        }

        self.ticks += 1;
        self.log_transitions(&previous);

        Ok(self
            .snapshots
            .publish(TickSnapshot::new(self.ticks, self.state.clone())))
    }

    fn log_transitions(&self, previous: &StateVector) {
        let s = &self.state;
        if self.config.lock_logging && s.is_locked != previous.is_locked {
            if s.is_locked {
                log::info!(
                    "Lock acquired at tick {} (t={:.2}, V={:.4})",
                    self.ticks,
                    s.time,
                    s.lyapunov_v
                );
            } else {
                log::info!(
                    "Lock lost at tick {} (t={:.2}, stability={:.2})",
                    self.ticks,
                    s.time,
                    s.stability
                );
            }
        }
        let every = self.config.trace_interval;
        if every > 0 && self.ticks % every == 0 {
            log::info!(
                "tick={} t={:.2} stability={:.2} rms={:.4} duty={:.4} T={:.2} V={:.3} sync={:.4} locked={}",
                self.ticks,
                s.time,
                s.stability,
                s.controller.current_rms,
                s.controller.duty_cycle,
                s.temperature,
                s.lyapunov_v,
                s.sync_clock,
                s.is_locked
            );
        }
    }

    pub fn state(&self) -> &StateVector {
        &self.state
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    /// Ticks completed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Operator handle; clones share the same pending setpoint.
    pub fn control(&self) -> ControlHandle {
        self.control.clone()
    }

    /// Shared snapshot slot for presentation threads.
    pub fn snapshots(&self) -> Arc<SnapshotCell> {
        Arc::clone(&self.snapshots)
    }

    pub fn snapshot(&self) -> Arc<TickSnapshot> {
        self.snapshots.load()
    }
}
