// ─────────────────────────────────────────────────────────────────────
// Q-Core Kernel — PyO3 FFI Bindings
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
// Note: #[deny(unsafe_code)] not applied: PyO3 proc macros generate
// unsafe blocks internally. All hand-written code in this crate is safe.
//! Python-callable wrappers around the Q-Core simulation.
//!
//! Exposes `CoreConfig`, `RustSimulation` and the quasi-periodic
//! operators to Python presentation code (banner, visualizer, LCD and
//! bus loggers all read snapshots from here).
//!
//! # FFI Safety
//!
//! - GIL acquired via `Python::with_gil` before every Python callback.
//! - Python exceptions in the audio callback → "no new sample" (held).
//! - No borrowed references escape the GIL lock scope.
//! - All config validated before storage (`CoreConfig::validate()`).
//!
//! Install: `pip install -e crates/qcore-ffi` (requires maturin).
//!
//! Usage from Python:
//! ```python
//! from qcore import CoreConfig, RustSimulation
//!
//! sim = RustSimulation(CoreConfig(dt=0.05))
//! sim.set_shear_flow(9.5)
//! snap = sim.run(1000)
//! print(snap["stability"], snap["controller"]["current_rms"])
//! ```

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use qcore_kernel::{ExternalAcoustic, PcmAnalyzer, PcmFeed, Simulation};
use qcore_physics::AcousticSample;
use qcore_types::{CoreConfig, QcoreError, TickSnapshot, PHI};

fn to_py_err(e: QcoreError) -> PyErr {
    match e {
        QcoreError::Numerical(_) => PyRuntimeError::new_err(e.to_string()),
        _ => PyValueError::new_err(e.to_string()),
    }
}

// ─── PyCoreConfig ───────────────────────────────────────────────────

/// Python-visible simulation configuration.
#[pyclass(name = "CoreConfig")]
#[derive(Clone)]
struct PyCoreConfig {
    inner: CoreConfig,
}

#[pymethods]
impl PyCoreConfig {
    #[new]
    #[pyo3(signature = (
        dt = 0.05,
        initial_shear_flow = 10.0,
        target_rms = PHI,
        controller_gain = 0.001,
        trace_interval = 0,
        lock_logging = true,
    ))]
    fn new(
        dt: f32,
        initial_shear_flow: f32,
        target_rms: f32,
        controller_gain: f32,
        trace_interval: u64,
        lock_logging: bool,
    ) -> PyResult<Self> {
        let config = CoreConfig {
            dt,
            initial_shear_flow,
            target_rms,
            controller_gain,
            trace_interval,
            lock_logging,
        };
        config.validate().map_err(to_py_err)?;
        Ok(Self { inner: config })
    }

    /// Construct from JSON string. Missing fields take their defaults.
    #[staticmethod]
    fn from_json(json: &str) -> PyResult<Self> {
        let config = CoreConfig::from_json(json).map_err(to_py_err)?;
        config.validate().map_err(to_py_err)?;
        Ok(Self { inner: config })
    }

    fn to_json(&self) -> PyResult<String> {
        serde_json::to_string(&self.inner).map_err(|e| PyValueError::new_err(e.to_string()))
    }

    #[getter]
    fn dt(&self) -> f32 {
        self.inner.dt
    }

    #[getter]
    fn initial_shear_flow(&self) -> f32 {
        self.inner.initial_shear_flow
    }

    #[getter]
    fn target_rms(&self) -> f32 {
        self.inner.target_rms
    }

    #[getter]
    fn controller_gain(&self) -> f32 {
        self.inner.controller_gain
    }

    fn __repr__(&self) -> String {
        format!(
            "CoreConfig(dt={}, initial_shear_flow={}, target_rms={:.6}, controller_gain={})",
            self.inner.dt,
            self.inner.initial_shear_flow,
            self.inner.target_rms,
            self.inner.controller_gain
        )
    }
}

// ─── Snapshot → dict ────────────────────────────────────────────────

fn snapshot_dict<'py>(py: Python<'py>, snap: &TickSnapshot) -> PyResult<Bound<'py, PyDict>> {
    let s = &snap.state;
    let dict = PyDict::new(py);
    dict.set_item("tick", snap.tick)?;
    dict.set_item("time", s.time)?;
    dict.set_item("stability", s.stability)?;
    dict.set_item("shear_flow", s.shear_flow)?;
    dict.set_item("sync_clock", s.sync_clock)?;
    dict.set_item("global_identity", s.global_identity)?;
    dict.set_item("node_density", s.node_density)?;
    dict.set_item("bit_stream", s.bit_stream)?;
    dict.set_item("causal_flux", s.causal_flux)?;
    dict.set_item("golden_filter", s.golden_filter)?;
    dict.set_item("solenoid_filter", s.solenoid_filter)?;
    dict.set_item("temperature", s.temperature)?;
    dict.set_item("entropy_rate", s.entropy_rate)?;
    dict.set_item("l2_error", s.l2_error)?;
    dict.set_item("thermal_eff", s.thermal_eff)?;
    dict.set_item("lyapunov_v", s.lyapunov_v)?;
    dict.set_item("lyapunov_dot", s.lyapunov_dot)?;
    dict.set_item("is_locked", s.is_locked)?;
    dict.set_item("audio_energy", s.audio_energy)?;
    dict.set_item("audio_coherence", s.audio_coherence)?;

    let ctrl = PyDict::new(py);
    ctrl.set_item("target_rms", s.controller.target_rms)?;
    ctrl.set_item("current_rms", s.controller.current_rms)?;
    ctrl.set_item("duty_cycle", s.controller.duty_cycle)?;
    ctrl.set_item("gain", s.controller.gain)?;
    ctrl.set_item("last_pulse", s.controller.last_pulse)?;
    ctrl.set_item("rms_accumulator", s.controller.rms_accumulator)?;
    ctrl.set_item("step_count", s.controller.step_count)?;
    dict.set_item("controller", ctrl)?;

    let bus = PyDict::new(py);
    bus.set_item("core_sync", s.bus.core_sync.to_vec())?;
    bus.set_item("throughput", s.bus.throughput)?;
    bus.set_item("packet_loss", s.bus.packet_loss)?;
    dict.set_item("bus", bus)?;

    let field: Vec<Vec<(f32, f32)>> = s
        .field
        .iter()
        .map(|row| row.iter().map(|c| (c.re, c.im)).collect())
        .collect();
    dict.set_item("field", field)?;
    Ok(dict)
}

// ─── RustSimulation ─────────────────────────────────────────────────

/// Fixed-step Q-Core simulation.
///
/// Audio comes either from an `audio_callback` (polled once per tick,
/// returning `None` or `(energy, coherence)`) or, when no callback is
/// given, from raw PCM frames pushed with `push_audio_frame`.
#[pyclass(name = "RustSimulation")]
struct PySimulation {
    inner: Simulation,
    pcm: Option<PcmFeed>,
}

#[pymethods]
impl PySimulation {
    #[new]
    #[pyo3(signature = (config = None, audio_callback = None, frame_capacity = 64))]
    fn new(
        config: Option<PyCoreConfig>,
        audio_callback: Option<PyObject>,
        frame_capacity: usize,
    ) -> PyResult<Self> {
        let cfg = config.map(|c| c.inner).unwrap_or_default();

        let (inner, pcm) = match audio_callback {
            Some(cb) => {
                let source = ExternalAcoustic::new(move || {
                    Python::with_gil(|py| match cb.call0(py) {
                        Ok(result) => result
                            .extract::<Option<(f32, f32)>>(py)
                            .unwrap_or(None)
                            .map(|(energy, coherence)| AcousticSample::new(energy, coherence)),
                        Err(_) => None,
                    })
                });
                let sim = Simulation::with_source(cfg, Box::new(source)).map_err(to_py_err)?;
                (sim, None)
            }
            None => {
                let analyzer = PcmAnalyzer::new(frame_capacity);
                let feed = analyzer.feed();
                let sim = Simulation::with_source(cfg, Box::new(analyzer)).map_err(to_py_err)?;
                (sim, Some(feed))
            }
        };
        Ok(Self { inner, pcm })
    }

    /// Advance one tick. Returns the snapshot dict.
    #[pyo3(signature = (dt = None))]
    fn tick<'py>(&mut self, py: Python<'py>, dt: Option<f32>) -> PyResult<Bound<'py, PyDict>> {
        let snap = match dt {
            Some(dt) => self.inner.tick_with(dt),
            None => self.inner.tick(),
        }
        .map_err(to_py_err)?;
        snapshot_dict(py, &snap)
    }

    /// Advance `n` ticks. Returns the last snapshot dict.
    fn run<'py>(&mut self, py: Python<'py>, n: u64) -> PyResult<Bound<'py, PyDict>> {
        let snap = self.inner.run(n).map_err(to_py_err)?;
        snapshot_dict(py, &snap)
    }

    /// Request a new shear setpoint ∈ [0, 10], applied at the next tick.
    fn set_shear_flow(&self, shear_flow: f32) -> PyResult<()> {
        self.inner.control().set_shear_flow(shear_flow).map_err(to_py_err)
    }

    /// Queue one frame of signed 16-bit PCM samples.
    fn push_audio_frame(&self, frame: Vec<i16>) -> PyResult<()> {
        match &self.pcm {
            Some(feed) => feed.push_frame(&frame).map_err(to_py_err),
            None => Err(PyValueError::new_err(
                "simulation was built with an audio_callback; PCM frames are not accepted",
            )),
        }
    }

    /// Latest published snapshot as a dict.
    fn snapshot<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        snapshot_dict(py, &self.inner.snapshot())
    }

    /// Latest published snapshot as JSON.
    fn to_json(&self) -> String {
        self.inner.snapshot().to_json()
    }

    #[getter]
    fn ticks(&self) -> u64 {
        self.inner.ticks()
    }

    #[getter]
    fn time(&self) -> f32 {
        self.inner.state().time
    }

    #[getter]
    fn stability(&self) -> f32 {
        self.inner.state().stability
    }

    #[getter]
    fn is_locked(&self) -> bool {
        self.inner.state().is_locked
    }

    fn __repr__(&self) -> String {
        let s = self.inner.state();
        format!(
            "RustSimulation(tick={}, t={:.2}, stability={:.2}, rms={:.4}, locked={})",
            self.inner.ticks(),
            s.time,
            s.stability,
            s.controller.current_rms,
            s.is_locked
        )
    }
}

// ─── Operators ──────────────────────────────────────────────────────

/// Phase-lock operator L(n) = cos(π·n)·cos(π·φ·n).
#[pyfunction]
fn phase_lock(n: f32) -> f32 {
    qcore_physics::phase_lock(n)
}

/// Golden operator O(n) = L(n)·L(n·φ).
#[pyfunction]
fn golden_operator(n: f32) -> f32 {
    qcore_physics::golden_operator(n)
}

#[pymodule]
fn qcore(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyCoreConfig>()?;
    m.add_class::<PySimulation>()?;
    m.add_function(wrap_pyfunction!(phase_lock, m)?)?;
    m.add_function(wrap_pyfunction!(golden_operator, m)?)?;
    m.add("PHI", PHI)?;
    Ok(())
}
