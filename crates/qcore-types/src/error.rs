// ─────────────────────────────────────────────────────────────────────
// Q-Core Kernel — Error Hierarchy
// ─────────────────────────────────────────────────────────────────────

use thiserror::Error;

/// Root error type for the runtime around the Q-Core engine.
///
/// The engine itself (`solve_step`) never fails; these errors are raised
/// at the boundary where configuration and external input enter.
#[derive(Error, Debug)]
pub enum QcoreError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Invalid runtime input (time step, operator setpoint).
    #[error("validation error: {0}")]
    Validation(String),

    /// Numerical error (NaN/Inf in the state after a tick).
    #[error("numerical error: {0}")]
    Numerical(String),

    /// Acoustic collaborator failed.
    #[error("acoustic error: {0}")]
    Acoustic(String),
}

pub type QcoreResult<T> = Result<T, QcoreError>;
