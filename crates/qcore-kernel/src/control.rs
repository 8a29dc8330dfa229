// ─────────────────────────────────────────────────────────────────────
// Q-Core Kernel — Operator Control
// ─────────────────────────────────────────────────────────────────────

use std::sync::Arc;

use parking_lot::Mutex;

use qcore_types::{QcoreError, QcoreResult};

/// Accepted shear setpoint range.
pub const SHEAR_RANGE: std::ops::RangeInclusive<f32> = 0.0..=10.0;

/// Cloneable handle through which an operator steers a running simulation.
///
/// Setpoints are validated on write and held until the simulation picks
/// them up at the start of its next tick. Only the latest write survives.
#[derive(Clone, Default)]
pub struct ControlHandle {
    pending_shear: Arc<Mutex<Option<f32>>>,
}

impl ControlHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a new shear setpoint ∈ [0, 10].
    pub fn set_shear_flow(&self, shear_flow: f32) -> QcoreResult<()> {
        if !SHEAR_RANGE.contains(&shear_flow) {
            return Err(QcoreError::Validation(format!(
                "shear_flow must be in [0, 10], got {shear_flow}"
            )));
        }
        *self.pending_shear.lock() = Some(shear_flow);
        Ok(())
    }

    /// Setpoint waiting for the next tick, if any.
    pub fn pending_shear_flow(&self) -> Option<f32> {
        *self.pending_shear.lock()
    }

    pub(crate) fn take_shear_flow(&self) -> Option<f32> {
        self.pending_shear.lock().take()
    }

    /// Put back a setpoint taken by a tick that was rolled back, unless the
    /// operator has written a newer one since.
    pub(crate) fn restore_shear_flow(&self, shear_flow: f32) {
        let mut pending = self.pending_shear.lock();
        if pending.is_none() {
            *pending = Some(shear_flow);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_range_bounds() {
        let h = ControlHandle::new();
        assert!(h.set_shear_flow(0.0).is_ok());
        assert!(h.set_shear_flow(10.0).is_ok());
    }

    #[test]
    fn test_rejects_out_of_range() {
        let h = ControlHandle::new();
        for bad in [-0.1, 10.01, f32::NAN, f32::INFINITY] {
            let err = h.set_shear_flow(bad);
            assert!(matches!(err, Err(QcoreError::Validation(_))), "{bad} accepted");
        }
        assert_eq!(h.pending_shear_flow(), None);
    }

    #[test]
    fn test_latest_write_wins() {
        let h = ControlHandle::new();
        h.set_shear_flow(3.0).unwrap();
        h.clone().set_shear_flow(7.0).unwrap();
        assert_eq!(h.take_shear_flow(), Some(7.0));
        assert_eq!(h.take_shear_flow(), None, "setpoint consumed once");
    }

    #[test]
    fn test_restore_only_fills_empty_slot() {
        let h = ControlHandle::new();
        h.restore_shear_flow(4.0);
        assert_eq!(h.pending_shear_flow(), Some(4.0));
        h.set_shear_flow(8.0).unwrap();
        h.restore_shear_flow(4.0);
        assert_eq!(h.pending_shear_flow(), Some(8.0));
    }
}
