// ─────────────────────────────────────────────────────────────────────
// Q-Core Kernel — Inter-Core Bus
// ─────────────────────────────────────────────────────────────────────
//! Four synthetic cores, each a quarter-period apart on the phase-lock
//! operator:
//!
//!   core_sync[i] = (ρ/100)·(L(t + i·π/2)·0.5 + 0.5)
//!   throughput   = node_density·core_sync[0]
//!   packet_loss  = clamp((100 - ρ)/100, 0, 1)

use qcore_types::BusState;

use crate::operators::phase_lock;
use crate::params::{PI, STABILITY_MAX};

/// Phase offset between neighbouring cores.
const CORE_PHASE_STEP: f32 = PI / 2.0;

pub fn update(bus: &mut BusState, time: f32, stability: f32, node_density: f32) {
    let health = stability / STABILITY_MAX;
    for (i, sync) in bus.core_sync.iter_mut().enumerate() {
        let phase = time + i as f32 * CORE_PHASE_STEP;
        *sync = health * (phase_lock(phase) * 0.5 + 0.5);
    }
    bus.throughput = node_density * bus.core_sync[0];
    bus.packet_loss = ((STABILITY_MAX - stability) / STABILITY_MAX).clamp(0.0, 1.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_stability_at_time_zero() {
        let mut bus = BusState::default();
        update(&mut bus, 0.0, 100.0, 2.0);
        // L(0) = 1 → core 0 fully synchronised
        assert!((bus.core_sync[0] - 1.0).abs() < 1e-6);
        assert!((bus.throughput - 2.0).abs() < 1e-6);
        assert_eq!(bus.packet_loss, 0.0);
    }

    #[test]
    fn test_scores_within_unit_interval() {
        let mut bus = BusState::default();
        for k in 0..2000 {
            update(&mut bus, k as f32 * 0.05, 100.0, 1.0);
            for s in bus.core_sync {
                assert!((0.0..=1.0).contains(&s), "core_sync={s}");
            }
        }
    }

    #[test]
    fn test_packet_loss_clamped() {
        let mut bus = BusState::default();
        update(&mut bus, 1.0, -20.0, 0.0);
        assert_eq!(bus.packet_loss, 1.0);
        update(&mut bus, 1.0, 120.0, 0.0);
        assert_eq!(bus.packet_loss, 0.0);
        update(&mut bus, 1.0, 75.0, 0.0);
        assert!((bus.packet_loss - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_zero_stability_silences_cores() {
        let mut bus = BusState::default();
        update(&mut bus, 3.3, 0.0, 5.0);
        assert!(bus.core_sync.iter().all(|&s| s == 0.0));
        assert_eq!(bus.throughput, 0.0);
    }
}
