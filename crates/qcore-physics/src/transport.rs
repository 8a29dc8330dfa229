// ─────────────────────────────────────────────────────────────────────
// Q-Core Kernel — Photonic Transport
// ─────────────────────────────────────────────────────────────────────
//! Information-flow metrics riding on the stability metric:
//!
//!   pump        = cos(π·φ·t)·0.5 + 0.5
//!   decoherence = (105 - ρ)·0.005
//!   n           ← n + (pump - decoherence·n)·dt
//!   bits        ← bits + n·dt        if ρ > 90
//!               ← bits·0.95          otherwise
//!
//! The golden filter iterates x ← (φ·x + 1)/2 and resets to φ on the
//! parity gate cos(2π·t) < -0.99 or once it passes 10. Causal flux is the
//! filtered binary packet: (5 V if n > 0.5 else 0)·x·0.5.

use crate::params::{
    DECOHERENCE_OFFSET, DECOHERENCE_RATE, GOLDEN_FILTER_CEILING, PACKET_THRESHOLD,
    PACKET_VOLTAGE, PARITY_GATE, PHI, PI, TAU, TRANSMIT_STABILITY, TURBULENT_RETENTION,
};

#[inline]
pub fn optical_pump(time: f32) -> f32 {
    (time * PI * PHI).cos() * 0.5 + 0.5
}

#[inline]
pub fn decoherence(stability: f32) -> f32 {
    (DECOHERENCE_OFFSET - stability) * DECOHERENCE_RATE
}

/// Advance (node_density, bit_stream).
pub fn update(node_density: &mut f32, bit_stream: &mut f32, time: f32, stability: f32, dt: f32) {
    *node_density += (optical_pump(time) - decoherence(stability) * *node_density) * dt;
    if stability > TRANSMIT_STABILITY {
        *bit_stream += *node_density * dt;
    } else {
        *bit_stream *= TURBULENT_RETENTION;
    }
}

/// Next golden-filter value.
pub fn golden_filter(current: f32, time: f32) -> f32 {
    if (TAU * time).cos() < PARITY_GATE || current > GOLDEN_FILTER_CEILING {
        PHI
    } else {
        (PHI * current + 1.0) / 2.0
    }
}

#[inline]
pub fn causal_flux(node_density: f32, golden_filter: f32) -> f32 {
    let raw = if node_density > PACKET_THRESHOLD {
        PACKET_VOLTAGE
    } else {
        0.0
    };
    raw * golden_filter * 0.5
}
