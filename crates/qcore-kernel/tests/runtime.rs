// ─────────────────────────────────────────────────────────────────────
// Q-Core Kernel — Runtime Integration Tests
// ─────────────────────────────────────────────────────────────────────

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use qcore_kernel::{ExternalAcoustic, PcmAnalyzer, Simulation};
use qcore_physics::AcousticSample;
use qcore_types::{CoreConfig, TickSnapshot};

#[test]
fn test_readers_never_see_partial_ticks() {
    let mut sim = Simulation::new(CoreConfig::default()).unwrap();
    let cell = sim.snapshots();
    let done = Arc::new(AtomicBool::new(false));

    let readers: Vec<_> = (0..3)
        .map(|_| {
            let cell = Arc::clone(&cell);
            let done = Arc::clone(&done);
            thread::spawn(move || {
                let mut last_tick = 0u64;
                let mut seen = 0u64;
                while !done.load(Ordering::SeqCst) {
                    let snap = cell.load();
                    assert_eq!(
                        snap.tick, snap.state.controller.step_count,
                        "snapshot mixes ticks"
                    );
                    assert!(snap.tick >= last_tick, "tick went backwards");
                    assert!((0.0..=100.0).contains(&snap.state.stability));
                    last_tick = snap.tick;
                    seen += 1;
                }
                seen
            })
        })
        .collect();

    sim.run(3_000).unwrap();
    done.store(true, Ordering::SeqCst);

    for r in readers {
        let seen = r.join().expect("reader panicked");
        assert!(seen > 0);
    }
    assert_eq!(cell.tick(), 3_000);
}

#[test]
fn test_operator_thread_steers_shear() {
    let mut sim = Simulation::new(CoreConfig::default()).unwrap();
    let control = sim.control();
    thread::spawn(move || control.set_shear_flow(2.5).unwrap())
        .join()
        .unwrap();

    let snap = sim.run(2_000).unwrap();
    assert_eq!(snap.state.shear_flow, 2.5);
    assert!(
        snap.state.stability < 60.0,
        "low shear should pull stability down, got {}",
        snap.state.stability
    );
}

#[test]
fn test_audio_gap_holds_last_sample() {
    let mut remaining = 10;
    let src = ExternalAcoustic::new(move || {
        if remaining > 0 {
            remaining -= 1;
            Some(AcousticSample::new(0.3, 0.6))
        } else {
            None
        }
    });
    let mut sim = Simulation::with_source(CoreConfig::default(), Box::new(src)).unwrap();
    let snap = sim.run(50).unwrap();
    assert_eq!(snap.state.audio_energy, 0.3, "energy must be held through the gap");
    assert_eq!(snap.state.audio_coherence, 0.6);
}

#[test]
fn test_pcm_capture_thread_feeds_simulation() {
    let pcm = PcmAnalyzer::default();
    let feed = pcm.feed();
    let mut sim = Simulation::with_source(CoreConfig::default(), Box::new(pcm)).unwrap();

    thread::spawn(move || {
        for _ in 0..20 {
            feed.push_frame(&[8192; 128]).unwrap();
        }
    })
    .join()
    .unwrap();

    let first = sim.tick().unwrap();
    // rms 0.25 over 20 frames: energy = 0.25·(1 - 0.9²⁰)
    assert!(
        (first.state.audio_energy - 0.25 * (1.0 - 0.9f32.powi(20))).abs() < 1e-4,
        "energy={}",
        first.state.audio_energy
    );
    let held = sim.tick().unwrap();
    assert_eq!(held.state.audio_energy, first.state.audio_energy);
}

#[test]
fn test_snapshot_json_carries_tick() {
    let mut sim = Simulation::new(CoreConfig::default()).unwrap();
    let snap = sim.run(25).unwrap();
    let value: serde_json::Value = serde_json::from_str(&snap.to_json()).unwrap();
    assert_eq!(value["tick"], 25);
    assert_eq!(value["state"]["controller"]["step_count"], 25);
    assert_eq!(value["state"]["field"].as_array().map(Vec::len), Some(8));
}

#[test]
fn test_snapshot_json_deserializes() {
    let mut sim = Simulation::new(CoreConfig::default()).unwrap();
    let snap = sim.run(3).unwrap();
    let back: TickSnapshot = serde_json::from_str(&snap.to_json()).unwrap();
    assert_eq!(back.tick, 3);
    assert_eq!(back.state.controller.step_count, 3);
}
