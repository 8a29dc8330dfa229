// ─────────────────────────────────────────────────────────────────────
// Q-Core Kernel — Simulation Tick Benchmarks
// ─────────────────────────────────────────────────────────────────────
//! Driver overhead on top of `solve_step`: audio poll, finiteness check,
//! snapshot clone and publish.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use qcore_kernel::{PcmAnalyzer, Simulation};
use qcore_types::CoreConfig;

fn bench_tick_silent(c: &mut Criterion) {
    let mut sim = Simulation::new(CoreConfig::default()).unwrap();
    c.bench_function("simulation_tick_silent", |b| {
        b.iter(|| black_box(sim.tick().unwrap()))
    });
}

fn bench_tick_pcm(c: &mut Criterion) {
    let pcm = PcmAnalyzer::default();
    let feed = pcm.feed();
    let frame = vec![4096i16; 512];
    let mut sim = Simulation::with_source(CoreConfig::default(), Box::new(pcm)).unwrap();
    c.bench_function("simulation_tick_pcm_512", |b| {
        b.iter(|| {
            feed.push_frame(black_box(&frame)).unwrap();
            black_box(sim.tick().unwrap())
        })
    });
}

fn bench_snapshot_load(c: &mut Criterion) {
    let sim = Simulation::new(CoreConfig::default()).unwrap();
    let cell = sim.snapshots();
    c.bench_function("snapshot_load", |b| b.iter(|| black_box(cell.load())));
}

criterion_group!(benches, bench_tick_silent, bench_tick_pcm, bench_snapshot_load);
criterion_main!(benches);
