//! Benchmarks for the lookahead dispatch loop.
//!
//! Run with: cargo bench
//!
//! The dispatch pass runs on every poll tick while holding the scheduler
//! lock, so it has to stay cheap even for dense cue sheets: a pass that
//! admits nothing should cost a couple of comparisons, and a pass that
//! drains a whole window should scale linearly with the cues admitted.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use cueline::clock::ManualClock;
use cueline::engine::{OutputRegistry, Scheduler, SchedulerConfig};
use cueline::sequencing::{Cue, CueSheet};

/// Cue sheet densities to measure, in cues per second.
const DENSITIES: &[usize] = &[10, 100, 1000];

/// A sheet spanning ten seconds at the given cue density.
fn dense_sheet(cues_per_sec: usize) -> CueSheet<u32> {
    let total = cues_per_sec * 10;
    let step = 1.0 / cues_per_sec as f64;
    let cues = (0..total)
        .map(|i| Cue::at(i as f64 * step, i as u32))
        .collect();
    CueSheet::from_sorted(cues).unwrap()
}

fn scheduler_over(sheet: CueSheet<u32>, clock: ManualClock) -> Scheduler<u32> {
    Scheduler::new(
        Box::new(clock),
        sheet,
        Box::new(|cue, offset| {
            black_box(cue.payload);
            black_box(offset);
        }),
        OutputRegistry::shared(),
        SchedulerConfig::default(),
    )
}

/// An idle pass: the sheet is dense but nothing is due yet.
fn bench_idle_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("sched/idle_pass");

    for &density in DENSITIES {
        let clock = ManualClock::new();
        let mut scheduler = scheduler_over(dense_sheet(density), clock.clone());
        scheduler.restart();
        // Drain the initial window, then park just short of the next cue.
        clock.advance(0.001);
        scheduler.dispatch_due();

        group.bench_with_input(BenchmarkId::from_parameter(density), &density, |b, _| {
            b.iter(|| scheduler.dispatch_due())
        });
    }

    group.finish();
}

/// Draining passes: each iteration advances one poll interval and drains
/// the window that opened up.
fn bench_draining_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("sched/draining_pass");

    for &density in DENSITIES {
        group.bench_with_input(BenchmarkId::from_parameter(density), &density, |b, _| {
            let clock = ManualClock::new();
            let mut scheduler = scheduler_over(dense_sheet(density), clock.clone());
            scheduler.restart();
            b.iter(|| {
                clock.advance(0.05);
                black_box(scheduler.dispatch_due())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_idle_pass, bench_draining_pass);
criterion_main!(benches);
