// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
// criterion_group!/criterion_main! expand to undocumented functions that cannot
// carry #[allow] (attributes on macro invocations are ignored). Crate-level
// suppress is required for benchmark binaries using Criterion.
#![allow(missing_docs)]
//! Find-pairs throughput: immediate vs parallel schedules.
//!
//! # Running
//!
//! ```sh
//! cargo bench --package gridsweep-benches --bench find_pairs_throughput
//! ```
//!
//! # What This Measures
//!
//! - `self_pairs/immediate/N`: every work unit on the calling thread.
//! - `self_pairs/parallel_Kw/N`: scoped workers claiming units atomically.
//! - `cross_pairs/*`: the same for two layers split from one scene.
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gridsweep_core::{
    ColliderBody, CollisionLayer, CollisionLayerSettings, FindPairs, FindPairsProcessor,
    FindPairsResult, ParallelSettings,
};
use gridsweep_geom::{Aabb, RigidTransform, SphereCollider, Vec3};
use std::time::Duration;

/// Counts pairs; cheap enough that the sweep dominates.
#[derive(Clone, Default)]
struct PairCount(u64);

impl FindPairsProcessor for PairCount {
    fn execute(&mut self, result: &FindPairsResult<'_>) {
        self.0 += u64::from(result.work_unit_index) | 1;
    }
}

/// Deterministic scatter of small spheres across a 200-unit cube.
fn make_bodies(n: usize) -> Vec<ColliderBody> {
    let mut state = 0xD1B5_4A32_D192_ED03u64;
    let mut next = move || {
        state ^= state >> 12;
        state ^= state << 25;
        state ^= state >> 27;
        let bits = state.wrapping_mul(0x2545_F491_4F6C_DD1D) >> 40;
        bits as f32 / (1u32 << 24) as f32
    };
    (0..n)
        .map(|i| {
            let position = Vec3::new(next() * 200.0 - 100.0, next() * 200.0 - 100.0, next() * 200.0 - 100.0);
            ColliderBody::new(
                SphereCollider::new(Vec3::ZERO, 0.5 + next()),
                RigidTransform::from_position(position),
                i,
            )
        })
        .collect()
}

fn settings() -> CollisionLayerSettings {
    CollisionLayerSettings::new(Aabb::new(Vec3::splat(-100.0), Vec3::splat(100.0)), [4, 4, 4])
}

fn bench_self_pairs(c: &mut Criterion) {
    let mut group = c.benchmark_group("self_pairs");
    group
        .warm_up_time(Duration::from_secs(2))
        .measurement_time(Duration::from_secs(5))
        .sample_size(50);

    for &n in &[1_000usize, 10_000, 50_000] {
        group.throughput(Throughput::Elements(n as u64));
        let layer = CollisionLayer::build(make_bodies(n), &settings()).expect("bench settings are valid");
        let query = FindPairs::self_pairs(&layer);

        group.bench_with_input(BenchmarkId::new("immediate", n), &n, |b, _| {
            b.iter(|| {
                let mut count = PairCount::default();
                query.run_immediate(&mut count);
                criterion::black_box(count.0)
            });
        });

        for workers in [2usize, 4, 8] {
            let parallel = ParallelSettings::with_workers(workers);
            group.bench_with_input(
                BenchmarkId::new(format!("parallel_{workers}w"), n),
                &n,
                |b, _| {
                    b.iter(|| {
                        let outputs = query
                            .schedule_parallel(&PairCount::default(), &parallel)
                            .expect("workers > 0");
                        criterion::black_box(outputs.iter().map(|c| c.0).sum::<u64>())
                    });
                },
            );
        }
    }
    group.finish();
}

fn bench_cross_pairs(c: &mut Criterion) {
    let mut group = c.benchmark_group("cross_pairs");
    group
        .warm_up_time(Duration::from_secs(2))
        .measurement_time(Duration::from_secs(5))
        .sample_size(50);

    for &n in &[1_000usize, 10_000] {
        group.throughput(Throughput::Elements(n as u64));
        let mut bodies = make_bodies(n);
        let tail = bodies.split_off(n / 2);
        let layer_a = CollisionLayer::build(bodies, &settings()).expect("bench settings are valid");
        let layer_b = CollisionLayer::build(tail, &settings()).expect("bench settings are valid");
        let query = FindPairs::cross_pairs(&layer_a, &layer_b).expect("same settings");

        group.bench_with_input(BenchmarkId::new("immediate", n), &n, |b, _| {
            b.iter(|| {
                let mut count = PairCount::default();
                query.run_immediate(&mut count);
                criterion::black_box(count.0)
            });
        });

        let parallel = ParallelSettings::with_workers(4);
        group.bench_with_input(BenchmarkId::new("parallel_4w", n), &n, |b, _| {
            b.iter(|| {
                let outputs = query
                    .schedule_parallel(&PairCount::default(), &parallel)
                    .expect("workers > 0");
                criterion::black_box(outputs.iter().map(|c| c.0).sum::<u64>())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_self_pairs, bench_cross_pairs);
criterion_main!(benches);
