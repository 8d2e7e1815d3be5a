// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(dead_code)]

use std::collections::BTreeSet;

use gridsweep_core::{
    ColliderBody, CollisionLayer, CollisionLayerSettings, FindPairs, FindPairsProcessor,
    FindPairsResult,
};
use gridsweep_geom::{Aabb, CapsuleCollider, Quat, RigidTransform, SphereCollider, Vec3};

/// Half-size of the test world cube.
pub const WORLD_HALF_EXTENT: f32 = 50.0;

/// Tiny deterministic RNG (xorshift64*) so tests don't need `rand`.
#[derive(Clone)]
pub struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    /// Creates a new PRNG; a zero seed is replaced with 1.
    pub fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    /// Next value of the xorshift64* sequence.
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }

    /// Value in `[0, upper)` by modulo reduction (slightly biased; fine for tests).
    pub fn gen_range_usize(&mut self, upper: usize) -> usize {
        if upper <= 1 {
            return 0;
        }
        (self.next_u64() as usize) % upper
    }

    /// Uniform-ish `f32` in `[lo, hi)` from the top 24 bits.
    pub fn gen_f32(&mut self, lo: f32, hi: f32) -> f32 {
        let unit = (self.next_u64() >> 40) as f32 / (1u32 << 24) as f32;
        lo + unit * (hi - lo)
    }
}

/// Fisher–Yates shuffle (deterministic).
pub fn shuffle<T>(rng: &mut XorShift64, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range_usize(i + 1);
        items.swap(i, j);
    }
}

/// Settings over the test world with the given subdivisions.
pub fn world(subdivisions: [u32; 3]) -> CollisionLayerSettings {
    CollisionLayerSettings::new(
        Aabb::new(Vec3::splat(-WORLD_HALF_EXTENT), Vec3::splat(WORLD_HALF_EXTENT)),
        subdivisions,
    )
}

/// Sphere of radius `r` at `(x, y, z)`.
pub fn sphere_body(x: f32, y: f32, z: f32, r: f32, source_index: usize) -> ColliderBody {
    ColliderBody::new(
        SphereCollider::new(Vec3::ZERO, r),
        RigidTransform::from_position(Vec3::new(x, y, z)),
        source_index,
    )
}

/// Random sphere or capsule, mostly small, sometimes large, sometimes
/// outside the world and, with `nan_rate > 0`, sometimes non-finite.
pub fn random_body(rng: &mut XorShift64, source_index: usize, nan_rate: usize) -> ColliderBody {
    let reach = WORLD_HALF_EXTENT * 1.2;
    let mut position = Vec3::new(
        rng.gen_f32(-reach, reach),
        rng.gen_f32(-reach, reach),
        rng.gen_f32(-reach, reach),
    );
    if nan_rate > 0 && rng.gen_range_usize(nan_rate) == 0 {
        position = Vec3::new(position.x(), f32::NAN, position.z());
    }
    let radius = if rng.gen_range_usize(10) == 0 {
        rng.gen_f32(5.0, 30.0)
    } else {
        rng.gen_f32(0.25, 4.0)
    };
    if rng.gen_range_usize(5) < 3 {
        return ColliderBody::new(
            SphereCollider::new(Vec3::ZERO, radius),
            RigidTransform::from_position(position),
            source_index,
        );
    }
    let half_length = rng.gen_f32(0.0, 6.0);
    let axis = Vec3::new(
        rng.gen_f32(-1.0, 1.0),
        rng.gen_f32(-1.0, 1.0),
        rng.gen_f32(-1.0, 1.0),
    );
    let rotation = Quat::from_axis_angle(axis, rng.gen_f32(0.0, 6.283_185));
    ColliderBody::new(
        CapsuleCollider::new(
            Vec3::new(-half_length, 0.0, 0.0),
            Vec3::new(half_length, 0.0, 0.0),
            radius * 0.5,
        ),
        RigidTransform::new(rotation, position),
        source_index,
    )
}

/// `count` random bodies with source indices `0..count`.
pub fn random_bodies(seed: u64, count: usize, nan_rate: usize) -> Vec<ColliderBody> {
    let mut rng = XorShift64::new(seed);
    (0..count).map(|i| random_body(&mut rng, i, nan_rate)).collect()
}

/// Unordered source-index pairs from an O(n²) AABB check over one set.
pub fn brute_force_self_pairs(bodies: &[ColliderBody]) -> BTreeSet<(usize, usize)> {
    let aabbs: Vec<Aabb> = bodies.iter().map(ColliderBody::aabb).collect();
    let mut out = BTreeSet::new();
    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            if aabbs[i].is_degenerate() || aabbs[j].is_degenerate() {
                continue;
            }
            if aabbs[i].overlaps(&aabbs[j]) {
                out.insert(ordered(bodies[i].source_index, bodies[j].source_index));
            }
        }
    }
    out
}

/// Ordered `(a, b)` source-index pairs from an O(n·m) AABB check.
pub fn brute_force_cross_pairs(a: &[ColliderBody], b: &[ColliderBody]) -> BTreeSet<(usize, usize)> {
    let mut out = BTreeSet::new();
    for body_a in a {
        let aabb_a = body_a.aabb();
        if aabb_a.is_degenerate() {
            continue;
        }
        for body_b in b {
            let aabb_b = body_b.aabb();
            if !aabb_b.is_degenerate() && aabb_a.overlaps(&aabb_b) {
                out.insert((body_a.source_index, body_b.source_index));
            }
        }
    }
    out
}

/// `(min, max)`.
pub fn ordered(a: usize, b: usize) -> (usize, usize) {
    (a.min(b), a.max(b))
}

/// Everything a pair result reports, by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PairRecord {
    pub source_a: usize,
    pub source_b: usize,
    pub body_index_a: usize,
    pub body_index_b: usize,
    pub work_unit_index: u32,
}

/// Processor that records every pair it sees.
#[derive(Debug, Clone, Default)]
pub struct PairCollector {
    pub records: Vec<PairRecord>,
}

impl FindPairsProcessor for PairCollector {
    fn execute(&mut self, result: &FindPairsResult<'_>) {
        self.records.push(PairRecord {
            source_a: result.body_a.source_index,
            source_b: result.body_b.source_index,
            body_index_a: result.body_index_a,
            body_index_b: result.body_index_b,
            work_unit_index: result.work_unit_index,
        });
    }
}

impl PairCollector {
    /// Records sorted, for multiset comparison.
    pub fn sorted(mut self) -> Vec<PairRecord> {
        self.records.sort_unstable();
        self.records
    }
}

/// Merges per-worker collectors into one sorted record list.
pub fn merge(collectors: Vec<PairCollector>) -> Vec<PairRecord> {
    let mut all: Vec<PairRecord> = collectors.into_iter().flat_map(|c| c.records).collect();
    all.sort_unstable();
    all
}

/// Builds a layer from `bodies`, panicking on invalid settings.
pub fn build(bodies: &[ColliderBody], settings: &CollisionLayerSettings) -> CollisionLayer {
    CollisionLayer::build(bodies.iter().cloned(), settings).expect("test settings are valid")
}

/// Immediate self-pairs run, as sorted records.
pub fn immediate_self_pairs(layer: &CollisionLayer) -> Vec<PairRecord> {
    let mut collector = PairCollector::default();
    FindPairs::self_pairs(layer).run_immediate(&mut collector);
    collector.sorted()
}
