// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![forbid(unsafe_code)]
#![doc = r"Geometry for gridsweep.

This crate provides:
- Deterministic `f32` math (`Vec3`, `Quat`, `Mat3`).
- Axis-aligned bounding boxes (`Aabb`) and rigid transforms (`RigidTransform`).
- Colliders: spheres, capsules, and compounds behind the closed `Collider` enum.
- World-space bounds for any placed collider (`aabb_from`).
- Narrow-phase closest-distance and finite-ray queries.

Design notes:
- Deterministic: no FMA, no ambient RNG; identical inputs give identical bits.
- Degenerate input (NaN/inf) never panics; it yields degenerate bounds or
  explicit tie-break values.
- Distances are signed: negative means penetrating.
"]

mod error;
/// Deterministic math subsystem (Vec3, Quat, Mat3).
pub mod math;
/// Per-shape bounds, distance, and raycast queries.
pub mod queries;
/// Collider shapes.
pub mod shapes;
/// Foundational geometric types.
pub mod types;

pub use error::GeomError;
pub use math::{Mat3, Quat, Vec3};
pub use queries::{
    aabb_from, distance_between, point_distance, raycast, raycast_aabb, ColliderDistanceResult,
    PointDistanceResult, Ray, RaycastResult,
};
pub use shapes::{
    CapsuleCollider, Collider, CompoundBlob, CompoundChild, CompoundCollider, SphereCollider,
};
pub use types::aabb::Aabb;
pub use types::transform::RigidTransform;
