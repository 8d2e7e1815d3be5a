// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use crate::math::Vec3;
use crate::shapes::{CapsuleCollider, Collider, CompoundCollider, SphereCollider};
use crate::types::aabb::Aabb;
use crate::types::transform::RigidTransform;

/// World-space bounds of `collider` placed by `transform`.
///
/// Never fails: non-finite shape or transform data produces a degenerate box.
pub fn aabb_from(collider: &Collider, transform: &RigidTransform) -> Aabb {
    match collider {
        Collider::Sphere(sphere) => aabb_from_sphere(sphere, transform),
        Collider::Capsule(capsule) => aabb_from_capsule(capsule, transform),
        Collider::Compound(compound) => aabb_from_compound(compound, transform),
    }
}

/// Sphere bounds: the transformed center inflated by the radius.
pub fn aabb_from_sphere(sphere: &SphereCollider, transform: &RigidTransform) -> Aabb {
    let center = transform.transform_point(&sphere.center);
    let r = Vec3::splat(sphere.radius);
    Aabb::new(center.sub(&r), center.add(&r))
}

/// Capsule bounds: both transformed endpoints, inflated by the radius.
pub fn aabb_from_capsule(capsule: &CapsuleCollider, transform: &RigidTransform) -> Aabb {
    let a = transform.transform_point(&capsule.point_a);
    let b = transform.transform_point(&capsule.point_b);
    let r = Vec3::splat(capsule.radius);
    Aabb::new(a.min(&b).sub(&r), a.max(&b).add(&r))
}

/// Compound bounds: the precomputed local box, rotated and re-centered.
pub fn aabb_from_compound(compound: &CompoundCollider, transform: &RigidTransform) -> Aabb {
    compound.local_aabb().transformed(transform)
}
