// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Closest-distance queries.
//!
//! Local-space primitives reduce to sphere/sphere: a capsule contributes the
//! sphere centered at its segment's closest point. Each primitive returns
//! `Some` only when the signed distance is `<= max_distance`.
//!
//! Tie-breaks:
//! - Coincident centers report the normal `(0, 1, 0)` for A (`(0, -1, 0)` for B).
//! - Zero-length segments resolve to their first endpoint.

use crate::math::{clamp, Vec3, EPSILON};
use crate::queries::results::{ColliderDistanceResult, PointDistanceResult};
use crate::shapes::{CapsuleCollider, Collider, SphereCollider};
use crate::types::transform::RigidTransform;

/// Normal reported when two centers coincide.
pub const DEGENERATE_NORMAL: Vec3 = Vec3::UNIT_Y;

/// Signed distance from `point` to `collider` placed by `transform`.
///
/// Returns `None` when the distance exceeds `max_distance`.
pub fn point_distance(
    point: &Vec3,
    collider: &Collider,
    transform: &RigidTransform,
    max_distance: f32,
) -> Option<PointDistanceResult> {
    let local = transform.inverse().transform_point(point);
    point_distance_local(&local, collider, max_distance).map(|r| r.transformed(transform))
}

/// Signed distance between two placed colliders.
///
/// The query runs in A's local space. Returns `None` when the separation
/// exceeds `max_distance`.
pub fn distance_between(
    collider_a: &Collider,
    transform_a: &RigidTransform,
    collider_b: &Collider,
    transform_b: &RigidTransform,
    max_distance: f32,
) -> Option<ColliderDistanceResult> {
    let b_in_a = transform_a.inverse().multiply(transform_b);
    distance_local(collider_a, collider_b, &b_in_a, max_distance).map(|r| r.transformed(transform_a))
}

fn point_distance_local(
    point: &Vec3,
    collider: &Collider,
    max_distance: f32,
) -> Option<PointDistanceResult> {
    match collider {
        Collider::Sphere(sphere) => point_sphere(point, sphere, max_distance),
        Collider::Capsule(capsule) => point_capsule(point, capsule, max_distance),
        Collider::Compound(compound) => {
            let mut best: Option<PointDistanceResult> = None;
            for (i, child) in compound.blob().children().iter().enumerate() {
                let local = child.transform.inverse().transform_point(point);
                let hit = point_distance_local(&local, &child.collider, max_distance).map(|r| {
                    PointDistanceResult {
                        sub_collider_index: i as u32,
                        ..r.transformed(&child.transform)
                    }
                });
                best = closer(best, hit, |r| r.distance);
            }
            best
        }
    }
}

fn distance_local(
    a: &Collider,
    b: &Collider,
    b_in_a: &RigidTransform,
    max_distance: f32,
) -> Option<ColliderDistanceResult> {
    match (a, b) {
        (Collider::Compound(compound), _) => {
            let mut best: Option<ColliderDistanceResult> = None;
            for (i, child) in compound.blob().children().iter().enumerate() {
                let b_in_child = child.transform.inverse().multiply(b_in_a);
                let hit = distance_local(&child.collider, b, &b_in_child, max_distance).map(|r| {
                    ColliderDistanceResult {
                        sub_collider_index_a: i as u32,
                        ..r.transformed(&child.transform)
                    }
                });
                best = closer(best, hit, |r| r.distance);
            }
            best
        }
        (_, Collider::Compound(compound)) => {
            let mut best: Option<ColliderDistanceResult> = None;
            for (i, child) in compound.blob().children().iter().enumerate() {
                let child_in_a = b_in_a.multiply(&child.transform);
                let hit = distance_local(a, &child.collider, &child_in_a, max_distance).map(|r| {
                    ColliderDistanceResult {
                        sub_collider_index_b: i as u32,
                        ..r
                    }
                });
                best = closer(best, hit, |r| r.distance);
            }
            best
        }
        (Collider::Sphere(sa), Collider::Sphere(sb)) => {
            sphere_sphere(sa, &sphere_in(sb, b_in_a), max_distance)
        }
        (Collider::Sphere(sa), Collider::Capsule(cb)) => {
            sphere_capsule(sa, &capsule_in(cb, b_in_a), max_distance)
        }
        (Collider::Capsule(ca), Collider::Sphere(sb)) => {
            sphere_capsule(&sphere_in(sb, b_in_a), ca, max_distance).map(|r| r.flipped())
        }
        (Collider::Capsule(ca), Collider::Capsule(cb)) => {
            capsule_capsule(ca, &capsule_in(cb, b_in_a), max_distance)
        }
    }
}

fn sphere_in(sphere: &SphereCollider, transform: &RigidTransform) -> SphereCollider {
    SphereCollider::new(transform.transform_point(&sphere.center), sphere.radius)
}

fn capsule_in(capsule: &CapsuleCollider, transform: &RigidTransform) -> CapsuleCollider {
    CapsuleCollider::new(
        transform.transform_point(&capsule.point_a),
        transform.transform_point(&capsule.point_b),
        capsule.radius,
    )
}

/// Keeps `best` unless `candidate` is strictly closer, so ties go to the
/// lower child index.
fn closer<T>(best: Option<T>, candidate: Option<T>, distance: impl Fn(&T) -> f32) -> Option<T> {
    match (best, candidate) {
        (Some(b), Some(c)) => {
            if distance(&c) < distance(&b) {
                Some(c)
            } else {
                Some(b)
            }
        }
        (b, c) => b.or(c),
    }
}

/// Sphere vs sphere in a shared space.
pub fn sphere_sphere(
    a: &SphereCollider,
    b: &SphereCollider,
    max_distance: f32,
) -> Option<ColliderDistanceResult> {
    let delta = b.center.sub(&a.center);
    let center_distance = delta.length();
    let normal = if center_distance == 0.0 {
        DEGENERATE_NORMAL
    } else {
        delta.scale(1.0 / center_distance)
    };
    let distance = center_distance - a.radius - b.radius;
    (distance <= max_distance).then(|| ColliderDistanceResult {
        hitpoint_a: a.center.add(&normal.scale(a.radius)),
        hitpoint_b: b.center.sub(&normal.scale(b.radius)),
        normal_a: normal,
        normal_b: -normal,
        distance,
        sub_collider_index_a: 0,
        sub_collider_index_b: 0,
    })
}

/// Point vs sphere.
pub fn point_sphere(
    point: &Vec3,
    sphere: &SphereCollider,
    max_distance: f32,
) -> Option<PointDistanceResult> {
    let delta = point.sub(&sphere.center);
    let center_distance = delta.length();
    let normal = if center_distance == 0.0 {
        DEGENERATE_NORMAL
    } else {
        delta.scale(1.0 / center_distance)
    };
    let distance = center_distance - sphere.radius;
    (distance <= max_distance).then(|| PointDistanceResult {
        hitpoint: sphere.center.add(&normal.scale(sphere.radius)),
        normal,
        distance,
        sub_collider_index: 0,
    })
}

/// Point vs capsule: the capsule acts as the sphere around the closest
/// segment point.
pub fn point_capsule(
    point: &Vec3,
    capsule: &CapsuleCollider,
    max_distance: f32,
) -> Option<PointDistanceResult> {
    let (closest, _) = closest_point_on_segment(&capsule.point_a, &capsule.point_b, point);
    point_sphere(point, &SphereCollider::new(closest, capsule.radius), max_distance)
}

/// Sphere vs capsule; A is the sphere, B the capsule.
pub fn sphere_capsule(
    sphere: &SphereCollider,
    capsule: &CapsuleCollider,
    max_distance: f32,
) -> Option<ColliderDistanceResult> {
    let (closest, _) =
        closest_point_on_segment(&capsule.point_a, &capsule.point_b, &sphere.center);
    sphere_sphere(sphere, &SphereCollider::new(closest, capsule.radius), max_distance)
}

/// Capsule vs capsule via the closest points between their segments.
pub fn capsule_capsule(
    a: &CapsuleCollider,
    b: &CapsuleCollider,
    max_distance: f32,
) -> Option<ColliderDistanceResult> {
    let (on_a, on_b) = segment_segment(&a.point_a, &a.point_b, &b.point_a, &b.point_b);
    sphere_sphere(
        &SphereCollider::new(on_a, a.radius),
        &SphereCollider::new(on_b, b.radius),
        max_distance,
    )
}

/// Closest point to `point` on segment `a..b`, with its parameter in `[0, 1]`.
///
/// A zero-length segment returns `a` with parameter 0.
pub fn closest_point_on_segment(a: &Vec3, b: &Vec3, point: &Vec3) -> (Vec3, f32) {
    let ab = b.sub(a);
    let len_sq = ab.length_squared();
    if len_sq <= EPSILON * EPSILON {
        return (*a, 0.0);
    }
    let t = clamp(point.sub(a).dot(&ab) / len_sq, 0.0, 1.0);
    (a.add(&ab.scale(t)), t)
}

/// Closest points between segments `p1..q1` and `p2..q2`.
///
/// Parallel segments resolve to the closest pair that starts from the
/// lowest valid parameter on the first segment.
pub fn segment_segment(p1: &Vec3, q1: &Vec3, p2: &Vec3, q2: &Vec3) -> (Vec3, Vec3) {
    let d1 = q1.sub(p1);
    let d2 = q2.sub(p2);
    let r = p1.sub(p2);
    let a = d1.length_squared();
    let e = d2.length_squared();
    let f = d2.dot(&r);
    let degenerate = EPSILON * EPSILON;

    if a <= degenerate && e <= degenerate {
        return (*p1, *p2);
    }

    let (s, t) = if a <= degenerate {
        (0.0, clamp(f / e, 0.0, 1.0))
    } else {
        let c = d1.dot(&r);
        if e <= degenerate {
            (clamp(-c / a, 0.0, 1.0), 0.0)
        } else {
            let b = d1.dot(&d2);
            let denom = a * e - b * b;
            let s = if denom > 0.0 {
                clamp((b * f - c * e) / denom, 0.0, 1.0)
            } else {
                0.0
            };
            let t = (b * s + f) / e;
            if t < 0.0 {
                (clamp(-c / a, 0.0, 1.0), 0.0)
            } else if t > 1.0 {
                (clamp((b - c) / a, 0.0, 1.0), 1.0)
            } else {
                (s, t)
            }
        }
    };

    (p1.add(&d1.scale(s)), p2.add(&d2.scale(t)))
}
