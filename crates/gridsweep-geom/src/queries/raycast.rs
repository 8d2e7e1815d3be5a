// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Finite-ray intersection queries.
//!
//! A [`Ray`] is a segment `start..end`; hits are reported as a `fraction`
//! in `[0, 1]` along it. Rays that start inside a shape report no hit.

use crate::math::{Vec3, EPSILON};
use crate::queries::distance::closest_point_on_segment;
use crate::queries::results::RaycastResult;
use crate::shapes::{CapsuleCollider, Collider, SphereCollider};
use crate::types::aabb::Aabb;
use crate::types::transform::RigidTransform;

/// Finite ray from `start` to `end`.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ray {
    start: Vec3,
    end: Vec3,
}

impl Ray {
    /// Creates a ray between two points.
    pub const fn new(start: Vec3, end: Vec3) -> Self {
        Self { start, end }
    }

    /// Start point (fraction 0).
    pub fn start(&self) -> Vec3 {
        self.start
    }

    /// End point (fraction 1).
    pub fn end(&self) -> Vec3 {
        self.end
    }

    /// `end - start`.
    pub fn displacement(&self) -> Vec3 {
        self.end.sub(&self.start)
    }

    /// Ray length.
    pub fn length(&self) -> f32 {
        self.displacement().length()
    }

    /// Point at `fraction` along the ray.
    pub fn point_at(&self, fraction: f32) -> Vec3 {
        self.start.add(&self.displacement().scale(fraction))
    }

    /// The same ray expressed through `transform`.
    pub fn transformed(&self, transform: &RigidTransform) -> Self {
        Self::new(
            transform.transform_point(&self.start),
            transform.transform_point(&self.end),
        )
    }
}

#[derive(Debug, Copy, Clone)]
struct LocalHit {
    fraction: f32,
    normal: Vec3,
    sub_collider_index: u32,
}

/// Casts `ray` against `collider` placed by `transform`.
pub fn raycast(ray: &Ray, collider: &Collider, transform: &RigidTransform) -> Option<RaycastResult> {
    let local_ray = ray.transformed(&transform.inverse());
    raycast_local(&local_ray, collider).map(|hit| RaycastResult {
        position: ray.point_at(hit.fraction),
        normal: transform.transform_direction(&hit.normal),
        fraction: hit.fraction,
        distance: hit.fraction * ray.length(),
        sub_collider_index: hit.sub_collider_index,
    })
}

fn raycast_local(ray: &Ray, collider: &Collider) -> Option<LocalHit> {
    let primitive = |hit: Option<(f32, Vec3)>| {
        hit.map(|(fraction, normal)| LocalHit {
            fraction,
            normal,
            sub_collider_index: 0,
        })
    };
    match collider {
        Collider::Sphere(sphere) => primitive(ray_sphere(ray, sphere)),
        Collider::Capsule(capsule) => primitive(ray_capsule(ray, capsule)),
        Collider::Compound(compound) => {
            let mut best: Option<LocalHit> = None;
            for (i, child) in compound.blob().children().iter().enumerate() {
                let child_ray = ray.transformed(&child.transform.inverse());
                let Some(hit) = raycast_local(&child_ray, &child.collider) else {
                    continue;
                };
                if best.is_none_or(|b| hit.fraction < b.fraction) {
                    best = Some(LocalHit {
                        fraction: hit.fraction,
                        normal: child.transform.transform_direction(&hit.normal),
                        sub_collider_index: i as u32,
                    });
                }
            }
            best
        }
    }
}

/// Entry fraction of the ray `delta + t * displacement` into the origin-centered
/// ball of `radius`, for `t` in `[0, 1]`.
///
/// `delta` is the ray start relative to the center. Starting inside
/// (`|delta| < radius`) never hits.
fn entry_fraction(delta: &Vec3, displacement: &Vec3, radius: f32) -> Option<f32> {
    let a = displacement.length_squared();
    if a <= EPSILON * EPSILON {
        return None;
    }
    let b = 2.0 * displacement.dot(delta);
    let c = delta.length_squared() - radius * radius;
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 || c < 0.0 {
        return None;
    }
    let sqrt_discriminant = discriminant.sqrt();
    let root1 = (-b - sqrt_discriminant) / (2.0 * a);
    let root2 = (-b + sqrt_discriminant) / (2.0 * a);
    let root_min = root1.min(root2);
    let root_max = root1.max(root2);
    let in_range = |t: f32| (0.0..=1.0).contains(&t);
    if in_range(root_min) {
        Some(root_min)
    } else if in_range(root_max) {
        Some(root_max)
    } else {
        None
    }
}

/// Ray vs sphere in a shared space; returns `(fraction, normal)`.
pub fn ray_sphere(ray: &Ray, sphere: &SphereCollider) -> Option<(f32, Vec3)> {
    let delta = ray.start().sub(&sphere.center);
    let displacement = ray.displacement();
    let fraction = entry_fraction(&delta, &displacement, sphere.radius)?;
    let normal = delta.add(&displacement.scale(fraction)).normalize();
    Some((fraction, normal))
}

/// Ray vs capsule in a shared space; returns `(fraction, normal)`.
///
/// The earliest of three candidate hits wins: the infinite cylinder around
/// the axis (kept only inside the segment's axial extent) and the two end
/// cap spheres.
pub fn ray_capsule(ray: &Ray, capsule: &CapsuleCollider) -> Option<(f32, Vec3)> {
    let axis = capsule.point_b.sub(&capsule.point_a);
    let axis_length = axis.length();
    if axis_length <= EPSILON {
        return ray_sphere(ray, &SphereCollider::new(capsule.point_a, capsule.radius));
    }

    let (closest, _) = closest_point_on_segment(&capsule.point_a, &capsule.point_b, &ray.start());
    if ray.start().sub(&closest).length_squared() < capsule.radius * capsule.radius {
        return None;
    }

    let axis_dir = axis.scale(1.0 / axis_length);
    let cylinder = ray_cylinder(ray, &capsule.point_a, &axis_dir, axis_length, capsule.radius);
    let cap_a = ray_sphere(ray, &SphereCollider::new(capsule.point_a, capsule.radius));
    let cap_b = ray_sphere(ray, &SphereCollider::new(capsule.point_b, capsule.radius));

    [cylinder, cap_a, cap_b]
        .into_iter()
        .flatten()
        .fold(None, |best: Option<(f32, Vec3)>, hit| match best {
            Some(b) if b.0 <= hit.0 => Some(b),
            _ => Some(hit),
        })
}

/// Ray vs the side of a finite cylinder, solved as ray vs circle in the
/// plane perpendicular to `axis_dir`.
fn ray_cylinder(
    ray: &Ray,
    base: &Vec3,
    axis_dir: &Vec3,
    axis_length: f32,
    radius: f32,
) -> Option<(f32, Vec3)> {
    let displacement = ray.displacement();
    let offset = ray.start().sub(base);
    let displacement_perp = displacement.sub(&axis_dir.scale(displacement.dot(axis_dir)));
    let offset_perp = offset.sub(&axis_dir.scale(offset.dot(axis_dir)));

    let fraction = entry_fraction(&offset_perp, &displacement_perp, radius)?;
    let axial = offset.dot(axis_dir) + fraction * displacement.dot(axis_dir);
    if !(0.0..=axis_length).contains(&axial) {
        return None;
    }
    let normal = offset_perp.add(&displacement_perp.scale(fraction)).normalize();
    Some((fraction, normal))
}

/// Slab test of a ray against a box; returns the entry fraction.
///
/// Unlike shape raycasts, a ray starting inside the box hits at fraction 0,
/// which is what culling needs.
pub fn raycast_aabb(ray: &Ray, aabb: &Aabb) -> Option<f32> {
    let start = ray.start().to_array();
    let displacement = ray.displacement().to_array();
    let lo = aabb.min().to_array();
    let hi = aabb.max().to_array();
    let mut t_enter = 0.0f32;
    let mut t_exit = 1.0f32;
    for axis in 0..3 {
        if displacement[axis] == 0.0 {
            if start[axis] < lo[axis] || start[axis] > hi[axis] {
                return None;
            }
            continue;
        }
        let inv = 1.0 / displacement[axis];
        let t1 = (lo[axis] - start[axis]) * inv;
        let t2 = (hi[axis] - start[axis]) * inv;
        t_enter = t_enter.max(t1.min(t2));
        t_exit = t_exit.min(t1.max(t2));
        if t_enter > t_exit {
            return None;
        }
    }
    Some(t_enter)
}
