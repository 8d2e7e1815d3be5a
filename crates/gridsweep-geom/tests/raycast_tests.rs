// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Finite-ray queries against placed colliders.
#![allow(clippy::panic)]

use std::sync::Arc;

use gridsweep_geom::{
    raycast, CapsuleCollider, Collider, CompoundBlob, CompoundChild, CompoundCollider, Quat, Ray,
    RigidTransform, SphereCollider, Vec3,
};

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

fn assert_vec_close(actual: Vec3, expected: [f32; 3]) {
    let a = actual.to_array();
    for i in 0..3 {
        assert!(
            approx(a[i], expected[i]),
            "component {i}: got {a:?}, expected {expected:?}"
        );
    }
}

fn ray(start: [f32; 3], end: [f32; 3]) -> Ray {
    Ray::new(Vec3::from(start), Vec3::from(end))
}

#[test]
fn ray_hits_unit_sphere_front_face() {
    let sphere: Collider = SphereCollider::new(Vec3::ZERO, 1.0).into();
    let Some(hit) = raycast(&ray([0.0, 0.0, -5.0], [0.0, 0.0, 5.0]), &sphere, &RigidTransform::identity()) else {
        panic!("ray through the center must hit");
    };
    assert!(approx(hit.fraction, 0.4));
    assert!(approx(hit.distance, 4.0));
    assert_vec_close(hit.position, [0.0, 0.0, -1.0]);
    assert_vec_close(hit.normal, [0.0, 0.0, -1.0]);
}

#[test]
fn ray_starting_inside_sphere_misses() {
    let sphere: Collider = SphereCollider::new(Vec3::ZERO, 1.0).into();
    assert!(raycast(&ray([0.0, 0.0, 0.0], [0.0, 0.0, 5.0]), &sphere, &RigidTransform::identity()).is_none());
}

#[test]
fn zero_length_ray_never_hits() {
    let sphere: Collider = SphereCollider::new(Vec3::ZERO, 1.0).into();
    assert!(raycast(&ray([0.0, 0.0, -3.0], [0.0, 0.0, -3.0]), &sphere, &RigidTransform::identity()).is_none());
}

#[test]
fn ray_pointing_away_misses() {
    let sphere: Collider = SphereCollider::new(Vec3::ZERO, 1.0).into();
    assert!(raycast(&ray([0.0, 0.0, -5.0], [0.0, 0.0, -10.0]), &sphere, &RigidTransform::identity()).is_none());
}

#[test]
fn capsule_cap_nearest_to_start_wins() {
    let capsule: Collider = CapsuleCollider::new(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), 1.0).into();
    let Some(hit) = raycast(&ray([-5.0, 0.0, 0.0], [15.0, 0.0, 0.0]), &capsule, &RigidTransform::identity()) else {
        panic!("axis-aligned ray must hit the near cap");
    };
    assert!(approx(hit.fraction, 0.2));
    assert_vec_close(hit.normal, [-1.0, 0.0, 0.0]);
    assert_vec_close(hit.position, [-1.0, 0.0, 0.0]);

    let Some(hit) = raycast(&ray([15.0, 0.0, 0.0], [-5.0, 0.0, 0.0]), &capsule, &RigidTransform::identity()) else {
        panic!("reverse ray must hit the far cap");
    };
    assert!(approx(hit.fraction, 0.2));
    assert_vec_close(hit.normal, [1.0, 0.0, 0.0]);
}

#[test]
fn capsule_side_hit_uses_radial_normal() {
    let capsule: Collider = CapsuleCollider::new(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), 1.0).into();
    let Some(hit) = raycast(&ray([4.0, 5.0, 0.0], [4.0, -5.0, 0.0]), &capsule, &RigidTransform::identity()) else {
        panic!("ray across the middle must hit the side");
    };
    assert!(approx(hit.fraction, 0.4));
    assert_vec_close(hit.normal, [0.0, 1.0, 0.0]);
    assert_vec_close(hit.position, [4.0, 1.0, 0.0]);
}

#[test]
fn ray_starting_inside_capsule_misses() {
    let capsule: Collider = CapsuleCollider::new(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), 1.0).into();
    assert!(raycast(&ray([5.0, 0.5, 0.0], [5.0, 10.0, 0.0]), &capsule, &RigidTransform::identity()).is_none());
}

#[test]
fn transformed_capsule_reports_world_normal() {
    // Local +X axis rotated onto +Z, then lifted to y = 3.
    let capsule: Collider = CapsuleCollider::new(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), 1.0).into();
    let t = RigidTransform::new(
        Quat::from_axis_angle(Vec3::UNIT_Y, -core::f32::consts::FRAC_PI_2),
        Vec3::new(0.0, 3.0, 0.0),
    );
    let Some(hit) = raycast(&ray([-10.0, 3.0, 5.0], [10.0, 3.0, 5.0]), &capsule, &t) else {
        panic!("ray across the rotated capsule must hit");
    };
    assert!(approx(hit.fraction, 0.45));
    assert_vec_close(hit.normal, [-1.0, 0.0, 0.0]);
    assert_vec_close(hit.position, [-1.0, 3.0, 5.0]);
}

#[test]
fn compound_reports_first_child_along_ray() {
    let Ok(blob) = CompoundBlob::new(vec![
        CompoundChild {
            collider: SphereCollider::new(Vec3::ZERO, 1.0).into(),
            transform: RigidTransform::from_position(Vec3::new(6.0, 0.0, 0.0)),
        },
        CompoundChild {
            collider: SphereCollider::new(Vec3::ZERO, 1.0).into(),
            transform: RigidTransform::from_position(Vec3::new(2.0, 0.0, 0.0)),
        },
    ]) else {
        unreachable!("two child compound is valid");
    };
    let compound: Collider = CompoundCollider::new(Arc::new(blob)).into();
    let Some(hit) = raycast(&ray([-9.0, 0.0, 0.0], [11.0, 0.0, 0.0]), &compound, &RigidTransform::identity()) else {
        panic!("ray along the compound must hit");
    };
    assert_eq!(hit.sub_collider_index, 1);
    assert!(approx(hit.fraction, 0.5));
    assert_vec_close(hit.position, [1.0, 0.0, 0.0]);
}
