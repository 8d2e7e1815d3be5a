// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use crate::math::Vec3;
use crate::types::transform::RigidTransform;

/// Closest-point result between a query point and a collider.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointDistanceResult {
    /// Closest point on the collider surface.
    pub hitpoint: Vec3,
    /// Outward surface normal at `hitpoint`.
    pub normal: Vec3,
    /// Signed distance from the surface; negative when the point is inside.
    pub distance: f32,
    /// Child index within a compound; 0 for primitives.
    pub sub_collider_index: u32,
}

impl PointDistanceResult {
    pub(crate) fn transformed(&self, transform: &RigidTransform) -> Self {
        Self {
            hitpoint: transform.transform_point(&self.hitpoint),
            normal: transform.transform_direction(&self.normal),
            ..*self
        }
    }
}

/// Closest-points result between two colliders.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColliderDistanceResult {
    /// Closest point on collider A's surface.
    pub hitpoint_a: Vec3,
    /// Closest point on collider B's surface.
    pub hitpoint_b: Vec3,
    /// Outward normal of A at `hitpoint_a`.
    pub normal_a: Vec3,
    /// Outward normal of B at `hitpoint_b`.
    pub normal_b: Vec3,
    /// Signed separation; negative when penetrating.
    pub distance: f32,
    /// Child index of A within a compound; 0 for primitives.
    pub sub_collider_index_a: u32,
    /// Child index of B within a compound; 0 for primitives.
    pub sub_collider_index_b: u32,
}

impl ColliderDistanceResult {
    /// Swaps the roles of A and B.
    pub fn flipped(&self) -> Self {
        Self {
            hitpoint_a: self.hitpoint_b,
            hitpoint_b: self.hitpoint_a,
            normal_a: self.normal_b,
            normal_b: self.normal_a,
            distance: self.distance,
            sub_collider_index_a: self.sub_collider_index_b,
            sub_collider_index_b: self.sub_collider_index_a,
        }
    }

    pub(crate) fn transformed(&self, transform: &RigidTransform) -> Self {
        Self {
            hitpoint_a: transform.transform_point(&self.hitpoint_a),
            hitpoint_b: transform.transform_point(&self.hitpoint_b),
            normal_a: transform.transform_direction(&self.normal_a),
            normal_b: transform.transform_direction(&self.normal_b),
            ..*self
        }
    }
}

/// First hit of a finite ray against a collider.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RaycastResult {
    /// World-space hit position.
    pub position: Vec3,
    /// Outward surface normal at `position`.
    pub normal: Vec3,
    /// Hit parameter along the ray in `[0, 1]`.
    pub fraction: f32,
    /// `fraction` times the ray length.
    pub distance: f32,
    /// Child index within a compound; 0 for primitives.
    pub sub_collider_index: u32,
}
