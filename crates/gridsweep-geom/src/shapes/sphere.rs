// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use crate::math::Vec3;

/// Sphere in its collider's local space.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SphereCollider {
    /// Local-space center.
    pub center: Vec3,
    /// Radius in metres.
    pub radius: f32,
}

impl SphereCollider {
    /// Creates a sphere.
    pub const fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }
}
