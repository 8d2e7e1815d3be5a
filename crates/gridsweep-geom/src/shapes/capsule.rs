// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use crate::math::Vec3;

/// Capsule: every point within `radius` of the segment `point_a..point_b`.
///
/// A zero-length segment is a sphere at `point_a`.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CapsuleCollider {
    /// First segment endpoint (local space).
    pub point_a: Vec3,
    /// Second segment endpoint (local space).
    pub point_b: Vec3,
    /// Radius in metres.
    pub radius: f32,
}

impl CapsuleCollider {
    /// Creates a capsule.
    pub const fn new(point_a: Vec3, point_b: Vec3, radius: f32) -> Self {
        Self {
            point_a,
            point_b,
            radius,
        }
    }

    /// Segment length.
    pub fn axis_length(&self) -> f32 {
        self.point_a.distance(&self.point_b)
    }
}
