// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use crate::shapes::{CapsuleCollider, CompoundCollider, SphereCollider};

/// Closed set of collider shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum Collider {
    /// Sphere.
    Sphere(SphereCollider),
    /// Capsule.
    Capsule(CapsuleCollider),
    /// Compound of child colliders sharing a precomputed local AABB.
    Compound(CompoundCollider),
}

impl From<SphereCollider> for Collider {
    fn from(value: SphereCollider) -> Self {
        Self::Sphere(value)
    }
}

impl From<CapsuleCollider> for Collider {
    fn from(value: CapsuleCollider) -> Self {
        Self::Capsule(value)
    }
}

impl From<CompoundCollider> for Collider {
    fn from(value: CompoundCollider) -> Self {
        Self::Compound(value)
    }
}
