// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use crate::math::{Quat, Vec3};

/// Rigid transform (rotation followed by translation) placing a collider in
/// its parent space.
///
/// Conventions:
/// - `position` in metres.
/// - `rotation` as a unit quaternion (normalised internally when applied).
/// - A point `p` maps to `rotation * p + position`.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RigidTransform {
    rotation: Quat,
    position: Vec3,
}

impl RigidTransform {
    /// Identity transform.
    pub const fn identity() -> Self {
        Self {
            rotation: Quat::identity(),
            position: Vec3::ZERO,
        }
    }

    /// Creates a transform from components.
    pub const fn new(rotation: Quat, position: Vec3) -> Self {
        Self { rotation, position }
    }

    /// Pure translation.
    pub const fn from_position(position: Vec3) -> Self {
        Self::new(Quat::identity(), position)
    }

    /// Rotation component.
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Translation component.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Maps a point from local space into parent space.
    pub fn transform_point(&self, point: &Vec3) -> Vec3 {
        self.rotation.rotate(point).add(&self.position)
    }

    /// Rotates a direction (translation ignored).
    pub fn transform_direction(&self, direction: &Vec3) -> Vec3 {
        self.rotation.rotate(direction)
    }

    /// Inverse transform: maps parent-space points back into local space.
    pub fn inverse(&self) -> Self {
        let inv_rot = self.rotation.normalize().conjugate();
        let inv_pos = inv_rot.rotate(&self.position).scale(-1.0);
        Self::new(inv_rot, inv_pos)
    }

    /// Composition `self * local`: applying the result equals applying
    /// `local` first, then `self`.
    pub fn multiply(&self, local: &Self) -> Self {
        Self::new(
            self.rotation.multiply(&local.rotation).normalize(),
            self.transform_point(&local.position),
        )
    }
}

impl Default for RigidTransform {
    fn default() -> Self {
        Self::identity()
    }
}
