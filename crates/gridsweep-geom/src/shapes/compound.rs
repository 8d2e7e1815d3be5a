// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use std::sync::Arc;

use crate::error::GeomError;
use crate::queries::aabb_from;
use crate::shapes::Collider;
use crate::types::aabb::Aabb;
use crate::types::transform::RigidTransform;

/// One child of a [`CompoundBlob`], placed by a local rigid transform.
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundChild {
    /// Child collider.
    pub collider: Collider,
    /// Placement of the child inside the compound's local space.
    pub transform: RigidTransform,
}

/// Immutable, shareable compound data with its precomputed local AABB.
///
/// Layers and queries only read the blob; it is shared through an [`Arc`]
/// so cloning a [`CompoundCollider`] never copies children.
#[derive(Debug, PartialEq)]
pub struct CompoundBlob {
    children: Vec<CompoundChild>,
    local_aabb: Aabb,
}

impl CompoundBlob {
    /// Builds a blob and precomputes the union of the children's AABBs.
    pub fn new(children: Vec<CompoundChild>) -> Result<Self, GeomError> {
        let mut iter = children.iter();
        let first = iter.next().ok_or(GeomError::EmptyCompound)?;
        let local_aabb = iter.fold(aabb_from(&first.collider, &first.transform), |acc, c| {
            acc.union(&aabb_from(&c.collider, &c.transform))
        });
        Ok(Self {
            children,
            local_aabb,
        })
    }

    /// Children in insertion order; a child's position is its sub-collider index.
    pub fn children(&self) -> &[CompoundChild] {
        &self.children
    }

    /// Precomputed local-space bounds.
    pub fn local_aabb(&self) -> Aabb {
        self.local_aabb
    }
}

/// Handle to a compound shape.
///
/// Broad phase only uses [`CompoundCollider::local_aabb`]; narrow-phase
/// queries walk the blob's children.
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundCollider {
    blob: Arc<CompoundBlob>,
}

impl CompoundCollider {
    /// Wraps a shared blob.
    pub fn new(blob: Arc<CompoundBlob>) -> Self {
        Self { blob }
    }

    /// Local-space bounds precomputed by the blob.
    pub fn local_aabb(&self) -> Aabb {
        self.blob.local_aabb()
    }

    /// Shared blob data.
    pub fn blob(&self) -> &CompoundBlob {
        &self.blob
    }
}
