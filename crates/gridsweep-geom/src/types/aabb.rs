// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use crate::math::Vec3;
use crate::types::transform::RigidTransform;

/// Axis-aligned bounding box.
///
/// Invariants:
/// - For finite boxes, `min` components are less than or equal to `max`.
/// - A box with any non-finite component is *degenerate*; it is still a
///   valid value and flows through the partition's NaN bucket.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb {
    min: Vec3,
    max: Vec3,
}

impl Aabb {
    /// Constructs an AABB from its minimum and maximum corners.
    ///
    /// Finite inputs must satisfy `min <= max` componentwise (checked in
    /// debug builds). Non-finite inputs are accepted and yield a degenerate box.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        debug_assert!(
            !(min.is_finite() && max.is_finite())
                || (min.x() <= max.x() && min.y() <= max.y() && min.z() <= max.z()),
            "invalid AABB: min > max"
        );
        Self { min, max }
    }

    /// Returns the minimum corner.
    pub fn min(&self) -> Vec3 {
        self.min
    }

    /// Returns the maximum corner.
    pub fn max(&self) -> Vec3 {
        self.max
    }

    /// Center point.
    pub fn center(&self) -> Vec3 {
        self.min.add(&self.max).scale(0.5)
    }

    /// Half-extents along each axis.
    pub fn half_extents(&self) -> Vec3 {
        self.max.sub(&self.min).scale(0.5)
    }

    /// Returns `true` if any component is NaN or infinite.
    pub fn is_degenerate(&self) -> bool {
        !(self.min.is_finite() && self.max.is_finite())
    }

    /// Returns `true` if this AABB overlaps another (inclusive on faces).
    pub fn overlaps(&self, other: &Self) -> bool {
        let a_min = self.min.to_array();
        let a_max = self.max.to_array();
        let b_min = other.min.to_array();
        let b_max = other.max.to_array();
        // Inclusive to treat touching faces as overlap for broad-phase pairing.
        !(a_max[0] < b_min[0]
            || a_min[0] > b_max[0]
            || a_max[1] < b_min[1]
            || a_min[1] > b_max[1]
            || a_max[2] < b_min[2]
            || a_min[2] > b_max[2])
    }

    /// Returns the union of two AABBs. A NaN corner in either box survives.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(&other.min),
            max: self.max.max(&other.max),
        }
    }

    /// Inflates the box by a uniform margin `m` in all directions.
    pub fn inflate(&self, m: f32) -> Self {
        let delta = Vec3::splat(m);
        Self {
            min: self.min.sub(&delta),
            max: self.max.add(&delta),
        }
    }

    /// Computes the AABB that bounds this box after a rigid transform.
    ///
    /// The half-extents are pushed through the elementwise absolute rotation
    /// matrix (`world_i = Σ_j |R_ij| * local_j`) and re-centered on the
    /// transformed center. This is exact for the rotated box and never
    /// evaluates the eight corners.
    pub fn transformed(&self, transform: &RigidTransform) -> Self {
        let rotation = transform.rotation().to_mat3();
        let center = rotation.transform(&self.center()).add(&transform.position());
        let extents = rotation.abs().transform(&self.half_extents());
        Self {
            min: center.sub(&extents),
            max: center.add(&extents),
        }
    }
}
