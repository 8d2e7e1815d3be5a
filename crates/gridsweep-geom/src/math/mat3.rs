// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use crate::math::Vec3;

/// Column-major 3×3 matrix, used for rotations.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat3 {
    cols: [Vec3; 3],
}

impl Mat3 {
    /// Identity matrix.
    pub const fn identity() -> Self {
        Self::from_cols(Vec3::UNIT_X, Vec3::UNIT_Y, Vec3::UNIT_Z)
    }

    /// Builds a matrix from its three columns.
    pub const fn from_cols(c0: Vec3, c1: Vec3, c2: Vec3) -> Self {
        Self { cols: [c0, c1, c2] }
    }

    /// Multiplies a column vector (`self * v`).
    pub fn transform(&self, v: &Vec3) -> Vec3 {
        self.cols[0]
            .scale(v.x())
            .add(&self.cols[1].scale(v.y()))
            .add(&self.cols[2].scale(v.z()))
    }

    /// Elementwise absolute value.
    ///
    /// `abs().transform(&extents)` yields the half-extents of the box that
    /// bounds a rotated box, i.e. `world_i = Σ_j |R_ij| * local_j`.
    pub fn abs(&self) -> Self {
        Self::from_cols(self.cols[0].abs(), self.cols[1].abs(), self.cols[2].abs())
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::identity()
    }
}
