// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Layer and scheduler configuration.

use gridsweep_geom::{Aabb, Vec3};

use crate::error::SweepError;

/// Upper bound on `x * y * z` subdivisions.
///
/// Keeps bucket vectors and work-unit indices comfortably inside `u32`.
pub const MAX_CELL_COUNT: u64 = 1 << 24;

/// Grid configuration for a [`crate::CollisionLayer`].
///
/// Two layers can be queried against each other only when their settings are
/// equal (see [`crate::CollisionLayer::is_compatible_with`]).
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CollisionLayerSettings {
    /// Region split into the uniform grid. Bodies outside it clamp to the
    /// border cells.
    pub world_aabb: Aabb,
    /// Cell count per axis; every component must be at least 1.
    pub world_subdivisions_per_axis: [u32; 3],
}

impl Default for CollisionLayerSettings {
    fn default() -> Self {
        Self {
            world_aabb: Aabb::new(Vec3::splat(-1000.0), Vec3::splat(1000.0)),
            world_subdivisions_per_axis: [2, 2, 2],
        }
    }
}

impl CollisionLayerSettings {
    /// Creates settings from a world box and per-axis subdivisions.
    pub fn new(world_aabb: Aabb, world_subdivisions_per_axis: [u32; 3]) -> Self {
        Self {
            world_aabb,
            world_subdivisions_per_axis,
        }
    }

    /// Checks the settings without clamping anything.
    pub fn validate(&self) -> Result<(), SweepError> {
        for (axis, &value) in self.world_subdivisions_per_axis.iter().enumerate() {
            if value == 0 {
                return Err(SweepError::InvalidSubdivisions { axis, value });
            }
        }
        if self.world_aabb.is_degenerate() {
            return Err(SweepError::NonFiniteWorldAabb);
        }
        let min = self.world_aabb.min().to_array();
        let max = self.world_aabb.max().to_array();
        if let Some(axis) = (0..3).find(|&axis| min[axis] > max[axis]) {
            return Err(SweepError::InvertedWorldAabb { axis });
        }
        let requested = self
            .world_subdivisions_per_axis
            .iter()
            .fold(1u64, |acc, &s| acc.saturating_mul(u64::from(s)));
        if requested > MAX_CELL_COUNT {
            return Err(SweepError::TooManyCells {
                requested,
                max: MAX_CELL_COUNT,
            });
        }
        Ok(())
    }

    /// `x * y * z`; only meaningful for validated settings.
    pub fn cell_count(&self) -> u32 {
        let [x, y, z] = self.world_subdivisions_per_axis;
        x.saturating_mul(y).saturating_mul(z)
    }

    /// World-space size of one cell along each axis.
    pub fn cell_stride(&self) -> Vec3 {
        let extent = self.world_aabb.max().sub(&self.world_aabb.min()).to_array();
        let [x, y, z] = self.world_subdivisions_per_axis;
        Vec3::new(
            extent[0] / x.max(1) as f32,
            extent[1] / y.max(1) as f32,
            extent[2] / z.max(1) as f32,
        )
    }
}

/// Degree of parallelism for [`crate::FindPairs::schedule_parallel`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParallelSettings {
    /// Worker thread count; zero is rejected at schedule time.
    pub workers: usize,
}

impl Default for ParallelSettings {
    fn default() -> Self {
        Self {
            workers: std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get),
        }
    }
}

impl ParallelSettings {
    /// Fixed worker count.
    pub fn with_workers(workers: usize) -> Self {
        Self { workers }
    }
}
