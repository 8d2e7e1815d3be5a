// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Cell-partitioned collision layers.
//!
//! A layer owns every body handed to [`CollisionLayer::build`], split into
//! buckets laid out per [`crate::strategies`]: one per grid cell, one cross
//! bucket for bodies spanning several cells, and one NaN bucket for bodies
//! with non-finite bounds. Each bucket stores its bodies sorted by `xmin`
//! with the bounds unpacked into parallel arrays for the sweeps.
//!
//! Layer-wide body indices are bucket-local indices offset by the bucket's
//! [`Bucket::first_body_index`]; they are stable for the lifetime of the
//! layer and are what pair results report.

use gridsweep_geom::{aabb_from, Aabb, Collider, RigidTransform, Vec3};
use tracing::{debug, instrument, trace};

use crate::error::SweepError;
use crate::settings::CollisionLayerSettings;
use crate::strategies;

/// A collider placed in the world, tagged with the caller's index.
#[derive(Debug, Clone, PartialEq)]
pub struct ColliderBody {
    /// Shape in local space.
    pub collider: Collider,
    /// Placement of the shape.
    pub transform: RigidTransform,
    /// Caller-side identifier carried through to results.
    pub source_index: usize,
}

impl ColliderBody {
    /// Bundles a collider, its transform and a source index.
    pub fn new(collider: impl Into<Collider>, transform: RigidTransform, source_index: usize) -> Self {
        Self {
            collider: collider.into(),
            transform,
            source_index,
        }
    }

    /// World-space bounds.
    pub fn aabb(&self) -> Aabb {
        aabb_from(&self.collider, &self.transform)
    }
}

/// Bodies of one bucket, sorted ascending by `xmin`.
///
/// The four arrays have equal length and are permuted in lock-step.
#[derive(Debug, Clone, Default)]
pub struct Bucket {
    xmins: Vec<f32>,
    xmaxs: Vec<f32>,
    yzminmaxs: Vec<[f32; 4]>,
    bodies: Vec<ColliderBody>,
    first_body_index: usize,
}

impl Bucket {
    fn from_entries(mut entries: Vec<(Aabb, ColliderBody)>, first_body_index: usize, sort: bool) -> Self {
        if sort {
            // Stable, so equal xmins keep insertion order.
            entries.sort_by(|a, b| a.0.min().x().total_cmp(&b.0.min().x()));
        }
        let mut bucket = Self {
            xmins: Vec::with_capacity(entries.len()),
            xmaxs: Vec::with_capacity(entries.len()),
            yzminmaxs: Vec::with_capacity(entries.len()),
            bodies: Vec::with_capacity(entries.len()),
            first_body_index,
        };
        for (aabb, body) in entries {
            let (min, max) = (aabb.min(), aabb.max());
            bucket.xmins.push(min.x());
            bucket.xmaxs.push(max.x());
            bucket.yzminmaxs.push([min.y(), max.y(), min.z(), max.z()]);
            bucket.bodies.push(body);
        }
        bucket
    }

    /// Number of bodies.
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// True when the bucket holds no bodies.
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Ascending `xmin` per body.
    pub fn xmins(&self) -> &[f32] {
        &self.xmins
    }

    /// `xmax` per body.
    pub fn xmaxs(&self) -> &[f32] {
        &self.xmaxs
    }

    /// `[ymin, ymax, zmin, zmax]` per body.
    pub fn yzminmaxs(&self) -> &[[f32; 4]] {
        &self.yzminmaxs
    }

    /// Bodies in sweep order.
    pub fn bodies(&self) -> &[ColliderBody] {
        &self.bodies
    }

    /// Layer-wide index of this bucket's first body.
    pub fn first_body_index(&self) -> usize {
        self.first_body_index
    }

    /// Rebuilds the stored AABB of the body at bucket-local `local`.
    pub fn aabb(&self, local: usize) -> Option<Aabb> {
        let (xmin, xmax, yz) = (
            *self.xmins.get(local)?,
            *self.xmaxs.get(local)?,
            *self.yzminmaxs.get(local)?,
        );
        Some(Aabb::new(
            Vec3::new(xmin, yz[0], yz[2]),
            Vec3::new(xmax, yz[1], yz[3]),
        ))
    }
}

/// Spatial partition of bodies over a uniform grid.
#[derive(Debug, Clone)]
pub struct CollisionLayer {
    settings: CollisionLayerSettings,
    buckets: Vec<Bucket>,
    body_count: usize,
}

impl CollisionLayer {
    /// Partitions `bodies` according to `settings`.
    ///
    /// Fails only on invalid settings. Bodies with non-finite bounds land in
    /// the NaN bucket and never take part in queries.
    #[instrument(level = "debug", skip_all)]
    pub fn build<I>(bodies: I, settings: &CollisionLayerSettings) -> Result<Self, SweepError>
    where
        I: IntoIterator<Item = ColliderBody>,
    {
        settings.validate()?;
        let cell_count = settings.cell_count();
        let bucket_count = strategies::bucket_count_including_nan(cell_count) as usize;
        let nan_index = strategies::nan_bucket_index(cell_count) as usize;
        let grid = Grid::new(settings);

        let mut staged: Vec<Vec<(Aabb, ColliderBody)>> = vec![Vec::new(); bucket_count];
        for body in bodies {
            let aabb = body.aabb();
            let index = if aabb.is_degenerate() {
                trace!(source_index = body.source_index, "non-finite bounds; routed to NaN bucket");
                nan_index
            } else {
                grid.bucket_of(&aabb, cell_count) as usize
            };
            staged[index].push((aabb, body));
        }

        let mut buckets = Vec::with_capacity(bucket_count);
        let mut body_count = 0;
        for (index, entries) in staged.into_iter().enumerate() {
            let len = entries.len();
            buckets.push(Bucket::from_entries(entries, body_count, index != nan_index));
            body_count += len;
        }

        let layer = Self {
            settings: *settings,
            buckets,
            body_count,
        };
        debug!(
            bodies = layer.body_count,
            cells = cell_count,
            cross = layer.cross_bucket().len(),
            nan = layer.nan_bucket().len(),
            "collision layer built"
        );
        Ok(layer)
    }

    /// Settings the layer was built with.
    pub fn settings(&self) -> &CollisionLayerSettings {
        &self.settings
    }

    /// `x * y * z` of the grid.
    pub fn cell_count(&self) -> u32 {
        self.settings.cell_count()
    }

    /// Total bodies, NaN bucket included.
    pub fn body_count(&self) -> usize {
        self.body_count
    }

    /// Buckets that take part in pair finding.
    pub fn bucket_count_excluding_nan(&self) -> usize {
        strategies::bucket_count_excluding_nan(self.cell_count()) as usize
    }

    /// All buckets in index order, NaN bucket last.
    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// Bucket by index; `None` past the NaN bucket.
    pub fn bucket(&self, index: usize) -> Option<&Bucket> {
        self.buckets.get(index)
    }

    /// Bodies spanning several cells (the only cell bucket for a 1-cell grid).
    pub fn cross_bucket(&self) -> &Bucket {
        &self.buckets[strategies::cross_bucket_index(self.cell_count()) as usize]
    }

    /// Bodies with non-finite bounds.
    pub fn nan_bucket(&self) -> &Bucket {
        &self.buckets[strategies::nan_bucket_index(self.cell_count()) as usize]
    }

    /// Body by layer-wide index.
    pub fn body(&self, index: usize) -> Option<&ColliderBody> {
        self.locate(index)
            .and_then(|(bucket, local)| self.buckets[bucket].bodies.get(local))
    }

    /// Bucket index and bucket-local index of a layer-wide body index.
    pub fn locate(&self, index: usize) -> Option<(usize, usize)> {
        if index >= self.body_count {
            return None;
        }
        // Empty buckets share their successor's start, so the last bucket
        // starting at or before `index` owns it.
        let bucket = self
            .buckets
            .partition_point(|b| b.first_body_index <= index)
            .checked_sub(1)?;
        Some((bucket, index - self.buckets[bucket].first_body_index))
    }

    /// Body count per bucket, NaN bucket last.
    pub fn occupancy(&self) -> Vec<usize> {
        self.buckets.iter().map(Bucket::len).collect()
    }

    /// True when cross-layer queries against `other` are allowed.
    pub fn is_compatible_with(&self, other: &Self) -> bool {
        self.settings == other.settings
    }

    /// Grid cell range `[lo, hi]` (inclusive, clamped) touched by `aabb`.
    pub(crate) fn cell_range(&self, aabb: &Aabb) -> ([u32; 3], [u32; 3]) {
        let grid = Grid::new(&self.settings);
        (grid.coord(&aabb.min().to_array()), grid.coord(&aabb.max().to_array()))
    }
}

/// Cell lookup for one settings value.
struct Grid {
    origin: [f32; 3],
    stride: [f32; 3],
    subdivisions: [u32; 3],
}

impl Grid {
    fn new(settings: &CollisionLayerSettings) -> Self {
        Self {
            origin: settings.world_aabb.min().to_array(),
            stride: settings.cell_stride().to_array(),
            subdivisions: settings.world_subdivisions_per_axis,
        }
    }

    /// Clamped cell coordinate of a point.
    ///
    /// Monotone per axis, so two boxes in different cells cannot overlap.
    fn coord(&self, point: &[f32; 3]) -> [u32; 3] {
        std::array::from_fn(|axis| {
            let t = (point[axis] - self.origin[axis]) / self.stride[axis];
            let last = (self.subdivisions[axis] - 1) as f32;
            if t.is_nan() {
                0
            } else {
                t.floor().clamp(0.0, last) as u32
            }
        })
    }

    /// Cell bucket if both corners share a cell, else the cross bucket.
    fn bucket_of(&self, aabb: &Aabb, cell_count: u32) -> u32 {
        let lo = self.coord(&aabb.min().to_array());
        let hi = self.coord(&aabb.max().to_array());
        if lo == hi {
            strategies::cell_index(lo, self.subdivisions)
        } else {
            strategies::cross_bucket_index(cell_count)
        }
    }
}
