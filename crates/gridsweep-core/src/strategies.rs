// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Index arithmetic for buckets and parallel work units.
//!
//! Everything here is a pure function of the layer's cell count. Work-unit
//! indices key downstream deterministic consumers (per-unit output slots,
//! recorded command streams), so the numbering below is frozen.
//!
//! # Bucket Layout (FROZEN)
//!
//! ```text
//! cell_count                   = x * y * z
//! bucket_count_excluding_nan   = cell_count > 1 ? cell_count + 1 : 1
//! bucket_count_including_nan   = bucket_count_excluding_nan + 1
//! cross_bucket_index           = bucket_count_excluding_nan - 1
//! nan_bucket_index             = bucket_count_excluding_nan
//! cell_index(ix, iy, iz)       = (ix * y + iy) * z + iz
//! ```
//!
//! With one cell the cell bucket doubles as the cross bucket.
//!
//! # Work Units (FROZEN)
//!
//! With `n = bucket_count_excluding_nan` and `c = n - 1` (cross):
//!
//! ```text
//! single layer, 2n - 1 units:
//!   [0, n)         self-sweep of bucket i
//!   [n, 2n - 1)    bucket (i - n) vs cross
//!
//! dual layer, 3n - 2 units:
//!   [0, n)         A[i] vs B[i]          (i = c is cross vs cross)
//!   [n, 2n - 1)    cross A vs B[i - n]
//!   [2n - 1, 3n-2) A[i - (2n - 1)] vs cross B
//! ```

/// Which bucket(s) a work unit sweeps.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum WorkUnitKind {
    /// Self-sweep of one bucket.
    SelfSweep {
        /// Bucket index.
        bucket: u32,
    },
    /// Two-pass sweep of two disjoint buckets.
    ///
    /// For a single layer both indices address that layer; for two layers
    /// `bucket_a` addresses layer A and `bucket_b` layer B.
    Bipartite {
        /// Bucket supplying the `body_a` side of results.
        bucket_a: u32,
        /// Bucket supplying the `body_b` side of results.
        bucket_b: u32,
    },
}

/// One schedulable unit of pair finding.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct WorkUnit {
    /// Deterministic unit index, reported in every result the unit produces.
    pub index: u32,
    /// Bucket selection.
    pub kind: WorkUnitKind,
}

/// `x * y * z`, saturating.
pub fn cell_count(subdivisions: [u32; 3]) -> u32 {
    let [x, y, z] = subdivisions;
    x.saturating_mul(y).saturating_mul(z)
}

/// Row-major linear index of a cell coordinate.
pub fn cell_index(coord: [u32; 3], subdivisions: [u32; 3]) -> u32 {
    (coord[0] * subdivisions[1] + coord[1]) * subdivisions[2] + coord[2]
}

/// Buckets that take part in pair finding (cells plus cross).
pub fn bucket_count_excluding_nan(cell_count: u32) -> u32 {
    if cell_count > 1 {
        cell_count + 1
    } else {
        1
    }
}

/// All buckets, including the trailing NaN bucket.
pub fn bucket_count_including_nan(cell_count: u32) -> u32 {
    bucket_count_excluding_nan(cell_count) + 1
}

/// Index of the bucket holding bodies that span several cells.
pub fn cross_bucket_index(cell_count: u32) -> u32 {
    bucket_count_excluding_nan(cell_count) - 1
}

/// Index of the bucket holding non-finite bodies.
pub fn nan_bucket_index(cell_count: u32) -> u32 {
    bucket_count_excluding_nan(cell_count)
}

/// Work units for a self-pairs query over one layer.
pub fn single_layer_work_unit_count(cell_count: u32) -> u32 {
    bucket_count_excluding_nan(cell_count) * 2 - 1
}

/// Work units for a cross-pairs query over two layers.
pub fn dual_layer_work_unit_count(cell_count: u32) -> u32 {
    bucket_count_excluding_nan(cell_count) * 3 - 2
}

/// True when a parallel schedule would have exactly one unit to run.
pub fn schedule_parallel_should_actually_be_single(cell_count: u32) -> bool {
    cell_count <= 1
}

/// Decodes unit `index` of a single-layer query; `None` past the end.
pub fn single_layer_work_unit(cell_count: u32, index: u32) -> Option<WorkUnit> {
    let n = bucket_count_excluding_nan(cell_count);
    let cross = n - 1;
    let kind = if index < n {
        WorkUnitKind::SelfSweep { bucket: index }
    } else if index < 2 * n - 1 {
        WorkUnitKind::Bipartite {
            bucket_a: index - n,
            bucket_b: cross,
        }
    } else {
        return None;
    };
    Some(WorkUnit { index, kind })
}

/// Decodes unit `index` of a dual-layer query; `None` past the end.
pub fn dual_layer_work_unit(cell_count: u32, index: u32) -> Option<WorkUnit> {
    let n = bucket_count_excluding_nan(cell_count);
    let cross = n - 1;
    let kind = if index < n {
        WorkUnitKind::Bipartite {
            bucket_a: index,
            bucket_b: index,
        }
    } else if index < 2 * n - 1 {
        WorkUnitKind::Bipartite {
            bucket_a: cross,
            bucket_b: index - n,
        }
    } else if index < 3 * n - 2 {
        WorkUnitKind::Bipartite {
            bucket_a: index - (2 * n - 1),
            bucket_b: cross,
        }
    } else {
        return None;
    };
    Some(WorkUnit { index, kind })
}

/// All single-layer units in index order.
pub fn single_layer_work_units(cell_count: u32) -> impl Iterator<Item = WorkUnit> {
    (0..single_layer_work_unit_count(cell_count))
        .filter_map(move |i| single_layer_work_unit(cell_count, i))
}

/// All dual-layer units in index order.
pub fn dual_layer_work_units(cell_count: u32) -> impl Iterator<Item = WorkUnit> {
    (0..dual_layer_work_unit_count(cell_count))
        .filter_map(move |i| dual_layer_work_unit(cell_count, i))
}
