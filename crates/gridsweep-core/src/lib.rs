// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! gridsweep-core: cell-partitioned collision layers and sweep-and-prune pair finding.
//!
//! Build a [`CollisionLayer`] from placed colliders, then run a [`FindPairs`]
//! query over it (or over two compatible layers). Every candidate pair with
//! overlapping AABBs reaches the caller's [`FindPairsProcessor`] exactly once;
//! exact distances and raycasts come from [`gridsweep_geom`].
//!
//! # Determinism
//!
//! Work-unit numbering is a pure function of the layer's cell count (see
//! [`strategies`]), so a pair always reports the same `work_unit_index`
//! under every schedule. The set of pairs never depends on thread count.
//!
//! # Example
//!
//! ```
//! use gridsweep_core::{ColliderBody, CollisionLayer, CollisionLayerSettings, FindPairs, FindPairsResult};
//! use gridsweep_geom::{RigidTransform, SphereCollider, Vec3};
//!
//! let bodies = (0..3).map(|i| {
//!     ColliderBody::new(
//!         SphereCollider::new(Vec3::ZERO, 1.0),
//!         RigidTransform::from_position(Vec3::new(i as f32 * 1.5, 0.0, 0.0)),
//!         i,
//!     )
//! });
//! let layer = CollisionLayer::build(bodies, &CollisionLayerSettings::default())?;
//! let mut pairs = Vec::new();
//! FindPairs::self_pairs(&layer).run_immediate(&mut |r: &FindPairsResult<'_>| {
//!     pairs.push((r.body_a.source_index, r.body_b.source_index));
//! });
//! pairs.sort_unstable();
//! assert_eq!(pairs, vec![(0, 1), (1, 2)]);
//! # Ok::<(), gridsweep_core::SweepError>(())
//! ```
#![forbid(unsafe_code)]

mod error;
mod layer;
mod pairs;
mod settings;
mod spatial;
pub mod strategies;

pub use error::SweepError;
pub use layer::{Bucket, ColliderBody, CollisionLayer};
pub use pairs::{FindPairs, FindPairsProcessor, FindPairsResult, SingleTask, WorkUnitTask};
pub use settings::{CollisionLayerSettings, ParallelSettings, MAX_CELL_COUNT};
pub use spatial::{
    find_objects, raycast_layer, FindObjectsProcessor, FindObjectsResult, LayerRaycastHit,
};
pub use strategies::{WorkUnit, WorkUnitKind};
