// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Box and ray queries against a single layer.

use gridsweep_geom::{raycast, raycast_aabb, Aabb, Ray, RaycastResult};

use crate::layer::{Bucket, ColliderBody, CollisionLayer};
use crate::pairs::yz_overlap;
use crate::strategies;

/// A body whose AABB overlaps the query box.
#[derive(Debug, Copy, Clone)]
pub struct FindObjectsResult<'a> {
    /// Matching body.
    pub body: &'a ColliderBody,
    /// Layer-wide index of `body`.
    pub body_index: usize,
    /// Stored world bounds of `body`.
    pub aabb: Aabb,
}

/// Receives [`find_objects`] matches.
///
/// Any `FnMut(&FindObjectsResult<'_>)` is a processor.
pub trait FindObjectsProcessor {
    /// Handles one match.
    fn execute(&mut self, result: &FindObjectsResult<'_>);
}

impl<F> FindObjectsProcessor for F
where
    F: FnMut(&FindObjectsResult<'_>),
{
    fn execute(&mut self, result: &FindObjectsResult<'_>) {
        self(result);
    }
}

/// Visits every body whose AABB overlaps `query`, faces inclusive.
///
/// Only the cells `query` touches and the cross bucket are scanned; bodies
/// in the NaN bucket are never visited, nor is anything for a non-finite
/// query. Matches arrive in ascending body index.
pub fn find_objects<P>(query: &Aabb, layer: &CollisionLayer, processor: &mut P)
where
    P: FindObjectsProcessor + ?Sized,
{
    if query.is_degenerate() {
        return;
    }
    let cell_count = layer.cell_count();
    let subdivisions = layer.settings().world_subdivisions_per_axis;
    let (lo, hi) = layer.cell_range(query);
    for ix in lo[0]..=hi[0] {
        for iy in lo[1]..=hi[1] {
            for iz in lo[2]..=hi[2] {
                let cell = strategies::cell_index([ix, iy, iz], subdivisions) as usize;
                if let Some(bucket) = layer.bucket(cell) {
                    scan_bucket(query, bucket, processor);
                }
            }
        }
    }
    if cell_count > 1 {
        scan_bucket(query, layer.cross_bucket(), processor);
    }
}

fn scan_bucket<P>(query: &Aabb, bucket: &Bucket, processor: &mut P)
where
    P: FindObjectsProcessor + ?Sized,
{
    let (qmin, qmax) = (query.min(), query.max());
    let query_yz = [qmin.y(), qmax.y(), qmin.z(), qmax.z()];
    let xmaxs = bucket.xmaxs();
    let yz = bucket.yzminmaxs();
    for (i, &xmin) in bucket.xmins().iter().enumerate() {
        if xmin > qmax.x() {
            break;
        }
        if xmaxs[i] < qmin.x() || !yz_overlap(&query_yz, &yz[i]) {
            continue;
        }
        let Some(aabb) = bucket.aabb(i) else {
            continue;
        };
        processor.execute(&FindObjectsResult {
            body: &bucket.bodies()[i],
            body_index: bucket.first_body_index() + i,
            aabb,
        });
    }
}

/// Closest narrow-phase hit of a layer raycast.
#[derive(Debug, Copy, Clone)]
pub struct LayerRaycastHit<'a> {
    /// Body that was hit.
    pub body: &'a ColliderBody,
    /// Layer-wide index of `body`.
    pub body_index: usize,
    /// Hit details in world space.
    pub result: RaycastResult,
}

/// Casts `ray` against every non-NaN body and returns the closest hit.
///
/// Bodies whose AABB the ray misses, or enters after the current best hit,
/// are skipped before the exact test. Equal fractions keep the lower body
/// index.
pub fn raycast_layer<'a>(ray: &Ray, layer: &'a CollisionLayer) -> Option<LayerRaycastHit<'a>> {
    let mut best: Option<LayerRaycastHit<'a>> = None;
    for bucket in &layer.buckets()[..layer.bucket_count_excluding_nan()] {
        for (i, body) in bucket.bodies().iter().enumerate() {
            let Some(entry) = bucket.aabb(i).and_then(|aabb| raycast_aabb(ray, &aabb)) else {
                continue;
            };
            if best.is_some_and(|b| entry > b.result.fraction) {
                continue;
            }
            let Some(result) = raycast(ray, &body.collider, &body.transform) else {
                continue;
            };
            // Buckets are visited in body-index order, so strict `<` keeps
            // the lower index on ties.
            if best.is_none_or(|b| result.fraction < b.result.fraction) {
                best = Some(LayerRaycastHit {
                    body,
                    body_index: bucket.first_body_index() + i,
                    result,
                });
            }
        }
    }
    best
}
