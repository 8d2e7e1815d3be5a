// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Find-pairs queries and their schedules.
//!
//! A query is split into the work units of [`crate::strategies`]. The same
//! unit always carries the same `work_unit_index`, whichever schedule runs
//! it, so processors can key deterministic output slots off it.
//!
//! Schedules:
//! - [`FindPairs::run_immediate`]: every unit in index order on the caller's thread.
//! - [`FindPairs::schedule_single`]: the same work wrapped as one opaque task.
//! - [`FindPairs::tasks`]: one independent task per unit for an external scheduler.
//! - [`FindPairs::schedule_parallel`]: scoped worker threads claiming units
//!   through an atomic counter, one processor clone per worker.

use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::debug;

use super::sweep::{bipartite_sweep, self_sweep};
use crate::error::SweepError;
use crate::layer::{Bucket, ColliderBody, CollisionLayer};
use crate::settings::ParallelSettings;
use crate::strategies::{self, WorkUnit, WorkUnitKind};

/// One candidate pair with overlapping AABBs.
#[derive(Debug, Copy, Clone)]
pub struct FindPairsResult<'a> {
    /// First body; from layer A in a cross-layer query.
    pub body_a: &'a ColliderBody,
    /// Second body; from layer B in a cross-layer query.
    pub body_b: &'a ColliderBody,
    /// Layer-wide index of `body_a`.
    pub body_index_a: usize,
    /// Layer-wide index of `body_b`.
    pub body_index_b: usize,
    /// Index of the work unit that produced the pair.
    pub work_unit_index: u32,
}

/// Receives candidate pairs.
///
/// Any `FnMut(&FindPairsResult<'_>)` is a processor.
pub trait FindPairsProcessor {
    /// Handles one pair.
    fn execute(&mut self, result: &FindPairsResult<'_>);
}

impl<F> FindPairsProcessor for F
where
    F: FnMut(&FindPairsResult<'_>),
{
    fn execute(&mut self, result: &FindPairsResult<'_>) {
        self(result);
    }
}

/// A self-pairs or cross-pairs query over borrowed layers.
#[derive(Debug, Copy, Clone)]
pub struct FindPairs<'l> {
    layer_a: &'l CollisionLayer,
    layer_b: Option<&'l CollisionLayer>,
}

impl<'l> FindPairs<'l> {
    /// Pairs within one layer.
    pub fn self_pairs(layer: &'l CollisionLayer) -> Self {
        Self {
            layer_a: layer,
            layer_b: None,
        }
    }

    /// Pairs between two layers; both must share settings.
    pub fn cross_pairs(
        layer_a: &'l CollisionLayer,
        layer_b: &'l CollisionLayer,
    ) -> Result<Self, SweepError> {
        if !layer_a.is_compatible_with(layer_b) {
            return Err(SweepError::LayerMismatch);
        }
        Ok(Self {
            layer_a,
            layer_b: Some(layer_b),
        })
    }

    /// True for a two-layer query.
    pub fn is_cross(&self) -> bool {
        self.layer_b.is_some()
    }

    fn cell_count(&self) -> u32 {
        self.layer_a.cell_count()
    }

    /// Units this query splits into.
    pub fn work_unit_count(&self) -> u32 {
        if self.is_cross() {
            strategies::dual_layer_work_unit_count(self.cell_count())
        } else {
            strategies::single_layer_work_unit_count(self.cell_count())
        }
    }

    /// Unit `index`, or `None` past the end.
    pub fn work_unit(&self, index: u32) -> Option<WorkUnit> {
        if self.is_cross() {
            strategies::dual_layer_work_unit(self.cell_count(), index)
        } else {
            strategies::single_layer_work_unit(self.cell_count(), index)
        }
    }

    /// Units in index order.
    pub fn work_units(&self) -> impl Iterator<Item = WorkUnit> + '_ {
        (0..self.work_unit_count()).filter_map(move |i| self.work_unit(i))
    }

    /// Runs one unit, reporting its pairs to `processor`.
    pub fn run_work_unit<P>(&self, unit: WorkUnit, processor: &mut P)
    where
        P: FindPairsProcessor + ?Sized,
    {
        let layer_b = self.layer_b.unwrap_or(self.layer_a);
        match unit.kind {
            WorkUnitKind::SelfSweep { bucket } => {
                let Some(bucket) = self.layer_a.bucket(bucket as usize) else {
                    return;
                };
                self_sweep(bucket, |i, j| {
                    emit(bucket, i, bucket, j, unit.index, &mut *processor);
                });
            }
            WorkUnitKind::Bipartite { bucket_a, bucket_b } => {
                let (Some(a), Some(b)) = (
                    self.layer_a.bucket(bucket_a as usize),
                    layer_b.bucket(bucket_b as usize),
                ) else {
                    return;
                };
                bipartite_sweep(a, b, |i, j| emit(a, i, b, j, unit.index, &mut *processor));
            }
        }
    }

    /// Runs every unit in index order on the calling thread.
    pub fn run_immediate<P>(&self, processor: &mut P)
    where
        P: FindPairsProcessor + ?Sized,
    {
        debug!(
            units = self.work_unit_count(),
            cross = self.is_cross(),
            "find pairs: immediate"
        );
        for unit in self.work_units() {
            self.run_work_unit(unit, processor);
        }
    }

    /// Wraps the whole query as one task owning `processor`.
    pub fn schedule_single<P>(self, processor: P) -> SingleTask<'l, P>
    where
        P: FindPairsProcessor,
    {
        SingleTask {
            query: self,
            processor,
        }
    }

    /// One independent task per work unit, in index order.
    pub fn tasks(&self) -> Vec<WorkUnitTask<'l>> {
        self.work_units()
            .map(|unit| WorkUnitTask { query: *self, unit })
            .collect()
    }

    /// Runs the query on scoped worker threads.
    ///
    /// Each worker clones `processor`, claims units through a shared atomic
    /// counter until none remain, and returns its clone. The result holds one
    /// processor per worker that ran, in worker order. A query with a single
    /// unit runs inline on one clone.
    ///
    /// # Panics
    ///
    /// Re-raises a panic from any worker (i.e. from the processor).
    pub fn schedule_parallel<P>(
        &self,
        processor: &P,
        settings: &ParallelSettings,
    ) -> Result<Vec<P>, SweepError>
    where
        P: FindPairsProcessor + Clone + Send,
    {
        if settings.workers == 0 {
            return Err(SweepError::NoWorkers);
        }
        let unit_count = self.work_unit_count() as usize;
        if strategies::schedule_parallel_should_actually_be_single(self.cell_count()) {
            debug!(units = unit_count, "find pairs: single unit, running inline");
            let mut local = processor.clone();
            self.run_immediate(&mut local);
            return Ok(vec![local]);
        }

        let workers = settings.workers.min(unit_count);
        debug!(
            units = unit_count,
            workers,
            cross = self.is_cross(),
            "find pairs: parallel"
        );
        let next_unit = AtomicUsize::new(0);

        let outputs = std::thread::scope(|s| {
            let handles: Vec<_> = (0..workers)
                .map(|_| {
                    let next_unit = &next_unit;
                    let mut local = processor.clone();
                    s.spawn(move || {
                        loop {
                            let claimed = next_unit.fetch_add(1, Ordering::Relaxed);
                            let Some(unit) = u32::try_from(claimed)
                                .ok()
                                .and_then(|i| self.work_unit(i))
                            else {
                                break;
                            };
                            self.run_work_unit(unit, &mut local);
                        }
                        local
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|h| match h.join() {
                    Ok(local) => local,
                    Err(e) => std::panic::resume_unwind(e),
                })
                .collect()
        });
        Ok(outputs)
    }
}

fn emit<P>(a: &Bucket, i: usize, b: &Bucket, j: usize, work_unit_index: u32, processor: &mut P)
where
    P: FindPairsProcessor + ?Sized,
{
    processor.execute(&FindPairsResult {
        body_a: &a.bodies()[i],
        body_b: &b.bodies()[j],
        body_index_a: a.first_body_index() + i,
        body_index_b: b.first_body_index() + j,
        work_unit_index,
    });
}

/// The whole query as one unit of work for an external scheduler.
#[derive(Debug)]
pub struct SingleTask<'l, P> {
    query: FindPairs<'l>,
    processor: P,
}

impl<P> SingleTask<'_, P>
where
    P: FindPairsProcessor,
{
    /// Runs every unit in index order and hands back the processor.
    pub fn run(mut self) -> P {
        debug!(units = self.query.work_unit_count(), "find pairs: single task");
        self.query.run_immediate(&mut self.processor);
        self.processor
    }
}

/// One work unit of a query, runnable on any thread.
#[derive(Debug, Copy, Clone)]
pub struct WorkUnitTask<'l> {
    query: FindPairs<'l>,
    unit: WorkUnit,
}

impl WorkUnitTask<'_> {
    /// Work-unit index reported in this task's results.
    pub fn index(&self) -> u32 {
        self.unit.index
    }

    /// Buckets this task sweeps.
    pub fn unit(&self) -> WorkUnit {
        self.unit
    }

    /// Runs the unit.
    pub fn run<P>(&self, processor: &mut P)
    where
        P: FindPairsProcessor + ?Sized,
    {
        self.query.run_work_unit(self.unit, processor);
    }
}
