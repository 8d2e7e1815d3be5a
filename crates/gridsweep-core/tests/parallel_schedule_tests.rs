// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Every schedule reports the same pairs with the same work-unit indices.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use common::{
    build, immediate_self_pairs, merge, random_bodies, shuffle, sphere_body, world, PairCollector,
    XorShift64,
};
use gridsweep_core::{FindPairs, FindPairsProcessor, FindPairsResult, ParallelSettings, SweepError};

const WORKER_COUNTS: [usize; 5] = [1, 2, 3, 8, 64];

#[test]
fn parallel_matches_immediate_for_any_worker_count() {
    let bodies = random_bodies(0x9A4A, 500, 30);
    for sub in [[2, 2, 2], [4, 4, 4], [3, 1, 2]] {
        let layer = build(&bodies, &world(sub));
        let expected = immediate_self_pairs(&layer);
        for workers in WORKER_COUNTS {
            let outputs = FindPairs::self_pairs(&layer)
                .schedule_parallel(&PairCollector::default(), &ParallelSettings::with_workers(workers))
                .unwrap();
            assert!(outputs.len() <= workers);
            assert_eq!(merge(outputs), expected, "sub={sub:?} workers={workers}");
        }
    }
}

#[test]
fn parallel_cross_pairs_match_immediate() {
    let a = random_bodies(0xAAAA, 250, 30);
    let b = random_bodies(0xBBBB, 250, 30);
    let settings = world([3, 3, 3]);
    let (layer_a, layer_b) = (build(&a, &settings), build(&b, &settings));
    let query = FindPairs::cross_pairs(&layer_a, &layer_b).unwrap();

    let mut immediate = PairCollector::default();
    query.run_immediate(&mut immediate);
    let expected = immediate.sorted();

    for workers in WORKER_COUNTS {
        let outputs = query
            .schedule_parallel(&PairCollector::default(), &ParallelSettings::with_workers(workers))
            .unwrap();
        assert_eq!(merge(outputs), expected, "workers={workers}");
    }
}

#[test]
fn repeated_parallel_runs_are_identical() {
    let bodies = random_bodies(0x7E7E, 400, 0);
    let layer = build(&bodies, &world([4, 2, 4]));
    let run = || {
        merge(
            FindPairs::self_pairs(&layer)
                .schedule_parallel(&PairCollector::default(), &ParallelSettings::with_workers(6))
                .unwrap(),
        )
    };
    let first = run();
    for _ in 0..5 {
        assert_eq!(run(), first);
    }
}

#[test]
fn tasks_in_any_order_match_immediate() {
    let bodies = random_bodies(0x7A5C, 300, 10);
    let layer = build(&bodies, &world([2, 3, 4]));
    let query = FindPairs::self_pairs(&layer);
    let mut tasks = query.tasks();
    assert_eq!(tasks.len(), query.work_unit_count() as usize);
    for (position, task) in tasks.iter().enumerate() {
        assert_eq!(task.index() as usize, position);
        assert_eq!(task.unit().index, task.index());
    }

    shuffle(&mut XorShift64::new(0x5A5A), &mut tasks);
    let mut per_task = Vec::new();
    for task in &tasks {
        let mut collector = PairCollector::default();
        task.run(&mut collector);
        assert!(collector.records.iter().all(|r| r.work_unit_index == task.index()));
        per_task.push(collector);
    }
    assert_eq!(merge(per_task), immediate_self_pairs(&layer));
}

#[test]
fn single_task_matches_immediate() {
    let bodies = random_bodies(0x5146, 300, 10);
    let layer = build(&bodies, &world([2, 2, 2]));
    let collector = FindPairs::self_pairs(&layer)
        .schedule_single(PairCollector::default())
        .run();
    assert_eq!(collector.sorted(), immediate_self_pairs(&layer));
}

#[test]
fn single_cell_parallel_runs_inline() {
    let bodies = random_bodies(0x0C0C, 100, 0);
    let layer = build(&bodies, &world([1, 1, 1]));
    let outputs = FindPairs::self_pairs(&layer)
        .schedule_parallel(&PairCollector::default(), &ParallelSettings::with_workers(8))
        .unwrap();
    assert_eq!(outputs.len(), 1);
    let records = merge(outputs);
    assert!(records.iter().all(|r| r.work_unit_index == 0));
    assert_eq!(records, immediate_self_pairs(&layer));
}

#[test]
fn zero_workers_is_an_error() {
    let layer = build(&[], &world([2, 2, 2]));
    let result = FindPairs::self_pairs(&layer)
        .schedule_parallel(&PairCollector::default(), &ParallelSettings::with_workers(0));
    assert_eq!(result.map(|o| o.len()).unwrap_err(), SweepError::NoWorkers);
}

/// Processor sharing one counter across clones.
#[derive(Clone)]
struct SharedCounter(Arc<AtomicUsize>);

impl FindPairsProcessor for SharedCounter {
    fn execute(&mut self, _result: &FindPairsResult<'_>) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }
}

#[test]
fn shared_state_processors_see_every_pair_once() {
    let bodies = random_bodies(0x5C5C, 400, 0);
    let layer = build(&bodies, &world([4, 4, 4]));
    let expected = immediate_self_pairs(&layer).len();
    let counter = SharedCounter(Arc::new(AtomicUsize::new(0)));
    let outputs = FindPairs::self_pairs(&layer)
        .schedule_parallel(&counter, &ParallelSettings::with_workers(4))
        .unwrap();
    drop(outputs);
    assert_eq!(counter.0.load(Ordering::Relaxed), expected);
}

/// Panics on the first pair it sees.
#[derive(Clone)]
struct Exploding;

impl FindPairsProcessor for Exploding {
    fn execute(&mut self, _result: &FindPairsResult<'_>) {
        panic!("processor failure");
    }
}

#[test]
#[should_panic(expected = "processor failure")]
fn processor_panics_propagate_to_caller() {
    let mut bodies = random_bodies(0xE4E4, 200, 0);
    bodies.push(sphere_body(10.0, 10.0, 10.0, 1.0, 200));
    bodies.push(sphere_body(10.5, 10.0, 10.0, 1.0, 201));
    let layer = build(&bodies, &world([2, 2, 2]));
    let _ = FindPairs::self_pairs(&layer).schedule_parallel(&Exploding, &ParallelSettings::with_workers(4));
}
