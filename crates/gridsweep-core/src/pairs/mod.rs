// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Broad-phase pair finding.

mod find_pairs;
mod sweep;

pub use find_pairs::{
    FindPairs, FindPairsProcessor, FindPairsResult, SingleTask, WorkUnitTask,
};
pub(crate) use sweep::yz_overlap;
