// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Per-shape bounds and narrow-phase queries.
//!
//! Every query runs in the local space of its first collider; the public
//! world-space entry points move the other operand into that space and
//! transform the results back out.
//!
//! Sign convention: distances are negative when shapes penetrate.

mod aabb;
pub mod distance;
pub mod raycast;
mod results;

pub use aabb::{aabb_from, aabb_from_capsule, aabb_from_compound, aabb_from_sphere};
pub use distance::{distance_between, point_distance};
pub use raycast::{raycast, raycast_aabb, Ray};
pub use results::{ColliderDistanceResult, PointDistanceResult, RaycastResult};
