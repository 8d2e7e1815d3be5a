// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Core geometry types used by the engine (rigid transform, AABB).
//!
//! Determinism notes:
//! - Overlap semantics are inclusive on faces so touching boxes pair.
//! - Boxes may carry non-finite components; those are "degenerate" and are
//!   detected with [`aabb::Aabb::is_degenerate`] rather than rejected.

#[doc = "Axis-aligned bounding boxes."]
pub mod aabb;
#[doc = "Rigid transforms (rotation + translation)."]
pub mod transform;
