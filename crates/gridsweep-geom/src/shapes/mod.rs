// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Collider shapes.
//!
//! [`Collider`] is a closed sum type. Every query (`aabb_from`, distance,
//! raycast) matches on it exhaustively, so adding a shape kind means
//! extending the enum and each dispatch site.

mod capsule;
mod collider;
mod compound;
mod sphere;

pub use capsule::CapsuleCollider;
pub use collider::Collider;
pub use compound::{CompoundBlob, CompoundChild, CompoundCollider};
pub use sphere::SphereCollider;
