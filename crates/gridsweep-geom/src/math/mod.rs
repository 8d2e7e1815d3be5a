// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Deterministic math helpers: vectors, quaternions, and the 3×3 rotation
//! matrices used to bound rotated boxes.
//!
//! All operations round to `f32`; no fused multiply-add is used so identical
//! inputs produce identical bits on every target.

mod mat3;
mod quat;
mod vec3;

pub use mat3::Mat3;
pub use quat::Quat;
pub use vec3::Vec3;

/// Global epsilon used by math routines when detecting degenerate values.
pub const EPSILON: f32 = 1e-6;

/// Clamps `value` to the inclusive `[min, max]` range using float32 rounding.
///
/// NaN inputs propagate unchanged through `max`/`min` semantics of `f32`
/// (a NaN `value` yields `min`), so callers that must not see NaN should
/// check finiteness first.
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    debug_assert!(min <= max, "invalid clamp range: {min} > {max}");
    value.max(min).min(max)
}
