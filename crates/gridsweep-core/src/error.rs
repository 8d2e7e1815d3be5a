// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use thiserror::Error;

/// Errors raised while configuring layers or scheduling pair queries.
///
/// Degenerate body geometry is never an error; such bodies are routed to the
/// NaN bucket instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SweepError {
    /// A subdivision count was zero.
    #[error("subdivisions on axis {axis} must be at least 1, got {value}")]
    InvalidSubdivisions {
        /// Axis index (0 = x, 1 = y, 2 = z).
        axis: usize,
        /// Offending value.
        value: u32,
    },
    /// The world AABB has a NaN or infinite component.
    #[error("world AABB must be finite")]
    NonFiniteWorldAabb,
    /// The world AABB has `min > max` on some axis.
    #[error("world AABB min exceeds max on axis {axis}")]
    InvertedWorldAabb {
        /// Axis index (0 = x, 1 = y, 2 = z).
        axis: usize,
    },
    /// The product of subdivisions exceeds the supported cell count.
    #[error("cell count {requested} exceeds maximum {max}")]
    TooManyCells {
        /// Requested cell count (saturated on overflow).
        requested: u64,
        /// Supported maximum.
        max: u64,
    },
    /// A cross-layer query was given layers with different settings.
    #[error("layers were built with different settings")]
    LayerMismatch,
    /// A parallel schedule was requested with zero workers.
    #[error("parallel scheduling needs at least one worker")]
    NoWorkers,
}
