// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

/// Errors raised while constructing geometry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeomError {
    /// A compound needs at least one child to have bounds.
    #[error("compound collider requires at least one child")]
    EmptyCompound,
}
