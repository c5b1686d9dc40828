// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use thiserror::Error;

/// Errors raised while configuring collision checks.
///
/// Only initialization and settings loading are fallible; insert, remove, and
/// query are total over well-formed input.
#[derive(Debug, Error)]
pub enum CollisionError {
    /// A broad-phase was initialized with settings for a different variant.
    #[error("broad-phase settings mismatch: expected {expected}, found {found}")]
    SettingsMismatch {
        /// Variant the broad-phase implementation accepts.
        expected: &'static str,
        /// Variant that was supplied.
        found: &'static str,
    },
    /// Spatial hash cell size must be finite and positive.
    #[error("invalid spatial hash cell size: {0}")]
    InvalidCellSize(f32),
    /// Quadtree nodes must hold at least one object before subdividing.
    #[error("quadtree max_objects_per_node must be at least 1")]
    InvalidNodeCapacity,
    /// Settings could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}
