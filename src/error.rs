//! Error types for the octree spatial index.
//!
//! This module defines the error types used by construction and the
//! ambient validation that surrounds it; the day-to-day add/remove/query
//! operations never fail (see the crate doc comment).

use std::fmt;

/// Result type for octree construction.
pub type OctreeResult<T> = Result<T, OctreeError>;

/// Octree construction errors.
#[derive(Debug, Clone)]
pub enum OctreeError {
    /// The constructor arguments cannot be reconciled into a valid tree
    /// (e.g. `min_node_size * looseness` exceeds `initial_size`, leaving
    /// no room for even the smallest permitted leaf).
    InvalidConfiguration(String),
}

impl fmt::Display for OctreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OctreeError::InvalidConfiguration(msg) => write!(f, "invalid octree configuration: {}", msg),
        }
    }
}

impl std::error::Error for OctreeError {}
