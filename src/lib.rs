/*!
# Galaxy Octree

A dynamic 3-D spatial index built around loose and strict octrees.

This crate provides two concrete trees sharing the same growth, split,
merge and shrink machinery:

- [`bounds::BoundsIndex`]: indexes payloads tagged by an axis-aligned
  bounding box, with an adjustable looseness factor.
- [`point::PointIndex`]: indexes payloads tagged by a single 3-D point,
  with no looseness.

Both support box and ray queries, growing the root to admit out-of-bounds
insertions and shrinking it back down once items are removed.

## Architecture

- **geometry**: `Aabb` and `Ray` primitives shared by both trees
- **octant**: octant numbering and the split/grow/merge thresholds
- **bounds** / **point**: the two tree implementations
- **log**: an injectable logging collaborator, silent by default
- **error**: construction-time configuration errors
*/

// Error handling module
pub mod error;

// Injectable logging collaborator
pub mod log;

// Octant numbering and split/grow/merge thresholds
mod octant;

// Shared geometry primitives (Aabb, Ray)
pub mod geometry;

// Bounding-box-tagged octree
pub mod bounds;

// Point-tagged octree
pub mod point;

// Re-export error types at crate root
pub use error::{OctreeError, OctreeResult};

// Re-export logging types at crate root
pub use log::{DefaultLogger, LogEntry, LogSeverity, Logger};

// Re-export math library
pub use glam;
