//! The bounds-tagged octree: items carry an axis-aligned bounding box
//! and cells may be "loose" (their effective cell extends beyond half
//! the parent's cell by a looseness factor).

mod container;
mod node;

pub use container::BoundsIndex;
