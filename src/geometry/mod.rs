//! Geometric primitives shared by both tree types: the axis-aligned
//! bounding box and the ray, with the intersection predicates that
//! mediate every pruning decision in the node recursion.

mod aabb;
mod ray;

pub use aabb::Aabb;
pub use ray::{distance_point_to_ray, Ray};
