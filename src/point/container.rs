use super::node::{grow_towards, shrink_if_possible, PointNode};
use crate::error::{OctreeError, OctreeResult};
use crate::geometry::{Aabb, Ray};
use crate::log::{LogEntry, Logger};
use crate::octant::MAX_GROW_ATTEMPTS;
use glam::Vec3;
use std::sync::Arc;

/// A dynamic octree indexing payloads tagged by a single 3-D point.
pub struct PointIndex<T> {
    root: PointNode<T>,
    initial_size: f32,
    initial_center: Vec3,
    min_node_size: f32,
    count: usize,
    logger: Option<Arc<dyn Logger>>,
}

impl<T> PointIndex<T> {
    /// Build a new index. `min_node_size` greater than `initial_size` is
    /// clamped down (with a warning); there is no looseness factor to
    /// reconcile for the point tree, so construction otherwise always
    /// succeeds once that clamp is applied.
    pub fn new(initial_size: f32, initial_center: Vec3, min_node_size: f32) -> OctreeResult<Self> {
        Self::with_logger(initial_size, initial_center, min_node_size, None)
    }

    /// Same as [`new`](Self::new), with an injected log collaborator.
    pub fn with_logger(initial_size: f32, initial_center: Vec3, min_node_size: f32, logger: Option<Arc<dyn Logger>>) -> OctreeResult<Self> {
        if initial_size <= 0.0 {
            return Err(OctreeError::InvalidConfiguration(format!("initial_size must be positive, got {initial_size}")));
        }

        let mut min_node_size = min_node_size;
        if min_node_size > initial_size {
            if let Some(l) = &logger {
                l.log(&LogEntry::warn(
                    "galaxy_octree::point",
                    format!("min_node_size ({min_node_size}) exceeds initial_size ({initial_size}); clamping"),
                ));
            }
            min_node_size = initial_size;
        }

        Ok(Self {
            root: PointNode::new(initial_center, initial_size, min_node_size),
            initial_size,
            initial_center,
            min_node_size,
            count: 0,
            logger,
        })
    }

    pub fn set_logger(&mut self, logger: Option<Arc<dyn Logger>>) {
        self.logger = logger;
    }

    fn log_error(&self, message: impl Into<String>) {
        if let Some(l) = &self.logger {
            l.log(&LogEntry::error("galaxy_octree::point", message));
        }
    }

    /// Insert `payload` at `position`, growing the root as many times as
    /// needed (up to 20 attempts). Returns `false` if growth is exhausted.
    pub fn add(&mut self, payload: T, position: Vec3) -> bool {
        let mut attempts = 0;
        while !self.root.bounds().contains(position) {
            if attempts >= MAX_GROW_ATTEMPTS {
                self.log_error(format!("add exhausted {MAX_GROW_ATTEMPTS} grow attempts; dropping item"));
                return false;
            }
            let old = std::mem::replace(&mut self.root, PointNode::new(Vec3::ZERO, 1.0, self.min_node_size));
            self.root = grow_towards(old, position);
            attempts += 1;
        }
        self.root.add(payload, position);
        self.count += 1;
        true
    }

    pub fn remove(&mut self, payload: &T) -> bool
    where
        T: PartialEq,
    {
        let removed = self.root.remove(payload);
        if removed {
            self.count -= 1;
            self.shrink();
        }
        removed
    }

    pub fn remove_near(&mut self, payload: &T, anchor: Vec3) -> bool
    where
        T: PartialEq,
    {
        let removed = self.root.remove_near(payload, anchor);
        if removed {
            self.count -= 1;
            self.shrink();
        }
        removed
    }

    fn shrink(&mut self) {
        if self.count == 0 {
            self.root = PointNode::new(self.initial_center, self.initial_size, self.min_node_size);
            return;
        }
        let old = std::mem::replace(&mut self.root, PointNode::new(Vec3::ZERO, 1.0, self.min_node_size));
        self.root = shrink_if_possible(old, self.initial_size);
    }

    pub fn get_nearby_point(&self, center: Vec3, radius: f32) -> Vec<T>
    where
        T: Clone,
    {
        let mut out = Vec::new();
        self.root.get_nearby_point(center, radius, &mut out);
        out
    }

    pub fn get_nearby_ray(&self, ray: &Ray, radius: f32) -> Vec<T>
    where
        T: Clone,
    {
        let mut out = Vec::new();
        self.root.get_nearby_ray(ray, radius, &mut out);
        out
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn max_bounds(&self) -> Aabb {
        self.root.bounds()
    }

    pub fn get_child_bounds(&self) -> Vec<Aabb> {
        let mut out = Vec::new();
        self.root.collect_child_bounds(&mut out);
        out
    }
}
