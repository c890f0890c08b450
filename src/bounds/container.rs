use super::node::{grow_towards, shrink_if_possible, BoundsNode};
use crate::error::{OctreeError, OctreeResult};
use crate::geometry::{Aabb, Ray};
use crate::log::{LogEntry, Logger};
use crate::octant::MAX_GROW_ATTEMPTS;
use glam::Vec3;
use std::sync::Arc;

/// A dynamic, optionally loose octree indexing payloads tagged by an
/// axis-aligned bounding box.
pub struct BoundsIndex<T> {
    root: BoundsNode<T>,
    initial_size: f32,
    initial_center: Vec3,
    min_node_size: f32,
    looseness: f32,
    count: usize,
    logger: Option<Arc<dyn Logger>>,
}

impl<T> BoundsIndex<T> {
    /// Build a new index. `looseness` is clamped to `[1.0, 2.0]`.
    /// `min_node_size` greater than `initial_size` is clamped down (with a
    /// warning); a `looseness`-scaled `min_node_size` that still exceeds
    /// `initial_size` cannot be reconciled and is a hard construction error.
    pub fn new(initial_size: f32, initial_center: Vec3, min_node_size: f32, looseness: f32) -> OctreeResult<Self> {
        Self::with_logger(initial_size, initial_center, min_node_size, looseness, None)
    }

    /// Same as [`new`](Self::new), with an injected log collaborator.
    pub fn with_logger(
        initial_size: f32,
        initial_center: Vec3,
        min_node_size: f32,
        looseness: f32,
        logger: Option<Arc<dyn Logger>>,
    ) -> OctreeResult<Self> {
        if initial_size <= 0.0 {
            return Err(OctreeError::InvalidConfiguration(format!("initial_size must be positive, got {initial_size}")));
        }

        let looseness = looseness.clamp(1.0, 2.0);
        let mut min_node_size = min_node_size;

        if min_node_size > initial_size {
            if let Some(l) = &logger {
                l.log(&LogEntry::warn(
                    "galaxy_octree::bounds",
                    format!("min_node_size ({min_node_size}) exceeds initial_size ({initial_size}); clamping"),
                ));
            }
            min_node_size = initial_size;
        }

        if min_node_size * looseness > initial_size {
            return Err(OctreeError::InvalidConfiguration(format!(
                "min_node_size * looseness ({} * {} = {}) exceeds initial_size ({})",
                min_node_size,
                looseness,
                min_node_size * looseness,
                initial_size
            )));
        }

        Ok(Self {
            root: BoundsNode::new(initial_center, initial_size, looseness, min_node_size),
            initial_size,
            initial_center,
            min_node_size,
            looseness,
            count: 0,
            logger,
        })
    }

    /// Set or replace the log collaborator.
    pub fn set_logger(&mut self, logger: Option<Arc<dyn Logger>>) {
        self.logger = logger;
    }

    fn log_error(&self, message: impl Into<String>) {
        if let Some(l) = &self.logger {
            l.log(&LogEntry::error("galaxy_octree::bounds", message));
        }
    }

    /// Insert `payload` tagged by `item_bounds`, growing the root as many
    /// times as needed (up to 20 attempts) so that it fully contains the
    /// item. Returns `false` (without incrementing `count`) if growth is
    /// exhausted first.
    pub fn add(&mut self, payload: T, item_bounds: Aabb) -> bool {
        let mut attempts = 0;
        while !self.root.bounds().contains_aabb(&item_bounds) {
            if attempts >= MAX_GROW_ATTEMPTS {
                self.log_error(format!("add exhausted {MAX_GROW_ATTEMPTS} grow attempts; dropping item"));
                return false;
            }
            let old = std::mem::replace(&mut self.root, BoundsNode::new(Vec3::ZERO, 1.0, self.looseness, self.min_node_size));
            self.root = grow_towards(old, item_bounds.center);
            attempts += 1;
        }
        self.root.add(payload, item_bounds);
        self.count += 1;
        true
    }

    /// Remove the first item whose payload equals `payload`, anywhere in
    /// the tree (full scan).
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

    /// Remove the item whose payload equals `payload`, descending only
    /// into the unique child containing `anchor`.
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
            self.root = BoundsNode::new(self.initial_center, self.initial_size, self.looseness, self.min_node_size);
            return;
        }
        let old = std::mem::replace(&mut self.root, BoundsNode::new(Vec3::ZERO, 1.0, self.looseness, 1.0));
        self.root = shrink_if_possible(old, self.initial_size);
    }

    pub fn is_colliding_box(&self, query: &Aabb) -> bool {
        self.root.is_colliding_box(query)
    }

    pub fn get_colliding_box(&self, query: &Aabb) -> Vec<T>
    where
        T: Clone,
    {
        let mut out = Vec::new();
        self.root.get_colliding_box(query, &mut out);
        out
    }

    pub fn is_colliding_ray(&self, ray: &Ray, max_distance: f32) -> bool {
        self.root.is_colliding_ray(ray, max_distance)
    }

    pub fn get_colliding_ray(&self, ray: &Ray, max_distance: f32) -> Vec<T>
    where
        T: Clone,
    {
        let mut out = Vec::new();
        self.root.get_colliding_ray(ray, max_distance, &mut out);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::LogSeverity;
    use std::sync::Mutex;

    struct RecordingLogger {
        entries: Mutex<Vec<LogEntry>>,
    }

    impl RecordingLogger {
        fn new() -> Arc<Self> {
            Arc::new(Self { entries: Mutex::new(Vec::new()) })
        }
    }

    impl Logger for RecordingLogger {
        fn log(&self, entry: &LogEntry) {
            self.entries.lock().unwrap().push(entry.clone());
        }
    }

    #[test]
    fn new_rejects_non_positive_initial_size() {
        assert!(BoundsIndex::<u32>::new(0.0, Vec3::ZERO, 1.0, 1.0).is_err());
        assert!(BoundsIndex::<u32>::new(-5.0, Vec3::ZERO, 1.0, 1.0).is_err());
    }

    #[test]
    fn oversized_min_node_size_logs_a_warning_and_clamps() {
        let logger = RecordingLogger::new();
        let index = BoundsIndex::<u32>::with_logger(10.0, Vec3::ZERO, 100.0, 1.0, Some(logger.clone())).unwrap();
        assert_eq!(index.max_bounds().size, Vec3::splat(10.0));

        let entries = logger.entries.lock().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].severity, LogSeverity::Warn);
        assert!(entries[0].message.contains("min_node_size"));
    }

    #[test]
    fn add_exhausting_grow_attempts_logs_an_error_and_is_dropped() {
        let logger = RecordingLogger::new();
        let mut index = BoundsIndex::with_logger(1.0, Vec3::ZERO, 0.01, 1.0, Some(logger.clone())).unwrap();

        let unreachable = Aabb::new(Vec3::splat(1.0e9), Vec3::ZERO);
        assert!(!index.add(1_u32, unreachable));
        assert_eq!(index.count(), 0);

        let entries = logger.entries.lock().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].severity, LogSeverity::Error);
        assert!(entries[0].message.contains("grow attempts"));
    }

    #[test]
    fn add_without_a_logger_still_drops_silently_on_exhausted_grow() {
        let mut index = BoundsIndex::new(1.0, Vec3::ZERO, 0.01, 1.0).unwrap();
        let unreachable = Aabb::new(Vec3::splat(1.0e9), Vec3::ZERO);
        assert!(!index.add(1_u32, unreachable));
        assert_eq!(index.count(), 0);
    }
}
