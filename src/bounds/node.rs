use crate::geometry::{Aabb, Ray};
use crate::octant::{octant_of, octant_offset, NUM_OBJECTS_ALLOWED};
use glam::Vec3;

/// A node of a `BoundsIndex` tree. Either a leaf holding up to
/// `NUM_OBJECTS_ALLOWED` items, or an internal node with exactly eight
/// children — plus, in either case, an `items` bucket for items that
/// straddle more than one child.
pub(crate) struct BoundsNode<T> {
    pub(crate) center: Vec3,
    pub(crate) base_side: f32,
    looseness: f32,
    min_side: f32,
    pub(crate) children: Option<Box<[BoundsNode<T>; 8]>>,
    pub(crate) items: Vec<(T, Aabb)>,
}

impl<T> BoundsNode<T> {
    pub(crate) fn new(center: Vec3, base_side: f32, looseness: f32, min_side: f32) -> Self {
        Self { center, base_side, looseness, min_side, children: None, items: Vec::new() }
    }

    /// The effective cell: `base_side * looseness` centered at `center`.
    pub(crate) fn bounds(&self) -> Aabb {
        Aabb::new(self.center, Vec3::splat(self.base_side * self.looseness))
    }

    fn can_split(&self) -> bool {
        self.base_side * 0.5 >= self.min_side
    }

    /// Returns `false` iff `item_bounds` is not contained in this node's
    /// effective cell (the caller must grow the root and retry).
    pub(crate) fn add(&mut self, payload: T, item_bounds: Aabb) -> bool {
        if !self.bounds().contains_aabb(&item_bounds) {
            return false;
        }

        if self.children.is_none() {
            if self.items.len() < NUM_OBJECTS_ALLOWED || !self.can_split() {
                self.items.push((payload, item_bounds));
                return true;
            }
            self.split();
        }

        let children = self.children.as_mut().expect("split just ran");
        match unique_containing_child(children, &item_bounds) {
            Some(i) => {
                children[i].add(payload, item_bounds);
            }
            None => self.items.push((payload, item_bounds)),
        }
        true
    }

    fn split(&mut self) {
        let child_base = self.base_side * 0.5;
        let quarter = self.base_side * 0.25;
        let center = self.center;
        let looseness = self.looseness;
        let min_side = self.min_side;

        let mut children: [BoundsNode<T>; 8] =
            std::array::from_fn(|oct| BoundsNode::new(center + octant_offset(oct, quarter), child_base, looseness, min_side));

        let old_items = std::mem::take(&mut self.items);
        for (payload, bounds) in old_items {
            match unique_containing_child(&children, &bounds) {
                Some(i) => {
                    children[i].add(payload, bounds);
                }
                None => self.items.push((payload, bounds)),
            }
        }

        self.children = Some(Box::new(children));
    }

    /// Total items in an internal node plus every descendant (used both
    /// by merge and by the container's grow decision).
    pub(crate) fn count(&self) -> usize {
        self.items.len() + self.children.as_ref().map_or(0, |cs| cs.iter().map(|c| c.count()).sum())
    }

    /// Merge this node's children into itself if the merge threshold and
    /// leaf-only condition hold. Returns whether a merge happened.
    fn try_merge(&mut self) -> bool {
        let Some(children) = &self.children else { return false };
        if !children.iter().all(|c| c.children.is_none()) {
            return false;
        }
        let total: usize = self.items.len() + children.iter().map(|c| c.items.len()).sum::<usize>();
        if total > NUM_OBJECTS_ALLOWED {
            return false;
        }

        let children = self.children.take().expect("checked above");
        for child in *children {
            self.items.extend(child.items);
        }
        true
    }

    pub(crate) fn remove(&mut self, payload: &T) -> bool
    where
        T: PartialEq,
    {
        if let Some(pos) = self.items.iter().position(|(p, _)| p == payload) {
            self.items.swap_remove(pos);
            return true;
        }
        if let Some(children) = &mut self.children {
            for child in children.iter_mut() {
                if child.remove(payload) {
                    self.try_merge();
                    return true;
                }
            }
        }
        false
    }

    pub(crate) fn remove_near(&mut self, payload: &T, anchor: Vec3) -> bool
    where
        T: PartialEq,
    {
        if let Some(pos) = self.items.iter().position(|(p, _)| p == payload) {
            self.items.swap_remove(pos);
            return true;
        }
        if let Some(children) = &mut self.children {
            let mut target = None;
            for (i, c) in children.iter().enumerate() {
                if c.bounds().contains(anchor) {
                    if target.is_some() {
                        target = None;
                        break;
                    }
                    target = Some(i);
                }
            }
            if let Some(i) = target {
                if children[i].remove_near(payload, anchor) {
                    self.try_merge();
                    return true;
                }
            }
        }
        false
    }

    pub(crate) fn get_colliding_box(&self, query: &Aabb, out: &mut Vec<T>)
    where
        T: Clone,
    {
        if !self.bounds().intersects(query) {
            return;
        }
        for (payload, bounds) in &self.items {
            if bounds.intersects(query) {
                out.push(payload.clone());
            }
        }
        if let Some(children) = &self.children {
            for c in children.iter() {
                c.get_colliding_box(query, out);
            }
        }
    }

    pub(crate) fn is_colliding_box(&self, query: &Aabb) -> bool {
        if !self.bounds().intersects(query) {
            return false;
        }
        if self.items.iter().any(|(_, bounds)| bounds.intersects(query)) {
            return true;
        }
        if let Some(children) = &self.children {
            return children.iter().any(|c| c.is_colliding_box(query));
        }
        false
    }

    pub(crate) fn get_colliding_ray(&self, ray: &Ray, max_distance: f32, out: &mut Vec<T>)
    where
        T: Clone,
    {
        let Some((t_enter, _)) = self.bounds().ray_interval(ray) else { return };
        if t_enter > max_distance {
            return;
        }
        for (payload, bounds) in &self.items {
            if let Some((t_item, _)) = bounds.ray_interval(ray) {
                if t_item <= max_distance {
                    out.push(payload.clone());
                }
            }
        }
        if let Some(children) = &self.children {
            for c in children.iter() {
                c.get_colliding_ray(ray, max_distance, out);
            }
        }
    }

    pub(crate) fn is_colliding_ray(&self, ray: &Ray, max_distance: f32) -> bool {
        let Some((t_enter, _)) = self.bounds().ray_interval(ray) else { return false };
        if t_enter > max_distance {
            return false;
        }
        let hit_here = self.items.iter().any(|(_, bounds)| matches!(bounds.ray_interval(ray), Some((t, _)) if t <= max_distance));
        if hit_here {
            return true;
        }
        if let Some(children) = &self.children {
            return children.iter().any(|c| c.is_colliding_ray(ray, max_distance));
        }
        false
    }

    pub(crate) fn collect_child_bounds(&self, out: &mut Vec<Aabb>) {
        out.push(self.bounds());
        if let Some(children) = &self.children {
            for c in children.iter() {
                c.collect_child_bounds(out);
            }
        }
    }

    /// Unique non-empty child index, used by container-level shrink; `None`
    /// if this node holds any items of its own, or if more than one child
    /// has items anywhere in its subtree.
    pub(crate) fn shrink_candidate(&self) -> Option<usize> {
        if !self.items.is_empty() {
            return None;
        }
        let children = self.children.as_ref()?;
        let mut found = None;
        for (i, c) in children.iter().enumerate() {
            if c.count() > 0 {
                if found.is_some() {
                    return None;
                }
                found = Some(i);
            }
        }
        found
    }
}

/// The unique child whose effective cell fully contains `bounds`, or
/// `None` if zero or more than one qualify.
fn unique_containing_child<T>(children: &[BoundsNode<T>; 8], bounds: &Aabb) -> Option<usize> {
    let mut found = None;
    for (i, c) in children.iter().enumerate() {
        if c.bounds().contains_aabb(bounds) {
            if found.is_some() {
                return None;
            }
            found = Some(i);
        }
    }
    found
}

/// Grow the tree by doubling the root so that it ends up containing
/// `anchor`, with the old root re-attached as one of the new root's
/// children. See SPEC_FULL.md §9 for why the octant index is computed
/// structurally rather than via the raw dir-sign formula.
pub(crate) fn grow_towards<T>(old: BoundsNode<T>, anchor: Vec3) -> BoundsNode<T> {
    let old_base = old.base_side;
    let old_center = old.center;
    let looseness = old.looseness;
    let min_side = old.min_side;
    let had_items = old.count() > 0;

    let dir = crate::octant::sign_or_positive(anchor - old_center);
    let new_center = old_center + dir * (old_base * 0.5);
    let new_base = old_base * 2.0;

    let mut new_root = BoundsNode::new(new_center, new_base, looseness, min_side);

    if had_items {
        let idx = octant_of(new_center, old_center);
        let quarter = old_base * 0.5;
        let mut old_opt = Some(old);
        let children: [BoundsNode<T>; 8] = std::array::from_fn(|oct| {
            if oct == idx {
                old_opt.take().expect("idx visited exactly once")
            } else {
                BoundsNode::new(new_center + octant_offset(oct, quarter), old_base, looseness, min_side)
            }
        });
        new_root.children = Some(Box::new(children));
    }

    new_root
}

/// Replace `root` by its unique non-empty child, repeatedly, as long as
/// the result would still be at least `initial_size` wide.
pub(crate) fn shrink_if_possible<T>(mut root: BoundsNode<T>, initial_size: f32) -> BoundsNode<T> {
    loop {
        if root.base_side * 0.5 < initial_size {
            return root;
        }
        let Some(i) = root.shrink_candidate() else { return root };
        let children = root.children.take().expect("shrink_candidate implies children");
        root = (*children).into_iter().nth(i).expect("valid octant index");
    }
}

#[cfg(test)]
#[path = "node_tests.rs"]
mod tests;
