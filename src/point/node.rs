use crate::geometry::{distance_point_to_ray, Aabb, Ray};
use crate::octant::{octant_of, octant_offset, NUM_OBJECTS_ALLOWED};
use glam::Vec3;

/// A node of a `PointIndex` tree. Structurally the same shape as
/// `BoundsNode` but with no looseness: the effective cell always equals
/// the nominal `base_side` cube.
pub(crate) struct PointNode<T> {
    pub(crate) center: Vec3,
    pub(crate) base_side: f32,
    min_side: f32,
    pub(crate) children: Option<Box<[PointNode<T>; 8]>>,
    pub(crate) items: Vec<(T, Vec3)>,
}

impl<T> PointNode<T> {
    pub(crate) fn new(center: Vec3, base_side: f32, min_side: f32) -> Self {
        Self { center, base_side, min_side, children: None, items: Vec::new() }
    }

    pub(crate) fn bounds(&self) -> Aabb {
        Aabb::new(self.center, Vec3::splat(self.base_side))
    }

    fn can_split(&self) -> bool {
        self.base_side * 0.5 >= self.min_side
    }

    pub(crate) fn add(&mut self, payload: T, position: Vec3) -> bool {
        if !self.bounds().contains(position) {
            return false;
        }

        if self.children.is_none() {
            if self.items.len() < NUM_OBJECTS_ALLOWED || !self.can_split() {
                self.items.push((payload, position));
                return true;
            }
            self.split();
        }

        let children = self.children.as_mut().expect("split just ran");
        match unique_containing_child(children, position) {
            Some(i) => {
                children[i].add(payload, position);
            }
            None => self.items.push((payload, position)),
        }
        true
    }

    fn split(&mut self) {
        let child_base = self.base_side * 0.5;
        let quarter = self.base_side * 0.25;
        let center = self.center;
        let min_side = self.min_side;

        let mut children: [PointNode<T>; 8] = std::array::from_fn(|oct| PointNode::new(center + octant_offset(oct, quarter), child_base, min_side));

        let old_items = std::mem::take(&mut self.items);
        for (payload, position) in old_items {
            match unique_containing_child(&children, position) {
                Some(i) => {
                    children[i].add(payload, position);
                }
                None => self.items.push((payload, position)),
            }
        }

        self.children = Some(Box::new(children));
    }

    pub(crate) fn count(&self) -> usize {
        self.items.len() + self.children.as_ref().map_or(0, |cs| cs.iter().map(|c| c.count()).sum())
    }

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

    pub(crate) fn get_nearby_point(&self, center: Vec3, radius: f32, out: &mut Vec<T>)
    where
        T: Clone,
    {
        let probe = Aabb::new(center, Vec3::splat(radius * 2.0));
        if !self.bounds().intersects(&probe) {
            return;
        }
        let r2 = radius * radius;
        for (payload, position) in &self.items {
            if (*position - center).length_squared() <= r2 {
                out.push(payload.clone());
            }
        }
        if let Some(children) = &self.children {
            for c in children.iter() {
                c.get_nearby_point(center, radius, out);
            }
        }
    }

    pub(crate) fn get_nearby_ray(&self, ray: &Ray, radius: f32, out: &mut Vec<T>)
    where
        T: Clone,
    {
        let mut probe = self.bounds();
        probe.expand(radius);
        if !probe.intersects_ray(ray) {
            return;
        }
        for (payload, position) in &self.items {
            if distance_point_to_ray(*position, ray) <= radius {
                out.push(payload.clone());
            }
        }
        if let Some(children) = &self.children {
            for c in children.iter() {
                c.get_nearby_ray(ray, radius, out);
            }
        }
    }

    pub(crate) fn collect_child_bounds(&self, out: &mut Vec<Aabb>) {
        out.push(self.bounds());
        if let Some(children) = &self.children {
            for c in children.iter() {
                c.collect_child_bounds(out);
            }
        }
    }

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

fn unique_containing_child<T>(children: &[PointNode<T>; 8], position: Vec3) -> Option<usize> {
    let mut found = None;
    for (i, c) in children.iter().enumerate() {
        if c.bounds().contains(position) {
            if found.is_some() {
                return None;
            }
            found = Some(i);
        }
    }
    found
}

/// Unlike the bounds tree, the point tree unconditionally attaches all
/// eight children on grow, even when the old root held no items.
pub(crate) fn grow_towards<T>(old: PointNode<T>, anchor: Vec3) -> PointNode<T> {
    let old_base = old.base_side;
    let old_center = old.center;
    let min_side = old.min_side;

    let dir = crate::octant::sign_or_positive(anchor - old_center);
    let new_center = old_center + dir * (old_base * 0.5);
    let new_base = old_base * 2.0;

    let idx = octant_of(new_center, old_center);
    let quarter = old_base * 0.5;
    let mut old_opt = Some(old);
    let children: [PointNode<T>; 8] = std::array::from_fn(|oct| {
        if oct == idx {
            old_opt.take().expect("idx visited exactly once")
        } else {
            PointNode::new(new_center + octant_offset(oct, quarter), old_base, min_side)
        }
    });

    let mut new_root = PointNode::new(new_center, new_base, min_side);
    new_root.children = Some(Box::new(children));
    new_root
}

pub(crate) fn shrink_if_possible<T>(mut root: PointNode<T>, initial_size: f32) -> PointNode<T> {
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
