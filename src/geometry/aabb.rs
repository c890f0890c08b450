use super::ray::Ray;
use glam::Vec3;

/// Axis-aligned bounding box, represented by a center and a (non-negative)
/// size. `extents`, `min`, and `max` are derived on demand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec3,
    pub size: Vec3,
}

impl Aabb {
    /// Build an AABB from a center and a size. Negative size components are
    /// clamped to zero.
    pub fn new(center: Vec3, size: Vec3) -> Self {
        Self { center, size: size.max(Vec3::ZERO) }
    }

    /// Build an AABB from its min/max corners.
    pub fn from_min_max(min: Vec3, max: Vec3) -> Self {
        Self { center: (min + max) * 0.5, size: max - min }
    }

    pub fn extents(&self) -> Vec3 {
        self.size * 0.5
    }

    pub fn min(&self) -> Vec3 {
        self.center - self.extents()
    }

    pub fn max(&self) -> Vec3 {
        self.center + self.extents()
    }

    /// Inclusive on every face.
    pub fn contains(&self, point: Vec3) -> bool {
        let (mn, mx) = (self.min(), self.max());
        point.x >= mn.x
            && point.x <= mx.x
            && point.y >= mn.y
            && point.y <= mx.y
            && point.z >= mn.z
            && point.z <= mx.z
    }

    /// Full containment of another AABB, inclusive.
    pub fn contains_aabb(&self, other: &Aabb) -> bool {
        let (mn, mx) = (self.min(), self.max());
        let (omn, omx) = (other.min(), other.max());
        mn.x <= omn.x
            && mx.x >= omx.x
            && mn.y <= omn.y
            && mx.y >= omx.y
            && mn.z <= omn.z
            && mx.z >= omx.z
    }

    /// Overlap on all three axes, inclusive (touching counts).
    pub fn intersects(&self, other: &Aabb) -> bool {
        let (mn, mx) = (self.min(), self.max());
        let (omn, omx) = (other.min(), other.max());
        mn.x <= omx.x
            && mx.x >= omn.x
            && mn.y <= omx.y
            && mx.y >= omn.y
            && mn.z <= omx.z
            && mx.z >= omn.z
    }

    /// Expand min/max to include `point`.
    pub fn encapsulate(&mut self, point: Vec3) {
        let mn = self.min().min(point);
        let mx = self.max().max(point);
        self.center = (mn + mx) * 0.5;
        self.size = mx - mn;
    }

    /// Grow size uniformly by `amount` (added to every component).
    pub fn expand(&mut self, amount: f32) {
        self.size += Vec3::splat(amount);
    }

    /// Reset this box to the given min/max corners.
    pub fn set_min_max(&mut self, min: Vec3, max: Vec3) {
        self.center = (min + max) * 0.5;
        self.size = max - min;
    }

    /// Entry/exit parametric distances of `ray` through this box, or
    /// `None` if the ray misses (including when the exit is behind the
    /// ray's origin).
    pub fn ray_interval(&self, ray: &Ray) -> Option<(f32, f32)> {
        let (min, max) = (self.min(), self.max());
        let origin = ray.origin;
        let dir = ray.direction();

        let mut t_min = f32::NEG_INFINITY;
        let mut t_max = f32::INFINITY;

        for axis in 0..3 {
            let o = origin[axis];
            let d = dir[axis];
            let lo = min[axis];
            let hi = max[axis];

            if d.abs() < f32::EPSILON {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }

            let inv_d = 1.0 / d;
            let mut t1 = (lo - o) * inv_d;
            let mut t2 = (hi - o) * inv_d;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }
            t_min = t_min.max(t1);
            t_max = t_max.min(t2);
            if t_min > t_max {
                return None;
            }
        }

        if t_max < 0.0 {
            return None;
        }
        Some((t_min, t_max))
    }

    /// Slab-method ray intersection; a ray tangent to a face counts as a hit.
    pub fn intersects_ray(&self, ray: &Ray) -> bool {
        self.ray_interval(ray).is_some()
    }
}
