//! Integration tests for the geometry primitives (Aabb, Ray).
//!
//! These mirror the concrete end-to-end scenarios worked out by hand
//! against the design before being committed here.

use galaxy_octree::geometry::{distance_point_to_ray, Aabb, Ray};
use galaxy_octree::glam::Vec3;

// ============================================================================
// RAY
// ============================================================================

#[test]
fn ray_stores_normalized_direction_and_walks_along_it() {
    let ray = Ray::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
    let expected_dir = Vec3::new(1.0, 1.0, 1.0).normalize_or_zero();
    assert!((ray.direction() - expected_dir).length() < 1e-6);

    let expected_point = Vec3::new(1.0, 0.0, 0.0) + expected_dir * 2.0;
    assert!((ray.point_at(2.0) - expected_point).length() < 1e-6);
}

#[test]
fn distance_to_ray_matches_hand_worked_cases() {
    let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));
    assert!((distance_point_to_ray(Vec3::new(5.0, 0.0, 0.0), &ray) - 0.0).abs() < 1e-6);
    assert!((distance_point_to_ray(Vec3::new(5.0, 3.0, 4.0), &ray) - 5.0).abs() < 1e-6);
}

// ============================================================================
// AABB
// ============================================================================

#[test]
fn bounding_box_walkthrough() {
    let mut b = Aabb::new(Vec3::new(1.0, 1.0, 1.0), Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(b.extents(), Vec3::new(0.5, 1.0, 1.5));
    assert_eq!(b.min(), Vec3::new(0.5, 0.0, -0.5));
    assert_eq!(b.max(), Vec3::new(1.5, 2.0, 2.5));

    b.encapsulate(Vec3::new(5.0, 0.0, 0.0));
    assert!((b.center - Vec3::new(2.75, 1.0, 1.0)).length() < 1e-5);
    assert!((b.extents() - Vec3::new(2.25, 1.0, 1.5)).length() < 1e-5);

    b.expand(1.0);
    assert!((b.extents() - Vec3::new(2.75, 1.5, 2.0)).length() < 1e-5);

    b.set_min_max(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(3.0, 3.0, 3.0));
    assert!(b.contains(Vec3::new(0.0, 0.0, 0.0)));
    assert!(b.contains(Vec3::new(3.0, 3.0, 3.0)));
    assert!(!b.contains(Vec3::new(4.0, 4.0, 4.0)));
    assert!(!b.contains(Vec3::new(3.0, 3.0, 3.1)));

    assert!(!b.intersects(&Aabb::new(Vec3::splat(4.0), Vec3::splat(1.0))));
    assert!(b.intersects(&Aabb::new(Vec3::splat(4.0), Vec3::splat(2.0))));
    assert!(b.intersects(&Aabb::new(Vec3::splat(4.0), Vec3::splat(3.0))));
}

#[test]
fn ray_aabb_intersection_hits_and_misses_by_size() {
    let ray = Ray::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
    for s in [0.5_f32, 0.9] {
        let target = Aabb::new(Vec3::splat(3.0), Vec3::splat(s));
        assert!(!target.intersects_ray(&ray), "size {s} should miss");
    }
    for s in [1.0_f32, 2.0] {
        let target = Aabb::new(Vec3::splat(3.0), Vec3::splat(s));
        assert!(target.intersects_ray(&ray), "size {s} should hit");
    }
}
