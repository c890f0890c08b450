use super::*;
use crate::octant::NUM_OBJECTS_ALLOWED;

fn leaf(base_side: f32, min_side: f32) -> PointNode<u32> {
    PointNode::new(Vec3::ZERO, base_side, min_side)
}

#[test]
fn add_rejects_points_outside_the_cell() {
    let mut node = leaf(10.0, 1.0);
    assert!(!node.add(1, Vec3::new(20.0, 0.0, 0.0)));
    assert_eq!(node.count(), 0);
}

#[test]
fn add_splits_once_threshold_is_exceeded() {
    let mut node = leaf(16.0, 1.0);
    for i in 0..NUM_OBJECTS_ALLOWED as u32 {
        assert!(node.add(i, Vec3::new(1.0, 1.0, 1.0)));
    }
    assert!(node.children.is_none());
    assert!(node.add(99, Vec3::new(1.0, 1.0, 1.0)));
    assert!(node.children.is_some());
    assert_eq!(node.count(), NUM_OBJECTS_ALLOWED + 1);
}

#[test]
fn remove_near_descends_only_into_the_anchor_child() {
    let mut node = leaf(16.0, 1.0);
    for i in 0..(NUM_OBJECTS_ALLOWED as u32 + 1) {
        node.add(i, Vec3::new(1.0 + i as f32, 1.0, 1.0));
    }
    assert!(node.children.is_some());
    assert!(node.remove_near(&0, Vec3::new(1.0, 1.0, 1.0)));
    assert_eq!(node.count(), NUM_OBJECTS_ALLOWED);
}

#[test]
fn get_nearby_point_prunes_by_radius_box() {
    let mut node = leaf(64.0, 1.0);
    for i in 1..=20_i32 {
        node.add(i as u32, Vec3::new(i as f32, i as f32, i as f32));
    }
    let mut out = Vec::new();
    node.get_nearby_point(Vec3::new(10.0, 10.0, 10.0), 0.0, &mut out);
    assert_eq!(out, vec![10]);
}

#[test]
fn get_nearby_ray_matches_colinear_points_only() {
    let mut node = leaf(64.0, 1.0);
    for i in 1..=20_i32 {
        node.add(i as u32, Vec3::new(i as f32, i as f32, i as f32));
    }
    let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0));
    let mut out = Vec::new();
    node.get_nearby_ray(&ray, 0.0, &mut out);
    assert_eq!(out.len(), 20);

    let off_axis = Ray::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));
    let mut out2 = Vec::new();
    node.get_nearby_ray(&off_axis, 0.0, &mut out2);
    assert!(out2.is_empty());
}
