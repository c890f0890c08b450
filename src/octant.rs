//! Shared octant-indexing helpers used by both node types.
//!
//! Octant numbering is fixed: bit 0 = +X (1) vs -X (0); bit 1 = +Z (1)
//! vs -Z (0); bit 2 = +Y (0) vs -Y (1). `octant_of` and `octant_offset`
//! are exact inverses of each other under this layout, which is what
//! both split (center -> child index) and grow (child index -> center)
//! need.

use glam::Vec3;

/// Maximum number of items a leaf may hold before it is split.
pub const NUM_OBJECTS_ALLOWED: usize = 8;

/// Maximum number of times `add` will grow the root before giving up.
pub const MAX_GROW_ATTEMPTS: u32 = 20;

/// Which of the 8 octants of `center` does `point` fall into.
pub fn octant_of(center: Vec3, point: Vec3) -> usize {
    let mut idx = 0usize;
    if point.x >= center.x {
        idx |= 1;
    }
    if point.z >= center.z {
        idx |= 2;
    }
    if point.y < center.y {
        idx |= 4;
    }
    idx
}

/// The offset from a parent center to the center of octant `oct`, given
/// `quarter = parent.base_side / 4`.
pub fn octant_offset(oct: usize, quarter: f32) -> Vec3 {
    Vec3::new(
        if oct & 1 != 0 { quarter } else { -quarter },
        if oct & 4 != 0 { -quarter } else { quarter },
        if oct & 2 != 0 { quarter } else { -quarter },
    )
}

/// Componentwise sign with a zero mapping to +1, per the grow direction rule.
pub fn sign_or_positive(v: Vec3) -> Vec3 {
    Vec3::new(
        if v.x < 0.0 { -1.0 } else { 1.0 },
        if v.y < 0.0 { -1.0 } else { 1.0 },
        if v.z < 0.0 { -1.0 } else { 1.0 },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn octant_of_and_offset_are_inverses() {
        let center = Vec3::new(1.0, 2.0, 3.0);
        let quarter = 2.5;
        for oct in 0..8 {
            let point = center + octant_offset(oct, quarter);
            assert_eq!(octant_of(center, point), oct, "round-trip failed for octant {oct}");
        }
    }

    #[test]
    fn sign_or_positive_treats_zero_as_positive() {
        let s = sign_or_positive(Vec3::ZERO);
        assert_eq!(s, Vec3::new(1.0, 1.0, 1.0));
        let s2 = sign_or_positive(Vec3::new(-1.0, 2.0, -0.5));
        assert_eq!(s2, Vec3::new(-1.0, 1.0, -1.0));
    }
}
