use super::*;
use crate::foundation::math::{all_finite, bounding_radius, seeded_rng};

#[test]
fn seed_cloud_fills_a_bounded_sphere() {
    let (positions, colors) = seed_cloud(4000, &mut seeded_rng(0));
    assert_eq!(positions.len(), 12_000);
    assert_eq!(colors.particle_count(), 4000);
    assert!(all_finite(&positions));
    assert!(bounding_radius(&positions) <= 40.0 + 1e-3);
}

#[test]
fn colors_are_pale_blue() {
    let (_, colors) = seed_cloud(2000, &mut seeded_rng(12));
    for i in 0..colors.particle_count() {
        let [r, g, b] = colors.rgb(i);
        assert!((0.5..1.0 + f32::EPSILON).contains(&r));
        assert!((0.7..1.0 + f32::EPSILON).contains(&g));
        assert_eq!(b, 1.0);
    }
}
