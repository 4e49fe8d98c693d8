use super::*;
use crate::foundation::math::{all_finite, bounding_radius, mean_radius, seeded_rng};

type Generator = fn(usize, &mut crate::foundation::math::SessionRng) -> Vec<f32>;

const ALL: [(&str, Generator); 8] = [
    ("vortex", vortex),
    ("koch", koch),
    ("cardioid", cardioid),
    ("butterfly", butterfly),
    ("archimedean", archimedean),
    ("catenary", catenary),
    ("lemniscate", lemniscate),
    ("rose", rose),
];

fn point(coords: &[f32], i: usize) -> [f32; 3] {
    [coords[i * 3], coords[i * 3 + 1], coords[i * 3 + 2]]
}

#[test]
fn every_generator_fills_exactly_three_floats_per_particle() {
    for seed in 0..16 {
        for n in [0usize, 1, 4, 1000] {
            for (name, generate) in ALL {
                let coords = generate(n, &mut seeded_rng(seed));
                assert_eq!(coords.len(), 3 * n, "{name} with {n} particles, seed {seed}");
                assert!(
                    all_finite(&coords),
                    "{name} produced a non-finite value with seed {seed}"
                );
            }
        }
    }
}

#[test]
fn vortex_is_flat_and_grows_outward() {
    let coords = vortex(2000, &mut seeded_rng(11));
    for i in 0..2000 {
        let [_, y, _] = point(&coords, i);
        assert!(y.abs() <= 1.0);
    }
    let inner = mean_radius(&coords[..300]);
    let outer = mean_radius(&coords[coords.len() - 300..]);
    assert!(inner < 5.0, "inner ring radius {inner}");
    assert!(outer > 25.0, "outer ring radius {outer}");
}

#[test]
fn koch_radius_stays_between_base_and_spike_tip() {
    let coords = koch(5000, &mut seeded_rng(5));
    for i in 0..5000 {
        let [x, y, z] = point(&coords, i);
        let r = (x * x + y * y + z * z).sqrt();
        assert!((14.5..=20.5).contains(&r), "radius {r}");
    }
}

#[test]
fn cardioid_has_fixed_thickness_and_offset() {
    let coords = cardioid(5000, &mut seeded_rng(8));
    for i in 0..5000 {
        let [x, y, z] = point(&coords, i);
        assert!(z.abs() <= 2.5);
        // The curve never reaches past r = 20 and always hangs around y = 5.
        let r = (x * x + (y - 5.0) * (y - 5.0)).sqrt();
        assert!(r <= 20.0 + 1e-3, "cardioid radius {r}");
    }
}

#[test]
fn archimedean_climbs_linearly_from_bottom_to_top() {
    let n = 1000;
    let coords = archimedean(n, &mut seeded_rng(2));
    let [_, first_y, _] = point(&coords, 0);
    let [_, last_y, _] = point(&coords, n - 1);
    assert!((first_y + 20.0).abs() <= 0.75);
    assert!((last_y - 20.0).abs() <= 0.75 + 0.04);
}

#[test]
fn catenary_chains_sit_at_separate_depths() {
    let coords = catenary(1000, &mut seeded_rng(4));
    for i in 0..1000 {
        let [_, _, z] = point(&coords, i);
        let expected = ((i % 5) as f32 - 2.0) * 5.0;
        assert!((z - expected).abs() <= 0.75, "particle {i} depth {z}");
    }
}

#[test]
fn planar_curves_keep_their_envelope() {
    for (name, generate, envelope) in [
        ("lemniscate", lemniscate as Generator, 15.0f32),
        ("rose", rose as Generator, 15.0f32),
    ] {
        let coords = generate(4000, &mut seeded_rng(9));
        for i in 0..4000 {
            let [x, y, z] = point(&coords, i);
            assert!((x * x + y * y).sqrt() <= envelope + 1.1, "{name} escaped");
            assert!(z.abs() <= 2.0 + 0.75, "{name} depth {z}");
        }
    }
}

#[test]
fn structure_is_seed_independent() {
    for (name, generate) in ALL {
        let a = bounding_radius(&generate(3000, &mut seeded_rng(1)));
        let b = bounding_radius(&generate(3000, &mut seeded_rng(99)));
        let rel = (a - b).abs() / a.max(b);
        assert!(rel < 0.1, "{name}: {a} vs {b}");
    }
}

#[test]
fn same_seed_gives_identical_buffers() {
    for (name, generate) in ALL {
        assert_eq!(
            generate(500, &mut seeded_rng(42)),
            generate(500, &mut seeded_rng(42)),
            "{name}"
        );
    }
}
