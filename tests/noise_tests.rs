use terrain_ngin::terrain::{
    NoiseField,
    noise::{PERIOD, smoothstep},
};

mod common;
use common::test_utils::*;

#[test]
fn samples_stay_in_unit_range() {
    let noise = NoiseField::new();
    let mut x = -40.0f32;
    while x < 40.0 {
        let mut y = -40.0f32;
        while y < 40.0 {
            let n = noise.sample(x, y);
            assert!((0.0..=1.0).contains(&n), "sample({}, {}) = {}", x, y, n);
            y += 0.37;
        }
        x += 0.41;
    }
}

#[test]
fn field_repeats_every_period() {
    let noise = NoiseField::new();
    let p = PERIOD as f32;
    // Dyadic offsets survive the +256 exactly in f32.
    for &(x, y) in &[(0.5, 0.25), (3.75, 10.125), (100.0, 7.5), (255.5, 0.0)] {
        assert_eq!(noise.sample(x, y), noise.sample(x + p, y));
        assert_eq!(noise.sample(x, y), noise.sample(x, y + p));
    }
}

#[test]
fn sampling_is_deterministic() {
    let a = NoiseField::new();
    let b = NoiseField::default();
    for i in 0..200 {
        let x = i as f32 * 0.173;
        let y = i as f32 * 0.291;
        assert_eq!(a.sample(x, y), b.sample(x, y));
    }
}

#[test]
fn lattice_points_hit_the_hash() {
    let noise = NoiseField::new();
    for (ix, iy) in [(0, 0), (1, 0), (7, 3), (200, 100)] {
        let expected = NoiseField::hash(ix, iy) as f32 / 255.0;
        assert_close(noise.sample(ix as f32, iy as f32), expected, EPS);
    }
}

#[test]
fn hash_uses_fixed_constants() {
    assert_eq!(NoiseField::hash(0, 0), 0);
    assert_eq!(NoiseField::hash(1, 0), 131);
    // (1 + 57) * 131 = 7598; 7598 & 255 = 174
    assert_eq!(NoiseField::hash(1, 1), 174);
}

#[test]
fn smoothstep_is_flat_at_the_ends() {
    assert_eq!(smoothstep(0.0), 0.0);
    assert_eq!(smoothstep(1.0), 1.0);
    assert_close(smoothstep(0.5), 0.5, EPS);
    assert!(smoothstep(0.01) < 0.01);
}

#[test]
fn negative_coordinates_interpolate_inside_their_cell() {
    let noise = NoiseField::new();
    // -0.5 lies between lattice columns -1 and 0.
    let left = noise.sample(-1.0, 0.0);
    let right = noise.sample(0.0, 0.0);
    let mid = noise.sample(-0.5, 0.0);
    assert_close(mid, (left + right) * 0.5, EPS);
}
