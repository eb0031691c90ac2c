// Host-side tests for the position distributions.
// Randomness is unseeded in the app, so these check bounds and rough shape,
// never exact coordinates.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tree_core::shape::*;

const EPS: f32 = 1e-4;

#[test]
fn sphere_samples_stay_inside_radius() {
    let mut rng = StdRng::seed_from_u64(7);
    for radius in [0.5_f32, 3.0, 22.0] {
        for _ in 0..5_000 {
            let p = sample_in_sphere(&mut rng, radius);
            assert!(p.length() <= radius + EPS, "{p:?} outside radius {radius}");
        }
    }
}

#[test]
fn sphere_samples_fill_the_volume() {
    // Uniform in volume: about 1/8 of points fall within half the radius.
    let mut rng = StdRng::seed_from_u64(11);
    let n = 20_000;
    let inner = (0..n)
        .filter(|_| sample_in_sphere(&mut rng, 10.0).length() < 5.0)
        .count();
    let frac = inner as f32 / n as f32;
    assert!((frac - 0.125).abs() < 0.02, "inner fraction {frac}");
}

#[test]
fn cone_radius_tapers_linearly() {
    let h = 14.0;
    let r = 5.5;
    assert!((cone_radius_at(-h / 2.0, h, r) - r).abs() < EPS);
    assert!(cone_radius_at(h / 2.0, h, r).abs() < EPS);
    assert!((cone_radius_at(0.0, h, r) - r / 2.0).abs() < EPS);
    // clamped outside the height range
    assert!((cone_radius_at(-100.0, h, r) - r).abs() < EPS);
    assert!(cone_radius_at(100.0, h, r).abs() < EPS);
}

#[test]
fn cone_samples_stay_inside_cone() {
    let mut rng = StdRng::seed_from_u64(3);
    let (h, r) = (14.0_f32, 5.5_f32);
    for _ in 0..10_000 {
        let p = sample_in_cone(&mut rng, h, r);
        assert!(p.y >= -h / 2.0 - EPS && p.y <= h / 2.0 + EPS);
        let bound = r * (1.0 - (p.y + h / 2.0) / h);
        assert!(
            axial_distance(p) <= bound + EPS,
            "{p:?} outside cone (bound {bound})"
        );
    }
}

#[test]
fn surface_samples_sit_at_offset_radius() {
    let mut rng = StdRng::seed_from_u64(5);
    let (h, r, off) = (14.0_f32, 5.5_f32, 0.35_f32);
    for _ in 0..2_000 {
        let p = sample_on_cone_surface(&mut rng, h, r, off);
        let expected = cone_radius_at(p.y, h, r) + off;
        assert!((axial_distance(p) - expected).abs() < 1e-3);
    }
}

#[test]
fn cone_heights_cover_full_range() {
    let mut rng = StdRng::seed_from_u64(9);
    let ys: Vec<f32> = (0..5_000)
        .map(|_| sample_in_cone(&mut rng, 10.0, 2.0).y)
        .collect();
    let min = ys.iter().cloned().fold(f32::MAX, f32::min);
    let max = ys.iter().cloned().fold(f32::MIN, f32::max);
    assert!(min < -4.5 && max > 4.5, "heights span {min}..{max}");
}
