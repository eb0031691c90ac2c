// Host-side tests for the morph scheduler and its easing helpers.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tree_core::morph::*;
use tree_core::pool::ScenePools;
use tree_core::*;

const DT: f32 = 1.0 / 60.0;

fn small_pools(seed: u64) -> (SceneConfig, ScenePools) {
    let mut config = SceneConfig::for_preset(QualityPreset::Low);
    config.foliage.count = 200;
    config.ornaments.count = 24;
    config.props.count = 30;
    config.lights.count = 40;
    let mut rng = StdRng::seed_from_u64(seed);
    let pools = ScenePools::new(&config, &mut rng);
    (config, pools)
}

#[test]
fn damp_is_identity_at_zero_dt_and_lands_on_target() {
    assert_eq!(damp(2.0, 10.0, 3.0, 0.0), 2.0);
    assert!((damp(2.0, 10.0, 3.0, 100.0) - 10.0).abs() < 1e-5);
    // negative dt never moves backwards
    assert_eq!(damp(2.0, 10.0, 3.0, -1.0), 2.0);
}

#[test]
fn damp_never_overshoots() {
    for &dt in &[0.001_f32, 0.016, 0.1, 0.5, 2.0] {
        let v = damp(0.0, 1.0, 4.0, dt);
        assert!((0.0..=1.0).contains(&v), "dt {dt} -> {v}");
    }
}

#[test]
fn damp_is_frame_rate_independent() {
    // two half steps equal one full step
    let one = damp(0.0, 1.0, 2.5, 0.2);
    let half = damp(damp(0.0, 1.0, 2.5, 0.1), 1.0, 2.5, 0.1);
    assert!((one - half).abs() < 1e-5);
}

#[test]
fn damp_angle_takes_shortest_arc() {
    let start = 3.0_f32;
    let target = -3.0_f32; // 0.28 rad away through +pi
    let v = damp_angle(start, target, 5.0, 0.05);
    assert!(v > start, "should move forward through pi, got {v}");

    // crossing pi comes back wrapped instead of drifting past it
    let v = damp_angle(start, target, 5.0, 10.0);
    assert!((v - target).abs() < 1e-4, "got {v}");
}

#[test]
fn damp_angle_settles_near_target_from_far_windings() {
    let v = damp_angle(6.3, 0.05, 5.0, 10.0);
    assert!((v - 0.05).abs() < 1e-4, "got {v}");
    assert_eq!(wrap_angle(std::f32::consts::PI), -std::f32::consts::PI);
}

#[test]
fn ease_in_out_cubic_endpoints_and_symmetry() {
    assert_eq!(ease_in_out_cubic(0.0), 0.0);
    assert_eq!(ease_in_out_cubic(1.0), 1.0);
    assert!((ease_in_out_cubic(0.5) - 0.5).abs() < 1e-6);
    for i in 0..=10 {
        let t = i as f32 / 10.0;
        let a = ease_in_out_cubic(t);
        let b = 1.0 - ease_in_out_cubic(1.0 - t);
        assert!((a - b).abs() < 1e-5);
    }
    // clamped input
    assert_eq!(ease_in_out_cubic(-2.0), 0.0);
    assert_eq!(ease_in_out_cubic(3.0), 1.0);
}

#[test]
fn foliage_vertex_stays_near_blend() {
    let rest = Vec3::new(10.0, 0.0, 0.0);
    let target = Vec3::new(0.0, 5.0, 0.0);
    for t in [0.0_f32, 1.7, 42.0] {
        let at_rest = foliage_vertex(rest, target, 0.0, t, 0.3);
        let at_target = foliage_vertex(rest, target, 1.0, t, 0.3);
        let jitter = constants::FOLIAGE_JITTER * 3.0_f32.sqrt() + 1e-5;
        assert!(at_rest.distance(rest) <= jitter);
        assert!(at_target.distance(target) <= jitter);
    }
}

#[test]
fn foliage_tint_brightens_with_progress() {
    let dim = foliage_tint(0.0);
    let bright = foliage_tint(1.0);
    assert!(bright.length() > dim.length());
    assert_eq!(dim, Vec3::from_array(constants::FOLIAGE_DIM));
}

#[test]
fn ornament_crossfade_endpoints() {
    let photo = ornament_crossfade(0.0, 1.0, 0.0);
    assert_eq!(photo.photo_scale, 1.0);
    assert_eq!(photo.photo_opacity, 1.0);
    assert_eq!(photo.glow_scale, 0.0);
    assert_eq!(photo.glow_intensity, 0.0);

    let glow = ornament_crossfade(1.0, 1.0, 0.0);
    assert!((glow.photo_scale - 0.2).abs() < 1e-6);
    assert_eq!(glow.photo_opacity, 0.0);
    assert!((glow.glow_scale - 0.6).abs() < 1e-6);
    assert!(glow.glow_intensity > 0.0);
}

#[test]
fn ornament_glow_pulses_are_not_in_lockstep() {
    let a = ornament_crossfade(1.0, 2.0, 0.0).glow_intensity;
    let b = ornament_crossfade(1.0, 2.0, 1.5).glow_intensity;
    assert!((a - b).abs() > 1e-3);
}

#[test]
fn light_intensity_dim_in_chaos_bright_when_formed() {
    for phase in [0.0_f32, 1.0, 2.0, 4.0] {
        let chaos = light_intensity_target(SceneMode::Chaos, 3.0, phase);
        let formed = light_intensity_target(SceneMode::Formed, 3.0, phase);
        assert!(chaos < 0.1);
        assert!(formed > 0.5, "formed light too dim: {formed}");
    }
}

#[test]
fn formed_mode_converges_every_instance() {
    let (config, mut pools) = small_pools(21);
    let scheduler = MorphScheduler::new(&config);
    let mut time = 0.0;
    for _ in 0..(60 * 30) {
        time += DT;
        scheduler.step(&mut pools, SceneMode::Formed, DT, time);
    }
    let eps = 1e-3;
    for (c, t) in pools.props.positions.current.iter().zip(&pools.props.positions.target) {
        assert!(c.distance(*t) < eps);
    }
    for (c, t) in pools.lights.positions.current.iter().zip(&pools.lights.positions.target) {
        assert!(c.distance(*t) < eps);
    }
    for (c, t) in pools
        .ornaments
        .positions
        .current
        .iter()
        .zip(&pools.ornaments.positions.target)
    {
        assert!(c.distance(*t) < eps);
    }
    assert!((pools.foliage.progress - 1.0).abs() < eps);
    assert!((pools.topper.scale - 1.0).abs() < eps);
    for p in &pools.ornaments.morph_progress {
        assert!(p.abs() < eps, "ornament should show its photo when formed");
    }
}

#[test]
fn chaos_mode_returns_to_scattered_positions() {
    let (config, mut pools) = small_pools(22);
    let scheduler = MorphScheduler::new(&config);
    for _ in 0..600 {
        scheduler.step(&mut pools, SceneMode::Formed, DT, 0.0);
    }
    for _ in 0..(60 * 30) {
        scheduler.step(&mut pools, SceneMode::Chaos, DT, 0.0);
    }
    for (c, t) in pools.props.positions.current.iter().zip(&pools.props.positions.chaos) {
        assert!(c.distance(*t) < 1e-3);
    }
    assert!(pools.foliage.progress < 1e-3);
    assert!(pools.topper.scale < 1e-3);
}

#[test]
fn mode_change_continues_from_current_position() {
    let (config, mut pools) = small_pools(23);
    let scheduler = MorphScheduler::new(&config);
    // half-way toward the tree
    for _ in 0..20 {
        scheduler.step(&mut pools, SceneMode::Formed, DT, 0.0);
    }
    let before = pools.props.positions.current.clone();
    scheduler.step(&mut pools, SceneMode::Chaos, DT, 0.0);
    let t = 1.0 - (-config.props.damping * DT).exp();
    for (i, prev) in before.iter().enumerate() {
        let expected = prev.lerp(pools.props.positions.chaos[i], t);
        assert!(pools.props.positions.current[i].distance(expected) < 1e-4);
    }
}

#[test]
fn back_to_back_toggles_never_jump() {
    let (config, mut pools) = small_pools(24);
    let scheduler = MorphScheduler::new(&config);
    let tiny = 1e-4;
    let modes = [SceneMode::Chaos, SceneMode::Formed, SceneMode::Chaos, SceneMode::Formed];
    for mode in modes {
        for _ in 0..5 {
            scheduler.step(&mut pools, mode, DT, 0.0);
        }
        // displacement vanishes as the step shrinks, even right after a toggle
        let before = pools.clone();
        scheduler.step(&mut pools, mode.toggled(), tiny, 0.0);
        let max_move = before
            .lights
            .positions
            .current
            .iter()
            .zip(&pools.lights.positions.current)
            .chain(
                before
                    .ornaments
                    .positions
                    .current
                    .iter()
                    .zip(&pools.ornaments.positions.current),
            )
            .map(|(a, b)| a.distance(*b))
            .fold(0.0_f32, f32::max);
        assert!(max_move < 0.05, "jump of {max_move} after toggle");
        assert!((pools.foliage.progress - before.foliage.progress).abs() < 1e-3);
        assert!((pools.topper.scale - before.topper.scale).abs() < 1e-3);
    }
}

#[test]
fn topper_spins_regardless_of_mode() {
    let (config, mut pools) = small_pools(25);
    let scheduler = MorphScheduler::new(&config);
    let r0 = pools.topper.rotation_y;
    scheduler.step(&mut pools, SceneMode::Chaos, 0.1, 0.0);
    let r1 = pools.topper.rotation_y;
    scheduler.step(&mut pools, SceneMode::Formed, 0.1, 0.0);
    let r2 = pools.topper.rotation_y;
    assert!(r1 > r0 && r2 > r1);
}

#[test]
fn formed_ornaments_face_outward() {
    let (config, mut pools) = small_pools(26);
    let scheduler = MorphScheduler::new(&config);
    for _ in 0..(60 * 20) {
        scheduler.step(&mut pools, SceneMode::Formed, DT, 0.0);
    }
    let o = &pools.ornaments;
    for i in 0..o.positions.len() {
        let p = o.positions.current[i];
        let facing = p.x.atan2(p.z);
        let diff = (o.rotation[i].y - facing + std::f32::consts::PI)
            .rem_euclid(std::f32::consts::TAU)
            - std::f32::consts::PI;
        assert!(diff.abs() < 1e-2, "ornament {i} off by {diff}");
        assert!(o.rotation[i].x.abs() <= constants::ORNAMENT_WOBBLE + 1e-3);
    }
}

#[test]
fn spinning_rotations_stay_bounded() {
    let (config, mut pools) = small_pools(28);
    let scheduler = MorphScheduler::new(&config);
    for frame in 0..(60 * 60) {
        let mode = if frame < 60 * 50 {
            SceneMode::Chaos
        } else {
            SceneMode::Formed
        };
        scheduler.step(&mut pools, mode, DT, frame as f32 * DT);
    }
    let pi = std::f32::consts::PI;
    for r in pools.ornaments.rotation.iter().chain(&pools.props.rotation) {
        assert!(r.abs().max_element() <= pi + 1e-4, "rotation {r:?}");
    }
}

#[test]
fn non_finite_delta_is_ignored() {
    let (config, mut pools) = small_pools(27);
    let scheduler = MorphScheduler::new(&config);
    let before = pools.props.positions.current.clone();
    scheduler.step(&mut pools, SceneMode::Formed, f32::NAN, 0.0);
    assert_eq!(before, pools.props.positions.current);
}
