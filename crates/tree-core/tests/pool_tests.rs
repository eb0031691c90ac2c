// Host-side tests for instance pools and scene recreation.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tree_core::shape::axial_distance;
use tree_core::*;

const EPS: f32 = 1e-3;

fn small_config() -> SceneConfig {
    let mut config = SceneConfig::for_preset(QualityPreset::Low);
    config.foliage.count = 800;
    config.ornaments.count = 40;
    config.props.count = 60;
    config.lights.count = 90;
    config
}

fn cone_bound(config: &SceneConfig, y: f32) -> f32 {
    let h = config.tree_height;
    config.base_radius * (1.0 - (y + h / 2.0) / h)
}

#[test]
fn pools_have_configured_counts_and_matching_arrays() {
    let config = small_config();
    let mut rng = StdRng::seed_from_u64(1);
    let pools = pool::ScenePools::new(&config, &mut rng);
    let c = pools.counts();
    assert_eq!(c.foliage, 800);
    assert_eq!(c.ornaments, 40);
    assert_eq!(c.props, 60);
    assert_eq!(c.lights, 90);
    assert!(pools.is_consistent());
    assert_eq!(pools.total_instances(), 800 + 40 * 2 + 60 + 90 + 1);
}

#[test]
fn chaos_positions_within_category_radius() {
    let config = small_config();
    let mut rng = StdRng::seed_from_u64(2);
    let pools = pool::ScenePools::new(&config, &mut rng);
    for p in &pools.foliage.rest {
        assert!(p.length() <= config.foliage.chaos_radius + EPS);
    }
    for p in &pools.ornaments.positions.chaos {
        assert!(p.length() <= config.ornaments.chaos_radius + EPS);
    }
    for p in &pools.props.positions.chaos {
        assert!(p.length() <= config.props.chaos_radius + EPS);
    }
    for p in &pools.lights.positions.chaos {
        assert!(p.length() <= config.lights.chaos_radius + EPS);
    }
}

#[test]
fn volumetric_targets_within_cone() {
    let config = small_config();
    let mut rng = StdRng::seed_from_u64(3);
    let pools = pool::ScenePools::new(&config, &mut rng);
    for p in pools
        .foliage
        .target
        .iter()
        .chain(pools.props.positions.target.iter())
    {
        assert!(axial_distance(*p) <= cone_bound(&config, p.y) + EPS, "{p:?}");
    }
}

#[test]
fn surface_targets_hug_outside_of_cone() {
    let config = small_config();
    let mut rng = StdRng::seed_from_u64(4);
    let pools = pool::ScenePools::new(&config, &mut rng);
    for p in pools
        .ornaments
        .positions
        .target
        .iter()
        .chain(pools.lights.positions.target.iter())
    {
        let expected = cone_bound(&config, p.y) + config.surface_offset;
        assert!((axial_distance(*p) - expected).abs() < EPS, "{p:?}");
    }
}

#[test]
fn instances_start_scattered() {
    let config = small_config();
    let mut rng = StdRng::seed_from_u64(5);
    let pools = pool::ScenePools::new(&config, &mut rng);
    assert_eq!(pools.props.positions.current, pools.props.positions.chaos);
    assert_eq!(pools.foliage.progress, 0.0);
    assert_eq!(pools.topper.scale, 0.0);
}

#[test]
fn ornament_weights_within_range() {
    let config = small_config();
    let mut rng = StdRng::seed_from_u64(6);
    let pools = pool::ScenePools::new(&config, &mut rng);
    for w in &pools.ornaments.weight {
        assert!(*w >= constants::ORNAMENT_WEIGHT_MIN && *w < constants::ORNAMENT_WEIGHT_MAX);
    }
}

#[test]
fn quality_switch_recreates_pools_with_new_counts() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut scene = Scene::new(QualityPreset::High, &mut rng);
    assert_eq!(scene.pools().counts(), QualityPreset::High.counts());
    for _ in 0..30 {
        scene.step(SceneMode::Formed, 1.0 / 60.0);
    }
    assert!(scene.pools().foliage.progress > 0.0);

    scene.rebuild(QualityPreset::Low, &mut rng);
    assert_eq!(scene.preset(), QualityPreset::Low);
    assert_eq!(scene.pools().counts(), QualityPreset::Low.counts());
    assert!(scene.pools().is_consistent());
    // fresh pools, not a resized copy of the old state
    assert_eq!(scene.pools().foliage.progress, 0.0);
    assert_eq!(scene.time(), 0.0);

    let mut out = Vec::new();
    scene.write_instances(&mut out);
    assert_eq!(out.len(), scene.instance_count());
}

#[test]
fn write_instances_length_is_stable_across_frames() {
    let mut rng = StdRng::seed_from_u64(8);
    let mut scene = Scene::with_config(small_config(), &mut rng);
    let mut out = Vec::new();
    for mode in [SceneMode::Formed, SceneMode::Chaos, SceneMode::Formed] {
        scene.step(mode, 0.1);
        scene.write_instances(&mut out);
        assert_eq!(out.len(), scene.instance_count());
        assert!(out.iter().all(|d| d.pos.iter().all(|v| v.is_finite())));
    }
    // topper is last and shaped as a star
    assert_eq!(out.last().map(|d| d.shape), Some(SHAPE_STAR));
}
