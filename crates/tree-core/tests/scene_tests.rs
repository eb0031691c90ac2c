// Host-side tests for GPU instance packing.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tree_core::*;

fn small_scene(seed: u64) -> Scene {
    let mut config = SceneConfig::for_preset(QualityPreset::Low);
    config.foliage.count = 200;
    config.ornaments.count = 12;
    config.props.count = 10;
    config.lights.count = 20;
    Scene::with_config(config, &mut StdRng::seed_from_u64(seed))
}

fn packed(scene: &Scene) -> Vec<InstanceData> {
    let mut out = Vec::new();
    scene.write_instances(&mut out);
    out
}

#[test]
fn instance_layout_matches_vertex_attributes() {
    assert_eq!(std::mem::size_of::<InstanceData>(), 48);
    assert_eq!(std::mem::align_of::<InstanceData>(), 4);
}

#[test]
fn categories_are_packed_in_order() {
    let scene = small_scene(1);
    let out = packed(&scene);
    assert_eq!(out.len(), 200 + 12 * 2 + 10 + 20 + 1);

    assert!(out[..200].iter().all(|i| i.shape == SHAPE_GLOW));
    // each ornament: photo card then its glow at the same spot
    for pair in out[200..224].chunks(2) {
        assert_eq!(pair[0].shape, SHAPE_CARD);
        assert_eq!(pair[1].shape, SHAPE_GLOW);
        assert_eq!(pair[0].pos, pair[1].pos);
    }
    assert!(out[224..234].iter().all(|i| i.shape == SHAPE_CARD));
    assert!(out[234..254].iter().all(|i| i.shape == SHAPE_GLOW));
    assert_eq!(out.last().map(|i| i.shape), Some(SHAPE_STAR));
}

#[test]
fn scattered_ornaments_show_glow_not_photo() {
    let scene = small_scene(2);
    let out = packed(&scene);
    for pair in out[200..224].chunks(2) {
        assert!(pair[0].color[3].abs() < 1e-6, "photo should be invisible");
        assert!(pair[1].size > 0.0);
    }
    // topper hidden until formed
    assert_eq!(out.last().map(|i| i.size), Some(0.0));
}

#[test]
fn formed_ornaments_show_photo_and_topper() {
    let mut scene = small_scene(3);
    for _ in 0..600 {
        scene.step(SceneMode::Formed, 1.0 / 60.0);
    }
    let out = packed(&scene);
    for pair in out[200..224].chunks(2) {
        assert!(pair[0].color[3] > 0.95, "photo opacity {}", pair[0].color[3]);
        assert!(pair[1].size < 0.05);
    }
    assert!(out.last().map(|i| i.size).unwrap_or(0.0) > 1.5);
}

#[test]
fn packing_reuses_the_buffer() {
    let scene = small_scene(4);
    let mut out = vec![InstanceData::default(); 10_000];
    scene.write_instances(&mut out);
    assert_eq!(out.len(), scene.instance_count());
    assert!(out.iter().all(|i| i.pos.iter().all(|c| c.is_finite())));
}
