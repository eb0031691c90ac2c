// Host-side tests for the scene mode controller and orbit camera.

use tree_core::*;

#[test]
fn toggle_flips_unconditionally() {
    let mut s = SceneState::default();
    assert_eq!(s.mode(), SceneMode::Chaos);
    assert_eq!(s.toggle_mode(), SceneMode::Formed);
    assert_eq!(s.toggle_mode(), SceneMode::Chaos);
}

#[test]
fn repeated_commands_are_idempotent() {
    let mut s = SceneState::new(SceneMode::Chaos);
    assert!(s.apply_command(SceneMode::Formed));
    assert!(!s.apply_command(SceneMode::Formed));
    assert_eq!(s.mode(), SceneMode::Formed);
    assert!(s.apply_command(SceneMode::Chaos));
}

#[test]
fn auto_rotate_only_when_still_and_formed() {
    let mut s = SceneState::new(SceneMode::Formed);
    assert!(s.auto_rotate_enabled());
    s.set_rotation_speed(0.3);
    assert!(!s.auto_rotate_enabled());
    s.set_rotation_speed(0.0);
    s.toggle_mode();
    assert!(!s.auto_rotate_enabled());
}

#[test]
fn non_finite_rotation_is_zeroed() {
    let mut s = SceneState::default();
    s.set_rotation_speed(f32::INFINITY);
    assert_eq!(s.rotation_speed(), 0.0);
}

#[test]
fn camera_follows_hand_speed_or_idles() {
    let mut cam = OrbitCamera::default();
    let mut s = SceneState::new(SceneMode::Chaos);

    // chaos, no hand: camera holds still
    cam.advance(&s, 1.0);
    assert_eq!(cam.azimuth, 0.0);

    // formed, no hand: idle spin
    s.apply_command(SceneMode::Formed);
    cam.advance(&s, 1.0);
    assert!((cam.azimuth - constants::AUTO_ROTATE_SPEED).abs() < 1e-6);

    // hand steering overrides idle spin
    let before = cam.azimuth;
    s.set_rotation_speed(0.5);
    cam.advance(&s, 0.5);
    assert!((cam.azimuth - before - 0.25).abs() < 1e-5);
}

#[test]
fn camera_eye_orbits_at_fixed_distance() {
    let mut cam = OrbitCamera::default();
    for i in 0..8 {
        cam.azimuth = i as f32 * 0.8;
        let eye = cam.eye();
        let horizontal = (eye.x * eye.x + eye.z * eye.z).sqrt();
        assert!((horizontal - cam.distance).abs() < 1e-3);
        assert_eq!(eye.y, cam.height);
    }
    let m = cam.view_proj(16.0 / 9.0);
    assert!(m.is_finite());
}
