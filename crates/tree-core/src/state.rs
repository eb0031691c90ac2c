//! Scene mode controller and the orbit camera that reads it.
//!
//! These types avoid platform-specific APIs. The web frontend shares one
//! [`SceneState`] between the render loop (reader) and the inference loop and
//! UI handlers (writers).

use crate::constants::{AUTO_ROTATE_SPEED, CAMERA_DISTANCE, CAMERA_HEIGHT};
use glam::{Mat4, Vec3};
use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SceneMode {
    /// Scattered particle cloud.
    #[default]
    Chaos,
    /// Assembled tree.
    Formed,
}

impl SceneMode {
    pub fn toggled(self) -> Self {
        match self {
            SceneMode::Chaos => SceneMode::Formed,
            SceneMode::Formed => SceneMode::Chaos,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SceneMode::Chaos => "CHAOS",
            SceneMode::Formed => "FORMED",
        }
    }
}

impl fmt::Display for SceneMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authoritative mode plus hand-driven rotation speed.
///
/// Writers per field:
/// - `mode`: UI toggle and gesture mode commands, never both in one turn of
///   the event loop.
/// - `rotation_speed`: the inference loop only (overwritten every processed
///   frame, zeroed when no hand is visible or inference stops).
///
/// The render loop only reads.
#[derive(Clone, Debug, Default)]
pub struct SceneState {
    mode: SceneMode,
    rotation_speed: f32,
}

impl SceneState {
    pub fn new(mode: SceneMode) -> Self {
        Self {
            mode,
            rotation_speed: 0.0,
        }
    }

    pub fn mode(&self) -> SceneMode {
        self.mode
    }

    pub fn rotation_speed(&self) -> f32 {
        self.rotation_speed
    }

    /// Explicit UI toggle; flips unconditionally.
    pub fn toggle_mode(&mut self) -> SceneMode {
        self.mode = self.mode.toggled();
        log::info!("[scene] mode toggled -> {}", self.mode);
        self.mode
    }

    /// Gesture command. Returns `true` when the mode actually changed;
    /// repeating the current mode is a no-op.
    pub fn apply_command(&mut self, mode: SceneMode) -> bool {
        if self.mode == mode {
            return false;
        }
        self.mode = mode;
        log::info!("[scene] gesture set mode -> {}", mode);
        true
    }

    pub fn set_rotation_speed(&mut self, speed: f32) {
        self.rotation_speed = if speed.is_finite() { speed } else { 0.0 };
    }

    /// Idle spin is only allowed when no hand is steering and the tree is up.
    pub fn auto_rotate_enabled(&self) -> bool {
        self.rotation_speed == 0.0 && self.mode == SceneMode::Formed
    }
}

/// Camera orbiting the tree axis, looking at the origin.
#[derive(Clone, Debug)]
pub struct OrbitCamera {
    pub azimuth: f32,
    pub distance: f32,
    pub height: f32,
    pub target: Vec3,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            azimuth: 0.0,
            distance: CAMERA_DISTANCE,
            height: CAMERA_HEIGHT,
            target: Vec3::ZERO,
            fovy_radians: std::f32::consts::FRAC_PI_4,
            znear: 0.1,
            zfar: 200.0,
        }
    }
}

impl OrbitCamera {
    /// Advance the azimuth by the hand-driven speed, or by the idle spin when
    /// auto-rotate is enabled.
    pub fn advance(&mut self, state: &SceneState, dt_sec: f32) {
        let speed = if state.auto_rotate_enabled() {
            AUTO_ROTATE_SPEED
        } else {
            state.rotation_speed()
        };
        self.azimuth = (self.azimuth + speed * dt_sec).rem_euclid(std::f32::consts::TAU);
    }

    pub fn eye(&self) -> Vec3 {
        Vec3::new(
            self.distance * self.azimuth.sin(),
            self.height,
            self.distance * self.azimuth.cos(),
        )
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, aspect.max(1e-3), self.znear, self.zfar)
    }

    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }
}
