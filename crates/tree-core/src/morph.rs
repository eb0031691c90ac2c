//! Per-frame morph scheduler.
//!
//! Every instance approaches the goal of the current [`SceneMode`] with an
//! exponential, frame-rate independent step. No instance reads another
//! instance's state, so update order is irrelevant.

use crate::config::SceneConfig;
use crate::constants::*;
use crate::pool::ScenePools;
use crate::state::SceneMode;
use glam::Vec3;
use std::f32::consts::{PI, TAU};

/// Exponential approach of `current` toward `target` at rate `lambda` (1/s).
///
/// Continuous in `dt`; `dt == 0` returns `current` unchanged and large `dt`
/// lands on `target` without overshoot.
#[inline]
pub fn damp(current: f32, target: f32, lambda: f32, dt: f32) -> f32 {
    let t = 1.0 - (-lambda * dt.max(0.0)).exp();
    current + (target - current) * t
}

#[inline]
pub fn damp_vec3(current: Vec3, target: Vec3, lambda: f32, dt: f32) -> Vec3 {
    let t = 1.0 - (-lambda * dt.max(0.0)).exp();
    current.lerp(target, t)
}

/// Angle folded into `[-PI, PI)`.
#[inline]
pub fn wrap_angle(a: f32) -> f32 {
    (a + PI).rem_euclid(TAU) - PI
}

#[inline]
fn wrap_euler(r: Vec3) -> Vec3 {
    Vec3::new(wrap_angle(r.x), wrap_angle(r.y), wrap_angle(r.z))
}

/// Like [`damp`] but along the shortest arc between two angles. The result
/// is wrapped.
#[inline]
pub fn damp_angle(current: f32, target: f32, lambda: f32, dt: f32) -> f32 {
    let delta = wrap_angle(target - current);
    wrap_angle(damp(current, current + delta, lambda, dt))
}

#[inline]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) * 0.5
    }
}

/// Displaced foliage point: eased blend from rest to target plus a small
/// drift so the cloud never freezes.
#[inline]
pub fn foliage_vertex(rest: Vec3, target: Vec3, progress: f32, time: f32, phase: f32) -> Vec3 {
    let base = rest.lerp(target, ease_in_out_cubic(progress));
    let drift = Vec3::new(
        (time + phase).sin(),
        (time * 0.8 + phase).cos(),
        (time * 1.3 + phase * 0.5).sin(),
    );
    base + drift * FOLIAGE_JITTER
}

/// Point tint from dim (scattered) to bright (formed).
#[inline]
pub fn foliage_tint(progress: f32) -> Vec3 {
    Vec3::from_array(FOLIAGE_DIM).lerp(Vec3::from_array(FOLIAGE_BRIGHT), progress.clamp(0.0, 1.0))
}

/// Visual parameters of one ornament's photo/glow pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrnamentCrossfade {
    pub photo_scale: f32,
    pub photo_opacity: f32,
    pub glow_scale: f32,
    pub glow_intensity: f32,
}

pub fn ornament_crossfade(progress: f32, time: f32, pulse_phase: f32) -> OrnamentCrossfade {
    let p = progress.clamp(0.0, 1.0);
    let pulse = 1.5 + 0.8 * (time * 2.0 + pulse_phase).sin();
    OrnamentCrossfade {
        photo_scale: 1.0 - PHOTO_SHRINK * p,
        photo_opacity: 1.0 - p,
        glow_scale: GLOW_GROWTH * p,
        glow_intensity: p * pulse,
    }
}

/// Emissive target of a light: near zero while scattered, twinkling while
/// formed.
#[inline]
pub fn light_intensity_target(mode: SceneMode, time: f32, phase: f32) -> f32 {
    match mode {
        SceneMode::Chaos => LIGHT_IDLE_INTENSITY,
        SceneMode::Formed => LIGHT_PULSE_BASE + LIGHT_PULSE_SPAN * (time * LIGHT_PULSE_FREQ + phase).sin(),
    }
}

/// Ornament morph progress goal: photos on the tree, glow in the cloud.
#[inline]
pub fn ornament_progress_goal(mode: SceneMode) -> f32 {
    match mode {
        SceneMode::Formed => 0.0,
        SceneMode::Chaos => 1.0,
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MorphScheduler {
    pub foliage_rate: f32,
    pub ornament_rate: f32,
    pub prop_rate: f32,
    pub light_rate: f32,
}

impl MorphScheduler {
    pub fn new(config: &SceneConfig) -> Self {
        Self {
            foliage_rate: config.foliage.damping,
            ornament_rate: config.ornaments.damping,
            prop_rate: config.props.damping,
            light_rate: config.lights.damping,
        }
    }

    /// Advance every category by one frame of `delta` seconds; `time` is the
    /// elapsed wall-clock time used by the oscillators.
    pub fn step(&self, pools: &mut ScenePools, mode: SceneMode, delta: f32, time: f32) {
        let dt = if delta.is_finite() { delta.max(0.0) } else { 0.0 };

        let foliage_goal = match mode {
            SceneMode::Formed => 1.0,
            SceneMode::Chaos => 0.0,
        };
        pools.foliage.progress = damp(pools.foliage.progress, foliage_goal, self.foliage_rate, dt);

        self.step_ornaments(pools, mode, dt, time);
        self.step_props(pools, mode, dt);
        self.step_lights(pools, mode, dt, time);

        let topper = &mut pools.topper;
        let scale_goal = match mode {
            SceneMode::Formed => 1.0,
            SceneMode::Chaos => 0.0,
        };
        let t = (TOPPER_LERP_PER_SEC * dt).min(1.0);
        topper.scale += (scale_goal - topper.scale) * t;
        topper.rotation_y = (topper.rotation_y + TOPPER_SPIN_PER_SEC * dt).rem_euclid(TAU);
    }

    fn step_ornaments(&self, pools: &mut ScenePools, mode: SceneMode, dt: f32, time: f32) {
        let o = &mut pools.ornaments;
        let progress_goal = ornament_progress_goal(mode);
        for i in 0..o.positions.len() {
            let rate = self.ornament_rate * o.weight[i];
            let goal = o.positions.goal(mode, i);
            let pos = damp_vec3(o.positions.current[i], goal, rate, dt);
            o.positions.current[i] = pos;
            o.morph_progress[i] = damp(o.morph_progress[i], progress_goal, rate, dt);

            let rot = &mut o.rotation[i];
            match mode {
                SceneMode::Formed => {
                    let phase = o.pulse_phase[i];
                    let facing = pos.x.atan2(pos.z);
                    let wobble_x = (time * 1.5 + phase).sin() * ORNAMENT_WOBBLE;
                    let wobble_z = (time * 1.1 + phase * 1.7).cos() * ORNAMENT_WOBBLE;
                    rot.x = damp_angle(rot.x, wobble_x, rate * 2.0, dt);
                    rot.y = damp_angle(rot.y, facing, rate * 2.0, dt);
                    rot.z = damp_angle(rot.z, wobble_z, rate * 2.0, dt);
                }
                SceneMode::Chaos => {
                    *rot = wrap_euler(*rot + o.spin[i] * dt);
                }
            }
        }
    }

    fn step_props(&self, pools: &mut ScenePools, mode: SceneMode, dt: f32) {
        let p = &mut pools.props;
        let spin_factor = match mode {
            SceneMode::Chaos => 1.0,
            SceneMode::Formed => 0.15,
        };
        for i in 0..p.positions.len() {
            let goal = p.positions.goal(mode, i);
            p.positions.current[i] = damp_vec3(p.positions.current[i], goal, self.prop_rate, dt);
            p.rotation[i] = wrap_euler(p.rotation[i] + p.spin[i] * (dt * spin_factor));
        }
    }

    fn step_lights(&self, pools: &mut ScenePools, mode: SceneMode, dt: f32, time: f32) {
        let l = &mut pools.lights;
        for i in 0..l.positions.len() {
            let goal = l.positions.goal(mode, i);
            l.positions.current[i] = damp_vec3(l.positions.current[i], goal, self.light_rate, dt);
            let target = light_intensity_target(mode, time, l.phase[i]);
            l.intensity[i] = damp(l.intensity[i], target, self.light_rate, dt);
        }
    }
}
