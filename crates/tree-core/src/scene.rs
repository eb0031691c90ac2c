//! Scene aggregate: pools, scheduler and GPU instance packing.

use crate::config::{QualityPreset, SceneConfig};
use crate::morph::{foliage_tint, foliage_vertex, ornament_crossfade, MorphScheduler};
use crate::pool::ScenePools;
use crate::state::SceneMode;
use rand::Rng;

/// Sprite shape selector read by the particle shader.
pub const SHAPE_GLOW: f32 = 0.0;
pub const SHAPE_CARD: f32 = 1.0;
pub const SHAPE_STAR: f32 = 2.0;

const PHOTO_CARD_TINT: [f32; 3] = [0.96, 0.94, 0.9];
const TOPPER_COLOR: [f32; 3] = [1.0, 0.82, 0.3];
const TOPPER_SIZE: f32 = 1.6;
const LIGHT_SIZE: f32 = 0.2;

/// Per-instance vertex data, one quad per instance.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceData {
    pub pos: [f32; 3],
    pub size: f32,
    /// Linear RGB scaled by emissive intensity, alpha = opacity.
    pub color: [f32; 4],
    pub roll: f32,
    pub shape: f32,
    pub _pad: [f32; 2],
}

pub struct Scene {
    config: SceneConfig,
    pools: ScenePools,
    scheduler: MorphScheduler,
    time: f32,
}

impl Scene {
    pub fn new<R: Rng + ?Sized>(preset: QualityPreset, rng: &mut R) -> Self {
        Self::with_config(SceneConfig::for_preset(preset), rng)
    }

    pub fn with_config<R: Rng + ?Sized>(config: SceneConfig, rng: &mut R) -> Self {
        let pools = ScenePools::new(&config, rng);
        let scheduler = MorphScheduler::new(&config);
        Self {
            config,
            pools,
            scheduler,
            time: 0.0,
        }
    }

    /// Drop every pool and build new ones with the preset's counts.
    pub fn rebuild<R: Rng + ?Sized>(&mut self, preset: QualityPreset, rng: &mut R) {
        log::info!("[quality] rebuilding scene for preset {}", preset);
        *self = Self::new(preset, rng);
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn preset(&self) -> QualityPreset {
        self.config.preset
    }

    pub fn pools(&self) -> &ScenePools {
        &self.pools
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn step(&mut self, mode: SceneMode, delta: f32) {
        if delta.is_finite() && delta > 0.0 {
            self.time += delta;
        }
        self.scheduler.step(&mut self.pools, mode, delta, self.time);
    }

    pub fn instance_count(&self) -> usize {
        self.pools.total_instances()
    }

    /// Pack every category into `out` (cleared first). The length is always
    /// [`Scene::instance_count`].
    pub fn write_instances(&self, out: &mut Vec<InstanceData>) {
        out.clear();
        out.reserve(self.instance_count());
        let t = self.time;

        let f = &self.pools.foliage;
        let tint = foliage_tint(f.progress);
        for i in 0..f.len() {
            let p = foliage_vertex(f.rest[i], f.target[i], f.progress, t, f.phase[i]);
            out.push(InstanceData {
                pos: p.to_array(),
                size: f.size[i],
                color: [tint.x, tint.y, tint.z, 1.0],
                roll: 0.0,
                shape: SHAPE_GLOW,
                _pad: [0.0; 2],
            });
        }

        let o = &self.pools.ornaments;
        for i in 0..o.positions.len() {
            let pos = o.positions.current[i].to_array();
            let fade = ornament_crossfade(o.morph_progress[i], t, o.pulse_phase[i]);
            out.push(InstanceData {
                pos,
                size: o.scale[i] * fade.photo_scale,
                color: [
                    PHOTO_CARD_TINT[0],
                    PHOTO_CARD_TINT[1],
                    PHOTO_CARD_TINT[2],
                    fade.photo_opacity,
                ],
                roll: o.rotation[i].z,
                shape: SHAPE_CARD,
                _pad: [0.0; 2],
            });
            let glow = o.glow_color[i] * fade.glow_intensity;
            out.push(InstanceData {
                pos,
                size: o.scale[i] * fade.glow_scale,
                color: [glow.x, glow.y, glow.z, 1.0],
                roll: 0.0,
                shape: SHAPE_GLOW,
                _pad: [0.0; 2],
            });
        }

        let p = &self.pools.props;
        for i in 0..p.positions.len() {
            let c = p.color[i];
            out.push(InstanceData {
                pos: p.positions.current[i].to_array(),
                size: p.scale[i],
                color: [c.x, c.y, c.z, 1.0],
                roll: p.rotation[i].y,
                shape: SHAPE_CARD,
                _pad: [0.0; 2],
            });
        }

        let l = &self.pools.lights;
        for i in 0..l.positions.len() {
            let c = l.color[i] * l.intensity[i];
            out.push(InstanceData {
                pos: l.positions.current[i].to_array(),
                size: LIGHT_SIZE,
                color: [c.x, c.y, c.z, 1.0],
                roll: 0.0,
                shape: SHAPE_GLOW,
                _pad: [0.0; 2],
            });
        }

        let top = &self.pools.topper;
        out.push(InstanceData {
            pos: top.position.to_array(),
            size: TOPPER_SIZE * top.scale,
            color: [
                TOPPER_COLOR[0] * 3.0,
                TOPPER_COLOR[1] * 3.0,
                TOPPER_COLOR[2] * 3.0,
                1.0,
            ],
            roll: top.rotation_y,
            shape: SHAPE_STAR,
            _pad: [0.0; 2],
        });
    }
}
