//! Fixed-size per-category instance pools.
//!
//! Every pool is a structure of arrays indexed by instance; the index is the
//! only handle. Pools are built once from a [`SceneConfig`] and never resized:
//! a preset change builds a fresh [`ScenePools`].

use crate::config::{InstanceCounts, SceneConfig};
use crate::shape::{sample_in_cone, sample_in_sphere, sample_on_cone_surface};
use crate::state::SceneMode;
use glam::Vec3;
use rand::seq::SliceRandom;
use rand::Rng;
use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Foliage,
    Ornament,
    Prop,
    Light,
    Topper,
}

pub const GLOW_PALETTE: [[f32; 3]; 4] = [
    [1.0, 0.78, 0.35], // gold
    [1.0, 0.35, 0.3],  // warm red
    [0.95, 0.95, 1.0], // silver
    [0.55, 0.8, 1.0],  // ice blue
];

pub const PROP_PALETTE: [[f32; 3]; 4] = [
    [0.8, 0.1, 0.12],
    [0.9, 0.75, 0.3],
    [0.15, 0.45, 0.25],
    [0.9, 0.9, 0.92],
];

pub const LIGHT_PALETTE: [[f32; 3]; 3] = [[1.0, 0.85, 0.55], [1.0, 0.55, 0.4], [0.7, 0.85, 1.0]];

/// Chaos/formed endpoints plus the live position for one category.
#[derive(Clone, Debug, Default)]
pub struct MorphTargets {
    pub chaos: Vec<Vec3>,
    pub target: Vec<Vec3>,
    pub current: Vec<Vec3>,
}

impl MorphTargets {
    fn generate<R, F>(rng: &mut R, count: usize, chaos_radius: f32, mut formed: F) -> Self
    where
        R: Rng + ?Sized,
        F: FnMut(&mut R) -> Vec3,
    {
        let mut chaos = Vec::with_capacity(count);
        let mut target = Vec::with_capacity(count);
        for _ in 0..count {
            chaos.push(sample_in_sphere(rng, chaos_radius));
            target.push(formed(rng));
        }
        // instances start scattered
        let current = chaos.clone();
        Self {
            chaos,
            target,
            current,
        }
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    #[inline]
    pub fn goal(&self, mode: SceneMode, i: usize) -> Vec3 {
        match mode {
            SceneMode::Formed => self.target[i],
            SceneMode::Chaos => self.chaos[i],
        }
    }

    fn consistent(&self) -> bool {
        self.chaos.len() == self.target.len() && self.target.len() == self.current.len()
    }
}

/// Foliage points morph through one shared progress scalar; positions are
/// evaluated per vertex from `rest`/`target` at draw time.
#[derive(Clone, Debug, Default)]
pub struct FoliagePool {
    pub rest: Vec<Vec3>,
    pub target: Vec<Vec3>,
    pub phase: Vec<f32>,
    pub size: Vec<f32>,
    pub progress: f32,
}

impl FoliagePool {
    pub fn len(&self) -> usize {
        self.rest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rest.is_empty()
    }
}

#[derive(Clone, Debug, Default)]
pub struct OrnamentPool {
    pub positions: MorphTargets,
    /// Inertia multiplier on the approach rate.
    pub weight: Vec<f32>,
    /// 0 = photo appearance, 1 = glow appearance.
    pub morph_progress: Vec<f32>,
    /// Euler angles (x, y, z).
    pub rotation: Vec<Vec3>,
    pub spin: Vec<Vec3>,
    pub pulse_phase: Vec<f32>,
    pub scale: Vec<f32>,
    pub glow_color: Vec<Vec3>,
}

#[derive(Clone, Debug, Default)]
pub struct PropPool {
    pub positions: MorphTargets,
    pub rotation: Vec<Vec3>,
    pub spin: Vec<Vec3>,
    pub scale: Vec<f32>,
    pub color: Vec<Vec3>,
}

#[derive(Clone, Debug, Default)]
pub struct LightPool {
    pub positions: MorphTargets,
    pub phase: Vec<f32>,
    pub color: Vec<Vec3>,
    pub intensity: Vec<f32>,
}

#[derive(Clone, Debug, Default)]
pub struct Topper {
    pub position: Vec3,
    pub scale: f32,
    pub rotation_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct ScenePools {
    pub foliage: FoliagePool,
    pub ornaments: OrnamentPool,
    pub props: PropPool,
    pub lights: LightPool,
    pub topper: Topper,
}

fn pick_color<R: Rng + ?Sized>(rng: &mut R, palette: &[[f32; 3]]) -> Vec3 {
    palette
        .choose(rng)
        .map(|c| Vec3::from_array(*c))
        .unwrap_or(Vec3::ONE)
}

fn random_spin<R: Rng + ?Sized>(rng: &mut R, max: f32) -> Vec3 {
    Vec3::new(
        rng.gen_range(-max..=max),
        rng.gen_range(-max..=max),
        rng.gen_range(-max..=max),
    )
}

impl ScenePools {
    pub fn new<R: Rng + ?Sized>(config: &SceneConfig, rng: &mut R) -> Self {
        let h = config.tree_height;
        let r = config.base_radius;
        let off = config.surface_offset;

        let foliage = {
            let n = config.foliage.count;
            let mut rest = Vec::with_capacity(n);
            let mut target = Vec::with_capacity(n);
            let mut phase = Vec::with_capacity(n);
            let mut size = Vec::with_capacity(n);
            for _ in 0..n {
                rest.push(sample_in_sphere(rng, config.foliage.chaos_radius));
                target.push(sample_in_cone(rng, h, r));
                phase.push(rng.gen::<f32>() * TAU);
                size.push(rng.gen_range(0.05..0.14));
            }
            FoliagePool {
                rest,
                target,
                phase,
                size,
                progress: 0.0,
            }
        };

        let ornaments = {
            let n = config.ornaments.count;
            let positions = MorphTargets::generate(rng, n, config.ornaments.chaos_radius, |rng| {
                sample_on_cone_surface(rng, h, r, off)
            });
            let mut pool = OrnamentPool {
                positions,
                ..Default::default()
            };
            for _ in 0..n {
                pool.weight.push(rng.gen_range(
                    crate::constants::ORNAMENT_WEIGHT_MIN..crate::constants::ORNAMENT_WEIGHT_MAX,
                ));
                // scattered ornaments start as glow
                pool.morph_progress.push(1.0);
                pool.rotation.push(Vec3::new(
                    rng.gen::<f32>() * TAU,
                    rng.gen::<f32>() * TAU,
                    0.0,
                ));
                pool.spin.push(random_spin(rng, 1.2));
                pool.pulse_phase.push(rng.gen::<f32>() * TAU);
                pool.scale.push(rng.gen_range(0.6..1.0));
                pool.glow_color.push(pick_color(rng, &GLOW_PALETTE));
            }
            pool
        };

        let props = {
            let n = config.props.count;
            let positions = MorphTargets::generate(rng, n, config.props.chaos_radius, |rng| {
                sample_in_cone(rng, h, r)
            });
            let mut pool = PropPool {
                positions,
                ..Default::default()
            };
            for _ in 0..n {
                pool.rotation.push(Vec3::new(0.0, rng.gen::<f32>() * TAU, 0.0));
                pool.spin.push(random_spin(rng, 0.8));
                pool.scale.push(rng.gen_range(0.25..0.55));
                pool.color.push(pick_color(rng, &PROP_PALETTE));
            }
            pool
        };

        let lights = {
            let n = config.lights.count;
            let positions = MorphTargets::generate(rng, n, config.lights.chaos_radius, |rng| {
                sample_on_cone_surface(rng, h, r, off)
            });
            let mut pool = LightPool {
                positions,
                ..Default::default()
            };
            for _ in 0..n {
                pool.phase.push(rng.gen::<f32>() * TAU);
                pool.color.push(pick_color(rng, &LIGHT_PALETTE));
                pool.intensity.push(crate::constants::LIGHT_IDLE_INTENSITY);
            }
            pool
        };

        let topper = Topper {
            position: Vec3::new(0.0, config.apex_y() + crate::constants::TOPPER_LIFT, 0.0),
            scale: 0.0,
            rotation_y: 0.0,
        };

        log::info!(
            "[scene] pools built preset={} foliage={} ornaments={} props={} lights={}",
            config.preset,
            foliage.len(),
            ornaments.positions.len(),
            props.positions.len(),
            lights.positions.len()
        );

        Self {
            foliage,
            ornaments,
            props,
            lights,
            topper,
        }
    }

    pub fn counts(&self) -> InstanceCounts {
        InstanceCounts {
            foliage: self.foliage.len(),
            ornaments: self.ornaments.positions.len(),
            props: self.props.positions.len(),
            lights: self.lights.positions.len(),
        }
    }

    /// Instances drawn per frame, topper included.
    pub fn total_instances(&self) -> usize {
        let c = self.counts();
        // ornaments draw a photo and a glow sprite each
        c.foliage + c.ornaments * 2 + c.props + c.lights + 1
    }

    /// Every per-instance array of a category has the category's cardinality.
    pub fn is_consistent(&self) -> bool {
        let f = &self.foliage;
        let n = f.len();
        let foliage_ok = f.target.len() == n && f.phase.len() == n && f.size.len() == n;

        let o = &self.ornaments;
        let n = o.positions.len();
        let ornaments_ok = o.positions.consistent()
            && [
                o.weight.len(),
                o.morph_progress.len(),
                o.rotation.len(),
                o.spin.len(),
                o.pulse_phase.len(),
                o.scale.len(),
                o.glow_color.len(),
            ]
            .iter()
            .all(|&len| len == n);

        let p = &self.props;
        let n = p.positions.len();
        let props_ok = p.positions.consistent()
            && [p.rotation.len(), p.spin.len(), p.scale.len(), p.color.len()]
                .iter()
                .all(|&len| len == n);

        let l = &self.lights;
        let n = l.positions.len();
        let lights_ok = l.positions.consistent()
            && l.phase.len() == n
            && l.color.len() == n
            && l.intensity.len() == n;

        foliage_ok && ornaments_ok && props_ok && lights_ok
    }
}
