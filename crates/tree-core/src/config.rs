//! Quality presets and the geometry/tuning bundle derived from them.

use crate::constants::*;
use std::fmt;
use std::str::FromStr;

/// Named bundle of instance counts and capture parameters trading fidelity
/// for performance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum QualityPreset {
    #[default]
    High,
    Low,
}

/// Webcam request constraints (ideal values, the browser may pick others).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CameraConstraints {
    pub width: u32,
    pub height: u32,
    pub frame_rate: u32,
}

/// Per-category instance counts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InstanceCounts {
    pub foliage: usize,
    pub ornaments: usize,
    pub props: usize,
    pub lights: usize,
}

impl QualityPreset {
    pub const ALL: [QualityPreset; 2] = [QualityPreset::High, QualityPreset::Low];

    pub fn toggled(self) -> Self {
        match self {
            QualityPreset::High => QualityPreset::Low,
            QualityPreset::Low => QualityPreset::High,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            QualityPreset::High => "high",
            QualityPreset::Low => "low",
        }
    }

    pub fn counts(self) -> InstanceCounts {
        match self {
            QualityPreset::High => InstanceCounts {
                foliage: 15_000,
                ornaments: 120,
                props: 180,
                lights: 400,
            },
            QualityPreset::Low => InstanceCounts {
                foliage: 5_000,
                ornaments: 48,
                props: 72,
                lights: 150,
            },
        }
    }

    pub fn camera(self) -> CameraConstraints {
        match self {
            QualityPreset::High => CameraConstraints {
                width: 1280,
                height: 720,
                frame_rate: 30,
            },
            QualityPreset::Low => CameraConstraints {
                width: 640,
                height: 480,
                frame_rate: 24,
            },
        }
    }

    /// Upper bound on classifier invocations per second.
    pub fn max_inference_hz(self) -> f32 {
        match self {
            QualityPreset::High => 30.0,
            QualityPreset::Low => 12.0,
        }
    }

    pub fn max_device_pixel_ratio(self) -> f64 {
        match self {
            QualityPreset::High => 2.0,
            QualityPreset::Low => 1.0,
        }
    }
}

impl fmt::Display for QualityPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QualityPreset {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(QualityPreset::High),
            "low" => Ok(QualityPreset::Low),
            _ => Err(()),
        }
    }
}

/// Chaos cloud radius and approach rate of one category.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CategoryParams {
    pub count: usize,
    pub chaos_radius: f32,
    pub damping: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub preset: QualityPreset,
    pub tree_height: f32,
    pub base_radius: f32,
    pub surface_offset: f32,
    pub foliage: CategoryParams,
    pub ornaments: CategoryParams,
    pub props: CategoryParams,
    pub lights: CategoryParams,
}

impl SceneConfig {
    pub fn for_preset(preset: QualityPreset) -> Self {
        let counts = preset.counts();
        Self {
            preset,
            tree_height: TREE_HEIGHT,
            base_radius: TREE_BASE_RADIUS,
            surface_offset: SURFACE_OFFSET,
            foliage: CategoryParams {
                count: counts.foliage,
                chaos_radius: FOLIAGE_CHAOS_RADIUS,
                damping: FOLIAGE_DAMPING,
            },
            ornaments: CategoryParams {
                count: counts.ornaments,
                chaos_radius: ORNAMENT_CHAOS_RADIUS,
                damping: ORNAMENT_DAMPING,
            },
            props: CategoryParams {
                count: counts.props,
                chaos_radius: PROP_CHAOS_RADIUS,
                damping: PROP_DAMPING,
            },
            lights: CategoryParams {
                count: counts.lights,
                chaos_radius: LIGHT_CHAOS_RADIUS,
                damping: LIGHT_DAMPING,
            },
        }
    }

    /// World-space apex of the cone, where the topper sits.
    pub fn apex_y(&self) -> f32 {
        self.tree_height * 0.5
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::for_preset(QualityPreset::default())
    }
}
