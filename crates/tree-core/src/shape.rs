//! Random position distributions for the chaos cloud and the tree cone.
//!
//! All samplers take the random source as a parameter so callers can inject a
//! seeded generator; the scene itself draws from an unseeded one.

use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

/// Uniform point inside a sphere of `radius` centred at the origin.
pub fn sample_in_sphere<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Vec3 {
    // cube root keeps the density uniform in volume rather than in radius
    let r = radius * rng.gen::<f32>().cbrt();
    let theta = rng.gen::<f32>() * TAU;
    let cos_phi = rng.gen_range(-1.0_f32..=1.0);
    let sin_phi = (1.0 - cos_phi * cos_phi).max(0.0).sqrt();
    Vec3::new(
        r * sin_phi * theta.cos(),
        r * cos_phi,
        r * sin_phi * theta.sin(),
    )
}

/// Cone radius at height `y` for a cone of `height` centred on y = 0 with
/// `base_radius` at the bottom and a point at the top.
#[inline]
pub fn cone_radius_at(y: f32, height: f32, base_radius: f32) -> f32 {
    let normalized = ((y + height * 0.5) / height).clamp(0.0, 1.0);
    base_radius * (1.0 - normalized)
}

fn sample_height<R: Rng + ?Sized>(rng: &mut R, height: f32) -> f32 {
    rng.gen_range(-height * 0.5..=height * 0.5)
}

/// Uniform point inside the tree volume: uniform height, uniform within the
/// horizontal disk at that height.
pub fn sample_in_cone<R: Rng + ?Sized>(rng: &mut R, height: f32, base_radius: f32) -> Vec3 {
    let y = sample_height(rng, height);
    let max_r = cone_radius_at(y, height, base_radius);
    let r = max_r * rng.gen::<f32>().sqrt();
    let angle = rng.gen::<f32>() * TAU;
    Vec3::new(r * angle.cos(), y, r * angle.sin())
}

/// Point on the cone surface pushed `offset` outward, for categories that
/// hug the outside of the foliage.
pub fn sample_on_cone_surface<R: Rng + ?Sized>(
    rng: &mut R,
    height: f32,
    base_radius: f32,
    offset: f32,
) -> Vec3 {
    let y = sample_height(rng, height);
    let r = cone_radius_at(y, height, base_radius) + offset;
    let angle = rng.gen::<f32>() * TAU;
    Vec3::new(r * angle.cos(), y, r * angle.sin())
}

/// Horizontal distance from the tree axis.
#[inline]
pub fn axial_distance(p: Vec3) -> f32 {
    (p.x * p.x + p.z * p.z).sqrt()
}
