//! The recursive Whitted evaluator: for each primary ray, finds the nearest
//! hit and composes direct lighting, mirror reflection, and refraction
//! according to the hit material's albedo weights.

use crate::geometry::{reflect, refract, SURFACE_BIAS};
use crate::math::{Color, Ray, Vec3};
use crate::scene::{self, Scene, SceneHit};

/// What a traced ray's color represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Full Phong-lit, reflected, and refracted radiance.
    Full,
    /// The hit's shading normal remapped into `[0, 1]` per component; a miss
    /// is the zero vector.
    Normal,
    /// The hit distance replicated across all three channels; a miss is the
    /// sentinel `(-1, -1, -1)`.
    Depth,
}

/// Parameters for `trace` that are constant across an entire render.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub depth: u32,
    pub mode: RenderMode,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            depth: 1,
            mode: RenderMode::Full,
        }
    }
}

/// Sums every light's diffuse and specular contribution at a hit, skipping
/// lights whose shadow ray is occluded before reaching them.
fn point_light(hit: &SceneHit, scene: &Scene, ray: &Ray) -> Color {
    let mut sum = Color::zero();
    let offset_origin = hit.intersection.position + hit.normal * SURFACE_BIAS;

    for light in &scene.lights {
        let to_light = light.position - offset_origin;
        let distance = to_light.length();
        let light_dir = to_light / distance;

        let shadow_ray = Ray::new(offset_origin, light_dir);
        if scene::is_shadowed(&shadow_ray, scene, distance) {
            continue;
        }

        let cos_theta = hit.normal.dot(light_dir).max(0.0);
        sum += cos_theta * light.intensity * hit.material.diffuse_color;

        let reflected = reflect(light_dir, hit.normal);
        let spec = reflected.dot(ray.direction).max(0.0).powf(hit.material.specular_exponent);
        sum += spec * light.intensity * hit.material.specular_color;
    }

    sum
}

/// Traces `ray` through `scene`, recursing into reflection and refraction up
/// to `options.depth` bounces. `inside` tracks whether the ray currently
/// travels through the interior of a refractive object, flipping the
/// relative index of refraction and waiving further albedo attenuation on
/// exit rays.
pub fn trace(ray: &Ray, scene: &Scene, options: &RenderOptions, depth: u32, inside: bool) -> Color {
    if depth == options.depth {
        return Color::zero();
    }

    let hit = match scene::intersect(ray, scene) {
        Some(hit) => hit,
        None => {
            return match options.mode {
                RenderMode::Depth => Vec3::new(-1.0, -1.0, -1.0),
                RenderMode::Normal | RenderMode::Full => Color::zero(),
            };
        }
    };

    match options.mode {
        RenderMode::Normal => {
            return Vec3::new(
                hit.normal.x / 2.0 + 0.5,
                hit.normal.y / 2.0 + 0.5,
                hit.normal.z / 2.0 + 0.5,
            );
        }
        RenderMode::Depth => {
            let d = hit.intersection.distance;
            return Vec3::new(d, d, d);
        }
        RenderMode::Full => {}
    }

    let reflection = {
        let origin = hit.intersection.position + hit.normal * SURFACE_BIAS;
        let direction = reflect(ray.direction, hit.normal);
        trace(&Ray::new(origin, direction), scene, options, depth + 1, inside)
    };

    let light = point_light(&hit, scene, ray);

    let mut refraction = Color::zero();
    if hit.material.albedo.refraction > 0.0 && depth < options.depth {
        let eta = if inside {
            hit.material.refraction_index
        } else {
            1.0 / hit.material.refraction_index
        };

        if let Some(refract_dir) = refract(ray.direction, hit.normal, eta) {
            let origin = hit.intersection.position - hit.normal * SURFACE_BIAS;
            let weight = if inside { 1.0 } else { hit.material.albedo.refraction };
            refraction = weight * trace(&Ray::new(origin, refract_dir), scene, options, depth + 1, !inside);
        }
    }

    hit.material.ambient_color
        + hit.material.emission_intensity
        + hit.material.albedo.direct * light
        + hit.material.albedo.reflection * reflection
        + refraction
}
