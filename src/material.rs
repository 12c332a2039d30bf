//! Whitted shading material: a fixed set of Phong-like coefficients plus the
//! three-way albedo that blends direct light, mirror reflection, and
//! refraction at composition time.

use crate::math::Color;

/// Blending weights for `(direct light, mirror reflection, refraction)`,
/// applied to the three illumination components before summation. Not a
/// physical reflectance — the reference scenes routinely violate energy
/// conservation.
#[derive(Debug, Clone, Copy)]
pub struct Albedo {
    pub direct: f64,
    pub reflection: f64,
    pub refraction: f64,
}

impl Albedo {
    pub const fn new(direct: f64, reflection: f64, refraction: f64) -> Self {
        Self {
            direct,
            reflection,
            refraction,
        }
    }
}

impl Default for Albedo {
    fn default() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }
}

#[derive(Debug, Clone)]
pub struct Material {
    pub name: String,
    pub ambient_color: Color,
    pub diffuse_color: Color,
    pub specular_color: Color,
    pub emission_intensity: Color,
    pub specular_exponent: f64,
    pub refraction_index: f64,
    pub albedo: Albedo,
}

impl Material {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ambient_color: Color::zero(),
            diffuse_color: Color::zero(),
            specular_color: Color::zero(),
            emission_intensity: Color::zero(),
            specular_exponent: 0.0,
            refraction_index: 1.0,
            albedo: Albedo::default(),
        }
    }
}
