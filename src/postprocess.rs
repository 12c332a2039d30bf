//! Post-processing: converts the linear-radiance framebuffer produced by the
//! shading evaluator into 8-bit RGB pixels. The mapping depends on the
//! render mode — full renders get two-pass tone mapping and gamma
//! correction, normal/depth renders get their own direct mappers.

use rayon::prelude::*;

use crate::math::Color;
use crate::renderer::Framebuffer;
use crate::shading::RenderMode;

fn gamma_byte(c: f64) -> u8 {
    (c.max(0.0).powf(1.0 / 2.2) * 255.0).round().clamp(0.0, 255.0) as u8
}

fn linear_byte(c: f64) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Two-pass Reinhard-extended tone mapping: `v_out = v·(1 + v/Vmax²) / (1 + v)`,
/// where `Vmax` is the largest channel value anywhere in the image. An
/// all-black framebuffer (`Vmax == 0`) is returned unchanged.
fn tone_map(pixels: &[Color]) -> Vec<Color> {
    let v_max = pixels
        .par_iter()
        .map(|c| c.x.max(c.y).max(c.z))
        .reduce(|| 0.0, f64::max);

    if v_max == 0.0 {
        return pixels.to_vec();
    }

    let v_max_sq = v_max * v_max;
    pixels
        .par_iter()
        .map(|c| {
            let map = |v: f64| v * (1.0 + v / v_max_sq) / (1.0 + v);
            Color::new(map(c.x), map(c.y), map(c.z))
        })
        .collect()
}

fn full_pixels(pixels: &[Color]) -> Vec<[u8; 3]> {
    tone_map(pixels)
        .par_iter()
        .map(|c| [gamma_byte(c.x), gamma_byte(c.y), gamma_byte(c.z)])
        .collect()
}

fn normal_pixels(pixels: &[Color]) -> Vec<[u8; 3]> {
    pixels
        .par_iter()
        .map(|c| [linear_byte(c.x), linear_byte(c.y), linear_byte(c.z)])
        .collect()
}

/// Depth-mode mapping: a miss (the `(-1, -1, -1)` sentinel) maps to white;
/// every hit distance is scaled against the farthest hit anywhere in the
/// image, so the nearest surface is black and the farthest is white.
fn depth_pixels(pixels: &[Color]) -> Vec<[u8; 3]> {
    let max_distance = pixels
        .par_iter()
        .filter(|c| c.x != -1.0)
        .map(|c| c.x)
        .reduce(|| 0.0, f64::max);

    pixels
        .par_iter()
        .map(|c| {
            if c.x == -1.0 {
                [255, 255, 255]
            } else if max_distance == 0.0 {
                [0, 0, 0]
            } else {
                let byte = linear_byte(c.x / max_distance);
                [byte, byte, byte]
            }
        })
        .collect()
}

/// Dispatches to the pixel mapper for `mode` and returns row-major RGB bytes
/// matching `framebuffer.pixels`'s order.
pub fn process(framebuffer: &Framebuffer, mode: RenderMode) -> Vec<[u8; 3]> {
    match mode {
        RenderMode::Full => full_pixels(&framebuffer.pixels),
        RenderMode::Normal => normal_pixels(&framebuffer.pixels),
        RenderMode::Depth => depth_pixels(&framebuffer.pixels),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gamma_byte_endpoints() {
        assert_eq!(gamma_byte(0.0), 0);
        assert_eq!(gamma_byte(1.0), 255);
    }

    #[test]
    fn tone_map_is_identity_on_all_black() {
        let pixels = vec![Color::zero(); 4];
        let mapped = tone_map(&pixels);
        assert!(mapped.iter().all(|c| *c == Color::zero()));
    }

    #[test]
    fn tone_map_saturating_value_maps_below_one() {
        let pixels = vec![Color::new(2.0, 0.0, 0.0), Color::new(1.0, 0.0, 0.0)];
        let mapped = tone_map(&pixels);
        // The brightest pixel's own channel maps to exactly 1 under this formula.
        assert!((mapped[0].x - 1.0).abs() < 1e-9);
        assert!(mapped[1].x < 1.0);
    }

    #[test]
    fn tone_map_is_monotonic_componentwise() {
        let pixels = vec![
            Color::new(0.1, 2.0, 0.0),
            Color::new(0.4, 2.0, 3.0),
            Color::new(0.4, 2.0, 5.0),
        ];
        let mapped = tone_map(&pixels);
        assert!(mapped[0].x <= mapped[1].x);
        assert!(mapped[1].z <= mapped[2].z);
    }

    #[test]
    fn depth_sentinel_is_white() {
        let pixels = vec![Color::new(-1.0, -1.0, -1.0), Color::new(5.0, 5.0, 5.0)];
        let bytes = depth_pixels(&pixels);
        assert_eq!(bytes[0], [255, 255, 255]);
        assert_eq!(bytes[1], [255, 255, 255]); // farthest hit also maps to white
    }

    #[test]
    fn depth_nearest_hit_is_darker_than_farthest() {
        let pixels = vec![Color::new(1.0, 1.0, 1.0), Color::new(10.0, 10.0, 10.0)];
        let bytes = depth_pixels(&pixels);
        assert!(bytes[0][0] < bytes[1][0]);
    }

    #[test]
    fn normal_mode_midpoint_is_mid_gray() {
        let pixels = vec![Color::new(0.5, 0.5, 0.5)];
        let bytes = normal_pixels(&pixels);
        assert_eq!(bytes[0], [128, 128, 128]);
    }
}
