//! Pinhole camera / screen model: maps a pixel coordinate to a world-space
//! primary ray direction.

use crate::math::{Point3, Ray, Vec3};

/// Camera options recognized by the render entry point, with the defaults
/// applied when a field is absent from the caller's request.
#[derive(Debug, Clone, Copy)]
pub struct CameraOptions {
    pub screen_width: u32,
    pub screen_height: u32,
    pub fov: f64,
    pub look_from: Point3,
    pub look_to: Point3,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            screen_width: 800,
            screen_height: 600,
            fov: std::f64::consts::FRAC_PI_2,
            look_from: Point3::zero(),
            look_to: Point3::new(0.0, 0.0, -1.0),
        }
    }
}

/// Converts `(i, j)` pixel coordinates into primary-ray directions. Builds an
/// orthonormal basis from `look_from`/`look_to` once at construction.
pub struct Screen {
    width: u32,
    height: u32,
    fov: f64,
    forward: Vec3,
    right: Vec3,
    up: Vec3,
}

impl Screen {
    pub fn new(options: &CameraOptions) -> Self {
        let forward = (options.look_from - options.look_to).normalized();
        let right = if 1.0 - forward.y.abs() < 1e-5 {
            Vec3::unit_x()
        } else {
            Vec3::unit_y().cross(forward).normalized()
        };
        let up = forward.cross(right).normalized();

        Self {
            width: options.screen_width,
            height: options.screen_height,
            fov: options.fov,
            forward,
            right,
            up,
        }
    }

    /// The world-space direction of the primary ray through pixel `(i, j)`.
    /// `i` in `[0, width)`, `j` in `[0, height)`.
    pub fn point_ray(&self, i: u32, j: u32) -> Vec3 {
        let scale = (self.fov / 2.0).tan();
        let aspect = self.width as f64 / self.height as f64;

        let x = (2.0 * (i as f64 + 0.5) / self.width as f64 - 1.0) * aspect * scale;
        let y = (2.0 * (j as f64 + 0.5) / self.height as f64 - 1.0) * scale;

        let t = Vec3::new(x, -y, -1.0).normalized();
        (t.x * self.right + t.y * self.up + t.z * self.forward).normalized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_pixel_points_toward_look_to() {
        let options = CameraOptions {
            screen_width: 100,
            screen_height: 100,
            fov: std::f64::consts::FRAC_PI_2,
            look_from: Point3::new(0.0, 0.0, 5.0),
            look_to: Point3::zero(),
        };
        let screen = Screen::new(&options);
        let dir = screen.point_ray(49, 49);
        // The center pixel's direction should be very close to straight -z.
        assert!((dir.x).abs() < 0.02);
        assert!((dir.y).abs() < 0.02);
        assert!(dir.z < -0.99);
    }

    #[test]
    fn directions_are_unit_length() {
        let screen = Screen::new(&CameraOptions::default());
        for i in [0, 10, 79] {
            for j in [0, 10, 59] {
                let d = screen.point_ray(i, j);
                assert!((d.length() - 1.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn near_vertical_forward_uses_unit_x_right() {
        let options = CameraOptions {
            screen_width: 10,
            screen_height: 10,
            fov: std::f64::consts::FRAC_PI_2,
            look_from: Point3::new(0.0, 5.0, 0.0),
            look_to: Point3::zero(),
        };
        let screen = Screen::new(&options);
        assert_eq!(screen.right, Vec3::unit_x());
    }
}
