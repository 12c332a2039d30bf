//! The render entry point: loads a scene, traces every pixel in parallel,
//! post-processes the resulting framebuffer, and hands back an `Image`.

use std::path::Path;
use std::time::Instant;

use rayon::prelude::*;

use crate::camera::{CameraOptions, Screen};
use crate::error::RenderError;
use crate::image::Image;
use crate::math::{Color, Ray};
use crate::parser;
use crate::postprocess;
use crate::shading::{self, RenderOptions};

/// A flat, row-major buffer of linear-radiance pixels: `pixels[y * width + x]`
/// holds the color traced for screen coordinate `(x, y)`.
pub struct Framebuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::zero(); (width as usize) * (height as usize)],
        }
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }
}

/// Statistics reported after a render completes.
pub struct RenderStats {
    pub total_rays: u64,
    pub elapsed_secs: f64,
    pub width: u32,
    pub height: u32,
}

impl RenderStats {
    pub fn rays_per_sec(&self) -> f64 {
        self.total_rays as f64 / self.elapsed_secs
    }
}

fn validate(camera_options: &CameraOptions, render_options: &RenderOptions) -> Result<(), RenderError> {
    if camera_options.screen_width == 0 || camera_options.screen_height == 0 {
        return Err(RenderError::Config(
            "screen width and height must both be non-zero".to_string(),
        ));
    }
    if camera_options.fov <= 0.0 || camera_options.fov >= std::f64::consts::PI {
        return Err(RenderError::Config(
            "fov must lie strictly between 0 and pi radians".to_string(),
        ));
    }
    Ok(())
}

/// Traces every pixel in the image against `scene`, parallelizing by row.
fn trace_image(
    scene: &crate::scene::Scene,
    camera_options: &CameraOptions,
    render_options: &RenderOptions,
    progress: &crate::report::ProgressBar,
) -> Framebuffer {
    let width = camera_options.screen_width;
    let height = camera_options.screen_height;
    let screen = Screen::new(camera_options);

    let mut framebuffer = Framebuffer::new(width, height);
    framebuffer
        .pixels
        .par_chunks_mut(width as usize)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, pixel) in row.iter_mut().enumerate() {
                let direction = screen.point_ray(x as u32, y as u32);
                let ray = Ray::new(camera_options.look_from, direction);
                *pixel = shading::trace(&ray, scene, render_options, 0, false);
                progress.tick();
            }
        });

    framebuffer
}

/// Loads the scene at `scene_path`, renders it under `camera_options` and
/// `render_options`, and returns the post-processed image alongside timing
/// statistics.
pub fn render(
    scene_path: impl AsRef<Path>,
    camera_options: &CameraOptions,
    render_options: &RenderOptions,
) -> Result<(Image, RenderStats), RenderError> {
    validate(camera_options, render_options)?;

    let scene = parser::parse_scene(scene_path.as_ref())?;

    let total_pixels = camera_options.screen_width * camera_options.screen_height;
    let progress = crate::report::ProgressBar::new(total_pixels);

    let t0 = Instant::now();
    let framebuffer = trace_image(&scene, camera_options, render_options, &progress);
    let elapsed = t0.elapsed().as_secs_f64();
    progress.finish();

    let pixels = postprocess::process(&framebuffer, render_options.mode);
    let image = Image::from_pixels(framebuffer.width, framebuffer.height, &pixels);

    let stats = RenderStats {
        total_rays: framebuffer.width as u64 * framebuffer.height as u64,
        elapsed_secs: elapsed,
        width: framebuffer.width,
        height: framebuffer.height,
    };

    Ok((image, stats))
}
