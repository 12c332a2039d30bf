//! A recursive Whitted-style CPU ray tracer: loads a Wavefront-like scene
//! file and renders it to an RGB image with shadows, mirror reflections,
//! and dielectric refraction.
//!
//! The render entry point is [`render`]; [`CameraOptions`] and
//! [`RenderOptions`] configure the camera and the shading evaluator
//! respectively.

pub mod camera;
pub mod error;
pub mod geometry;
pub mod image;
pub mod material;
pub mod math;
pub mod parser;
pub mod postprocess;
pub mod renderer;
pub mod report;
pub mod scene;
pub mod shading;

pub use camera::CameraOptions;
pub use error::{RenderError, SceneError};
pub use image::Image;
pub use renderer::{render, RenderStats};
pub use shading::{RenderMode, RenderOptions};
