//! Thin adapter around the `image` crate: wraps the post-processed pixel
//! buffer and writes it out as PNG.

use std::path::Path;

use image::{ImageBuffer, Rgb, RgbImage};

use crate::error::RenderError;

pub struct Image {
    buffer: RgbImage,
}

impl Image {
    /// Builds an `Image` from row-major RGB bytes matching `width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: &[[u8; 3]]) -> Self {
        let buffer: RgbImage = ImageBuffer::from_fn(width, height, |x, y| {
            let [r, g, b] = pixels[(y * width + x) as usize];
            Rgb([r, g, b])
        });
        Self { buffer }
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    pub fn get_pixel(&self, row: u32, col: u32) -> [u8; 3] {
        self.buffer.get_pixel(col, row).0
    }

    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), RenderError> {
        self.buffer.save(path.as_ref())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_image_of_requested_dimensions() {
        let pixels = vec![[10u8, 20, 30]; 6];
        let img = Image::from_pixels(3, 2, &pixels);
        assert_eq!(img.width(), 3);
        assert_eq!(img.height(), 2);
        assert_eq!(img.get_pixel(0, 0), [10, 20, 30]);
        assert_eq!(img.get_pixel(1, 2), [10, 20, 30]);
    }

    #[test]
    fn write_roundtrips_through_a_temp_file() {
        let pixels = vec![[255u8, 0, 0]; 4];
        let img = Image::from_pixels(2, 2, &pixels);
        let path = std::env::temp_dir().join(format!("whitted_cli_image_test_{}.png", std::process::id()));
        img.write(&path).unwrap();
        let decoded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(decoded.get_pixel(0, 0).0, [255, 0, 0]);
        let _ = std::fs::remove_file(&path);
    }
}
