//! Renderer interface and output settings

use crate::scene::Scene;
use crate::shading::Material;
use image::{ImageError, ImageFormat, Rgb, RgbImage};
use meshorbit_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A rendered frame
pub type RenderedImage = RgbImage;

/// Side length of the reference square output, in pixels
pub const REFERENCE_RESOLUTION: u32 = 2000;

/// Largest accepted width or height, in pixels
pub const MAX_RESOLUTION: u32 = 16384;

/// Output resolution, background and surface appearance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
    pub background: [u8; 3],
    pub material: Material,
    pub smooth_shading: bool,
}

impl RenderSettings {
    /// Settings with the given resolution and reference appearance
    pub fn with_resolution(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Reject empty or oversized images and out-of-range material parameters
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidConfig(format!(
                "resolution must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width > MAX_RESOLUTION || self.height > MAX_RESOLUTION {
            return Err(Error::InvalidConfig(format!(
                "resolution {}x{} exceeds {} pixels per side",
                self.width, self.height, MAX_RESOLUTION
            )));
        }
        self.material.validate()
    }

    /// Width over height
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Background as a pixel
    pub fn background_pixel(&self) -> Rgb<u8> {
        Rgb(self.background)
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: REFERENCE_RESOLUTION,
            height: REFERENCE_RESOLUTION,
            background: [0, 0, 0],
            material: Material::default(),
            smooth_shading: true,
        }
    }
}

/// Produces images of a scene from its current camera
///
/// Calls are synchronous and blocking.
pub trait Renderer {
    /// One-time setup before a capture session
    fn configure(&mut self, settings: &RenderSettings) -> Result<()>;

    /// Render the scene as seen from its camera
    fn render(&mut self, scene: &dyn Scene) -> Result<RenderedImage>;

    /// Persist an image, overwriting any existing file
    fn save(&mut self, image: &RenderedImage, path: &Path) -> Result<()> {
        save_png(image, path)
    }
}

/// Write an image as PNG
pub fn save_png(image: &RenderedImage, path: &Path) -> Result<()> {
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| match e {
            ImageError::IoError(io) => Error::Io(io),
            other => Error::Io(std::io::Error::new(std::io::ErrorKind::Other, other)),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_reference_settings() {
        let settings = RenderSettings::default();
        assert_eq!((settings.width, settings.height), (2000, 2000));
        assert_eq!(settings.background, [0, 0, 0]);
        assert!(settings.validate().is_ok());
        assert_eq!(settings.aspect_ratio(), 1.0);
    }

    #[test]
    fn test_zero_resolution_is_invalid() {
        let settings = RenderSettings::with_resolution(0, 10);
        assert!(matches!(settings.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_oversized_resolution_is_invalid() {
        let settings = RenderSettings::with_resolution(MAX_RESOLUTION + 1, 10);
        assert!(matches!(settings.validate(), Err(Error::InvalidConfig(_))));
        let settings = RenderSettings::with_resolution(70_000, 70_000);
        assert!(matches!(settings.validate(), Err(Error::InvalidConfig(_))));
        assert!(RenderSettings::with_resolution(MAX_RESOLUTION, MAX_RESOLUTION)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_save_png_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("frame.png");

        save_png(&RgbImage::from_pixel(4, 4, Rgb([255, 0, 0])), &path).unwrap();
        save_png(&RgbImage::from_pixel(2, 3, Rgb([0, 0, 0])), &path).unwrap();

        let reloaded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(reloaded.dimensions(), (2, 3));
    }

    #[test]
    fn test_save_to_missing_directory_is_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("frame.png");
        let result = save_png(&RgbImage::new(1, 1), &path);
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
