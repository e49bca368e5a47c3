use egui::{ColorImage, Context, TextureHandle, TextureId, TextureOptions, Vec2};
use image::RgbaImage;
use thiserror::Error;

/// Errors that can occur during texture generation
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TextureGenerationError {
    #[error("Canvas is empty")]
    EmptyCanvas,
}

/// Converts canvas pixels into an egui image.
pub fn canvas_image(pixels: &RgbaImage) -> Result<ColorImage, TextureGenerationError> {
    let (width, height) = pixels.dimensions();
    if width == 0 || height == 0 {
        return Err(TextureGenerationError::EmptyCanvas);
    }
    Ok(ColorImage::from_rgba_unmultiplied(
        [width as usize, height as usize],
        pixels.as_raw(),
    ))
}

/// Keeps the GPU copy of the canvas, uploading again only when the surface
/// revision moves on.
#[derive(Default)]
pub struct TextureManager {
    current: Option<(u64, TextureHandle)>,
    uploads: u64,
}

impl TextureManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the texture for `revision`, generating and uploading it on a miss.
    pub fn get_or_create_texture<F>(
        &mut self,
        revision: u64,
        generator: F,
        ctx: &Context,
    ) -> Result<(TextureId, Vec2), TextureGenerationError>
    where
        F: FnOnce() -> Result<ColorImage, TextureGenerationError>,
    {
        if let Some((cached, handle)) = &self.current {
            if *cached == revision {
                return Ok((handle.id(), handle.size_vec2()));
            }
        }

        let image = generator()?;
        let name = format!("canvas_r{revision}");
        match &mut self.current {
            // Reuse the allocation; egui swaps the pixels in place.
            Some((cached, handle)) => {
                handle.set(image, TextureOptions::LINEAR);
                *cached = revision;
            }
            None => {
                let handle = ctx.load_texture(name, image, TextureOptions::LINEAR);
                self.current = Some((revision, handle));
            }
        }
        self.uploads += 1;
        log::trace!("Canvas upload {} for revision {revision}", self.uploads);

        let (_, handle) = self
            .current
            .as_ref()
            .ok_or(TextureGenerationError::EmptyCanvas)?;
        Ok((handle.id(), handle.size_vec2()))
    }

    /// Drops the texture, e.g. when the canvas has nothing to show
    pub fn clear_cache(&mut self) {
        self.current = None;
    }

    #[cfg(test)]
    pub fn cached_revision(&self) -> Option<u64> {
        self.current.as_ref().map(|(revision, _)| *revision)
    }

    #[cfg(test)]
    pub fn upload_count(&self) -> u64 {
        self.uploads
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn generator() -> Result<ColorImage, TextureGenerationError> {
        canvas_image(&RgbaImage::from_pixel(10, 5, Rgba([255, 255, 255, 255])))
    }

    #[test]
    fn test_cache_hit() {
        let ctx = Context::default();
        let mut manager = TextureManager::new();

        let (first, size) = manager.get_or_create_texture(1, generator, &ctx).unwrap();
        let (second, _) = manager.get_or_create_texture(1, generator, &ctx).unwrap();

        assert_eq!(first, second);
        assert_eq!(size, egui::vec2(10.0, 5.0));
        assert_eq!(manager.upload_count(), 1);
    }

    #[test]
    fn test_new_revision_reuploads() {
        let ctx = Context::default();
        let mut manager = TextureManager::new();

        manager.get_or_create_texture(1, generator, &ctx).unwrap();
        manager.get_or_create_texture(2, generator, &ctx).unwrap();

        assert_eq!(manager.upload_count(), 2);
        assert_eq!(manager.cached_revision(), Some(2));
    }

    #[test]
    fn test_empty_canvas_is_rejected() {
        let ctx = Context::default();
        let mut manager = TextureManager::new();
        let result =
            manager.get_or_create_texture(1, || canvas_image(&RgbaImage::new(0, 0)), &ctx);
        assert_eq!(result.unwrap_err(), TextureGenerationError::EmptyCanvas);
        assert_eq!(manager.cached_revision(), None);
    }
}
