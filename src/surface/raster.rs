use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage, imageops};

use super::RenderingSurface;
use crate::effect::{EffectDescriptor, EffectTerm};
use crate::error::{EditorError, EditorResult};
use crate::filter::FilterName;
use crate::source_image::SourceImage;

/// Blur radii below this leave pixels visually unchanged and are skipped.
const MIN_BLUR_SIGMA: f32 = 0.5;

/// In-memory RGBA canvas.
///
/// Filter terms follow the W3C filter-effects definitions: color matrices
/// for the color functions, an alpha multiplier for opacity and a gaussian
/// blur whose sigma is the blur length in pixels. Terms that would leave
/// the image unchanged are skipped.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    canvas: RgbaImage,
    filter: EffectDescriptor,
    revision: u64,
}

impl Default for RasterSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RasterSurface {
    /// Creates an empty, zero-sized surface.
    pub fn new() -> Self {
        Self {
            canvas: RgbaImage::new(0, 0),
            filter: EffectDescriptor::none(),
            revision: 0,
        }
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.canvas
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}

impl RenderingSurface for RasterSurface {
    fn width(&self) -> u32 {
        self.canvas.width()
    }

    fn height(&self) -> u32 {
        self.canvas.height()
    }

    fn resize(&mut self, width: u32, height: u32) -> EditorResult<()> {
        if width == 0 || height == 0 {
            return Err(EditorError::InvalidDimensions { width, height });
        }
        self.canvas = RgbaImage::new(width, height);
        self.filter = EffectDescriptor::none();
        self.touch();
        Ok(())
    }

    fn clear_rect(&mut self, x: u32, y: u32, width: u32, height: u32) {
        let x_end = x.saturating_add(width).min(self.canvas.width());
        let y_end = y.saturating_add(height).min(self.canvas.height());
        for py in y..y_end {
            for px in x..x_end {
                self.canvas.put_pixel(px, py, Rgba([0, 0, 0, 0]));
            }
        }
        self.touch();
    }

    fn set_filter(&mut self, descriptor: EffectDescriptor) {
        self.filter = descriptor;
    }

    fn filter(&self) -> &EffectDescriptor {
        &self.filter
    }

    fn draw_image(&mut self, image: &SourceImage, x: i64, y: i64) {
        if self.filter.is_identity() {
            imageops::overlay(&mut self.canvas, image.pixels(), x, y);
        } else {
            let filtered = apply_descriptor(image.pixels(), &self.filter);
            imageops::overlay(&mut self.canvas, &filtered, x, y);
        }
        self.touch();
    }

    fn encode_png(&self) -> EditorResult<Vec<u8>> {
        if self.canvas.width() == 0 || self.canvas.height() == 0 {
            return Ok(Vec::new());
        }
        let mut bytes = Cursor::new(Vec::new());
        self.canvas.write_to(&mut bytes, ImageFormat::Png)?;
        Ok(bytes.into_inner())
    }

    fn revision(&self) -> u64 {
        self.revision
    }
}

fn apply_descriptor(source: &RgbaImage, descriptor: &EffectDescriptor) -> RgbaImage {
    let mut buffer = source.clone();
    for term in descriptor.terms().iter().filter(|term| !term.is_identity()) {
        apply_term(&mut buffer, term);
    }
    buffer
}

fn apply_term(buffer: &mut RgbaImage, term: &EffectTerm) {
    let amount = term.scalar().max(0.0);
    match term.filter {
        FilterName::Brightness => map_channels(buffer, |c| c * amount),
        FilterName::Contrast => map_channels(buffer, |c| (c - 0.5) * amount + 0.5),
        FilterName::Invert => {
            let amount = amount.min(1.0);
            map_channels(buffer, |c| c * (1.0 - amount) + (1.0 - c) * amount)
        }
        FilterName::Saturation => ColorMatrix::saturate(amount).apply(buffer),
        FilterName::HueRotation => ColorMatrix::hue_rotate(term.scalar()).apply(buffer),
        FilterName::Grayscale => ColorMatrix::grayscale(amount.min(1.0)).apply(buffer),
        FilterName::Sepia => ColorMatrix::sepia(amount.min(1.0)).apply(buffer),
        FilterName::Opacity => {
            let amount = amount.min(1.0);
            for pixel in buffer.pixels_mut() {
                pixel.0[3] = to_channel(f32::from(pixel.0[3]) / 255.0 * amount);
            }
        }
        // Narrower kernels collapse to zero weight and would erase the image.
        FilterName::Blur if amount < MIN_BLUR_SIGMA => {}
        FilterName::Blur => *buffer = imageops::blur(&*buffer, amount),
    }
}

fn map_channels(buffer: &mut RgbaImage, f: impl Fn(f32) -> f32) {
    for pixel in buffer.pixels_mut() {
        for channel in &mut pixel.0[..3] {
            *channel = to_channel(f(f32::from(*channel) / 255.0));
        }
    }
}

fn to_channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// 3x3 matrix over the RGB channels; alpha is left untouched.
struct ColorMatrix([[f32; 3]; 3]);

impl ColorMatrix {
    fn saturate(s: f32) -> Self {
        Self([
            [0.213 + 0.787 * s, 0.715 - 0.715 * s, 0.072 - 0.072 * s],
            [0.213 - 0.213 * s, 0.715 + 0.285 * s, 0.072 - 0.072 * s],
            [0.213 - 0.213 * s, 0.715 - 0.715 * s, 0.072 + 0.928 * s],
        ])
    }

    fn hue_rotate(degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self([
            [
                0.213 + cos * 0.787 - sin * 0.213,
                0.715 - cos * 0.715 - sin * 0.715,
                0.072 - cos * 0.072 + sin * 0.928,
            ],
            [
                0.213 - cos * 0.213 + sin * 0.143,
                0.715 + cos * 0.285 + sin * 0.140,
                0.072 - cos * 0.072 - sin * 0.283,
            ],
            [
                0.213 - cos * 0.213 - sin * 0.787,
                0.715 - cos * 0.715 + sin * 0.715,
                0.072 + cos * 0.928 + sin * 0.072,
            ],
        ])
    }

    fn grayscale(amount: f32) -> Self {
        let g = 1.0 - amount;
        Self([
            [0.2126 + 0.7874 * g, 0.7152 - 0.7152 * g, 0.0722 - 0.0722 * g],
            [0.2126 - 0.2126 * g, 0.7152 + 0.2848 * g, 0.0722 - 0.0722 * g],
            [0.2126 - 0.2126 * g, 0.7152 - 0.7152 * g, 0.0722 + 0.9278 * g],
        ])
    }

    fn sepia(amount: f32) -> Self {
        let g = 1.0 - amount;
        Self([
            [0.393 + 0.607 * g, 0.769 - 0.769 * g, 0.189 - 0.189 * g],
            [0.349 - 0.349 * g, 0.686 + 0.314 * g, 0.168 - 0.168 * g],
            [0.272 - 0.272 * g, 0.534 - 0.534 * g, 0.131 + 0.869 * g],
        ])
    }

    fn apply(&self, buffer: &mut RgbaImage) {
        let m = &self.0;
        for pixel in buffer.pixels_mut() {
            let [r, g, b, _] = pixel.0.map(|c| f32::from(c) / 255.0);
            for (row, channel) in m.iter().zip(&mut pixel.0[..3]) {
                *channel = to_channel(row[0] * r + row[1] * g + row[2] * b);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterRegistry;

    fn solid(width: u32, height: u32, rgba: [u8; 4]) -> SourceImage {
        SourceImage::new("solid", RgbaImage::from_pixel(width, height, Rgba(rgba)))
    }

    fn descriptor_with(filter: FilterName, value: f32) -> EffectDescriptor {
        let mut registry = FilterRegistry::new();
        registry.set(filter, value).unwrap();
        EffectDescriptor::from_registry(&registry)
    }

    fn draw_with(filter: FilterName, value: f32, rgba: [u8; 4]) -> [u8; 4] {
        let mut surface = RasterSurface::new();
        surface.resize(2, 2).unwrap();
        surface.set_filter(descriptor_with(filter, value));
        surface.draw_image(&solid(2, 2, rgba), 0, 0);
        surface.pixels().get_pixel(1, 1).0
    }

    #[test]
    fn test_new_surface_is_empty() {
        let surface = RasterSurface::new();
        assert_eq!((surface.width(), surface.height()), (0, 0));
        assert!(surface.encode_png().unwrap().is_empty());
        assert_eq!(surface.to_data_url().unwrap(), crate::surface::EMPTY_DATA_URL);
    }

    #[test]
    fn test_resize_rejects_zero() {
        let mut surface = RasterSurface::new();
        assert!(matches!(
            surface.resize(0, 10),
            Err(EditorError::InvalidDimensions { width: 0, height: 10 })
        ));
    }

    #[test]
    fn test_resize_clears_content_and_filter() {
        let mut surface = RasterSurface::new();
        surface.resize(2, 2).unwrap();
        surface.set_filter(descriptor_with(FilterName::Invert, 100.0));
        surface.draw_image(&solid(2, 2, [255, 0, 0, 255]), 0, 0);

        surface.resize(3, 1).unwrap();
        assert_eq!((surface.width(), surface.height()), (3, 1));
        assert_eq!(surface.pixels().get_pixel(0, 0).0, [0, 0, 0, 0]);
        assert_eq!(*surface.filter(), EffectDescriptor::none());
    }

    #[test]
    fn test_clear_rect_is_clipped() {
        let mut surface = RasterSurface::new();
        surface.resize(2, 2).unwrap();
        surface.draw_image(&solid(2, 2, [9, 9, 9, 255]), 0, 0);
        surface.clear_rect(1, 1, 50, 50);

        assert_eq!(surface.pixels().get_pixel(0, 0).0, [9, 9, 9, 255]);
        assert_eq!(surface.pixels().get_pixel(1, 1).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_identity_descriptor_copies_pixels() {
        let mut surface = RasterSurface::new();
        surface.resize(2, 2).unwrap();
        surface.set_filter(EffectDescriptor::from_registry(&FilterRegistry::new()));
        let image = solid(2, 2, [12, 34, 56, 255]);
        surface.draw_image(&image, 0, 0);
        assert_eq!(surface.pixels(), image.pixels());
    }

    #[test]
    fn test_color_terms() {
        assert_eq!(draw_with(FilterName::Invert, 100.0, [255, 0, 100, 255]), [0, 255, 155, 255]);
        assert_eq!(draw_with(FilterName::Brightness, 50.0, [200, 100, 0, 255]), [100, 50, 0, 255]);
        assert_eq!(draw_with(FilterName::Contrast, 0.0, [200, 10, 90, 255]), [128, 128, 128, 255]);
        assert_eq!(draw_with(FilterName::Opacity, 0.0, [1, 2, 3, 255]), [0, 0, 0, 0]);

        let [r, g, b, a] = draw_with(FilterName::Grayscale, 100.0, [255, 0, 0, 255]);
        assert_eq!((r, a), (g, 255));
        assert_eq!(g, b);
    }

    #[test]
    fn test_sub_pixel_blur_keeps_pixels() {
        for sigma in [0.001, 0.01, 0.04, 0.3] {
            assert_eq!(
                draw_with(FilterName::Blur, sigma, [10, 20, 30, 255]),
                [10, 20, 30, 255],
                "blur {sigma}"
            );
        }
    }

    #[test]
    fn test_blur_on_flat_color_keeps_it() {
        let mut surface = RasterSurface::new();
        surface.resize(8, 8).unwrap();
        surface.set_filter(descriptor_with(FilterName::Blur, 1.0));
        surface.draw_image(&solid(8, 8, [10, 20, 30, 255]), 0, 0);
        assert_eq!(surface.pixels().get_pixel(4, 4).0, [10, 20, 30, 255]);
    }

    #[test]
    fn test_full_hue_turn_is_skipped() {
        let term = EffectTerm::new(FilterName::HueRotation, 360.0, crate::filter::Unit::Degrees);
        assert!(term.is_identity());
    }

    #[test]
    fn test_revision_advances_on_changes() {
        let mut surface = RasterSurface::new();
        let start = surface.revision();
        surface.resize(1, 1).unwrap();
        surface.clear();
        surface.draw_image(&solid(1, 1, [0, 0, 0, 255]), 0, 0);
        assert_eq!(surface.revision(), start + 3);
    }
}
