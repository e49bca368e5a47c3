use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use image::RgbaImage;

use crate::error::{EditorError, EditorResult};

// Static counter for generating unique IDs
static NEXT_IMAGE_ID: AtomicUsize = AtomicUsize::new(1);

/// A decoded image ready to be drawn onto a rendering surface.
///
/// Cloning is cheap; the pixel buffer is shared.
#[derive(Clone)]
pub struct SourceImage {
    id: usize,
    name: String,
    pixels: Arc<RgbaImage>,
}

impl std::fmt::Debug for SourceImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceImage")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

impl SourceImage {
    pub fn new(name: impl Into<String>, pixels: RgbaImage) -> Self {
        let id = NEXT_IMAGE_ID.fetch_add(1, Ordering::SeqCst);
        Self {
            id,
            name: name.into(),
            pixels: Arc::new(pixels),
        }
    }

    /// Decodes an encoded image (PNG, JPEG, ...) from memory.
    pub fn decode(name: impl Into<String>, bytes: &[u8]) -> EditorResult<Self> {
        let name = name.into();
        match image::load_from_memory(bytes) {
            Ok(decoded) => {
                log::debug!(
                    "Successfully decoded image {}: {}x{}",
                    name,
                    decoded.width(),
                    decoded.height()
                );
                Ok(Self::new(name, decoded.to_rgba8()))
            }
            Err(err) => Err(EditorError::Decode {
                file_name: name,
                reason: err.to_string(),
            }),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encoded_png(width: u32, height: u32) -> Vec<u8> {
        let pixels = RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]));
        let mut bytes = Cursor::new(Vec::new());
        pixels
            .write_to(&mut bytes, image::ImageFormat::Png)
            .unwrap();
        bytes.into_inner()
    }

    #[test]
    fn test_decode_png() {
        let image = SourceImage::decode("tiny.png", &encoded_png(4, 3)).unwrap();
        assert_eq!((image.width(), image.height()), (4, 3));
        assert_eq!(image.name(), "tiny.png");
        assert_eq!(image.pixels().get_pixel(0, 0).0, [10, 20, 30, 255]);
    }

    #[test]
    fn test_decode_garbage_reports_file_name() {
        let err = SourceImage::decode("notes.txt", b"definitely not an image").unwrap_err();
        match err {
            EditorError::Decode { file_name, .. } => assert_eq!(file_name, "notes.txt"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_ids_are_unique() {
        let a = SourceImage::new("a", RgbaImage::new(1, 1));
        let b = SourceImage::new("b", RgbaImage::new(1, 1));
        assert_ne!(a.id(), b.id());
    }
}
