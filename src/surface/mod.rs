mod raster;

pub use raster::RasterSurface;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

use crate::effect::EffectDescriptor;
use crate::error::EditorResult;
use crate::source_image::SourceImage;

/// What a zero-sized surface encodes to
pub const EMPTY_DATA_URL: &str = "data:,";

/// A 2D drawing surface that performs the actual pixel work.
///
/// The editor only ever talks to the surface through this trait: it sizes
/// the surface, clears it, hands it an effect descriptor and asks it to draw
/// the active image. Everything that touches pixels lives behind it.
pub trait RenderingSurface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Resizes the surface. Prior content is discarded and the effect
    /// descriptor goes back to `none`.
    fn resize(&mut self, width: u32, height: u32) -> EditorResult<()>;

    /// Makes the given rectangle fully transparent. Parts outside the
    /// surface are ignored.
    fn clear_rect(&mut self, x: u32, y: u32, width: u32, height: u32);

    /// Sets the descriptor applied to subsequent draws.
    fn set_filter(&mut self, descriptor: EffectDescriptor);

    fn filter(&self) -> &EffectDescriptor;

    /// Draws `image` at its natural size with its top-left corner at (x, y).
    fn draw_image(&mut self, image: &SourceImage, x: i64, y: i64);

    /// Encodes the current content as PNG. A zero-sized surface encodes to no bytes.
    fn encode_png(&self) -> EditorResult<Vec<u8>>;

    /// Bumped every time the visible content changes.
    fn revision(&self) -> u64;

    fn clear(&mut self) {
        let (width, height) = (self.width(), self.height());
        self.clear_rect(0, 0, width, height);
    }

    /// Encodes the current content as a `data:image/png;base64,...` URL.
    fn to_data_url(&self) -> EditorResult<String> {
        let bytes = self.encode_png()?;
        if bytes.is_empty() {
            return Ok(EMPTY_DATA_URL.to_owned());
        }
        Ok(format!("data:image/png;base64,{}", BASE64.encode(bytes)))
    }
}

/// Decodes the payload of a base64 PNG data URL. The empty URL yields no bytes.
pub fn data_url_bytes(data_url: &str) -> Option<Vec<u8>> {
    if data_url == EMPTY_DATA_URL {
        return Some(Vec::new());
    }
    let payload = data_url.strip_prefix("data:image/png;base64,")?;
    BASE64.decode(payload).ok()
}
