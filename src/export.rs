use std::path::Path;

use crate::error::{EditorError, EditorResult};
use crate::surface::{EMPTY_DATA_URL, data_url_bytes};

pub const DEFAULT_EXPORT_FILE_NAME: &str = "edited-image.png";

/// The encoded surface content, ready to be saved
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedImage {
    file_name: String,
    data_url: String,
}

impl ExportedImage {
    pub fn new(file_name: impl Into<String>, data_url: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            data_url: data_url.into(),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn data_url(&self) -> &str {
        &self.data_url
    }

    /// True when nothing had been drawn yet
    pub fn is_empty(&self) -> bool {
        self.data_url == EMPTY_DATA_URL
    }

    /// The PNG bytes behind the data URL
    pub fn bytes(&self) -> EditorResult<Vec<u8>> {
        data_url_bytes(&self.data_url)
            .ok_or_else(|| EditorError::Download("malformed data URL".to_owned()))
    }

    pub fn write_to(&self, path: &Path) -> EditorResult<()> {
        std::fs::write(path, self.bytes()?)?;
        log::info!("Wrote {} to {}", self.file_name, path.display());
        Ok(())
    }
}

/// Asks the user where to save the export, suggesting its file name.
/// Cancelling the dialog is not an error.
#[cfg(not(target_arch = "wasm32"))]
pub fn trigger_download(export: &ExportedImage) -> EditorResult<()> {
    let Some(path) = rfd::FileDialog::new()
        .set_file_name(export.file_name())
        .add_filter("PNG", &["png"])
        .save_file()
    else {
        log::debug!("Download cancelled");
        return Ok(());
    };
    export.write_to(&path)
}

/// Saves the export through a temporary download link.
#[cfg(target_arch = "wasm32")]
pub fn trigger_download(export: &ExportedImage) -> EditorResult<()> {
    use eframe::wasm_bindgen::JsCast as _;

    let js_error = |err: eframe::wasm_bindgen::JsValue| EditorError::Download(format!("{err:?}"));

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| EditorError::Download("no document available".to_owned()))?;
    let anchor = document
        .create_element("a")
        .map_err(js_error)?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| EditorError::Download("could not create a download link".to_owned()))?;
    anchor.set_href(export.data_url());
    anchor.set_download(export.file_name());
    anchor.click();
    Ok(())
}
