use eframe::egui;

use crate::loader::{IMAGE_EXTENSIONS, PickedFile};

/// Turns files dropped on the window into loadable files
#[derive(Debug, Default)]
pub struct FileHandler {
    dropped_files: Vec<egui::DroppedFile>,
}

impl FileHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects files dropped this frame.
    /// Returns true if any arrived.
    pub fn check_for_dropped_files(&mut self, ctx: &egui::Context) -> bool {
        ctx.input(|i| {
            if i.raw.dropped_files.is_empty() {
                false
            } else {
                self.dropped_files = i.raw.dropped_files.clone();
                true
            }
        })
    }

    /// Takes the first dropped image; the rest are ignored like a
    /// single-selection file picker would.
    pub fn take_dropped_image(&mut self) -> Option<PickedFile> {
        let files = std::mem::take(&mut self.dropped_files);
        if files.len() > 1 {
            log::info!("{} files dropped, only the first image is used", files.len());
        }
        files
            .iter()
            .filter(|file| {
                let image = is_image_file(file);
                if !image {
                    log::warn!("Dropped file is not a supported type: {}", dropped_name(file));
                }
                image
            })
            .find_map(read_dropped_file)
    }

    /// Darkens the window and lists the files while something is dragged over it
    pub fn preview_files_being_dropped(&self, ctx: &egui::Context) {
        use egui::{Align2, Color32, FontId, Id, LayerId, Order};

        if ctx.input(|i| i.raw.hovered_files.is_empty()) {
            return;
        }

        let text = ctx.input(|i| {
            let mut text = "Drop to open:\n".to_owned();
            for file in &i.raw.hovered_files {
                if let Some(path) = &file.path {
                    text += &format!("\n{}", path.display());
                } else if !file.mime.is_empty() {
                    text += &format!("\n{}", file.mime);
                }
            }
            text
        });

        let layer = LayerId::new(Order::Foreground, Id::new("file_drop_target"));
        let painter = ctx.layer_painter(layer);
        let screen_rect = ctx.screen_rect();
        painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(192));
        painter.text(
            screen_rect.center(),
            Align2::CENTER_CENTER,
            text,
            FontId::proportional(24.0),
            Color32::WHITE,
        );
    }
}

/// Checks the MIME type, falling back to the extension
pub fn is_image_file(file: &egui::DroppedFile) -> bool {
    if !file.mime.is_empty() {
        return file.mime.starts_with("image/");
    }
    let name = match &file.path {
        Some(path) => path.to_string_lossy().into_owned(),
        None => file.name.clone(),
    };
    name.rsplit_once('.')
        .map(|(_, ext)| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn dropped_name(file: &egui::DroppedFile) -> String {
    if let Some(path) = &file.path {
        crate::loader::display_name(path)
    } else if !file.name.is_empty() {
        file.name.clone()
    } else {
        "unknown".to_owned()
    }
}

fn read_dropped_file(file: &egui::DroppedFile) -> Option<PickedFile> {
    let name = dropped_name(file);
    if let Some(bytes) = &file.bytes {
        return Some(PickedFile::new(name, bytes.to_vec()));
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Some(path) = &file.path {
            return match PickedFile::read(path) {
                Ok(file) => Some(file),
                Err(err) => {
                    log::error!("Failed to read dropped file {}: {err}", path.display());
                    None
                }
            };
        }
    }

    log::warn!("Dropped file has no accessible data: {name}");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn dropped(name: &str, mime: &str, bytes: Option<&[u8]>) -> egui::DroppedFile {
        egui::DroppedFile {
            name: name.to_owned(),
            mime: mime.to_owned(),
            bytes: bytes.map(|b| b.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_is_image_file() {
        assert!(is_image_file(&dropped("a.bin", "image/png", None)));
        assert!(!is_image_file(&dropped("a.png", "text/plain", None)));
        assert!(is_image_file(&dropped("photo.JPG", "", None)));
        assert!(!is_image_file(&dropped("notes.txt", "", None)));

        let on_disk = egui::DroppedFile {
            path: Some(PathBuf::from("/tmp/cat.webp")),
            ..Default::default()
        };
        assert!(is_image_file(&on_disk));
    }

    #[test]
    fn test_takes_first_image_only() {
        let mut handler = FileHandler::new();
        handler.dropped_files = vec![
            dropped("notes.txt", "text/plain", Some(b"hello")),
            dropped("first.png", "image/png", Some(&[1, 2])),
            dropped("second.png", "image/png", Some(&[3])),
        ];

        let file = handler.take_dropped_image().unwrap();
        assert_eq!(file.name, "first.png");
        assert_eq!(file.bytes, vec![1, 2]);
        assert!(handler.take_dropped_image().is_none());
    }
}
