use std::path::{Path, PathBuf};

use crate::error::EditorResult;
use crate::export::DEFAULT_EXPORT_FILE_NAME;

pub const CONFIG_FILE_NAME: &str = "eframe_filters.json";
pub const CONFIG_PATH_ENV: &str = "EFRAME_FILTERS_CONFIG";

/// Startup settings. Filter values are never stored here.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, PartialEq)]
#[serde(default)] // missing fields fall back to their defaults
pub struct EditorConfig {
    pub window_title: String,
    pub window_size: [f32; 2],
    pub export_file_name: String,
    pub panel_width: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            window_title: "Image Filters".to_owned(),
            window_size: [1024.0, 720.0],
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_owned(),
            panel_width: 260.0,
        }
    }
}

impl EditorConfig {
    /// Where the config is looked up: `$EFRAME_FILTERS_CONFIG`, else the working directory
    pub fn config_path() -> PathBuf {
        std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
    }

    /// Loads the config, falling back to defaults when the file is missing or broken.
    pub fn load() -> Self {
        Self::load_or_default(&Self::config_path())
    }

    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(err) => {
                log::warn!("Ignoring config {}: {err}", path.display());
                Self::default()
            }
        }
    }

    pub fn from_file(path: &Path) -> EditorResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}
