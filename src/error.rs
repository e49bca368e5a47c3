use thiserror::Error;

/// Errors that can occur while editing, loading or exporting an image
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Unknown filter: {0}")]
    UnknownFilter(String),

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    #[error("Value for {name} must be finite, got {value}")]
    NonFiniteValue { name: &'static str, value: f32 },

    #[error("Invalid surface dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Failed to decode image {file_name}: {reason}")]
    Decode { file_name: String, reason: String },

    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Failed to write file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Download failed: {0}")]
    Download(String),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for editor operations
pub type EditorResult<T> = Result<T, EditorError>;
