#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod config;
pub mod editor;
pub mod effect;
pub mod error;
pub mod event;
pub mod export;
pub mod file_handler;
pub mod filter;
pub mod loader;
pub mod panels;
pub mod preset;
pub mod source_image;
pub mod surface;
pub mod texture_manager;

pub use app::FilterApp;
pub use command::{Command, CommandOutput};
pub use config::EditorConfig;
pub use editor::{Editor, LoadStatus};
pub use effect::{EffectDescriptor, EffectTerm};
pub use error::{EditorError, EditorResult};
pub use export::ExportedImage;
pub use filter::{FilterName, FilterRegistry, FilterSpec, Unit};
pub use loader::{LoadOutcome, LoadTicket, PickedFile};
pub use preset::{Preset, PresetTable};
pub use source_image::SourceImage;
pub use surface::{RasterSurface, RenderingSurface};
