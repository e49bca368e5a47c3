//! The editor state object.
//!
//! `Editor` owns the filter registry, the preset table, the rendering
//! surface and the active image. Every user action maps to one method here;
//! the UI never mutates the registry directly, which keeps all of it
//! testable without a window.
//!
//! ```text
//!   no image ──(load succeeds)──► image loaded ◄─┐
//!                                     │          │ set filter / preset / reset
//!                                     └──────────┘
//! ```

use crate::effect::EffectDescriptor;
use crate::error::EditorResult;
use crate::event::{EditorEvent, EventBus, EventHandler};
use crate::export::{DEFAULT_EXPORT_FILE_NAME, ExportedImage};
use crate::filter::{FilterName, FilterRegistry};
use crate::loader::{ImageLoader, LoadOutcome, LoadTicket, PickedFile};
use crate::preset::PresetTable;
use crate::source_image::SourceImage;
use crate::surface::RenderingSurface;

/// What happened to a finished load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loaded { width: u32, height: u32 },
    /// A newer load was requested in the meantime; the result was dropped.
    Superseded,
}

#[derive(Debug)]
pub struct Editor<S: RenderingSurface> {
    registry: FilterRegistry,
    presets: PresetTable,
    surface: S,
    active_image: Option<SourceImage>,
    loader: ImageLoader,
    event_bus: EventBus,
    export_file_name: String,
}

impl<S: RenderingSurface> Editor<S> {
    pub fn new(surface: S) -> Self {
        Self {
            registry: FilterRegistry::new(),
            presets: PresetTable::builtin(),
            surface,
            active_image: None,
            loader: ImageLoader::new(),
            event_bus: EventBus::new(),
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_owned(),
        }
    }

    pub fn with_export_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.export_file_name = file_name.into();
        self
    }

    pub fn subscribe(&mut self, handler: Box<dyn EventHandler>) {
        self.event_bus.subscribe(handler);
    }

    pub fn registry(&self) -> &FilterRegistry {
        &self.registry
    }

    pub fn presets(&self) -> &PresetTable {
        &self.presets
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn active_image(&self) -> Option<&SourceImage> {
        self.active_image.as_ref()
    }

    pub fn has_image(&self) -> bool {
        self.active_image.is_some()
    }

    pub fn loader(&self) -> &ImageLoader {
        &self.loader
    }

    pub fn loader_mut(&mut self) -> &mut ImageLoader {
        &mut self.loader
    }

    /// The descriptor the current registry composes to
    pub fn descriptor(&self) -> EffectDescriptor {
        EffectDescriptor::from_registry(&self.registry)
    }

    /// Redraws the active image with the current filter values.
    ///
    /// Does nothing while no image is loaded.
    pub fn apply(&mut self) {
        let Some(image) = &self.active_image else {
            return;
        };
        self.surface.clear();
        let descriptor = EffectDescriptor::from_registry(&self.registry);
        log::debug!("Rendering {} with {}", image.name(), descriptor);
        self.surface.set_filter(descriptor);
        self.surface.draw_image(image, 0, 0);
    }

    /// Sets one filter and re-renders. Returns the value actually stored.
    pub fn set_filter(&mut self, filter: FilterName, value: f32) -> EditorResult<f32> {
        let stored = self.registry.set(filter, value)?;
        self.event_bus.emit(EditorEvent::FilterChanged {
            filter,
            value: stored,
        });
        self.apply();
        Ok(stored)
    }

    /// Looks a filter up by identifier and sets it.
    pub fn set_filter_by_name(&mut self, name: &str, value: f32) -> EditorResult<f32> {
        let filter: FilterName = name.parse()?;
        self.set_filter(filter, value)
    }

    pub fn filter_value(&self, name: &str) -> EditorResult<f32> {
        let filter: FilterName = name.parse()?;
        Ok(self.registry.get(filter).value)
    }

    /// Resets every value to its default, overlays the preset and re-renders.
    pub fn activate_preset(&mut self, name: &str) -> EditorResult<()> {
        let preset = self.presets.get(name)?;
        let (name, overrides) = (preset.name(), preset.overrides());

        let mut registry = self.registry.clone();
        registry.reset_values();
        registry.overlay(overrides)?;
        self.registry = registry;

        self.event_bus.emit(EditorEvent::PresetApplied { name });
        self.apply();
        Ok(())
    }

    /// Restores every filter to its defaults and re-renders. The image is kept.
    pub fn reset(&mut self) {
        self.registry.reset_to_defaults();
        self.event_bus.emit(EditorEvent::FiltersReset);
        self.apply();
    }

    /// Starts decoding `file` in the background.
    pub fn load(&mut self, file: PickedFile) -> LoadTicket {
        self.loader.load(file)
    }

    /// Opens the file picker; the chosen file is decoded in the background.
    pub fn pick_image(&mut self) {
        self.loader.pick_file();
    }

    /// Applies finished decodes. Call once per frame.
    pub fn poll_loads(&mut self) -> Vec<EditorResult<LoadStatus>> {
        let mut finished = Vec::new();
        while let Some(outcome) = self.loader.try_next() {
            finished.push(self.complete_load(outcome));
        }
        finished
    }

    /// Makes a decoded image the active one, unless a newer load has been
    /// requested since. A failed decode leaves the current image untouched.
    pub fn complete_load(&mut self, outcome: LoadOutcome) -> EditorResult<LoadStatus> {
        let LoadOutcome { ticket, result } = outcome;
        if !self.loader.is_current(ticket) {
            self.event_bus.emit(EditorEvent::StaleLoadDiscarded {
                generation: ticket.generation(),
            });
            return Ok(LoadStatus::Superseded);
        }

        let image = match result.and_then(|image| self.prepare_surface(image)) {
            Ok(image) => image,
            Err(err) => {
                self.event_bus.emit(EditorEvent::LoadFailed {
                    reason: err.to_string(),
                });
                return Err(err);
            }
        };

        let (width, height) = (image.width(), image.height());
        self.event_bus.emit(EditorEvent::ImageLoaded {
            name: image.name().to_owned(),
            width,
            height,
        });
        self.active_image = Some(image);
        self.apply();
        Ok(LoadStatus::Loaded { width, height })
    }

    fn prepare_surface(&mut self, image: SourceImage) -> EditorResult<SourceImage> {
        self.surface.resize(image.width(), image.height())?;
        Ok(image)
    }

    /// Encodes the surface as a PNG data URL under the export file name.
    ///
    /// Without an image this produces an empty export rather than an error.
    pub fn export(&mut self) -> EditorResult<ExportedImage> {
        let data_url = self.surface.to_data_url()?;
        let export = ExportedImage::new(self.export_file_name.clone(), data_url);
        self.event_bus.emit(EditorEvent::Exported {
            file_name: export.file_name().to_owned(),
            bytes: export.data_url().len(),
        });
        Ok(export)
    }
}

impl<S: RenderingSurface + Default> Default for Editor<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}
