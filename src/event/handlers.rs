use crate::event::{EditorEvent, EventHandler};

/// Writes every editor event to the log
#[derive(Debug, Default)]
pub struct LogEventHandler;

impl EventHandler for LogEventHandler {
    fn handle_event(&mut self, event: &EditorEvent) {
        match event {
            EditorEvent::FilterChanged { filter, value } => {
                log::debug!("Filter {} set to {}", filter, value);
            }
            EditorEvent::PresetApplied { name } => log::info!("Preset applied: {}", name),
            EditorEvent::FiltersReset => log::info!("Filters reset to defaults"),
            EditorEvent::ImageLoaded {
                name,
                width,
                height,
            } => log::info!("Image loaded: {} ({}x{})", name, width, height),
            EditorEvent::LoadFailed { reason } => log::error!("Image load failed: {}", reason),
            EditorEvent::StaleLoadDiscarded { generation } => {
                log::debug!("Discarded result of superseded load request {}", generation);
            }
            EditorEvent::Exported { file_name, bytes } => {
                log::info!("Exported {} ({} bytes)", file_name, bytes);
            }
        }
    }
}
