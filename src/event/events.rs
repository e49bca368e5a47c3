use crate::filter::FilterName;

/// Something that happened to the editor state
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    FilterChanged {
        filter: FilterName,
        value: f32,
    },
    PresetApplied {
        name: &'static str,
    },
    FiltersReset,
    ImageLoaded {
        name: String,
        width: u32,
        height: u32,
    },
    LoadFailed {
        reason: String,
    },
    /// A decode finished after a newer load was requested
    StaleLoadDiscarded {
        generation: u64,
    },
    Exported {
        file_name: String,
        bytes: usize,
    },
}
