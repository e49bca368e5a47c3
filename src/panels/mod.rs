mod central_panel;
mod filter_panel;
mod preset_bar;

pub use central_panel::{central_panel, status_line};
pub use filter_panel::{FilterPanel, SliderControl};
pub use preset_bar::PresetBar;
