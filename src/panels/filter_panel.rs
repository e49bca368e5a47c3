use crate::command::Command;
use crate::filter::{FilterName, FilterRegistry};

/// One bounded slider, named by the filter identifier
#[derive(Debug, Clone, PartialEq)]
pub struct SliderControl {
    pub filter: FilterName,
    pub label: &'static str,
    pub min: f32,
    pub max: f32,
    pub value: f32,
    pub suffix: &'static str,
}

/// The column of filter sliders.
///
/// The controls are a snapshot of the registry; call [`FilterPanel::render`]
/// whenever the registry changed wholesale (preset, reset).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterPanel {
    controls: Vec<SliderControl>,
}

impl FilterPanel {
    pub fn new(registry: &FilterRegistry) -> Self {
        let mut panel = Self::default();
        panel.render(registry);
        panel
    }

    /// Rebuilds every control from the registry, replacing prior contents.
    pub fn render(&mut self, registry: &FilterRegistry) {
        self.controls = registry
            .iter()
            .map(|(filter, spec)| SliderControl {
                filter,
                label: filter.identifier(),
                min: spec.min,
                max: spec.max,
                value: spec.value,
                suffix: spec.unit.suffix(),
            })
            .collect();
    }

    pub fn controls(&self) -> &[SliderControl] {
        &self.controls
    }

    /// Writes back the value the registry actually stored for one control.
    pub fn store(&mut self, filter: FilterName, value: f32) {
        if let Some(control) = self.controls.iter_mut().find(|c| c.filter == filter) {
            control.value = value;
        }
    }

    /// Draws the sliders. Returns a command for the first slider the user moved.
    pub fn show(&mut self, ui: &mut egui::Ui) -> Option<Command> {
        ui.heading("Filters");
        ui.separator();

        let mut command = None;
        for control in &mut self.controls {
            let response = ui.add(
                egui::Slider::new(&mut control.value, control.min..=control.max)
                    .text(control.label)
                    .suffix(control.suffix),
            );
            if response.changed() && command.is_none() {
                command = Some(Command::SetFilter {
                    filter: control.filter,
                    value: control.value,
                });
            }
        }
        command
    }
}
