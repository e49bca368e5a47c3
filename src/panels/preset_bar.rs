use crate::command::Command;
use crate::preset::PresetTable;

/// One button per preset, built once at startup
#[derive(Debug, Clone, PartialEq)]
pub struct PresetBar {
    names: Vec<&'static str>,
}

impl PresetBar {
    pub fn new(presets: &PresetTable) -> Self {
        Self {
            names: presets.names().collect(),
        }
    }

    pub fn names(&self) -> &[&'static str] {
        &self.names
    }

    pub fn show(&self, ui: &mut egui::Ui) -> Option<Command> {
        let mut command = None;
        ui.horizontal_wrapped(|ui| {
            ui.label("Presets:");
            for &name in &self.names {
                if ui.button(name).clicked() {
                    command = Some(Command::ApplyPreset { name });
                }
            }
        });
        command
    }
}
