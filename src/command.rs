use crate::editor::Editor;
use crate::error::EditorResult;
use crate::export::ExportedImage;
use crate::filter::FilterName;
use crate::loader::PickedFile;
use crate::surface::RenderingSurface;

/// A user action produced by the UI and executed against the editor
#[derive(Debug, Clone)]
pub enum Command {
    /// A slider moved
    SetFilter { filter: FilterName, value: f32 },
    ApplyPreset { name: &'static str },
    ResetFilters,
    /// Open the file picker
    OpenImage,
    /// A file arrived by other means (e.g. dropped on the window)
    LoadFile(PickedFile),
    ExportImage,
}

/// What the UI has to do after a command ran
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutput {
    Nothing,
    /// A filter now holds `value`, which may differ from what was requested
    FilterStored { filter: FilterName, value: f32 },
    /// Many values changed at once; the filter panel must be rebuilt
    FiltersReplaced,
    Exported(ExportedImage),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::SetFilter { .. } => "Set Filter",
            Command::ApplyPreset { .. } => "Apply Preset",
            Command::ResetFilters => "Reset Filters",
            Command::OpenImage => "Open Image",
            Command::LoadFile(_) => "Load File",
            Command::ExportImage => "Export Image",
        }
    }

    pub fn execute<S: RenderingSurface>(
        self,
        editor: &mut Editor<S>,
    ) -> EditorResult<CommandOutput> {
        log::debug!("Executing command: {}", self.name());
        match self {
            Command::SetFilter { filter, value } => {
                let value = editor.set_filter(filter, value)?;
                Ok(CommandOutput::FilterStored { filter, value })
            }
            Command::ApplyPreset { name } => {
                editor.activate_preset(name)?;
                Ok(CommandOutput::FiltersReplaced)
            }
            Command::ResetFilters => {
                editor.reset();
                Ok(CommandOutput::FiltersReplaced)
            }
            Command::OpenImage => {
                editor.pick_image();
                Ok(CommandOutput::Nothing)
            }
            Command::LoadFile(file) => {
                editor.load(file);
                Ok(CommandOutput::Nothing)
            }
            Command::ExportImage => editor.export().map(CommandOutput::Exported),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RasterSurface;

    #[test]
    fn test_set_filter_reports_stored_value() {
        let mut editor = Editor::new(RasterSurface::new());
        let output = Command::SetFilter {
            filter: FilterName::Opacity,
            value: 150.0,
        }
        .execute(&mut editor)
        .unwrap();
        assert_eq!(
            output,
            CommandOutput::FilterStored {
                filter: FilterName::Opacity,
                value: 100.0
            }
        );
    }

    #[test]
    fn test_bulk_commands_replace_panel() {
        let mut editor = Editor::new(RasterSurface::new());
        let output = Command::ApplyPreset { name: "drama" }
            .execute(&mut editor)
            .unwrap();
        assert_eq!(output, CommandOutput::FiltersReplaced);
        assert_eq!(editor.registry().get(FilterName::Saturation).value, 60.0);

        let output = Command::ResetFilters.execute(&mut editor).unwrap();
        assert_eq!(output, CommandOutput::FiltersReplaced);
        assert!(editor.registry().is_default());
    }

    #[test]
    fn test_export_without_image_is_empty() {
        let mut editor = Editor::new(RasterSurface::new());
        match Command::ExportImage.execute(&mut editor).unwrap() {
            CommandOutput::Exported(export) => {
                assert!(export.is_empty());
                assert_eq!(export.file_name(), "edited-image.png");
            }
            other => panic!("unexpected output: {other:?}"),
        }
    }
}
