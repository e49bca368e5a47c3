use crate::command::{Command, CommandOutput};
use crate::config::EditorConfig;
use crate::editor::{Editor, LoadStatus};
use crate::event::LogEventHandler;
use crate::export;
use crate::file_handler::FileHandler;
use crate::panels::{FilterPanel, PresetBar, central_panel};
use crate::surface::RasterSurface;
use crate::texture_manager::TextureManager;

pub struct FilterApp {
    editor: Editor<RasterSurface>,
    filter_panel: FilterPanel,
    preset_bar: PresetBar,
    file_handler: FileHandler,
    textures: TextureManager,
    /// Last error shown to the user, cleared by the next successful action
    notice: Option<String>,
    panel_width: f32,
}

impl FilterApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: EditorConfig) -> Self {
        let mut app = Self::with_config(config);
        app.editor
            .loader_mut()
            .set_repaint_context(cc.egui_ctx.clone());
        app
    }

    /// Builds the app without a window
    pub fn with_config(config: EditorConfig) -> Self {
        let mut editor =
            Editor::new(RasterSurface::new()).with_export_file_name(config.export_file_name);
        editor.subscribe(Box::new(LogEventHandler));

        let filter_panel = FilterPanel::new(editor.registry());
        let preset_bar = PresetBar::new(editor.presets());
        Self {
            editor,
            filter_panel,
            preset_bar,
            file_handler: FileHandler::new(),
            textures: TextureManager::new(),
            notice: None,
            panel_width: config.panel_width,
        }
    }

    pub fn editor(&self) -> &Editor<RasterSurface> {
        &self.editor
    }

    pub fn filter_panel(&self) -> &FilterPanel {
        &self.filter_panel
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn execute_command(&mut self, command: Command) {
        let name = command.name();
        match command.execute(&mut self.editor) {
            Ok(CommandOutput::Nothing) => {}
            Ok(CommandOutput::FilterStored { filter, value }) => {
                self.filter_panel.store(filter, value);
            }
            Ok(CommandOutput::FiltersReplaced) => {
                self.filter_panel.render(self.editor.registry());
                self.notice = None;
            }
            Ok(CommandOutput::Exported(exported)) => {
                if let Err(err) = export::trigger_download(&exported) {
                    log::error!("{err}");
                    self.notice = Some(err.to_string());
                }
            }
            Err(err) => {
                log::error!("{name} failed: {err}");
                self.notice = Some(err.to_string());
            }
        }
    }

    /// Applies finished decodes and surfaces failures
    pub fn poll_loads(&mut self) {
        for status in self.editor.poll_loads() {
            match status {
                Ok(LoadStatus::Loaded { .. }) => self.notice = None,
                Ok(LoadStatus::Superseded) => {}
                Err(err) => self.notice = Some(err.to_string()),
            }
        }
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) -> Option<Command> {
        let mut command = None;
        ui.horizontal(|ui| {
            if ui.button("Open image…").clicked() {
                command = Some(Command::OpenImage);
            }
            if ui.button("Reset").clicked() {
                command = Some(Command::ResetFilters);
            }
            if ui.button("Download").clicked() {
                command = Some(Command::ExportImage);
            }
        });
        if let Some(preset) = self.preset_bar.show(ui) {
            command = Some(preset);
        }
        if let Some(notice) = &self.notice {
            ui.colored_label(ui.visuals().error_fg_color, notice);
        }
        command
    }
}

impl eframe::App for FilterApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_loads();

        if self.file_handler.check_for_dropped_files(ctx) {
            if let Some(file) = self.file_handler.take_dropped_image() {
                self.execute_command(Command::LoadFile(file));
            }
        }

        let mut commands = Vec::new();

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            commands.extend(self.toolbar(ui));
        });

        egui::SidePanel::left("filter_panel")
            .resizable(true)
            .default_width(self.panel_width)
            .show(ctx, |ui| {
                commands.extend(self.filter_panel.show(ui));
            });

        central_panel(ctx, &self.editor, &mut self.textures);

        for command in commands {
            self.execute_command(command);
        }

        self.file_handler.preview_files_being_dropped(ctx);
    }
}
