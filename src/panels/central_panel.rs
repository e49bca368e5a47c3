use crate::editor::Editor;
use crate::surface::{RasterSurface, RenderingSurface};
use crate::texture_manager::{TextureManager, canvas_image};

/// Text for the line under the toolbar
pub fn status_line<S: RenderingSurface>(editor: &Editor<S>) -> String {
    match editor.active_image() {
        Some(image) => format!(
            "{} ({}x{})   filter: {}",
            image.name(),
            image.width(),
            image.height(),
            editor.surface().filter()
        ),
        None => "No image loaded. Open or drop an image to start.".to_owned(),
    }
}

pub fn central_panel(
    ctx: &egui::Context,
    editor: &Editor<RasterSurface>,
    textures: &mut TextureManager,
) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.label(status_line(editor));
        ui.separator();

        if !editor.has_image() {
            textures.clear_cache();
            ui.centered_and_justified(|ui| {
                ui.weak("Canvas is empty");
            });
            return;
        }

        let surface = editor.surface();
        match textures.get_or_create_texture(
            surface.revision(),
            || canvas_image(surface.pixels()),
            ctx,
        ) {
            Ok((texture_id, size)) => {
                egui::ScrollArea::both().show(ui, |ui| {
                    ui.image(egui::load::SizedTexture::new(texture_id, size));
                });
            }
            Err(err) => {
                log::error!("Could not show canvas: {err}");
                ui.colored_label(ui.visuals().error_fg_color, err.to_string());
            }
        }
    });
}
