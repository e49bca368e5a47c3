use eframe_filters::{
    Editor, EditorResult, EffectDescriptor, FilterName, LoadOutcome, RenderingSurface,
    SourceImage,
};
use image::{Rgba, RgbaImage};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Resize(u32, u32),
    ClearRect(u32, u32, u32, u32),
    SetFilter(String),
    Draw { name: String, x: i64, y: i64 },
}

/// Records every call instead of drawing
#[derive(Debug, Default)]
struct RecordingSurface {
    width: u32,
    height: u32,
    filter: EffectDescriptor,
    calls: Vec<Call>,
}

impl RenderingSurface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn resize(&mut self, width: u32, height: u32) -> EditorResult<()> {
        self.width = width;
        self.height = height;
        self.filter = EffectDescriptor::none();
        self.calls.push(Call::Resize(width, height));
        Ok(())
    }

    fn clear_rect(&mut self, x: u32, y: u32, width: u32, height: u32) {
        self.calls.push(Call::ClearRect(x, y, width, height));
    }

    fn set_filter(&mut self, descriptor: EffectDescriptor) {
        self.calls.push(Call::SetFilter(descriptor.to_string()));
        self.filter = descriptor;
    }

    fn filter(&self) -> &EffectDescriptor {
        &self.filter
    }

    fn draw_image(&mut self, image: &SourceImage, x: i64, y: i64) {
        self.calls.push(Call::Draw {
            name: image.name().to_owned(),
            x,
            y,
        });
    }

    fn encode_png(&self) -> EditorResult<Vec<u8>> {
        Ok(Vec::new())
    }

    fn revision(&self) -> u64 {
        self.calls.len() as u64
    }
}

fn load(editor: &mut Editor<RecordingSurface>, name: &str, width: u32, height: u32) {
    let ticket = editor.loader().tracker().issue();
    let image = SourceImage::new(name, RgbaImage::from_pixel(width, height, Rgba([1, 2, 3, 255])));
    editor
        .complete_load(LoadOutcome {
            ticket,
            result: Ok(image),
        })
        .unwrap();
}

#[test]
fn test_nothing_reaches_the_surface_without_an_image() {
    let mut editor = Editor::new(RecordingSurface::default());
    editor.apply();
    editor.set_filter(FilterName::Contrast, 150.0).unwrap();
    editor.reset();
    assert!(editor.surface().calls.is_empty());
}

#[test]
fn test_load_resizes_then_clears_filters_and_draws_at_origin() {
    let mut editor = Editor::new(RecordingSurface::default());
    load(&mut editor, "cat.png", 30, 20);

    let defaults = EffectDescriptor::from_registry(editor.registry()).to_string();
    assert_eq!(
        editor.surface().calls,
        vec![
            Call::Resize(30, 20),
            Call::ClearRect(0, 0, 30, 20),
            Call::SetFilter(defaults),
            Call::Draw {
                name: "cat.png".to_owned(),
                x: 0,
                y: 0
            },
        ]
    );
}

#[test]
fn test_each_change_runs_one_full_pass() {
    let mut editor = Editor::new(RecordingSurface::default());
    load(&mut editor, "cat.png", 5, 5);
    let before = editor.surface().calls.len();

    editor.activate_preset("softGlow").unwrap();

    let pass = &editor.surface().calls[before..];
    assert_eq!(pass.len(), 3);
    assert_eq!(pass[0], Call::ClearRect(0, 0, 5, 5));
    match &pass[1] {
        Call::SetFilter(descriptor) => {
            assert!(descriptor.contains("blur(2px)"));
            assert!(descriptor.starts_with("brightness(110%)"));
        }
        other => panic!("expected a filter, got {other:?}"),
    }
    assert!(matches!(pass[2], Call::Draw { x: 0, y: 0, .. }));
}

#[test]
fn test_stale_completion_never_touches_the_surface() {
    let mut editor = Editor::new(RecordingSurface::default());
    let stale = editor.loader().tracker().issue();
    load(&mut editor, "newer.png", 3, 3);
    let before = editor.surface().calls.len();

    let image = SourceImage::new("older.png", RgbaImage::new(9, 9));
    let status = editor
        .complete_load(LoadOutcome {
            ticket: stale,
            result: Ok(image),
        })
        .unwrap();

    assert_eq!(status, eframe_filters::LoadStatus::Superseded);
    assert_eq!(editor.surface().calls.len(), before);
    assert_eq!(editor.active_image().map(|image| image.name()), Some("newer.png"));
}
