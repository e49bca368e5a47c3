//! Asynchronous image loading.
//!
//! Every load request is tagged with a generation number. Decoding happens
//! off the UI thread and the result comes back through a channel that the
//! editor drains once per frame; only the result carrying the latest
//! generation is allowed to replace the active image.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::error::EditorResult;
use crate::source_image::SourceImage;

/// File extensions offered by the file picker
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp"];

/// Identifies one load request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// Issues tickets and remembers which one is the latest
#[derive(Debug, Clone, Default)]
pub struct LoadTracker {
    latest: Arc<AtomicU64>,
}

impl LoadTracker {
    pub fn issue(&self) -> LoadTicket {
        LoadTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}

/// Raw bytes of a user-selected file
#[derive(Clone)]
pub struct PickedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for PickedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PickedFile")
            .field("name", &self.name)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

impl PickedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn read(path: &Path) -> EditorResult<Self> {
        let bytes = std::fs::read(path)?;
        Ok(Self::new(display_name(path), bytes))
    }
}

pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// The decode result for one ticket
#[derive(Debug)]
pub struct LoadOutcome {
    pub ticket: LoadTicket,
    pub result: EditorResult<SourceImage>,
}

/// Runs decodes in the background and hands their results back in order of completion
pub struct ImageLoader {
    tracker: LoadTracker,
    sender: UnboundedSender<LoadOutcome>,
    receiver: UnboundedReceiver<LoadOutcome>,
    repaint: Option<egui::Context>,
}

impl std::fmt::Debug for ImageLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageLoader")
            .field("tracker", &self.tracker)
            .finish()
    }
}

impl Default for ImageLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageLoader {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded();
        Self {
            tracker: LoadTracker::default(),
            sender,
            receiver,
            repaint: None,
        }
    }

    /// Context to wake up when a decode finishes
    pub fn set_repaint_context(&mut self, ctx: egui::Context) {
        self.repaint = Some(ctx);
    }

    pub fn tracker(&self) -> &LoadTracker {
        &self.tracker
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.tracker.is_current(ticket)
    }

    /// Starts decoding `file` and returns the ticket its result will carry.
    pub fn load(&self, file: PickedFile) -> LoadTicket {
        let ticket = self.tracker.issue();
        log::info!(
            "Loading {} ({} bytes) as request {}",
            file.name,
            file.bytes.len(),
            ticket.generation()
        );
        let sender = self.sender.clone();
        let repaint = self.repaint.clone();
        spawn_decode(move || decode_and_send(ticket, Ok(file), &sender, repaint.as_ref()));
        ticket
    }

    /// Opens the platform file picker. Cancelling the picker does nothing.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn pick_file(&self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Image", IMAGE_EXTENSIONS)
            .pick_file()
        else {
            log::debug!("No file selected");
            return;
        };
        let ticket = self.tracker.issue();
        log::info!("Loading {} as request {}", path.display(), ticket.generation());
        let sender = self.sender.clone();
        let repaint = self.repaint.clone();
        spawn_decode(move || {
            let file = PickedFile::read(&path);
            decode_and_send(ticket, file, &sender, repaint.as_ref());
        });
    }

    /// Opens the browser file picker. Cancelling the picker does nothing.
    #[cfg(target_arch = "wasm32")]
    pub fn pick_file(&self) {
        let tracker = self.tracker.clone();
        let sender = self.sender.clone();
        let repaint = self.repaint.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let Some(handle) = rfd::AsyncFileDialog::new()
                .add_filter("Image", IMAGE_EXTENSIONS)
                .pick_file()
                .await
            else {
                log::debug!("No file selected");
                return;
            };
            let file = PickedFile::new(handle.file_name(), handle.read().await);
            let ticket = tracker.issue();
            log::info!("Loading {} as request {}", file.name, ticket.generation());
            decode_and_send(ticket, Ok(file), &sender, repaint.as_ref());
        });
    }

    /// Returns the next finished decode, if any.
    pub fn try_next(&mut self) -> Option<LoadOutcome> {
        // Err means nothing is ready; the channel cannot close while we hold a sender.
        self.receiver.try_recv().ok()
    }
}

fn decode_and_send(
    ticket: LoadTicket,
    file: EditorResult<PickedFile>,
    sender: &UnboundedSender<LoadOutcome>,
    repaint: Option<&egui::Context>,
) {
    let result = file.and_then(|file| SourceImage::decode(file.name, &file.bytes));
    if sender
        .unbounded_send(LoadOutcome { ticket, result })
        .is_err()
    {
        log::warn!("Editor went away before request {} finished", ticket.generation());
        return;
    }
    if let Some(ctx) = repaint {
        ctx.request_repaint();
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn spawn_decode(job: impl FnOnce() + Send + 'static) {
    std::thread::spawn(job);
}

#[cfg(target_arch = "wasm32")]
fn spawn_decode(job: impl FnOnce() + 'static) {
    wasm_bindgen_futures::spawn_local(async move { job() });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn wait_for(loader: &mut ImageLoader) -> LoadOutcome {
        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            if let Some(outcome) = loader.try_next() {
                return outcome;
            }
            assert!(Instant::now() < deadline, "decode did not finish in time");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_tickets_increase_and_only_latest_is_current() {
        let tracker = LoadTracker::default();
        let first = tracker.issue();
        let second = tracker.issue();
        assert!(second > first);
        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));
    }

    #[test]
    fn test_nothing_pending_initially() {
        let mut loader = ImageLoader::new();
        assert!(loader.try_next().is_none());
    }

    #[test]
    fn test_background_decode_reports_failure() {
        let mut loader = ImageLoader::new();
        let ticket = loader.load(PickedFile::new("broken.png", vec![1, 2, 3]));
        let outcome = wait_for(&mut loader);
        assert_eq!(outcome.ticket, ticket);
        assert!(outcome.result.is_err());
    }

    #[test]
    fn test_display_name_uses_file_name() {
        assert_eq!(display_name(Path::new("/tmp/photos/cat.png")), "cat.png");
    }
}
