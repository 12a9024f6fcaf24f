//! # Document Host
//!
//! The document-lifecycle side of the editor: which windows are open, which
//! one is focused, and when documents are created, decoded, encoded and
//! written to disk.
//!
//! ## Structure
//!
//! - [`FileDocument`]: the hooks the host calls on a document type
//! - [`DocumentWindow`]: one open document, its view and its file
//! - [`DocumentGroup`]: the list of windows plus new/open/save/close
//!
//! Each window owns its document exclusively. The window subscribes to
//! its document's changes to know when it has edits that are not on disk.

pub mod storage;

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};

use crate::document::{DecodingError, Document};
use crate::view::EditorView;

/// Lifecycle hooks the host calls on a document type
pub trait FileDocument: Sized {
    /// Called when the user asks for a new document
    fn on_new() -> Self;

    /// Called with the full contents of a file the user opened
    fn on_open(bytes: Vec<u8>) -> Result<Self, DecodingError>;

    /// Called whenever the host persists the document
    fn on_save(&self) -> Vec<u8>;
}

impl FileDocument for Document {
    fn on_new() -> Self {
        Document::new()
    }

    fn on_open(bytes: Vec<u8>) -> Result<Self, DecodingError> {
        Document::load_owned(bytes)
    }

    fn on_save(&self) -> Vec<u8> {
        self.save()
    }
}

/// Identifier of an open window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(u64);

/// One open document together with its view
#[derive(Debug)]
pub struct DocumentWindow {
    pub id: WindowId,
    pub document: Document,
    pub view: EditorView,
    pub path: Option<PathBuf>,
    pub name: String,
    revision: Arc<AtomicU64>,
    saved_revision: u64,
    seen_revision: u64,
    last_edit: Option<Instant>,
    /// Revision whose autosave failed; not retried until the next edit
    failed_autosave: Option<u64>,
}

impl DocumentWindow {
    fn new(id: WindowId, mut document: Document, path: Option<PathBuf>) -> Self {
        let revision = Arc::new(AtomicU64::new(0));
        {
            let revision = revision.clone();
            document.subscribe(move |_| {
                revision.fetch_add(1, Ordering::Relaxed);
            });
        }

        let name = display_name(path.as_deref());

        Self {
            id,
            document,
            view: EditorView::new(),
            path,
            name,
            revision,
            saved_revision: 0,
            seen_revision: 0,
            last_edit: None,
            failed_autosave: None,
        }
    }

    /// Whether the document has changed since it was opened or last saved
    pub fn is_edited(&self) -> bool {
        self.revision.load(Ordering::Relaxed) != self.saved_revision
    }

    /// Counter bumped on every change to the document
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::Relaxed)
    }

    /// Time of the most recent edit seen by [`DocumentGroup::refresh`]
    pub fn last_edit(&self) -> Option<Instant> {
        self.last_edit
    }

    fn refresh(&mut self, now: Instant) {
        let revision = self.revision.load(Ordering::Relaxed);
        if revision != self.seen_revision {
            self.seen_revision = revision;
            self.last_edit = Some(now);
        }
    }

    fn mark_saved(&mut self, path: PathBuf) {
        self.saved_revision = self.revision.load(Ordering::Relaxed);
        self.failed_autosave = None;
        self.name = display_name(Some(&path));
        self.path = Some(path);
    }
}

fn display_name(path: Option<&Path>) -> String {
    path.and_then(|p| p.file_name())
        .and_then(|n| n.to_str())
        .unwrap_or("untitled")
        .to_string()
}

/// The set of open windows and their document lifecycle
#[derive(Debug, Default)]
pub struct DocumentGroup {
    windows: Vec<DocumentWindow>,
    active: usize,
    next_id: u64,
}

impl DocumentGroup {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_window_id(&mut self) -> WindowId {
        let id = WindowId(self.next_id);
        self.next_id += 1;
        id
    }

    fn push_window(&mut self, document: Document, path: Option<PathBuf>) -> WindowId {
        let id = self.next_window_id();
        self.windows.push(DocumentWindow::new(id, document, path));
        self.active = self.windows.len() - 1;
        id
    }

    /// Open an empty untitled window and focus it
    pub fn new_window(&mut self) -> WindowId {
        let id = self.push_window(Document::on_new(), None);
        log::debug!("Created new document window {:?}", id);
        id
    }

    /// Open an empty window that will be saved to `path`
    pub fn new_window_at(&mut self, path: impl Into<PathBuf>) -> WindowId {
        let path = path.into();
        log::debug!("Created new document window for {}", path.display());
        self.push_window(Document::on_new(), Some(path))
    }

    /// Read and decode `path` into a new focused window.
    ///
    /// If the file cannot be read or is not valid UTF-8 no window is
    /// created; a decoding failure stays reachable through
    /// `err.downcast_ref::<DecodingError>()`. A path that is already open
    /// focuses the existing window instead.
    pub async fn open(&mut self, path: impl AsRef<Path>) -> Result<WindowId> {
        let path = path.as_ref();
        let canonical = storage::normalize(path).await;

        if let Some(index) = self.index_of_path(&canonical) {
            self.active = index;
            return Ok(self.windows[index].id);
        }

        let bytes = storage::read_bytes(path)
            .await
            .with_context(|| format!("Failed to read '{}'", path.display()))?;
        let document = Document::on_open(bytes)
            .with_context(|| format!("Could not open document '{}'", path.display()))?;

        log::info!("Opened {} ({} bytes)", canonical.display(), document.len());
        Ok(self.push_window(document, Some(canonical)))
    }

    /// Write a window's document to its current path
    pub async fn save(&mut self, id: WindowId) -> Result<PathBuf> {
        let path = self
            .get(id)
            .ok_or_else(|| anyhow!("No such window: {:?}", id))?
            .path
            .clone()
            .ok_or_else(|| anyhow!("No file path - use save as"))?;
        self.save_as(id, &path).await?;
        Ok(path)
    }

    /// Write a window's document to `path` and make that its path
    pub async fn save_as(&mut self, id: WindowId, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let window = self
            .get_mut(id)
            .ok_or_else(|| anyhow!("No such window: {:?}", id))?;

        let bytes = window.document.on_save();
        storage::write_bytes(path, &bytes)
            .await
            .with_context(|| format!("Failed to write '{}'", path.display()))?;

        let canonical = storage::normalize(path).await;
        log::info!("Saved {} ({} bytes)", canonical.display(), bytes.len());
        window.mark_saved(canonical);
        Ok(())
    }

    /// Close a window, dropping its document. Returns false if it was not open.
    pub fn close(&mut self, id: WindowId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let window = self.windows.remove(index);
        if window.is_edited() {
            log::warn!("Closed '{}' with unsaved changes", window.name);
        }

        if index < self.active || self.active >= self.windows.len() {
            self.active = self.active.saturating_sub(1);
        }
        true
    }

    pub fn focus(&mut self, id: WindowId) -> bool {
        match self.index_of(id) {
            Some(index) => {
                self.active = index;
                true
            }
            None => false,
        }
    }

    pub fn focus_next(&mut self) {
        if !self.windows.is_empty() {
            self.active = (self.active + 1) % self.windows.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.windows.is_empty() {
            self.active = if self.active == 0 {
                self.windows.len() - 1
            } else {
                self.active - 1
            };
        }
    }

    pub fn active(&self) -> Option<&DocumentWindow> {
        self.windows.get(self.active)
    }

    pub fn active_mut(&mut self) -> Option<&mut DocumentWindow> {
        self.windows.get_mut(self.active)
    }

    pub fn active_id(&self) -> Option<WindowId> {
        self.active().map(|w| w.id)
    }

    /// Zero-based index of the focused window
    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn get(&self, id: WindowId) -> Option<&DocumentWindow> {
        self.windows.iter().find(|w| w.id == id)
    }

    pub fn get_mut(&mut self, id: WindowId) -> Option<&mut DocumentWindow> {
        self.windows.iter_mut().find(|w| w.id == id)
    }

    pub fn windows(&self) -> impl Iterator<Item = &DocumentWindow> {
        self.windows.iter()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.windows.iter().any(|w| w.is_edited())
    }

    /// Record the time of any edits made since the last call
    pub fn refresh(&mut self, now: Instant) {
        for window in &mut self.windows {
            window.refresh(now);
        }
    }

    /// Skip autosaving a window until its document changes again
    pub fn autosave_failed(&mut self, id: WindowId) {
        if let Some(window) = self.get_mut(id) {
            window.failed_autosave = Some(window.revision());
        }
    }

    /// Windows with a path whose unsaved edits are at least `delay` old
    pub fn autosave_due(&self, now: Instant, delay: Duration) -> Vec<WindowId> {
        self.windows
            .iter()
            .filter(|w| w.path.is_some() && w.is_edited())
            .filter(|w| w.failed_autosave != Some(w.revision()))
            .filter(|w| {
                w.last_edit
                    .is_some_and(|edited| now.saturating_duration_since(edited) >= delay)
            })
            .map(|w| w.id)
            .collect()
    }

    fn index_of(&self, id: WindowId) -> Option<usize> {
        self.windows.iter().position(|w| w.id == id)
    }

    fn index_of_path(&self, path: &Path) -> Option<usize> {
        self.windows
            .iter()
            .position(|w| w.path.as_deref() == Some(path))
    }
}
