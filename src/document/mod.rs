//! # Document Model
//!
//! The in-memory model of one plain-text file.
//!
//! ## What it does
//!
//! - Holds the text of a single document, exactly as loaded or edited
//! - Transcodes between that text and its persisted bytes (strict UTF-8)
//! - Notifies registered listeners after every mutation
//!
//! ## Persisted form
//!
//! The whole file is the UTF-8 encoding of the text. There is no header,
//! no metadata and no newline normalisation, so `load(save(doc))` always
//! gives back the same text.
//!
//! Offsets taken by the mutation methods are byte offsets into the text.
//! Offsets past the end are clamped to the text length, and offsets inside
//! a multi-byte character are moved back to the start of that character.

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use thiserror::Error;

/// Raised by [`Document::load`] when the bytes are not valid UTF-8 text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("document is not valid UTF-8 text (invalid byte sequence at offset {valid_up_to})")]
pub struct DecodingError {
    valid_up_to: usize,
    error_len: Option<usize>,
}

impl DecodingError {
    /// Number of leading bytes that decoded successfully
    pub fn valid_up_to(&self) -> usize {
        self.valid_up_to
    }

    /// Length of the invalid sequence, or `None` if the input ended mid-character
    pub fn error_len(&self) -> Option<usize> {
        self.error_len
    }
}

impl From<std::str::Utf8Error> for DecodingError {
    fn from(err: std::str::Utf8Error) -> Self {
        Self {
            valid_up_to: err.valid_up_to(),
            error_len: err.error_len(),
        }
    }
}

/// A single mutation of the document text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentChange {
    /// Byte range of the text that was replaced, in the text before the edit
    pub range: Range<usize>,
    /// Text that now occupies the start of `range`
    pub inserted: String,
}

/// Handle returned by [`Document::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Change listener function type
pub type ChangeListener = Arc<dyn Fn(&DocumentChange) + Send + Sync>;

/// The text content of one open file
pub struct Document {
    text: String,
    listeners: Vec<(SubscriptionId, ChangeListener)>,
    next_subscription: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::with_text(String::new())
    }

    /// Create a document holding `text`
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Decode `bytes` as UTF-8 text.
    ///
    /// Invalid input is rejected rather than repaired with replacement
    /// characters.
    pub fn load(bytes: &[u8]) -> Result<Self, DecodingError> {
        let text = std::str::from_utf8(bytes)?;
        Ok(Self::with_text(text))
    }

    /// Same as [`Document::load`], reusing the allocation of `bytes`
    pub fn load_owned(bytes: Vec<u8>) -> Result<Self, DecodingError> {
        let text = String::from_utf8(bytes).map_err(|e| DecodingError::from(e.utf8_error()))?;
        Ok(Self::with_text(text))
    }

    /// UTF-8 encoding of the text
    pub fn save(&self) -> Vec<u8> {
        self.text.as_bytes().to_vec()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace the whole text
    pub fn set_text(&mut self, text: impl Into<String>) {
        let end = self.text.len();
        self.replace_range(0..end, &text.into());
    }

    /// Insert `text` at byte `offset`, returning the offset just past the inserted text
    pub fn insert(&mut self, offset: usize, text: &str) -> usize {
        let offset = self.clamp_offset(offset);
        self.replace_range(offset..offset, text);
        offset + text.len()
    }

    /// Remove the text in `range`
    pub fn remove(&mut self, range: Range<usize>) {
        self.replace_range(range, "");
    }

    /// Replace the text in `range` with `text` and notify listeners.
    ///
    /// Empty edits (nothing removed, nothing inserted) are ignored.
    pub fn replace_range(&mut self, range: Range<usize>, text: &str) {
        let start = self.clamp_offset(range.start);
        let end = self.clamp_offset(range.end).max(start);

        if start == end && text.is_empty() {
            return;
        }

        self.text.replace_range(start..end, text);

        let change = DocumentChange {
            range: start..end,
            inserted: text.to_string(),
        };
        for (_, listener) in &self.listeners {
            listener(&change);
        }
    }

    /// Clamp `offset` to the text and move it back onto a character boundary
    pub fn clamp_offset(&self, offset: usize) -> usize {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        offset
    }

    /// Register a listener that runs after every mutation
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&DocumentChange) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Arc::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

// Listeners belong to whoever registered them, so a copy only carries the text.
impl Clone for Document {
    fn clone(&self) -> Self {
        Self::with_text(self.text.clone())
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for Document {}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("text", &self.text)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
