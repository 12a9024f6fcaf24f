//! Plain-text document editor library

pub mod app;
pub mod config;
pub mod document;
pub mod events;
pub mod handlers;
pub mod host;
pub mod logging;
pub mod ui;
pub mod view;
pub mod widgets;

// Re-export main types for convenience
pub use app::App;
pub use document::{DecodingError, Document};
pub use host::{DocumentGroup, FileDocument};
pub use view::EditorView;
