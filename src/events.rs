use anyhow::Result;
use ratatui::crossterm::event::{Event, KeyEvent, MouseEvent};
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::widgets::ToastType;

/// All possible events in the application
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Keyboard input events
    KeyInput(KeyEvent),

    /// Mouse input events
    MouseInput(MouseEvent),

    /// Bracketed paste from the terminal
    Paste(String),

    /// Terminal was resized
    Resize { width: u16, height: u16 },

    /// UI events
    StatusMessage {
        message: Arc<str>,
    },
    ToastMessage {
        message: Arc<str>,
        toast_type: ToastType,
    },

    /// Application lifecycle
    Quit,
}

impl AppEvent {
    /// Map a raw terminal event, ignoring the kinds the editor does not use
    pub fn from_terminal(event: Event) -> Option<Self> {
        match event {
            Event::Key(key) => Some(AppEvent::KeyInput(key)),
            Event::Mouse(mouse) => Some(AppEvent::MouseInput(mouse)),
            Event::Paste(text) => Some(AppEvent::Paste(text)),
            Event::Resize(width, height) => Some(AppEvent::Resize { width, height }),
            _ => None,
        }
    }
}

/// Queue of notifications raised while handling input.
///
/// Handlers publish; the app drains the queue once per frame on the UI task.
pub struct EventBus {
    sender: mpsc::UnboundedSender<AppEvent>,
    receiver: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventBus {
    /// Create a new event bus
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self { sender, receiver }
    }

    /// Publish an event
    pub fn publish(&self, event: AppEvent) -> Result<()> {
        self.sender.send(event)?;
        Ok(())
    }

    /// Take every event published so far, oldest first
    pub fn drain(&mut self) -> Vec<AppEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.receiver.try_recv() {
            events.push(event);
        }
        events
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
