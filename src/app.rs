use std::io::Stdout;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use ratatui::{
    backend::CrosstermBackend,
    crossterm::event,
    layout::Rect,
    Terminal,
};

use crate::config::{default_user_dir, Config, ConfigManager};
use crate::document::Document;
use crate::events::{AppEvent, EventBus};
use crate::host::{DocumentGroup, DocumentWindow};
use crate::view::EditorView;
use crate::widgets::{Prompt, StatusBar, ToastManager, ToastType};

/// Contains global state that needs to be shared
pub struct App {
    /// Whether the application is running
    pub running: bool,

    /// Open document windows
    pub windows: DocumentGroup,

    /// Loaded configuration
    pub config: Config,

    /// Directory where config and logs are stored
    pub user_dir: PathBuf,

    /// Path prompt, while one is open
    pub prompt: Option<Prompt>,

    /// Message to display on status bar
    pub status_message: Option<String>,

    /// Toast notification manager
    pub toast_manager: ToastManager,

    /// Status bar with slot-based system
    pub status_bar: StatusBar,

    /// Area the text surface was last rendered into
    pub editor_area: Rect,

    /// Set after a quit request with unsaved changes; a second request quits
    pub quit_armed: bool,

    /// Notifications raised while handling input
    pub events: EventBus,
}

impl App {
    /// Create an app with one empty untitled window
    pub fn with_config(config: Config, user_dir: PathBuf) -> Self {
        let toast_manager =
            ToastManager::new().with_duration(Duration::from_millis(config.ui.toast_duration));

        let mut app = Self {
            running: true,
            windows: DocumentGroup::new(),
            config,
            user_dir,
            prompt: None,
            status_message: None,
            toast_manager,
            status_bar: StatusBar::new(),
            editor_area: Rect::default(),
            quit_armed: false,
            events: EventBus::new(),
        };

        app.windows.new_window();
        app.init_status_bar();
        app
    }

    /// Create an app using the config in the user directory
    pub async fn new() -> Self {
        let user_dir = default_user_dir();

        // Create user directory if it doesn't exist
        if !user_dir.exists() {
            if let Err(e) = tokio::fs::create_dir_all(&user_dir).await {
                log::warn!("Could not create user directory: {}", e);
            }
        }

        let mut config_manager = ConfigManager::new(&user_dir);
        if let Err(e) = config_manager.load() {
            log::warn!(
                "Using default config, could not load {}: {}",
                config_manager.config_path().display(),
                e
            );
        }

        Self::with_config(config_manager.get_config().clone(), user_dir)
    }

    /// Create an app whose only window shows `file_path`.
    ///
    /// A path that does not exist yet gives an empty window that will be
    /// saved there. An existing file that cannot be decoded is an error.
    pub async fn with_file(file_path: &str) -> Result<Self> {
        let mut app = Self::new().await;
        app.open_initial(Path::new(file_path)).await?;
        Ok(app)
    }

    /// Replace the initial untitled window with one showing `path`
    pub async fn open_initial(&mut self, path: &Path) -> Result<()> {
        let initial = self.windows.active_id();

        if tokio::fs::try_exists(path).await.unwrap_or(false) {
            self.windows.open(path).await?;
        } else {
            log::info!("{} does not exist yet, starting empty", path.display());
            self.windows.new_window_at(path);
        }

        if let Some(id) = initial {
            self.windows.close(id);
        }
        Ok(())
    }

    /// Run the application until the user quits or closes the last window
    pub async fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let frame_duration = Duration::from_millis(16);

        while self.running {
            let now = Instant::now();
            self.windows.refresh(now);
            self.autosave(now).await?;
            self.process_events();
            self.toast_manager.update(now);

            terminal.draw(|f| self.render(f))?;

            if event::poll(frame_duration)? {
                if let Some(event) = AppEvent::from_terminal(event::read()?) {
                    if let Err(e) = self.handle_event(event).await {
                        log::error!("Error handling input: {:#}", e);
                    }
                }
            }

            if self.windows.is_empty() {
                self.running = false;
            }
        }

        log::info!("Event loop ended");
        Ok(())
    }

    /// Dispatch one event
    pub async fn handle_event(&mut self, event: AppEvent) -> Result<()> {
        match event {
            AppEvent::KeyInput(key) => self.handle_key(key).await?,
            AppEvent::MouseInput(mouse) => self.handle_mouse(mouse),
            AppEvent::Paste(text) => self.handle_paste(&text),
            AppEvent::Resize { width, height } => {
                log::debug!("Terminal resized to {}x{}", width, height);
            }
            other => self.apply_notification(other),
        }
        self.process_events();
        Ok(())
    }

    /// Apply every queued notification
    pub fn process_events(&mut self) {
        for event in self.events.drain() {
            self.apply_notification(event);
        }
    }

    fn apply_notification(&mut self, event: AppEvent) {
        match event {
            AppEvent::StatusMessage { message } => {
                self.status_message = Some(message.to_string());
            }
            AppEvent::ToastMessage {
                message,
                toast_type,
            } => {
                self.toast_manager.push(message.to_string(), toast_type);
            }
            AppEvent::Quit => {
                self.running = false;
            }
            other => {
                log::debug!("Ignoring queued input event {:?}", other);
            }
        }
    }

    /// Show a message in the status bar, and as a toast when `toast_type` is given
    pub fn notify(&self, message: impl Into<Arc<str>>, toast_type: Option<ToastType>) -> Result<()> {
        let message = message.into();
        if let Some(toast_type) = toast_type {
            self.events.publish(AppEvent::ToastMessage {
                message: message.clone(),
                toast_type,
            })?;
        }
        self.events.publish(AppEvent::StatusMessage { message })
    }

    pub fn active_window(&self) -> Option<&DocumentWindow> {
        self.windows.active()
    }

    /// Run an edit against the focused window and keep its cursor in view
    pub fn edit<F>(&mut self, f: F)
    where
        F: FnOnce(&mut EditorView, &mut Document),
    {
        if let Some(window) = self.windows.active_mut() {
            let before = window.revision();
            f(&mut window.view, &mut window.document);
            window.view.ensure_cursor_visible(&window.document);
            if window.revision() != before {
                self.quit_armed = false;
            }
        }
    }

    /// Open a new untitled window
    pub fn new_window(&mut self) -> Result<()> {
        self.windows.new_window();
        self.notify("New document", None)
    }

    /// Open `path` in a new window. Failures are reported to the user, not returned.
    pub async fn open_path(&mut self, path: &Path) -> Result<()> {
        match self.windows.open(path).await {
            Ok(_) => self.notify(format!("Opened {}", path.display()), Some(ToastType::Success)),
            Err(e) => {
                log::error!("{:#}", e);
                self.notify(format!("{:#}", e), Some(ToastType::Error))
            }
        }
    }

    /// Save the focused window, or ask for a path if it has none
    pub async fn save_active(&mut self) -> Result<()> {
        let Some(window) = self.windows.active() else {
            return Ok(());
        };

        if window.path.is_none() {
            self.prompt = Some(Prompt::new(crate::widgets::PromptAction::SaveAs));
            return Ok(());
        }

        let id = window.id;
        match self.windows.save(id).await {
            Ok(path) => self.notify(format!("Saved {}", path.display()), Some(ToastType::Success)),
            Err(e) => {
                log::error!("{:#}", e);
                self.notify(format!("{:#}", e), Some(ToastType::Error))
            }
        }
    }

    /// Save the focused window to `path`
    pub async fn save_active_as(&mut self, path: &Path) -> Result<()> {
        let Some(id) = self.windows.active_id() else {
            return Ok(());
        };

        match self.windows.save_as(id, path).await {
            Ok(()) => self.notify(format!("Saved {}", path.display()), Some(ToastType::Success)),
            Err(e) => {
                log::error!("{:#}", e);
                self.notify(format!("{:#}", e), Some(ToastType::Error))
            }
        }
    }

    /// Close the focused window. Closing the last window quits.
    pub fn close_active(&mut self) -> Result<()> {
        if let Some(id) = self.windows.active_id() {
            self.windows.close(id);
        }
        if self.windows.is_empty() {
            self.events.publish(AppEvent::Quit)?;
        }
        Ok(())
    }

    /// Quit, asking for confirmation once if anything is unsaved
    pub fn request_quit(&mut self) -> Result<()> {
        if self.windows.has_unsaved_changes() && !self.quit_armed {
            self.quit_armed = true;
            return self.notify(
                "Unsaved changes - press Ctrl+Q again to quit",
                Some(ToastType::Info),
            );
        }
        self.events.publish(AppEvent::Quit)
    }

    /// Save windows whose edits have settled, when autosave is on
    pub async fn autosave(&mut self, now: Instant) -> Result<()> {
        if !self.config.editor.auto_save {
            return Ok(());
        }

        let delay = Duration::from_millis(self.config.editor.auto_save_delay);
        for id in self.windows.autosave_due(now, delay) {
            if let Err(e) = self.windows.save(id).await {
                self.windows.autosave_failed(id);
                log::error!("Autosave failed: {:#}", e);
                self.notify(format!("Autosave failed: {:#}", e), Some(ToastType::Error))?;
            }
        }
        Ok(())
    }

    /// Initialize the status bar with default slots
    pub fn init_status_bar(&mut self) {
        use crate::widgets::{SlotAlignment, StatusSlot};
        use ratatui::style::{Color, Style};

        self.status_bar.set_slot(
            StatusSlot::new("file", "")
                .with_alignment(SlotAlignment::Left)
                .with_priority(100),
        );
        self.status_bar.set_slot(
            StatusSlot::new("cursor", "")
                .with_alignment(SlotAlignment::Left)
                .with_priority(90),
        );
        self.status_bar.set_slot(
            StatusSlot::new("modified", "")
                .with_alignment(SlotAlignment::Left)
                .with_priority(80),
        );
        self.status_bar.set_slot(
            StatusSlot::new("message", "")
                .with_alignment(SlotAlignment::Left)
                .with_priority(10)
                .with_style(Style::default().fg(Color::Black).bg(Color::LightBlue)),
        );
        self.status_bar.set_slot(
            StatusSlot::new("window_count", "")
                .with_alignment(SlotAlignment::Right)
                .with_priority(100)
                .with_style(Style::default().fg(Color::White).bg(Color::DarkGray)),
        );
    }

    /// Update status bar slots with current application state
    pub fn update_status_bar(&mut self) {
        if let Some(window) = self.windows.active() {
            let position = window.view.cursor_position(&window.document);
            let cursor_info = format!("Ln {}, Col {}", position.row + 1, position.col + 1);
            let modified_text = if window.is_edited() { "Unsaved" } else { "Saved" };
            let window_info = format!(
                "Window {}/{}",
                self.windows.active_index() + 1,
                self.windows.len()
            );

            self.status_bar.update_slot_content("file", window.name.as_str());
            self.status_bar.update_slot_content("cursor", cursor_info);
            self.status_bar.update_slot_content("modified", modified_text);
            self.status_bar.update_slot_content("window_count", window_info);
        }

        let message = self.status_message.clone().unwrap_or_default();
        self.status_bar.update_slot_content("message", message);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::with_config(Config::default(), PathBuf::from("."))
    }
}
