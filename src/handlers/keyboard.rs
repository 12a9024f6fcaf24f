use std::path::PathBuf;

use anyhow::Result;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::view::CursorMovement;
use crate::widgets::{Prompt, PromptAction};
use crate::App;

impl App {
    /// Handle a key press
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Some terminals also report releases
        if key.kind == KeyEventKind::Release {
            return Ok(());
        }

        if self.prompt.is_some() {
            return self.handle_prompt_key(key).await;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Char('q'), KeyModifiers::CONTROL) => self.request_quit()?,
            (KeyCode::Char('n'), KeyModifiers::CONTROL) => self.new_window()?,
            (KeyCode::Char('o'), KeyModifiers::CONTROL) => {
                self.prompt = Some(Prompt::new(PromptAction::Open));
            }
            (KeyCode::Char('s'), KeyModifiers::CONTROL) => self.save_active().await?,
            (KeyCode::Char('s'), KeyModifiers::ALT) => {
                let current = self
                    .active_window()
                    .and_then(|w| w.path.as_ref())
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                self.prompt = Some(Prompt::new(PromptAction::SaveAs).with_input(current));
            }
            (KeyCode::Char('w'), KeyModifiers::CONTROL) => self.close_active()?,
            (KeyCode::PageDown, KeyModifiers::CONTROL) => self.windows.focus_next(),
            (KeyCode::PageUp, KeyModifiers::CONTROL) => self.windows.focus_prev(),
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                self.edit(|view, doc| {
                    view.delete_to_line_start(doc);
                });
            }

            // Movement keys
            (KeyCode::Up, _) => self.move_cursor(CursorMovement::Up),
            (KeyCode::Down, _) => self.move_cursor(CursorMovement::Down),
            (KeyCode::Left, _) => self.move_cursor(CursorMovement::Left),
            (KeyCode::Right, _) => self.move_cursor(CursorMovement::Right),
            (KeyCode::Home, modifiers) => {
                let movement = if modifiers.contains(KeyModifiers::CONTROL) {
                    CursorMovement::DocumentStart
                } else {
                    CursorMovement::LineStart
                };
                self.move_cursor(movement);
            }
            (KeyCode::End, modifiers) => {
                let movement = if modifiers.contains(KeyModifiers::CONTROL) {
                    CursorMovement::DocumentEnd
                } else {
                    CursorMovement::LineEnd
                };
                self.move_cursor(movement);
            }
            (KeyCode::PageUp, _) => self.move_cursor(CursorMovement::PageUp),
            (KeyCode::PageDown, _) => self.move_cursor(CursorMovement::PageDown),

            // Text input
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                self.edit(|view, doc| view.insert_char(doc, c));
            }
            (KeyCode::Enter, _) => self.edit(|view, doc| view.insert_newline(doc)),
            (KeyCode::Tab, KeyModifiers::NONE) => {
                let use_spaces = self.config.editor.use_spaces;
                let tab_size = self.config.editor.tab_size;
                self.edit(|view, doc| view.insert_tab(doc, use_spaces, tab_size));
            }
            (KeyCode::Backspace, _) => {
                self.edit(|view, doc| {
                    view.backspace(doc);
                });
            }
            (KeyCode::Delete, _) => {
                self.edit(|view, doc| {
                    view.delete(doc);
                });
            }
            _ => {} // Ignore other key combinations
        }

        Ok(())
    }

    fn move_cursor(&mut self, movement: CursorMovement) {
        if let Some(window) = self.windows.active_mut() {
            window.view.move_cursor(&window.document, movement);
            window.view.ensure_cursor_visible(&window.document);
        }
    }

    /// Handle keyboard input while the path prompt is open
    async fn handle_prompt_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => {
                self.prompt = None;
            }
            KeyCode::Enter => {
                if let Some(prompt) = self.prompt.take() {
                    self.confirm_prompt(prompt).await?;
                }
            }
            KeyCode::Char(c) => {
                if let Some(prompt) = self.prompt.as_mut() {
                    prompt.input.push(c);
                }
            }
            KeyCode::Backspace => {
                if let Some(prompt) = self.prompt.as_mut() {
                    prompt.input.pop();
                }
            }
            _ => {}
        }

        Ok(())
    }

    async fn confirm_prompt(&mut self, prompt: Prompt) -> Result<()> {
        let input = prompt.input.trim();
        if input.is_empty() {
            return self.notify("No path given", None);
        }

        let path = PathBuf::from(input);
        match prompt.action {
            PromptAction::Open => self.open_path(&path).await,
            PromptAction::SaveAs => self.save_active_as(&path).await,
        }
    }

    /// Insert pasted text at the cursor, or into the prompt while it is open
    pub fn handle_paste(&mut self, text: &str) {
        if let Some(prompt) = self.prompt.as_mut() {
            prompt.input.extend(text.chars().filter(|c| !c.is_control()));
            return;
        }

        // Terminals deliver pasted line breaks as CR
        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        self.edit(|view, doc| view.insert_str(doc, &text));
    }
}
