use crate::widgets::{PathPrompt, TextArea, ToastWidget};
use crate::App;
use ratatui::prelude::*;

impl App {
    /// Main render function for the application UI
    pub fn render(&mut self, f: &mut Frame) {
        let show_status_bar = self.config.ui.show_status_bar;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),                          // Editor area
                Constraint::Length(u16::from(show_status_bar)), // Status line
            ])
            .split(f.area());

        self.render_editor(f, chunks[0]);

        if show_status_bar {
            self.update_status_bar();
            f.render_widget(self.status_bar.clone(), chunks[1]);
        }

        if self.toast_manager.has_active_toasts() {
            f.render_widget(ToastWidget::new(&self.toast_manager), f.area());
        }

        if let Some(prompt) = &self.prompt {
            let palette = PathPrompt::new(prompt);
            f.set_cursor_position(palette.cursor_position(f.area()));
            f.render_widget(palette, f.area());
        }
    }

    /// Render the active window's text surface and place the terminal cursor
    fn render_editor(&mut self, f: &mut Frame, area: Rect) {
        self.editor_area = area;
        let show_line_numbers = self.config.editor.show_line_numbers;
        let prompt_open = self.prompt.is_some();

        let Some(window) = self.windows.active_mut() else {
            return;
        };

        let viewport = TextArea::new(&window.document, &window.view)
            .show_line_numbers(show_line_numbers)
            .text_viewport(area);
        // Only follow the cursor when the size changed, so wheel scrolling sticks
        if window.view.viewport != viewport {
            window.view.viewport = viewport;
            window.view.ensure_cursor_visible(&window.document);
        }

        let text_area =
            TextArea::new(&window.document, &window.view).show_line_numbers(show_line_numbers);

        let cursor = window.view.cursor_position(&window.document);
        let screen_cursor = text_area.screen_position(cursor, area);
        f.render_widget(text_area, area);

        if !prompt_open {
            if let Some(position) = screen_cursor {
                f.set_cursor_position(position);
            }
        }
    }
}
