use ratatui::crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::widgets::TextArea;
use crate::App;

/// Rows moved per wheel notch
const SCROLL_LINES: isize = 3;

impl App {
    /// Handle mouse events over the text surface
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.prompt.is_some() {
            return;
        }

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.handle_click(mouse.column, mouse.row),
            MouseEventKind::ScrollUp => self.handle_scroll(-SCROLL_LINES),
            MouseEventKind::ScrollDown => self.handle_scroll(SCROLL_LINES),
            _ => {}
        }
    }

    /// Place the cursor under the click
    fn handle_click(&mut self, column: u16, row: u16) {
        let area = self.editor_area;
        let show_line_numbers = self.config.editor.show_line_numbers;

        if let Some(window) = self.windows.active_mut() {
            let target = TextArea::new(&window.document, &window.view)
                .show_line_numbers(show_line_numbers)
                .text_position(column, row, area);

            if let Some(position) = target {
                window.view.set_cursor_position(&window.document, position);
            }
        }
    }

    /// Scroll the view without moving the cursor
    fn handle_scroll(&mut self, delta: isize) {
        if let Some(window) = self.windows.active_mut() {
            window.view.scroll(&window.document, delta);
        }
    }
}
