//! # Editor View
//!
//! The editing side of the single text surface bound to a [`Document`].
//!
//! The view owns no text. Each edit action is pushed straight into the
//! document, and everything the view displays is read back from
//! `document.text()`. What the view does keep is local to the surface:
//!
//! - the cursor, as a byte offset into the document text
//! - the column to aim for when moving up and down
//! - the scroll offset and the size of the visible area
//!
//! Rows are `\n`-separated lines of the text; columns count characters.
//! Horizontal scrolling measures terminal cells, so wide characters take
//! two columns on screen.

use std::ops::Range;

use unicode_width::UnicodeWidthChar;

use crate::document::Document;

/// Cursor movement commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMovement {
    Up,
    Down,
    Left,
    Right,
    LineStart,
    LineEnd,
    PageUp,
    PageDown,
    DocumentStart,
    DocumentEnd,
}

/// Represents a text position (row, column)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Number of display lines in `text`. An empty text still has one line.
pub fn line_count(text: &str) -> usize {
    text.bytes().filter(|b| *b == b'\n').count() + 1
}

/// Byte range of line `row`, excluding its newline. Rows past the end map
/// to an empty range at the end of the text.
pub fn line_range(text: &str, row: usize) -> Range<usize> {
    let mut start = 0;
    for _ in 0..row {
        match text[start..].find('\n') {
            Some(pos) => start += pos + 1,
            None => return text.len()..text.len(),
        }
    }
    let end = text[start..]
        .find('\n')
        .map(|pos| start + pos)
        .unwrap_or(text.len());
    start..end
}

/// Terminal cells taken by `c`. Tabs are drawn as a single cell.
pub fn char_width(c: char) -> usize {
    if c == '\t' {
        1
    } else {
        c.width().unwrap_or(0)
    }
}

/// Convert a byte offset into a (row, char column) position
pub fn offset_to_position(text: &str, offset: usize) -> Position {
    let before = &text[..offset];
    let row = before.bytes().filter(|b| *b == b'\n').count();
    let line_start = before.rfind('\n').map(|pos| pos + 1).unwrap_or(0);
    let col = before[line_start..].chars().count();
    Position { row, col }
}

/// Convert a position into a byte offset, clamping the row to the last line
/// and the column to the end of that line
pub fn position_to_offset(text: &str, position: Position) -> usize {
    let last_row = line_count(text) - 1;
    let range = line_range(text, position.row.min(last_row));
    let line = &text[range.clone()];
    let col_bytes = line
        .char_indices()
        .nth(position.col)
        .map(|(idx, _)| idx)
        .unwrap_or(line.len());
    range.start + col_bytes
}

/// Editing state of the text surface
#[derive(Debug, Clone)]
pub struct EditorView {
    /// Cursor as a byte offset into the document text
    cursor: usize,
    /// Column remembered across vertical movement
    preferred_col: Option<usize>,
    /// (row, col) offset for viewport scrolling
    pub scroll_offset: (usize, usize),
    /// Visible (rows, cols) of the text area, updated on render
    pub viewport: (usize, usize),
}

impl Default for EditorView {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorView {
    pub fn new() -> Self {
        Self {
            cursor: 0,
            preferred_col: None,
            scroll_offset: (0, 0),
            viewport: (24, 80),
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Cursor position, re-clamped against the current text
    pub fn cursor_position(&self, doc: &Document) -> Position {
        offset_to_position(doc.text(), doc.clamp_offset(self.cursor))
    }

    /// Move the cursor to a byte offset
    pub fn set_cursor(&mut self, doc: &Document, offset: usize) {
        self.cursor = doc.clamp_offset(offset);
        self.preferred_col = None;
    }

    /// Move the cursor to a (row, col) position, clamped to the text
    pub fn set_cursor_position(&mut self, doc: &Document, position: Position) {
        self.cursor = position_to_offset(doc.text(), position);
        self.preferred_col = None;
    }

    /// Keep the cursor on a valid boundary after the text changed elsewhere
    pub fn sync(&mut self, doc: &Document) {
        self.cursor = doc.clamp_offset(self.cursor);
    }

    pub fn insert_char(&mut self, doc: &mut Document, c: char) {
        let mut buf = [0u8; 4];
        self.insert_str(doc, c.encode_utf8(&mut buf));
    }

    /// Insert text at the cursor and move past it
    pub fn insert_str(&mut self, doc: &mut Document, text: &str) {
        self.sync(doc);
        self.cursor = doc.insert(self.cursor, text);
        self.preferred_col = None;
    }

    pub fn insert_newline(&mut self, doc: &mut Document) {
        self.insert_str(doc, "\n");
    }

    /// Insert a tab, or spaces up to the next tab stop
    pub fn insert_tab(&mut self, doc: &mut Document, use_spaces: bool, tab_size: usize) {
        if use_spaces && tab_size > 0 {
            let col = self.cursor_position(doc).col;
            let width = tab_size - (col % tab_size);
            self.insert_str(doc, &" ".repeat(width));
        } else {
            self.insert_char(doc, '\t');
        }
    }

    /// Delete the character before the cursor. Returns false at the start of the text.
    pub fn backspace(&mut self, doc: &mut Document) -> bool {
        self.sync(doc);
        let Some(prev) = doc.text()[..self.cursor].chars().next_back() else {
            return false;
        };
        let start = self.cursor - prev.len_utf8();
        doc.remove(start..self.cursor);
        self.cursor = start;
        self.preferred_col = None;
        true
    }

    /// Delete the character at the cursor. Returns false at the end of the text.
    pub fn delete(&mut self, doc: &mut Document) -> bool {
        self.sync(doc);
        let Some(next) = doc.text()[self.cursor..].chars().next() else {
            return false;
        };
        doc.remove(self.cursor..self.cursor + next.len_utf8());
        self.preferred_col = None;
        true
    }

    /// Delete from the start of the current line up to the cursor
    pub fn delete_to_line_start(&mut self, doc: &mut Document) -> bool {
        self.sync(doc);
        let line_start = doc.text()[..self.cursor]
            .rfind('\n')
            .map(|pos| pos + 1)
            .unwrap_or(0);
        if line_start == self.cursor {
            return false;
        }
        doc.remove(line_start..self.cursor);
        self.cursor = line_start;
        self.preferred_col = None;
        true
    }

    pub fn move_cursor(&mut self, doc: &Document, movement: CursorMovement) {
        self.sync(doc);
        let text = doc.text();
        let pos = offset_to_position(text, self.cursor);
        let last_row = line_count(text) - 1;
        let page_size = self.viewport.0.max(1);

        match movement {
            CursorMovement::Left => {
                if let Some(prev) = text[..self.cursor].chars().next_back() {
                    self.cursor -= prev.len_utf8();
                }
                self.preferred_col = None;
            }
            CursorMovement::Right => {
                if let Some(next) = text[self.cursor..].chars().next() {
                    self.cursor += next.len_utf8();
                }
                self.preferred_col = None;
            }
            CursorMovement::Up | CursorMovement::PageUp => {
                let step = if movement == CursorMovement::Up { 1 } else { page_size };
                if pos.row == 0 {
                    self.cursor = 0;
                    self.preferred_col = None;
                } else {
                    self.move_vertically(text, pos, pos.row.saturating_sub(step));
                }
            }
            CursorMovement::Down | CursorMovement::PageDown => {
                let step = if movement == CursorMovement::Down { 1 } else { page_size };
                if pos.row == last_row {
                    self.cursor = text.len();
                    self.preferred_col = None;
                } else {
                    self.move_vertically(text, pos, (pos.row + step).min(last_row));
                }
            }
            CursorMovement::LineStart => {
                self.cursor = line_range(text, pos.row).start;
                self.preferred_col = None;
            }
            CursorMovement::LineEnd => {
                self.cursor = line_range(text, pos.row).end;
                self.preferred_col = None;
            }
            CursorMovement::DocumentStart => {
                self.cursor = 0;
                self.preferred_col = None;
            }
            CursorMovement::DocumentEnd => {
                self.cursor = text.len();
                self.preferred_col = None;
            }
        }
    }

    fn move_vertically(&mut self, text: &str, from: Position, row: usize) {
        let col = *self.preferred_col.get_or_insert(from.col);
        self.cursor = position_to_offset(text, Position::new(row, col));
    }

    /// Scroll the viewport by `delta` rows without moving the cursor
    pub fn scroll(&mut self, doc: &Document, delta: isize) {
        let total = line_count(doc.text());
        let height = self.viewport.0;

        // Allow scrolling past the end by half a screen to see the final lines comfortably
        let max_scroll = if total > height {
            total + (height / 2) - height
        } else {
            0
        };

        let row = self.scroll_offset.0;
        let new_row = if delta >= 0 {
            row.saturating_add(delta as usize)
        } else {
            row.saturating_sub(delta.unsigned_abs())
        };
        self.scroll_offset.0 = new_row.min(max_scroll);
    }

    /// Adjust the scroll offset so the cursor is inside the viewport
    pub fn ensure_cursor_visible(&mut self, doc: &Document) {
        let Position { row, col } = self.cursor_position(doc);
        let (visible_rows, visible_cols) = self.viewport;
        let (scroll_row, scroll_col) = self.scroll_offset;

        if visible_rows > 0 {
            if row < scroll_row {
                self.scroll_offset.0 = row;
            } else if row >= scroll_row + visible_rows {
                self.scroll_offset.0 = row + 1 - visible_rows;
            }
        }

        if visible_cols > 0 {
            if col < scroll_col {
                self.scroll_offset.1 = col;
            } else {
                let text = doc.text();
                let widths: Vec<usize> = text[line_range(text, row)]
                    .chars()
                    .take(col)
                    .map(char_width)
                    .collect();

                // The cursor cell itself needs room after the text before it
                let mut start = scroll_col;
                let mut used: usize = widths[start..].iter().sum();
                while start < col && used + 1 > visible_cols {
                    used -= widths[start];
                    start += 1;
                }
                self.scroll_offset.1 = start;
            }
        }
    }
}
