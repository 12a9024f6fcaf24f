use ratatui::{
    buffer::Buffer as TuiBuffer,
    layout::{Position as ScreenPosition, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::document::Document;
use crate::view::{char_width, line_count, line_range, EditorView, Position};

/// Count the number of digits in a number
pub fn count_digits(mut n: usize) -> usize {
    if n == 0 {
        return 1;
    }
    let mut digits = 0;
    while n > 0 {
        digits += 1;
        n /= 10;
    }
    digits
}

/// Width of the line number gutter for a text with `total_lines` lines.
/// Always reserves at least 4 digits so the text does not shift while typing.
pub fn line_number_width(total_lines: usize) -> usize {
    count_digits(total_lines.max(1)).max(4) + 1 // +1 for spacing
}

/// The editable text surface. Renders exactly the document text.
pub struct TextArea<'a> {
    pub document: &'a Document,
    pub scroll_offset: (usize, usize), // (row, col) offset for viewport scrolling
    pub show_line_numbers: bool,
}

impl<'a> TextArea<'a> {
    pub fn new(document: &'a Document, view: &EditorView) -> Self {
        Self {
            document,
            scroll_offset: view.scroll_offset,
            show_line_numbers: true,
        }
    }

    pub fn show_line_numbers(mut self, show: bool) -> Self {
        self.show_line_numbers = show;
        self
    }

    fn gutter_width(&self) -> usize {
        if self.show_line_numbers {
            line_number_width(line_count(self.document.text()))
        } else {
            0
        }
    }

    /// Rows and columns available for text inside `area`
    pub fn text_viewport(&self, area: Rect) -> (usize, usize) {
        let cols = (area.width as usize).saturating_sub(self.gutter_width());
        (area.height as usize, cols)
    }

    /// Characters of line `row` from the horizontal scroll offset on
    fn visible_chars(&self, row: usize) -> impl Iterator<Item = char> + '_ {
        let text = self.document.text();
        text[line_range(text, row)].chars().skip(self.scroll_offset.1)
    }

    /// Screen cell of a text position, if it is scrolled into view
    pub fn screen_position(&self, position: Position, area: Rect) -> Option<ScreenPosition> {
        let (scroll_row, scroll_col) = self.scroll_offset;
        if position.row < scroll_row || position.col < scroll_col {
            return None;
        }

        let y = position.row - scroll_row;
        let cells: usize = self
            .visible_chars(position.row)
            .take(position.col - scroll_col)
            .map(char_width)
            .sum();
        let x = cells + self.gutter_width();
        if y >= area.height as usize || x >= area.width as usize {
            return None;
        }

        Some(ScreenPosition::new(area.x + x as u16, area.y + y as u16))
    }

    /// Text position under a screen cell. Clicks in the gutter land on
    /// column 0; rows and columns past the text are clamped later by the view.
    pub fn text_position(&self, column: u16, row: u16, area: Rect) -> Option<Position> {
        if !area.contains(ScreenPosition::new(column, row)) {
            return None;
        }

        let relative_x = (column - area.x) as usize;
        let relative_y = (row - area.y) as usize;
        let (scroll_row, scroll_col) = self.scroll_offset;
        let text_row = scroll_row + relative_y;

        let Some(target) = relative_x.checked_sub(self.gutter_width()) else {
            return Some(Position::new(text_row, 0));
        };

        // Either half of a wide character selects it
        let mut cells = 0;
        let mut col = scroll_col;
        for c in self.visible_chars(text_row) {
            let width = char_width(c);
            if target < cells + width {
                return Some(Position::new(text_row, col));
            }
            cells += width;
            col += 1;
        }
        // Past the end of the line; the view clamps the column
        Some(Position::new(text_row, col + (target - cells)))
    }
}

impl Widget for TextArea<'_> {
    fn render(self, area: Rect, buf: &mut TuiBuffer) {
        let (start_row, h_offset) = self.scroll_offset;
        let gutter = self.gutter_width();

        let mut lines = Vec::with_capacity(area.height as usize);
        for (i, line) in self
            .document
            .text()
            .split('\n')
            .enumerate()
            .skip(start_row)
            .take(area.height as usize)
        {
            // Tabs take one cell so screen columns match character columns
            let visible: String = line
                .chars()
                .skip(h_offset)
                .map(|c| if c == '\t' { ' ' } else { c })
                .collect();

            let mut spans = Vec::with_capacity(3);
            if self.show_line_numbers {
                let line_num_str = format!("{:>width$}", i + 1, width = gutter - 1);
                spans.push(Span::styled(
                    line_num_str,
                    Style::default().fg(Color::Rgb(100, 100, 120)),
                ));
                spans.push(Span::raw(" "));
            }
            spans.push(Span::raw(visible));
            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .style(Style::default().fg(Color::White).bg(Color::Black))
            .render(area, buf);
    }
}
