use ratatui::{
    buffer::Buffer as TuiBuffer,
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

/// What a confirmed path prompt should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptAction {
    Open,
    SaveAs,
}

impl PromptAction {
    pub fn title(&self) -> &'static str {
        match self {
            PromptAction::Open => " Open ",
            PromptAction::SaveAs => " Save As ",
        }
    }
}

/// Input state of the path prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub action: PromptAction,
    pub input: String,
}

impl Prompt {
    pub fn new(action: PromptAction) -> Self {
        Self {
            action,
            input: String::new(),
        }
    }

    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = input.into();
        self
    }
}

/// Centered single-line modal asking for a file path
pub struct PathPrompt<'a> {
    prompt: &'a Prompt,
}

impl<'a> PathPrompt<'a> {
    pub fn new(prompt: &'a Prompt) -> Self {
        Self { prompt }
    }

    /// Calculate the centered area for the prompt, in the upper third
    fn centered_rect(&self, area: Rect) -> Rect {
        let height = 4; // borders + input + hint
        let width = 80.min(area.width.saturating_sub(4));

        let popup_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length((area.height.saturating_sub(height)) / 3),
                Constraint::Length(height),
                Constraint::Min(0),
            ])
            .split(area);

        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length((area.width.saturating_sub(width)) / 2),
                Constraint::Length(width),
                Constraint::Min(0),
            ])
            .split(popup_layout[1])[1]
    }

    /// Screen cell of the input cursor, which always sits at the end of the input
    pub fn cursor_position(&self, area: Rect) -> Position {
        let inner = Block::default()
            .borders(Borders::ALL)
            .inner(self.centered_rect(area));
        let input_len = u16::try_from(self.prompt.input.chars().count()).unwrap_or(u16::MAX);
        let offset = input_len.saturating_add(2); // 2 for "> "
        Position::new(
            inner
                .x
                .saturating_add(offset)
                .min(inner.right().saturating_sub(1)),
            inner.y,
        )
    }
}

impl Widget for PathPrompt<'_> {
    fn render(self, area: Rect, buf: &mut TuiBuffer) {
        let modal_area = self.centered_rect(area);
        Clear.render(modal_area, buf);

        let block = Block::default()
            .title(Span::styled(
                self.prompt.action.title(),
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Rgb(0, 100, 200))
                    .add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(
                Style::default()
                    .fg(Color::Rgb(0, 150, 255))
                    .add_modifier(Modifier::BOLD),
            )
            .style(Style::default().bg(Color::Rgb(20, 20, 30)));

        let inner_area = block.inner(modal_area);
        block.render(modal_area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(inner_area);

        let input_line = Line::from(vec![
            Span::styled(
                "> ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(self.prompt.input.as_str(), Style::default().fg(Color::White)),
        ]);
        Paragraph::new(input_line)
            .style(Style::default().bg(Color::Rgb(30, 30, 50)))
            .render(chunks[0], buf);

        let hint = Line::from(Span::styled(
            "Enter to confirm, Esc to cancel",
            Style::default().fg(Color::DarkGray),
        ));
        Paragraph::new(hint).render(chunks[1], buf);
    }
}
