use ratatui::{
    buffer::Buffer as TuiBuffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};
use std::time::{Duration, Instant};

/// Type of toast notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastType {
    Info,
    Success,
    Error,
}

impl ToastType {
    fn color(&self) -> Color {
        match self {
            ToastType::Info => Color::Cyan,
            ToastType::Success => Color::Green,
            ToastType::Error => Color::Red,
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            ToastType::Info => "ℹ",
            ToastType::Success => "✓",
            ToastType::Error => "✗",
        }
    }
}

/// A single toast notification
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub toast_type: ToastType,
    pub created_at: Instant,
    pub duration: Duration,
}

impl Toast {
    pub fn new(message: impl Into<String>, toast_type: ToastType) -> Self {
        Self {
            message: message.into(),
            toast_type,
            created_at: Instant::now(),
            duration: Duration::from_secs(3),
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) > self.duration
    }
}

/// Toast notification stack, newest at the bottom
#[derive(Debug)]
pub struct ToastManager {
    toasts: Vec<Toast>,
    max_toasts: usize,
    duration: Duration,
}

impl Default for ToastManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ToastManager {
    pub fn new() -> Self {
        Self {
            toasts: Vec::new(),
            max_toasts: 5,
            duration: Duration::from_secs(3),
        }
    }

    /// Lifetime given to toasts added through [`ToastManager::push`]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn add_toast(&mut self, toast: Toast) {
        self.toasts.push(toast);

        // Remove oldest toasts if we exceed the maximum
        while self.toasts.len() > self.max_toasts {
            self.toasts.remove(0);
        }
    }

    pub fn push(&mut self, message: impl Into<String>, toast_type: ToastType) {
        let toast = Toast::new(message, toast_type).with_duration(self.duration);
        self.add_toast(toast);
    }

    /// Remove expired toasts
    pub fn update(&mut self, now: Instant) {
        self.toasts.retain(|toast| !toast.is_expired(now));
    }

    pub fn has_active_toasts(&self) -> bool {
        !self.toasts.is_empty()
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }
}

/// Renders the toast stack in the top-right corner of its area
pub struct ToastWidget<'a> {
    manager: &'a ToastManager,
}

impl<'a> ToastWidget<'a> {
    pub fn new(manager: &'a ToastManager) -> Self {
        Self { manager }
    }
}

impl Widget for ToastWidget<'_> {
    fn render(self, area: Rect, buf: &mut TuiBuffer) {
        let width = 40.min(area.width.saturating_sub(2));
        if width < 8 {
            return;
        }

        // 3 rows per toast: border, message, border
        for (i, toast) in self.manager.toasts.iter().enumerate() {
            let y = area.y + 1 + i as u16 * 3;
            if y + 3 > area.y + area.height {
                break;
            }
            let toast_area = Rect::new(area.x + area.width - width - 1, y, width, 3);
            render_toast(toast, toast_area, buf);
        }
    }
}

fn render_toast(toast: &Toast, area: Rect, buf: &mut TuiBuffer) {
    let color = toast.toast_type.color();

    Clear.render(area, buf);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .style(Style::default().bg(Color::Rgb(30, 30, 30)));
    let inner = block.inner(area);
    block.render(area, buf);

    // icon + space take 2 cells
    let room = (inner.width as usize).saturating_sub(2);
    let message: String = if toast.message.chars().count() > room {
        let mut truncated: String = toast.message.chars().take(room.saturating_sub(3)).collect();
        truncated.push_str("...");
        truncated
    } else {
        toast.message.clone()
    };

    let line = Line::from(vec![
        Span::styled(
            format!("{} ", toast.toast_type.icon()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(message, Style::default().fg(Color::White)),
    ]);
    Paragraph::new(line).render(inner, buf);
}
