use ratatui::{
    buffer::Buffer as TuiBuffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use std::collections::HashMap;

/// Which end of the status bar a slot sits at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotAlignment {
    Left,
    Right,
}

/// Represents a single slot in the status bar
#[derive(Debug, Clone)]
pub struct StatusSlot {
    pub id: String,
    pub content: String,
    pub alignment: SlotAlignment,
    pub priority: u8, // Higher priority = closer to the edge of the bar
    pub style: Style,
}

impl StatusSlot {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            alignment: SlotAlignment::Left,
            priority: 50,
            style: Style::default().fg(Color::White).bg(Color::LightBlue),
        }
    }

    pub fn with_alignment(mut self, alignment: SlotAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

/// Single-line status bar made of named slots
#[derive(Clone)]
pub struct StatusBar {
    slots: HashMap<String, StatusSlot>,
    background_style: Style,
    separator: String,
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusBar {
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
            background_style: Style::default().bg(Color::LightBlue).fg(Color::White),
            separator: " | ".to_string(),
        }
    }

    /// Add or update a slot in the status bar
    pub fn set_slot(&mut self, slot: StatusSlot) {
        self.slots.insert(slot.id.clone(), slot);
    }

    pub fn get_slot(&self, id: &str) -> Option<&StatusSlot> {
        self.slots.get(id)
    }

    pub fn update_slot_content(&mut self, id: &str, content: impl Into<String>) {
        if let Some(slot) = self.slots.get_mut(id) {
            slot.content = content.into();
        }
    }

    /// Non-empty slots for one side, outermost first
    fn side(&self, alignment: SlotAlignment) -> Vec<&StatusSlot> {
        let mut slots: Vec<&StatusSlot> = self
            .slots
            .values()
            .filter(|s| s.alignment == alignment && !s.content.is_empty())
            .collect();
        // Ties broken by id so the order is stable between frames
        slots.sort_by(|a, b| b.priority.cmp(&a.priority).then_with(|| a.id.cmp(&b.id)));
        slots
    }

    fn spans<'a>(&'a self, slots: &[&'a StatusSlot]) -> Vec<Span<'a>> {
        let mut spans = Vec::new();
        for (i, slot) in slots.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(self.separator.as_str(), self.background_style));
            }
            spans.push(Span::styled(slot.content.as_str(), slot.style));
        }
        spans
    }
}

fn spans_width(spans: &[Span]) -> usize {
    spans.iter().map(|span| span.content.chars().count()).sum()
}

impl Widget for StatusBar {
    fn render(self, area: Rect, buf: &mut TuiBuffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let left_slots = self.side(SlotAlignment::Left);
        let mut right_slots = self.side(SlotAlignment::Right);
        // Highest priority sits at the far right
        right_slots.reverse();

        let mut spans = self.spans(&left_slots);
        let right = self.spans(&right_slots);

        let used = spans_width(&spans) + spans_width(&right);
        let available = area.width as usize;

        // Right side is dropped when it does not fit; the left side clips at the edge
        if used <= available {
            spans.push(Span::styled(
                " ".repeat(available - used),
                self.background_style,
            ));
            spans.extend(right);
        }

        Paragraph::new(Line::from(spans))
            .style(self.background_style)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_bar_slot_management() {
        let mut status_bar = StatusBar::new();
        status_bar.set_slot(StatusSlot::new("test", "content"));

        status_bar.update_slot_content("test", "new content");
        assert_eq!(status_bar.get_slot("test").unwrap().content, "new content");

        // Unknown slots are ignored
        status_bar.update_slot_content("missing", "text");
        assert!(status_bar.get_slot("missing").is_none());
    }

    #[test]
    fn sides_are_ordered_by_priority() {
        let mut status_bar = StatusBar::new();
        status_bar.set_slot(StatusSlot::new("low", "b").with_priority(10));
        status_bar.set_slot(StatusSlot::new("high", "a").with_priority(90));
        status_bar.set_slot(StatusSlot::new("empty", "").with_priority(99));

        let ids: Vec<&str> = status_bar
            .side(SlotAlignment::Left)
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(ids, vec!["high", "low"]);
    }
}
