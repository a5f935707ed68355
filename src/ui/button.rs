//! Confirm button widget.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use super::theme::Theme;

/// The confirm button at the bottom of the screen.  Disabled (and rendered
/// dim) while the selection is empty.
pub struct ConfirmButton {
    enabled: bool,
    key_hint: Option<String>,
}

impl ConfirmButton {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            key_hint: None,
        }
    }

    /// Show the confirm key binding inside the label.
    pub fn key_hint(mut self, hint: impl Into<String>) -> Self {
        self.key_hint = Some(hint.into());
        self
    }
}

impl Widget for ConfirmButton {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (label_style, border_style) = if self.enabled {
            (Theme::confirm_enabled_style(), Theme::border_focused_style())
        } else {
            (Theme::confirm_disabled_style(), Theme::border_style())
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        let label = match self.key_hint {
            Some(hint) => format!(" Confirm Selection ({hint}) "),
            None => " Confirm Selection ".to_string(),
        };
        Paragraph::new(Line::from(Span::styled(label, label_style)))
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}
