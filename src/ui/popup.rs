//! Popup overlay widgets for the settings menu and controls submenu.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::app::settings::{SettingsItem, SETTINGS_ITEMS};
use crate::config::{Action, AppConfig};

use super::theme::Theme;

const CURSOR_PREFIX: &str = " ▸ ";
const FLAT_PREFIX: &str = "   ";

/// Carry the selected-row background onto an accent style.
fn on_selected_row(style: Style) -> Style {
    style.bg(Color::DarkGray)
}

/// Clear a centred region, draw the popup chrome, return the inner area.
fn popup_frame(title: &'static str, width: u16, height: u16, area: Rect, buf: &mut Buffer) -> Rect {
    let popup = centered_fixed(width, height, area);
    Clear.render(popup, buf);

    let block = Block::default()
        .title(title)
        .title_style(Theme::popup_title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::popup_border_style());
    let inner = block.inner(popup);
    block.render(popup, buf);
    inner
}

// ───────────────────────────────────────── settings popup ────

/// Settings menu popup overlay.
pub struct SettingsPopup<'a> {
    pub selected: usize,
    pub config: &'a AppConfig,
}

impl<'a> Widget for SettingsPopup<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = SETTINGS_ITEMS.len() as u16 + 6;
        let inner = popup_frame(" Settings ", 40, height, area, buf);

        let mut lines = vec![Line::raw("")];
        for (i, item) in SETTINGS_ITEMS.iter().enumerate() {
            let selected = i == self.selected;
            let prefix = if selected { CURSOR_PREFIX } else { FLAT_PREFIX };
            let label_style = if selected {
                Theme::popup_item_selected_style()
            } else {
                Theme::popup_item_style()
            };

            let mut spans = vec![Span::styled(format!("{prefix}{}", item.label()), label_style)];
            // Current value rides along for toggles and cycles.
            match item {
                SettingsItem::Submenu { .. } => {}
                SettingsItem::Toggle { get, .. } => {
                    let (text, style) = if get(self.config) {
                        ("  [ON]", Theme::popup_value_on_style())
                    } else {
                        ("  [OFF]", Theme::popup_value_off_style())
                    };
                    spans.push(Span::styled(text, style));
                }
                SettingsItem::Cycle { value, .. } => {
                    spans.push(Span::styled(
                        format!("  [{}]", value(self.config)),
                        Theme::popup_value_style(),
                    ));
                }
            }
            lines.push(Line::from(spans));
        }

        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "  Enter/Space: toggle  Esc: close",
            Theme::popup_hint_style(),
        )));

        Paragraph::new(lines).render(inner, buf);
    }
}

// ───────────────────────────────────────── controls popup ────

/// Interactive controls / keybinding popup overlay.
pub struct ControlsPopup<'a> {
    pub config: &'a AppConfig,
    pub selected: usize,
    pub awaiting_rebind: bool,
}

impl<'a> Widget for ControlsPopup<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Action rows + 2 blanks + 1 reset + 1 hint + 2 border rows.
        let height = Action::ALL.len() as u16 + 7;
        let inner = popup_frame(" Controls ", 52, height, area, buf);

        let mut lines = vec![Line::raw("")];
        for (i, &action) in Action::ALL.iter().enumerate() {
            let selected = i == self.selected;
            let rebinding = selected && self.awaiting_rebind;

            let prefix = if selected { CURSOR_PREFIX } else { FLAT_PREFIX };
            let label_style = if selected {
                Theme::popup_item_selected_style()
            } else {
                Theme::popup_item_style()
            };
            let keys_style = if rebinding {
                on_selected_row(Theme::popup_rebind_style())
            } else if selected {
                on_selected_row(Theme::popup_value_style())
            } else {
                Theme::popup_value_style()
            };

            let keys = if rebinding {
                "Press a key…".to_string()
            } else {
                self.config.display_bindings(action)
            };

            // Label column left, bindings right.  The prefix glyph is three
            // cells wide whatever its byte length.
            let label_cell = format!("{prefix}{:<22}", action.label());
            let pad = (inner.width as usize).saturating_sub(25).max(1);
            lines.push(Line::from(vec![
                Span::styled(label_cell, label_style),
                Span::styled(format!("{keys:>pad$}"), keys_style),
            ]));
        }

        let reset_selected = self.selected == Action::ALL.len();
        let reset_prefix = if reset_selected { CURSOR_PREFIX } else { FLAT_PREFIX };
        let reset_style = if reset_selected {
            Theme::popup_item_selected_style()
        } else {
            Theme::popup_item_style()
        };
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            format!("{reset_prefix}⟳ Reset to defaults"),
            reset_style,
        )));

        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "  Enter: add key  Del: clear  Esc: back",
            Theme::popup_hint_style(),
        )));

        Paragraph::new(lines).render(inner, buf);
    }
}

// ───────────────────────────────────────── helpers ───────────

/// Centre a fixed-size rectangle inside `area`, clamped to fit.
fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}
