//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Central theme — change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── browse grid ────────────────────────────────────────────
    pub fn chip_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    pub fn chip_selected_style() -> Style {
        Style::default()
            .bg(Color::Cyan)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    }

    pub fn chip_cursor_style() -> Style {
        Style::default()
            .bg(Color::White)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    }

    // ── selected rail ──────────────────────────────────────────
    pub fn rail_chip_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::Green)
    }

    pub fn placeholder_style() -> Style {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC)
    }

    pub fn overflow_style() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::ITALIC)
    }

    // ── confirm button ─────────────────────────────────────────
    pub fn confirm_enabled_style() -> Style {
        Style::default()
            .bg(Color::Green)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    }

    pub fn confirm_disabled_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    // ── popups ─────────────────────────────────────────────────
    pub fn popup_border_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn popup_title_style() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn popup_item_style() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn popup_item_selected_style() -> Style {
        Style::default()
            .fg(Color::White)
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    }

    pub fn popup_value_style() -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn popup_value_on_style() -> Style {
        Style::default().fg(Color::Green)
    }

    pub fn popup_value_off_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn popup_rebind_style() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    pub fn popup_hint_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn border_focused_style() -> Style {
        Style::default().fg(Color::Cyan)
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    pub fn status_message_style() -> Style {
        Style::default()
            .bg(Color::DarkGray)
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }
}
