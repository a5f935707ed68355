//! Layout helpers — split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Primary screen layout: browse grid, selected rail, confirm button, and a
/// bottom status bar.
pub struct AppLayout {
    pub browse_area: Rect,
    pub rail_area: Rect,
    pub button_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.  The rail is sized to
    /// hold exactly `rail_rows` chip rows inside its border.
    pub fn from_area(area: Rect, rail_rows: u16) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(5),                  // browse grid (remaining space)
                Constraint::Length(rail_rows + 2),   // selected rail + border
                Constraint::Length(3),               // confirm button
                Constraint::Length(1),               // status bar
            ])
            .split(area);

        Self {
            browse_area: chunks[0],
            rail_area: chunks[1],
            button_area: chunks[2],
            status_area: chunks[3],
        }
    }
}
