//! Selected rail widget — the chosen tags, flowed top-to-bottom in short
//! columns that grow to the right.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::config::AppConfig;
use crate::core::flow::{self, RailLayout};
use crate::core::selection::Selection;

use super::theme::Theme;

/// Shown when nothing is selected yet.
pub const EMPTY_PLACEHOLDER: &str = "Pick a tag above to select it.";

/// Cells reserved at the right edge for the `+N` overflow marker.
const OVERFLOW_RESERVE: u16 = 5;

// ───────────────────────────────────────── geometry ──────────

/// Render text for one rail chip.  The trailing cross mirrors the remove
/// affordance of a dismissible chip.
pub fn rail_label(tag: &str) -> String {
    format!(" {tag} ✕ ")
}

fn display_width(label: &str) -> u16 {
    UnicodeWidthStr::width(label).min(u16::MAX as usize) as u16
}

/// Rail chip placement for one frame, shared by the renderer and hit-testing.
pub struct RailGeometry {
    pub layout: RailLayout,
    labels: Vec<String>,
}

impl RailGeometry {
    /// Selection index of the chip at inner-relative (`x`, `row`).
    pub fn chip_at(&self, x: u16, row: u16) -> Option<usize> {
        self.layout
            .chips
            .iter()
            .find(|c| c.row == row && c.hit(x))
            .map(|c| c.index)
    }
}

/// Lay out the selected tags inside a region `inner.width` cells wide.
/// When the columns overflow the width, the layout is redone with room
/// reserved for the `+N` marker so the marker never covers a chip.
pub fn rail_geometry(selection: &Selection, config: &AppConfig, inner: Rect) -> RailGeometry {
    let labels: Vec<String> = selection.iter().map(rail_label).collect();
    let widths: Vec<u16> = labels.iter().map(|l| display_width(l)).collect();

    let mut layout = flow::flow_column(&widths, config.rail_rows, inner.width, config.chip_gap);
    if layout.clipped > 0 {
        layout = flow::flow_column(
            &widths,
            config.rail_rows,
            inner.width.saturating_sub(OVERFLOW_RESERVE),
            config.chip_gap,
        );
    }
    RailGeometry { layout, labels }
}

// ───────────────────────────────────────── widget ────────────

/// The selected rail widget — created fresh each frame.
pub struct SelectedRail<'a> {
    selection: &'a Selection,
    config: &'a AppConfig,
    block: Option<Block<'a>>,
    focused: bool,
    cursor: usize,
}

impl<'a> SelectedRail<'a> {
    pub fn new(selection: &'a Selection, config: &'a AppConfig) -> Self {
        Self {
            selection,
            config,
            block: None,
            focused: false,
            cursor: 0,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Highlight the cursor chip only while the rail has keyboard focus.
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn cursor(mut self, cursor: usize) -> Self {
        self.cursor = cursor;
        self
    }
}

impl<'a> Widget for SelectedRail<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = if let Some(ref block) = self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        if self.selection.is_empty() {
            buf.set_stringn(
                inner.x,
                inner.y,
                EMPTY_PLACEHOLDER,
                inner.width as usize,
                Theme::placeholder_style(),
            );
            return;
        }

        let geom = rail_geometry(self.selection, self.config, inner);

        for chip in &geom.layout.chips {
            if chip.row >= inner.height {
                continue;
            }
            let style = if self.focused && chip.index == self.cursor {
                Theme::chip_cursor_style()
            } else {
                Theme::rail_chip_style()
            };
            let avail = inner.width.saturating_sub(chip.x);
            buf.set_stringn(
                inner.x + chip.x,
                inner.y + chip.row,
                &geom.labels[chip.index],
                avail as usize,
                style,
            );
        }

        if geom.layout.clipped > 0 {
            let marker = format!("+{}", geom.layout.clipped);
            let w = display_width(&marker).min(inner.width);
            buf.set_string(
                inner.x + inner.width - w,
                inner.y + inner.height - 1,
                &marker,
                Theme::overflow_style(),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection_of(tags: &[&str]) -> Selection {
        let mut selection = Selection::new();
        for tag in tags {
            selection.insert(tag);
        }
        selection
    }

    fn geometry(tags: &[&str], width: u16) -> RailGeometry {
        let config = AppConfig::defaults();
        rail_geometry(&selection_of(tags), &config, Rect::new(0, 0, width, 4))
    }

    fn symbol_at(buf: &Buffer, x: u16, y: u16) -> &str {
        buf.cell((x, y)).expect("cell within buffer").symbol()
    }

    #[test]
    fn test_rail_label_has_remove_cross() {
        assert_eq!(rail_label("Rust"), " Rust ✕ ");
    }

    #[test]
    fn test_two_per_column_in_selection_order() {
        // Default rail_rows = 2: pairs stack downward, columns grow right.
        let geom = geometry(&["A", "B", "C"], 40);
        let placed: Vec<(usize, u16)> =
            geom.layout.chips.iter().map(|c| (c.index, c.row)).collect();
        assert_eq!(placed, vec![(0, 0), (1, 1), (2, 0)]);
        assert_eq!(geom.layout.columns, 2);
    }

    #[test]
    fn test_overflow_relayouts_with_marker_room() {
        // " Aa ✕ " chips are 6 wide.  At width 16 the third column would
        // start at x=16 — clipped, and the relayout keeps column starts
        // clear of the marker reserve.
        let geom = geometry(&["Aa", "Bb", "Cc", "Dd", "Ee", "Ff"], 16);
        assert!(geom.layout.clipped > 0);
        assert!(geom.layout.chips.iter().all(|c| c.x < 16 - OVERFLOW_RESERVE));
        assert_eq!(geom.layout.chips.len() + geom.layout.clipped, 6);
    }

    #[test]
    fn test_chip_at_maps_click_to_selection_index() {
        let geom = geometry(&["A", "B", "C"], 40);
        // " A ✕ " is 5 wide; first column holds indices 0 and 1.
        assert_eq!(geom.chip_at(0, 0), Some(0));
        assert_eq!(geom.chip_at(4, 1), Some(1));
        assert_eq!(geom.chip_at(7, 0), Some(2));
        assert_eq!(geom.chip_at(30, 0), None);
    }

    #[test]
    fn test_render_placeholder_when_empty() {
        let area = Rect::new(0, 0, 32, 2);
        let mut buf = Buffer::empty(area);
        let selection = Selection::new();
        let config = AppConfig::defaults();
        SelectedRail::new(&selection, &config).render(area, &mut buf);
        let line: String = (0..EMPTY_PLACEHOLDER.len() as u16)
            .map(|x| symbol_at(&buf, x, 0))
            .collect();
        assert_eq!(line, EMPTY_PLACEHOLDER);
    }

    #[test]
    fn test_render_overflow_marker_at_bottom_right() {
        // Six 6-wide chips in a 16x2 rail: two columns land (x=0 and x=8),
        // the marker reserve stays blank, and "+2" fills the corner.
        let area = Rect::new(0, 0, 16, 2);
        let mut buf = Buffer::empty(area);
        let selection = selection_of(&["Aa", "Bb", "Cc", "Dd", "Ee", "Ff"]);
        let config = AppConfig::defaults();
        SelectedRail::new(&selection, &config).render(area, &mut buf);
        assert_eq!(symbol_at(&buf, 1, 0), "A");
        assert_eq!(symbol_at(&buf, 9, 1), "D");
        assert_eq!(symbol_at(&buf, 14, 0), " ");
        assert_eq!(symbol_at(&buf, 14, 1), "+");
        assert_eq!(symbol_at(&buf, 15, 1), "2");
    }

    #[test]
    fn test_render_zero_size_area_is_untouched() {
        let selection = selection_of(&["Aa", "Bb"]);
        let config = AppConfig::defaults();
        let areas = [
            Rect::new(0, 0, 0, 0),
            Rect::new(0, 0, 16, 0),
            Rect::new(0, 0, 0, 2),
        ];
        for area in areas {
            let mut buf = Buffer::empty(area);
            SelectedRail::new(&selection, &config).render(area, &mut buf);
            assert_eq!(buf, Buffer::empty(area));
        }
    }
}
