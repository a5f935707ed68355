//! Browse grid widget — every catalog tag as a chip, flowed left-to-right
//! with line wrapping.
//!
//! Chip placement is computed by [`grid_geometry`] and shared between this
//! renderer and the input handlers, so mouse hit-testing and geometric
//! cursor movement always agree with what is on screen.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block, StatefulWidget, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::config::AppConfig;
use crate::core::catalog::TagCatalog;
use crate::core::flow::{self, FlowLayout};
use crate::core::selection::Selection;

use super::theme::Theme;

/// Chip rows are separated by one blank screen row.
const ROW_STRIDE: u16 = 2;

// ───────────────────────────────────────── state ─────────────

/// Persistent state for the chip grid (cursor, scroll offset).
#[derive(Debug, Default)]
pub struct ChipGridState {
    /// Catalog index of the chip under the cursor.
    pub cursor: usize,
    /// Vertical scroll offset, in screen rows.
    pub offset: u16,
}

impl ChipGridState {
    pub fn select_next(&mut self, max: usize) {
        if max > 0 && self.cursor < max - 1 {
            self.cursor += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Ensure `cursor_row` (a screen row) is visible within `height` rows.
    pub fn clamp_scroll(&mut self, cursor_row: u16, height: u16) {
        if height == 0 {
            return;
        }
        if cursor_row < self.offset {
            self.offset = cursor_row;
        } else if cursor_row >= self.offset + height {
            self.offset = cursor_row - height + 1;
        }
    }
}

// ───────────────────────────────────────── geometry ──────────

/// Render text for one chip.  Selected chips grow a leading check mark
/// (when enabled), which changes their width and reflows the grid — the
/// same behaviour a chip row in a mobile toolkit shows.
pub fn chip_label(tag: &str, checked: bool) -> String {
    if checked {
        format!(" ✓ {tag} ")
    } else {
        format!(" {tag} ")
    }
}

fn display_width(label: &str) -> u16 {
    UnicodeWidthStr::width(label).min(u16::MAX as usize) as u16
}

/// Chip placement for one frame, shared by the renderer and hit-testing.
pub struct GridGeometry {
    pub layout: FlowLayout,
    labels: Vec<String>,
}

impl GridGeometry {
    /// Screen row (before scrolling) of the chip at catalog `index`.
    pub fn screen_row(&self, index: usize) -> Option<u16> {
        self.layout.chip(index).map(|c| c.row.saturating_mul(ROW_STRIDE))
    }

    /// Catalog index of the chip at inner-relative (`x`, `screen_row`).
    /// Gap rows between chip rows hit nothing.
    pub fn chip_at(&self, x: u16, screen_row: u16) -> Option<usize> {
        if screen_row % ROW_STRIDE != 0 {
            return None;
        }
        let chip_row = screen_row / ROW_STRIDE;
        self.layout
            .chips
            .iter()
            .find(|c| c.row == chip_row && c.hit(x))
            .map(|c| c.index)
    }

    /// Total screen rows the grid occupies, gaps included.
    pub fn total_rows(&self) -> u16 {
        match self.layout.rows {
            0 => 0,
            rows => (rows - 1).saturating_mul(ROW_STRIDE).saturating_add(1),
        }
    }
}

/// Lay out every catalog tag inside a region `inner.width` cells wide.
/// Selection state matters because check marks change chip widths.
pub fn grid_geometry(
    catalog: &TagCatalog,
    selection: &Selection,
    config: &AppConfig,
    inner: Rect,
) -> GridGeometry {
    let labels: Vec<String> = catalog
        .iter()
        .map(|tag| chip_label(tag, config.show_check && selection.contains(tag)))
        .collect();
    let widths: Vec<u16> = labels.iter().map(|l| display_width(l)).collect();
    GridGeometry {
        layout: flow::flow_row(&widths, inner.width, config.chip_gap),
        labels,
    }
}

// ───────────────────────────────────────── widget ────────────

/// The browse grid widget — created fresh each frame.
pub struct ChipGrid<'a> {
    catalog: &'a TagCatalog,
    selection: &'a Selection,
    config: &'a AppConfig,
    block: Option<Block<'a>>,
    focused: bool,
}

impl<'a> ChipGrid<'a> {
    pub fn new(catalog: &'a TagCatalog, selection: &'a Selection, config: &'a AppConfig) -> Self {
        Self {
            catalog,
            selection,
            config,
            block: None,
            focused: false,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Highlight the cursor chip only while the grid has keyboard focus.
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl<'a> StatefulWidget for ChipGrid<'a> {
    type State = ChipGridState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        // Resolve the inner area (inside the optional block border).
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

        let geom = grid_geometry(self.catalog, self.selection, self.config, inner);

        if !self.catalog.is_empty() && state.cursor >= self.catalog.len() {
            state.cursor = self.catalog.len() - 1;
        }
        if let Some(row) = geom.screen_row(state.cursor) {
            state.clamp_scroll(row, inner.height);
        }
        // Don't leave dead space below when a reflow shrinks the grid.
        state.offset = state.offset.min(geom.total_rows().saturating_sub(inner.height));

        for chip in &geom.layout.chips {
            let screen_row = chip.row.saturating_mul(ROW_STRIDE);
            if screen_row < state.offset {
                continue;
            }
            let y = screen_row - state.offset;
            if y >= inner.height {
                break; // rows only grow from here
            }

            let Some(tag) = self.catalog.get(chip.index) else {
                continue;
            };
            let style = if self.focused && chip.index == state.cursor {
                Theme::chip_cursor_style()
            } else if self.selection.contains(tag) {
                Theme::chip_selected_style()
            } else {
                Theme::chip_style()
            };

            let label = &geom.labels[chip.index];
            let avail = inner.width.saturating_sub(chip.x);
            if chip.width > avail {
                // Over-wide chip on its own row: truncate with an ellipsis.
                buf.set_stringn(
                    inner.x + chip.x,
                    inner.y + y,
                    label,
                    avail.saturating_sub(1) as usize,
                    style,
                );
                if avail > 0 {
                    buf.set_string(inner.x + inner.width - 1, inner.y + y, "…", style);
                }
            } else {
                buf.set_stringn(inner.x + chip.x, inner.y + y, label, avail as usize, style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(tags: &[&str]) -> TagCatalog {
        TagCatalog::from_tags(tags.iter().map(|t| (*t).to_string()))
    }

    fn geometry(tags: &[&str], selected: &[&str], width: u16) -> GridGeometry {
        let catalog = catalog(tags);
        let mut selection = Selection::new();
        for tag in selected {
            selection.insert(tag);
        }
        let config = AppConfig::defaults();
        grid_geometry(&catalog, &selection, &config, Rect::new(0, 0, width, 20))
    }

    fn render_grid(tags: &[&str], area: Rect) -> (Buffer, ChipGridState) {
        let catalog = catalog(tags);
        let selection = Selection::new();
        let config = AppConfig::defaults();
        let mut state = ChipGridState::default();
        let mut buf = Buffer::empty(area);
        ChipGrid::new(&catalog, &selection, &config).render(area, &mut buf, &mut state);
        (buf, state)
    }

    fn symbol_at(buf: &Buffer, x: u16, y: u16) -> &str {
        buf.cell((x, y)).expect("cell within buffer").symbol()
    }

    #[test]
    fn test_chip_label_grows_when_checked() {
        let plain = chip_label("Rust", false);
        let checked = chip_label("Rust", true);
        assert_eq!(plain, " Rust ");
        assert_eq!(checked, " ✓ Rust ");
        assert!(display_width(&checked) > display_width(&plain));
    }

    #[test]
    fn test_geometry_wraps_to_width() {
        // " One " and " Two " are 5 wide; gap 2 → second row at 16 cells
        // holds both, 8 cells forces a wrap.
        let wide = geometry(&["One", "Two"], &[], 16);
        assert_eq!(wide.layout.rows, 1);
        let narrow = geometry(&["One", "Two"], &[], 8);
        assert_eq!(narrow.layout.rows, 2);
    }

    #[test]
    fn test_selecting_reflows_the_grid() {
        // Unselected both fit on one row; the check mark pushes the second
        // chip onto the next row.
        let before = geometry(&["One", "Two"], &[], 12);
        assert_eq!(before.layout.rows, 1);
        let after = geometry(&["One", "Two"], &["One"], 12);
        assert_eq!(after.layout.rows, 2);
    }

    #[test]
    fn test_chip_at_hits_chips_and_misses_gaps() {
        let geom = geometry(&["One", "Two"], &[], 8);
        // Chip 0 occupies row 0, chip 1 row 1 → screen rows 0 and 2.
        assert_eq!(geom.chip_at(0, 0), Some(0));
        assert_eq!(geom.chip_at(0, 1), None); // gap row
        assert_eq!(geom.chip_at(0, 2), Some(1));
        assert_eq!(geom.chip_at(7, 0), None); // past the chip edge
    }

    #[test]
    fn test_total_rows_counts_gaps() {
        let geom = geometry(&["One", "Two", "Six"], &[], 5);
        assert_eq!(geom.layout.rows, 3);
        assert_eq!(geom.total_rows(), 5);
        assert_eq!(geometry(&[], &[], 10).total_rows(), 0);
    }

    #[test]
    fn test_clamp_scroll_follows_cursor() {
        let mut state = ChipGridState::default();
        state.clamp_scroll(6, 4);
        assert_eq!(state.offset, 3); // rows 3..=6 visible
        state.clamp_scroll(0, 4);
        assert_eq!(state.offset, 0);
    }

    #[test]
    fn test_screen_rows_saturate_for_huge_grids() {
        // Row numbers near u16::MAX must not wrap when scaled by the stride.
        let geom = GridGeometry {
            layout: FlowLayout {
                chips: vec![flow::ChipBox { index: 0, x: 0, row: u16::MAX, width: 3 }],
                rows: u16::MAX,
            },
            labels: vec![" x ".to_string()],
        };
        assert_eq!(geom.screen_row(0), Some(u16::MAX));
        assert_eq!(geom.total_rows(), u16::MAX);
    }

    #[test]
    fn test_render_truncates_overwide_chip_with_ellipsis() {
        // " ExtremelyLongTagName " is 22 cells; an 8-cell row keeps the
        // leading text and puts an ellipsis in the last cell.
        let area = Rect::new(0, 0, 8, 1);
        let (buf, _) = render_grid(&["ExtremelyLongTagName"], area);
        assert_eq!(symbol_at(&buf, 1, 0), "E");
        assert_eq!(symbol_at(&buf, 6, 0), "m");
        assert_eq!(symbol_at(&buf, 7, 0), "…");
    }

    #[test]
    fn test_render_truncation_never_splits_wide_glyphs() {
        // " 日本語テキスト " is 16 cells of double-width glyphs.  Eight
        // cells of text budget hold " 日本語" (7 cells); the next glyph
        // would straddle the cut, so its cell stays blank before the
        // ellipsis.
        let area = Rect::new(0, 0, 9, 1);
        let (buf, _) = render_grid(&["日本語テキスト"], area);
        assert_eq!(symbol_at(&buf, 1, 0), "日");
        assert_eq!(symbol_at(&buf, 5, 0), "語");
        assert_eq!(symbol_at(&buf, 7, 0), " ");
        assert_eq!(symbol_at(&buf, 8, 0), "…");
    }

    #[test]
    fn test_render_zero_size_area_is_untouched() {
        let areas = [
            Rect::new(0, 0, 0, 0),
            Rect::new(0, 0, 10, 0),
            Rect::new(0, 0, 0, 10),
        ];
        for area in areas {
            let (buf, state) = render_grid(&["One", "Two"], area);
            assert_eq!(buf, Buffer::empty(area));
            assert_eq!(state.offset, 0);
        }
    }
}
