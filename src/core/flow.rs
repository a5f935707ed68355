//! Flow layout placement — the two wrapping layouts the screen is built on.
//!
//! Both functions are pure: measured chip widths in, cell coordinates out.
//! Nothing here knows about ratatui, styling, or scrolling; the UI layer
//! measures labels, calls these, and paints the result.  That split keeps
//! the wrapping rules testable without a terminal.
//!
//! Coordinates are relative to the layout origin.  Chips are one cell tall,
//! so `row` counts chip rows, not screen rows — the renderer decides how
//! much vertical air to put between them.

// ───────────────────────────────────────── types ─────────────

/// Where one chip landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChipBox {
    /// Index of the chip in the input slice.
    pub index: usize,
    /// Left edge, in cells from the layout origin.
    pub x: u16,
    /// Chip row (flow-row) or row within the column (flow-column).
    pub row: u16,
    pub width: u16,
}

impl ChipBox {
    /// Does `x` fall inside this chip's horizontal span?
    pub fn hit(&self, x: u16) -> bool {
        x >= self.x && x < self.x.saturating_add(self.width)
    }

    /// Horizontal centre, used for nearest-chip navigation between rows.
    pub fn center(&self) -> u16 {
        self.x.saturating_add(self.width / 2)
    }
}

/// Result of [`flow_row`]: left-to-right placement with line wrapping.
#[derive(Debug, Clone, Default)]
pub struct FlowLayout {
    pub chips: Vec<ChipBox>,
    /// Number of chip rows used.
    pub rows: u16,
}

impl FlowLayout {
    /// The chip at `index` in the input slice, if it was placed.
    pub fn chip(&self, index: usize) -> Option<&ChipBox> {
        self.chips.iter().find(|c| c.index == index)
    }

    /// The chip in `row` whose centre is nearest to `x`.  Drives vertical
    /// cursor movement between wrapped rows.
    pub fn nearest_in_row(&self, row: u16, x: u16) -> Option<usize> {
        self.chips
            .iter()
            .filter(|c| c.row == row)
            .min_by_key(|c| c.center().abs_diff(x))
            .map(|c| c.index)
    }
}

/// Result of [`flow_column`]: top-to-bottom placement in bounded columns.
#[derive(Debug, Clone, Default)]
pub struct RailLayout {
    pub chips: Vec<ChipBox>,
    /// Number of columns actually placed.
    pub columns: u16,
    /// Items that fell off the right edge and were not placed.
    pub clipped: usize,
}

// ───────────────────────────────────────── flow-row ──────────

/// Place chips left-to-right in input order, wrapping to a new row when the
/// next chip would cross `max_width`.  `gap` cells separate horizontal
/// neighbours.
///
/// A chip at least as wide as `max_width` gets a row to itself (the renderer
/// truncates it); wrapping never drops a chip.  `max_width == 0` places
/// nothing.
pub fn flow_row(widths: &[u16], max_width: u16, gap: u16) -> FlowLayout {
    let mut chips = Vec::with_capacity(widths.len());
    if max_width == 0 {
        return FlowLayout { chips, rows: 0 };
    }

    let mut x: u16 = 0;
    let mut row: u16 = 0;
    let mut row_occupied = false;

    for (index, &width) in widths.iter().enumerate() {
        let overflows = x.saturating_add(width) > max_width;
        if row_occupied && overflows {
            row = row.saturating_add(1);
            x = 0;
        }
        chips.push(ChipBox { index, x, row, width });
        row_occupied = true;
        x = x.saturating_add(width).saturating_add(gap);
    }

    let rows = if chips.is_empty() { 0 } else { row.saturating_add(1) };
    FlowLayout { chips, rows }
}

// ───────────────────────────────────────── flow-column ───────

/// Place chips top-to-bottom in input order, at most `rows_per_column` per
/// column, columns advancing left-to-right.  Each column is as wide as its
/// widest member; `gap` cells separate columns.
///
/// A column whose left edge would start at or beyond `max_width` is clipped:
/// its chips (and everything after) are counted in `clipped` rather than
/// placed.  The first column always lands, however wide — the renderer
/// truncates it.
pub fn flow_column(widths: &[u16], rows_per_column: u16, max_width: u16, gap: u16) -> RailLayout {
    let rows = rows_per_column.max(1);
    let mut chips = Vec::with_capacity(widths.len());

    if max_width == 0 {
        return RailLayout {
            chips,
            columns: 0,
            clipped: widths.len(),
        };
    }

    let mut col_x: u16 = 0;
    let mut col_row: u16 = 0;
    let mut col_width: u16 = 0;
    let mut columns: u16 = 0;

    for (index, &width) in widths.iter().enumerate() {
        if col_row == rows {
            // Column full — advance right.
            col_x = col_x.saturating_add(col_width).saturating_add(gap);
            col_row = 0;
            col_width = 0;
        }
        if col_row == 0 {
            if col_x >= max_width {
                return RailLayout {
                    chips,
                    columns,
                    clipped: widths.len() - index,
                };
            }
            columns = columns.saturating_add(1);
        }
        chips.push(ChipBox {
            index,
            x: col_x,
            row: col_row,
            width,
        });
        col_width = col_width.max(width);
        col_row = col_row.saturating_add(1);
    }

    RailLayout {
        chips,
        columns,
        clipped: 0,
    }
}
