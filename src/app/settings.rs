//! Settings menu model (data only).
//!
//! Keeping these definitions outside the input handler lets both the handler
//! and UI renderers consume the same source of truth without cross-importing.

use super::state::{ActiveView, AppState};
use crate::config::AppConfig;

/// A single item in the settings menu.
pub enum SettingsItem {
    /// Opens a submenu.
    Submenu {
        label: &'static str,
        view: ActiveView,
    },
    /// Boolean toggle — reads from `AppConfig`, writes through `AppState`.
    Toggle {
        label: &'static str,
        get: fn(&AppConfig) -> bool,
        set: fn(&mut AppState, bool),
    },
    /// Cycles through a finite set of values.
    Cycle {
        label: &'static str,
        value: fn(&AppConfig) -> String,
        cycle: fn(&mut AppState),
    },
}

impl SettingsItem {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Submenu { label, .. }
            | Self::Toggle { label, .. }
            | Self::Cycle { label, .. } => label,
        }
    }
}

/// All items shown in the settings popup, in display order.
pub static SETTINGS_ITEMS: &[SettingsItem] = &[
    SettingsItem::Submenu {
        label: "Controls",
        view: ActiveView::ControlsSubmenu,
    },
    SettingsItem::Toggle {
        label: "Check Marks",
        get: |c| c.show_check,
        set: |s, v| {
            s.config.show_check = v;
            let _ = s.config.save();
            s.set_status(if v {
                "Check marks on selected chips"
            } else {
                "Check marks hidden"
            });
        },
    },
    SettingsItem::Cycle {
        label: "Chip Gap",
        value: |c| format!("{}", c.chip_gap),
        cycle: |s| {
            const GAPS: &[u16] = &[1, 2, 3, 4];
            let idx = GAPS.iter().position(|&g| g == s.config.chip_gap).unwrap_or(1);
            s.config.chip_gap = GAPS[(idx + 1) % GAPS.len()];
            let _ = s.config.save();
            s.set_status(format!("Chip gap: {}", s.config.chip_gap));
        },
    },
    SettingsItem::Cycle {
        label: "Rail Rows",
        value: |c| format!("{}", c.rail_rows),
        cycle: |s| {
            const ROWS: &[u16] = &[1, 2, 3, 4];
            let idx = ROWS.iter().position(|&r| r == s.config.rail_rows).unwrap_or(1);
            s.config.rail_rows = ROWS[(idx + 1) % ROWS.len()];
            let _ = s.config.save();
            s.set_status(format!("Rail rows: {}", s.config.rail_rows));
        },
    },
];
