//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::{catalog::TagCatalog, selection::Selection};
use crate::ui::chips::ChipGridState;

/// Which view / overlay is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Picker,
    SettingsMenu,
    ControlsSubmenu,
}

/// Which panel keyboard input is directed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// The browse grid of all available tags.
    #[default]
    Browse,
    /// The rail of currently selected tags.
    Rail,
}

/// How many ticks a status message stays on screen (ticks are ~100ms).
const STATUS_TICKS: u8 = 30;

/// Top-level application state.
pub struct AppState {
    /// The fixed set of available tags.
    pub catalog: TagCatalog,
    /// Tags the user has picked, in selection order.
    pub selection: Selection,
    /// Widget-level state for the browse grid (cursor, scroll).
    pub grid_state: ChipGridState,
    /// Cursor position in the selected rail.
    pub rail_cursor: usize,
    /// Which panel receives navigation keys.
    pub focus: Focus,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// Set when the user confirms; the selection is printed on exit.
    pub confirmed: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Remaining ticks before the status message expires.
    status_ticks: u8,
    /// Which view / overlay is currently shown.
    pub active_view: ActiveView,
    /// User-configurable keybindings and UI preferences.
    pub config: AppConfig,
    /// Currently highlighted item in the settings menu.
    pub settings_selected: usize,
    /// Currently highlighted item in the controls submenu.
    pub controls_selected: usize,
    /// When `true`, the controls submenu is waiting for the user to press
    /// a key to rebind the action at `controls_selected`.
    pub awaiting_rebind: bool,
    /// Last known terminal size, updated on resize.  Used to recompute
    /// chip geometry for mouse hit-testing and geometric navigation.
    pub terminal_area: Rect,
}

impl AppState {
    pub fn new(catalog: TagCatalog, selection: Selection, config: AppConfig) -> Self {
        Self {
            catalog,
            selection,
            grid_state: ChipGridState::default(),
            rail_cursor: 0,
            focus: Focus::default(),
            should_quit: false,
            confirmed: false,
            status_message: None,
            status_ticks: 0,
            active_view: ActiveView::default(),
            config,
            settings_selected: 0,
            controls_selected: 0,
            awaiting_rebind: false,
            terminal_area: Rect::default(),
        }
    }

    /// Show a transient status message in the bottom bar.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_ticks = STATUS_TICKS;
    }

    /// Advance the status-message timer; called once per tick.
    pub fn on_tick(&mut self) {
        if self.status_message.is_some() {
            self.status_ticks = self.status_ticks.saturating_sub(1);
            if self.status_ticks == 0 {
                self.status_message = None;
            }
        }
    }

    /// Keep cursors inside the catalog / selection after any mutation.
    pub fn clamp_cursors(&mut self) {
        if !self.catalog.is_empty() && self.grid_state.cursor >= self.catalog.len() {
            self.grid_state.cursor = self.catalog.len() - 1;
        }
        if self.selection.is_empty() {
            self.rail_cursor = 0;
        } else if self.rail_cursor >= self.selection.len() {
            self.rail_cursor = self.selection.len() - 1;
        }
    }
}
