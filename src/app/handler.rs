//! Input handling — maps key/mouse events to state mutations.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use ratatui::widgets::{Block, Borders};

use crate::config::{Action, KeyBind};
use crate::ui::chips::{self, GridGeometry};
use crate::ui::layout::AppLayout;
use crate::ui::rail;

use super::settings::{SettingsItem, SETTINGS_ITEMS};
use super::state::{ActiveView, AppState, Focus};

/// Total selectable rows in the controls submenu (actions + "Reset").
pub fn controls_item_count() -> usize {
    Action::ALL.len() + 1
}

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match state.active_view {
        ActiveView::Picker => handle_picker_key(state, key),
        ActiveView::SettingsMenu => handle_settings_key(state, key),
        ActiveView::ControlsSubmenu => {
            if state.awaiting_rebind {
                handle_rebind_key(state, key);
            } else {
                handle_controls_key(state, key);
            }
        }
    }
}

// ── Picker screen (configurable bindings) ───────────────────────

fn handle_picker_key(state: &mut AppState, key: KeyEvent) {
    // Jump keys that should always work, whichever panel has focus.
    match key.code {
        KeyCode::Home => {
            match state.focus {
                Focus::Browse => state.grid_state.cursor = 0,
                Focus::Rail => state.rail_cursor = 0,
            }
            return;
        }
        KeyCode::End => {
            match state.focus {
                Focus::Browse => {
                    if !state.catalog.is_empty() {
                        state.grid_state.cursor = state.catalog.len() - 1;
                    }
                }
                Focus::Rail => {
                    if !state.selection.is_empty() {
                        state.rail_cursor = state.selection.len() - 1;
                    }
                }
            }
            return;
        }
        _ => {}
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };

    match action {
        Action::Quit => {
            state.should_quit = true;
        }
        Action::OpenSettings => {
            state.active_view = ActiveView::SettingsMenu;
            state.settings_selected = 0;
        }
        Action::MoveUp => move_cursor(state, Direction::Up),
        Action::MoveDown => move_cursor(state, Direction::Down),
        Action::MoveLeft => move_cursor(state, Direction::Left),
        Action::MoveRight => move_cursor(state, Direction::Right),
        Action::Toggle => match state.focus {
            Focus::Browse => toggle_at(state, state.grid_state.cursor),
            // On the rail, toggling the chip under the cursor removes it.
            Focus::Rail => remove_rail_chip(state, state.rail_cursor),
        },
        Action::Remove => match state.focus {
            Focus::Browse => {
                if let Some(tag) = state.catalog.get(state.grid_state.cursor).map(str::to_string) {
                    state.selection.remove(&tag);
                    state.clamp_cursors();
                }
            }
            Focus::Rail => remove_rail_chip(state, state.rail_cursor),
        },
        Action::ClearSelection => clear_selection(state),
        Action::Confirm => confirm(state),
        Action::FocusNext => cycle_focus(state),
    }
}

enum Direction {
    Up,
    Down,
    Left,
    Right,
}

fn move_cursor(state: &mut AppState, direction: Direction) {
    match state.focus {
        Focus::Browse => move_in_grid(state, direction),
        Focus::Rail => move_in_rail(state, direction),
    }
}

/// Grid movement: Left/Right walk the flow order, Up/Down jump to the chip
/// with the nearest centre on the adjacent wrapped row.
fn move_in_grid(state: &mut AppState, direction: Direction) {
    match direction {
        Direction::Left => state.grid_state.select_prev(),
        Direction::Right => state.grid_state.select_next(state.catalog.len()),
        Direction::Up | Direction::Down => {
            let geom = grid_geometry_for(state);
            let Some(current) = geom.layout.chip(state.grid_state.cursor).copied() else {
                return;
            };
            let target_row = match direction {
                Direction::Up => current.row.checked_sub(1),
                _ => Some(current.row + 1),
            };
            if let Some(row) = target_row {
                if let Some(index) = geom.layout.nearest_in_row(row, current.center()) {
                    state.grid_state.cursor = index;
                }
            }
        }
    }
}

/// Rail movement: the rail is column-major, so Up/Down step the selection
/// index and Left/Right jump a whole column.
fn move_in_rail(state: &mut AppState, direction: Direction) {
    let len = state.selection.len();
    if len == 0 {
        return;
    }
    let column = state.config.rail_rows as usize;
    state.rail_cursor = match direction {
        Direction::Up => state.rail_cursor.saturating_sub(1),
        Direction::Down => (state.rail_cursor + 1).min(len - 1),
        Direction::Left => state.rail_cursor.saturating_sub(column),
        Direction::Right => (state.rail_cursor + column).min(len - 1),
    };
}

/// Toggle membership of the catalog tag at `index`.
fn toggle_at(state: &mut AppState, index: usize) {
    let Some(tag) = state.catalog.get(index).map(str::to_string) else {
        return;
    };
    state.selection.toggle(&tag);
    state.clamp_cursors();
}

/// Remove the rail chip at `index`; focus falls back to the grid when the
/// last chip goes.
fn remove_rail_chip(state: &mut AppState, index: usize) {
    if state.selection.remove_at(index).is_some() {
        state.clamp_cursors();
        if state.selection.is_empty() && state.focus == Focus::Rail {
            state.focus = Focus::Browse;
        }
    }
}

fn clear_selection(state: &mut AppState) {
    if state.selection.is_empty() {
        state.set_status("Nothing to clear");
        return;
    }
    let n = state.selection.len();
    state.selection.clear();
    state.clamp_cursors();
    if state.focus == Focus::Rail {
        state.focus = Focus::Browse;
    }
    state.set_status(format!("Cleared {n} tag{}", if n == 1 { "" } else { "s" }));
}

fn confirm(state: &mut AppState) {
    if state.selection.is_empty() {
        state.set_status("Nothing selected yet");
        return;
    }
    tracing::debug!("confirmed {} tags", state.selection.len());
    state.confirmed = true;
    state.should_quit = true;
}

fn cycle_focus(state: &mut AppState) {
    match state.focus {
        Focus::Browse => {
            if state.selection.is_empty() {
                state.set_status("Select a tag first");
            } else {
                state.focus = Focus::Rail;
                state.clamp_cursors();
            }
        }
        Focus::Rail => {
            state.focus = Focus::Browse;
        }
    }
}

// ── Settings menu (hardcoded keys) ──────────────────────────────

fn handle_settings_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            state.active_view = ActiveView::Picker;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.settings_selected = state.settings_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.settings_selected < SETTINGS_ITEMS.len() - 1 {
                state.settings_selected += 1;
            }
        }
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
            if let Some(item) = SETTINGS_ITEMS.get(state.settings_selected) {
                match item {
                    SettingsItem::Submenu { view, .. } => {
                        state.active_view = *view;
                        state.controls_selected = 0;
                    }
                    SettingsItem::Toggle { get, set, .. } => {
                        let current = get(&state.config);
                        set(state, !current);
                    }
                    SettingsItem::Cycle { cycle, .. } => {
                        cycle(state);
                    }
                }
            }
        }
        _ => {}
    }
}

// ── Controls submenu (hardcoded navigation, interactive rebinding) ──

fn handle_controls_key(state: &mut AppState, key: KeyEvent) {
    let item_count = controls_item_count();

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            state.active_view = ActiveView::Picker;
        }
        KeyCode::Left | KeyCode::Char('h') => {
            state.active_view = ActiveView::SettingsMenu;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.controls_selected = state.controls_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.controls_selected < item_count - 1 {
                state.controls_selected += 1;
            }
        }
        KeyCode::Enter => {
            if state.controls_selected < Action::ALL.len() {
                // Start rebinding the selected action.
                state.awaiting_rebind = true;
            } else {
                // "Reset to defaults" item.
                state.config.reset_defaults();
                let _ = state.config.save();
            }
        }
        KeyCode::Delete | KeyCode::Backspace => {
            // Clear all bindings for the selected action.
            if state.controls_selected < Action::ALL.len() {
                let action = Action::ALL[state.controls_selected];
                state.config.bindings.insert(action, Vec::new());
                let _ = state.config.save();
            }
        }
        _ => {}
    }
}

/// Capture the next key press as a new binding.
fn handle_rebind_key(state: &mut AppState, key: KeyEvent) {
    // Only process Press events (ignore Release/Repeat on supported terminals).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // Esc cancels rebinding.
    if key.code == KeyCode::Esc {
        state.awaiting_rebind = false;
        return;
    }

    // Don't allow rebinding Ctrl+C (reserved for emergency quit).
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return;
    }

    let action = Action::ALL[state.controls_selected];
    let bind = KeyBind::from_key_event(key);
    state.config.add_binding(action, bind);
    let _ = state.config.save();
    state.awaiting_rebind = false;
}

// ── Mouse ───────────────────────────────────────────────────────

/// Process a mouse event.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    if state.active_view != ActiveView::Picker {
        return;
    }

    let layout = AppLayout::from_area(state.terminal_area, state.config.rail_rows);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if point_in_rect(layout.button_area, mouse.column, mouse.row) {
                confirm(state);
                return;
            }

            if point_in_rect(layout.browse_area, mouse.column, mouse.row) {
                state.focus = Focus::Browse;
                let inner = panel_inner(layout.browse_area);
                if !point_in_rect(inner, mouse.column, mouse.row) {
                    return;
                }
                let geom =
                    chips::grid_geometry(&state.catalog, &state.selection, &state.config, inner);
                let x = mouse.column - inner.x;
                let screen_row = (mouse.row - inner.y).saturating_add(state.grid_state.offset);
                if let Some(index) = geom.chip_at(x, screen_row) {
                    state.grid_state.cursor = index;
                    toggle_at(state, index);
                }
                return;
            }

            if point_in_rect(layout.rail_area, mouse.column, mouse.row) {
                if state.selection.is_empty() {
                    return;
                }
                let inner = panel_inner(layout.rail_area);
                if !point_in_rect(inner, mouse.column, mouse.row) {
                    return;
                }
                let geom = rail::rail_geometry(&state.selection, &state.config, inner);
                if let Some(index) =
                    geom.chip_at(mouse.column - inner.x, mouse.row - inner.y)
                {
                    state.focus = Focus::Rail;
                    state.rail_cursor = index;
                    remove_rail_chip(state, index);
                }
            }
        }
        MouseEventKind::ScrollUp => {
            if point_in_rect(layout.browse_area, mouse.column, mouse.row) {
                state.grid_state.select_prev();
            }
        }
        MouseEventKind::ScrollDown => {
            if point_in_rect(layout.browse_area, mouse.column, mouse.row) {
                state.grid_state.select_next(state.catalog.len());
            }
        }
        _ => {}
    }
}

// ── helpers ─────────────────────────────────────────────────────

/// Grid geometry for the current terminal size — the handlers recompute it
/// from state so hit-tests always match the last rendered frame.
fn grid_geometry_for(state: &AppState) -> GridGeometry {
    let layout = AppLayout::from_area(state.terminal_area, state.config.rail_rows);
    chips::grid_geometry(
        &state.catalog,
        &state.selection,
        &state.config,
        panel_inner(layout.browse_area),
    )
}

/// The content area inside a panel's border.
fn panel_inner(area: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(area)
}

fn point_in_rect(area: Rect, col: u16, row: u16) -> bool {
    col >= area.x
        && col < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::core::{catalog::TagCatalog, selection::Selection};

    fn test_state() -> AppState {
        let catalog = TagCatalog::from_tags(
            ["Aaa", "Bbb", "Ccc", "Ddd"].iter().map(|t| (*t).to_string()),
        );
        let mut state = AppState::new(catalog, Selection::new(), AppConfig::defaults());
        // Narrow terminal: the grid inner width is 12, fitting two 5-wide
        // chips per row (gap 2), so the four tags form a 2x2 grid.
        state.terminal_area = Rect::new(0, 0, 14, 24);
        state
    }

    fn press(state: &mut AppState, code: KeyCode) {
        handle_key(state, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn click(state: &mut AppState, column: u16, row: u16) {
        handle_mouse(
            state,
            MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                modifiers: KeyModifiers::NONE,
            },
        );
    }

    fn isolate_config_dir() {
        let dir = std::env::temp_dir().join(format!("tag-browser-test-{}", std::process::id()));
        std::env::set_var("XDG_CONFIG_HOME", &dir);
    }

    #[test]
    fn test_space_toggles_tag_under_cursor() {
        let mut state = test_state();
        press(&mut state, KeyCode::Char(' '));
        assert!(state.selection.contains("Aaa"));
        press(&mut state, KeyCode::Char(' '));
        assert!(!state.selection.contains("Aaa"));
    }

    #[test]
    fn test_left_right_walk_flow_order() {
        let mut state = test_state();
        press(&mut state, KeyCode::Right);
        assert_eq!(state.grid_state.cursor, 1);
        press(&mut state, KeyCode::Right);
        assert_eq!(state.grid_state.cursor, 2);
        press(&mut state, KeyCode::Left);
        assert_eq!(state.grid_state.cursor, 1);
        press(&mut state, KeyCode::Left);
        press(&mut state, KeyCode::Left);
        assert_eq!(state.grid_state.cursor, 0); // clamped at the start
    }

    #[test]
    fn test_up_down_move_between_wrapped_rows() {
        let mut state = test_state();
        // 2x2 grid: Down from chip 0 lands on chip 2 (same column).
        press(&mut state, KeyCode::Down);
        assert_eq!(state.grid_state.cursor, 2);
        press(&mut state, KeyCode::Right);
        assert_eq!(state.grid_state.cursor, 3);
        press(&mut state, KeyCode::Up);
        assert_eq!(state.grid_state.cursor, 1);
        press(&mut state, KeyCode::Up);
        assert_eq!(state.grid_state.cursor, 1); // already on the top row
    }

    #[test]
    fn test_home_end_jump_in_grid() {
        let mut state = test_state();
        press(&mut state, KeyCode::End);
        assert_eq!(state.grid_state.cursor, 3);
        press(&mut state, KeyCode::Home);
        assert_eq!(state.grid_state.cursor, 0);
    }

    #[test]
    fn test_confirm_with_empty_selection_only_warns() {
        let mut state = test_state();
        press(&mut state, KeyCode::Enter);
        assert!(!state.should_quit);
        assert!(!state.confirmed);
        assert!(state.status_message.is_some());
    }

    #[test]
    fn test_confirm_with_selection_quits_confirmed() {
        let mut state = test_state();
        press(&mut state, KeyCode::Char(' '));
        press(&mut state, KeyCode::Enter);
        assert!(state.should_quit);
        assert!(state.confirmed);
    }

    #[test]
    fn test_quit_without_confirm() {
        let mut state = test_state();
        press(&mut state, KeyCode::Char(' '));
        press(&mut state, KeyCode::Char('q'));
        assert!(state.should_quit);
        assert!(!state.confirmed);
    }

    #[test]
    fn test_clear_selection_resets_and_warns_on_empty() {
        let mut state = test_state();
        press(&mut state, KeyCode::Char(' '));
        press(&mut state, KeyCode::Right);
        press(&mut state, KeyCode::Char(' '));
        assert_eq!(state.selection.len(), 2);

        press(&mut state, KeyCode::Char('c'));
        assert!(state.selection.is_empty());
        assert_eq!(state.status_message.as_deref(), Some("Cleared 2 tags"));

        press(&mut state, KeyCode::Char('c'));
        assert_eq!(state.status_message.as_deref(), Some("Nothing to clear"));
    }

    #[test]
    fn test_focus_needs_a_selection() {
        let mut state = test_state();
        press(&mut state, KeyCode::Tab);
        assert_eq!(state.focus, Focus::Browse);
        assert!(state.status_message.is_some());

        press(&mut state, KeyCode::Char(' '));
        press(&mut state, KeyCode::Tab);
        assert_eq!(state.focus, Focus::Rail);
        press(&mut state, KeyCode::Tab);
        assert_eq!(state.focus, Focus::Browse);
    }

    #[test]
    fn test_rail_remove_bounces_focus_when_emptied() {
        let mut state = test_state();
        press(&mut state, KeyCode::Char(' '));
        press(&mut state, KeyCode::Tab);
        assert_eq!(state.focus, Focus::Rail);

        press(&mut state, KeyCode::Delete);
        assert!(state.selection.is_empty());
        assert_eq!(state.focus, Focus::Browse);
    }

    #[test]
    fn test_rail_navigation_steps_and_column_jumps() {
        let mut state = test_state();
        for _ in 0..4 {
            press(&mut state, KeyCode::Char(' '));
            press(&mut state, KeyCode::Right);
        }
        assert_eq!(state.selection.len(), 4);

        press(&mut state, KeyCode::Tab);
        assert_eq!(state.rail_cursor, 0);
        press(&mut state, KeyCode::Down);
        assert_eq!(state.rail_cursor, 1);
        // rail_rows = 2: Right jumps one column.
        press(&mut state, KeyCode::Right);
        assert_eq!(state.rail_cursor, 3);
        press(&mut state, KeyCode::Left);
        assert_eq!(state.rail_cursor, 1);
        press(&mut state, KeyCode::Up);
        assert_eq!(state.rail_cursor, 0);
    }

    #[test]
    fn test_remove_in_grid_only_affects_selected() {
        let mut state = test_state();
        press(&mut state, KeyCode::Char(' '));
        press(&mut state, KeyCode::Right);
        // Cursor tag is not selected; Delete is a no-op.
        press(&mut state, KeyCode::Delete);
        assert_eq!(state.selection.len(), 1);
        press(&mut state, KeyCode::Left);
        press(&mut state, KeyCode::Delete);
        assert!(state.selection.is_empty());
    }

    #[test]
    fn test_ctrl_c_quits_from_any_view() {
        let mut state = test_state();
        state.active_view = ActiveView::SettingsMenu;
        handle_key(
            &mut state,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(state.should_quit);
    }

    #[test]
    fn test_settings_open_navigate_close() {
        let mut state = test_state();
        press(&mut state, KeyCode::Char('?'));
        assert_eq!(state.active_view, ActiveView::SettingsMenu);
        press(&mut state, KeyCode::Down);
        assert_eq!(state.settings_selected, 1);
        press(&mut state, KeyCode::Esc);
        assert_eq!(state.active_view, ActiveView::Picker);
    }

    #[test]
    fn test_settings_toggle_check_marks() {
        isolate_config_dir();
        let mut state = test_state();
        assert!(state.config.show_check);
        press(&mut state, KeyCode::Char('?'));
        press(&mut state, KeyCode::Down); // "Check Marks"
        press(&mut state, KeyCode::Enter);
        assert!(!state.config.show_check);
    }

    #[test]
    fn test_rebind_captures_next_key() {
        isolate_config_dir();
        let mut state = test_state();
        state.active_view = ActiveView::ControlsSubmenu;
        state.controls_selected = 0; // MoveUp

        press(&mut state, KeyCode::Enter);
        assert!(state.awaiting_rebind);
        press(&mut state, KeyCode::Char('w'));
        assert!(!state.awaiting_rebind);
        assert_eq!(
            state.config.match_key(KeyEvent::new(KeyCode::Char('w'), KeyModifiers::NONE)),
            Some(Action::MoveUp)
        );
    }

    #[test]
    fn test_rebind_esc_cancels() {
        let mut state = test_state();
        state.active_view = ActiveView::ControlsSubmenu;
        state.awaiting_rebind = true;
        press(&mut state, KeyCode::Esc);
        assert!(!state.awaiting_rebind);
        assert_eq!(state.active_view, ActiveView::ControlsSubmenu);
    }

    #[test]
    fn test_click_toggles_chip() {
        let mut state = test_state();
        // Grid inner starts at (1, 1); chip 0 spans columns 1..6 on row 1.
        click(&mut state, 2, 1);
        assert!(state.selection.contains("Aaa"));
        assert_eq!(state.grid_state.cursor, 0);
        click(&mut state, 2, 1);
        assert!(!state.selection.contains("Aaa"));
    }

    #[test]
    fn test_click_on_gap_row_does_nothing() {
        let mut state = test_state();
        // Row 2 is the blank row between the two chip rows.
        click(&mut state, 2, 2);
        assert!(state.selection.is_empty());
    }

    #[test]
    fn test_click_rail_chip_removes_it() {
        let mut state = test_state();
        press(&mut state, KeyCode::Char(' '));
        // 24-row terminal: browse 16 rows, rail at y 16..20, inner (1, 17).
        // The single rail chip " Aaa ✕ " starts at inner origin.
        click(&mut state, 2, 17);
        assert!(state.selection.is_empty());
    }

    #[test]
    fn test_click_confirm_button() {
        let mut state = test_state();
        press(&mut state, KeyCode::Char(' '));
        // Button occupies y 20..23.
        click(&mut state, 5, 21);
        assert!(state.confirmed);
        assert!(state.should_quit);
    }

    #[test]
    fn test_scroll_wheel_moves_grid_cursor() {
        let mut state = test_state();
        handle_mouse(
            &mut state,
            MouseEvent {
                kind: MouseEventKind::ScrollDown,
                column: 2,
                row: 1,
                modifiers: KeyModifiers::NONE,
            },
        );
        assert_eq!(state.grid_state.cursor, 1);
        handle_mouse(
            &mut state,
            MouseEvent {
                kind: MouseEventKind::ScrollUp,
                column: 2,
                row: 1,
                modifiers: KeyModifiers::NONE,
            },
        );
        assert_eq!(state.grid_state.cursor, 0);
    }

    #[test]
    fn test_mouse_ignored_while_settings_open() {
        let mut state = test_state();
        state.active_view = ActiveView::SettingsMenu;
        click(&mut state, 2, 1);
        assert!(state.selection.is_empty());
    }
}
