//! User configuration — keybindings, UI preferences, and persistence.
//!
//! Everything is stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/tag-browser/config.toml` (default
//! `~/.config/tag-browser/config.toml`) and rewritten whenever a binding
//! or setting changes in the settings menu.

use std::collections::HashMap;
use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions on the picker screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Toggle,
    Remove,
    ClearSelection,
    Confirm,
    FocusNext,
    OpenSettings,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used for the controls menu).
    pub const ALL: &[Action] = &[
        Action::MoveUp,
        Action::MoveDown,
        Action::MoveLeft,
        Action::MoveRight,
        Action::Toggle,
        Action::Remove,
        Action::ClearSelection,
        Action::Confirm,
        Action::FocusNext,
        Action::OpenSettings,
        Action::Quit,
    ];

    /// Human-readable label for the UI.
    pub fn label(self) -> &'static str {
        match self {
            Action::MoveUp => "Move Up",
            Action::MoveDown => "Move Down",
            Action::MoveLeft => "Move Left",
            Action::MoveRight => "Move Right",
            Action::Toggle => "Toggle Tag",
            Action::Remove => "Remove From Selection",
            Action::ClearSelection => "Clear Selection",
            Action::Confirm => "Confirm Selection",
            Action::FocusNext => "Switch Focus",
            Action::OpenSettings => "Open Settings",
            Action::Quit => "Quit",
        }
    }

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::MoveUp => "move_up",
            Action::MoveDown => "move_down",
            Action::MoveLeft => "move_left",
            Action::MoveRight => "move_right",
            Action::Toggle => "toggle",
            Action::Remove => "remove",
            Action::ClearSelection => "clear_selection",
            Action::Confirm => "confirm",
            Action::FocusNext => "focus_next",
            Action::OpenSettings => "open_settings",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL
            .iter()
            .copied()
            .find(|action| action.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding — key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

/// Modifiers that participate in matching.  Platform-specific modifiers
/// (SUPER, HYPER, META) are ignored so bindings behave the same everywhere.
const MOD_MASK: KeyModifiers = KeyModifiers::CONTROL
    .union(KeyModifiers::ALT)
    .union(KeyModifiers::SHIFT);

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Does this binding match a key event?
    pub fn matches(&self, event: KeyEvent) -> bool {
        self.code == event.code && (self.modifiers & MOD_MASK) == (event.modifiers & MOD_MASK)
    }

    /// Create a binding from a raw key event (used during rebinding).
    pub fn from_key_event(event: KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers & MOD_MASK,
        }
    }

    fn modifier_prefix(&self) -> String {
        let mut s = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("Ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("Alt+");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            s.push_str("Shift+");
        }
        s
    }

    /// User-friendly display string (e.g. `"Alt+↑"`, `"Space"`, `"q"`).
    pub fn display(&self) -> String {
        let key = match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            KeyCode::Left => "←".into(),
            KeyCode::Right => "→".into(),
            KeyCode::Enter => "Enter".into(),
            KeyCode::Esc => "Esc".into(),
            KeyCode::Tab => "Tab".into(),
            KeyCode::Backspace => "Bksp".into(),
            KeyCode::Delete => "Del".into(),
            KeyCode::Home => "Home".into(),
            KeyCode::End => "End".into(),
            KeyCode::PageUp => "PgUp".into(),
            KeyCode::PageDown => "PgDn".into(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        };
        format!("{}{key}", self.modifier_prefix())
    }

    /// Serialise to config-file format (e.g. `"Alt+Up"`, `"Space"`, `"q"`).
    fn to_config_string(&self) -> String {
        let key = match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "Up".into(),
            KeyCode::Down => "Down".into(),
            KeyCode::Left => "Left".into(),
            KeyCode::Right => "Right".into(),
            KeyCode::Enter => "Enter".into(),
            KeyCode::Esc => "Esc".into(),
            KeyCode::Tab => "Tab".into(),
            KeyCode::Backspace => "Backspace".into(),
            KeyCode::Delete => "Delete".into(),
            KeyCode::Home => "Home".into(),
            KeyCode::End => "End".into(),
            KeyCode::PageUp => "PageUp".into(),
            KeyCode::PageDown => "PageDown".into(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        };
        format!("{}{key}", self.modifier_prefix())
    }

    /// Parse a key string like `"Ctrl+c"`, `"Alt+Up"`, `"q"`, `"Enter"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let key_part = parts.last()?;

        for &part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backspace" | "bksp" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            s if s.starts_with('f') && s.len() > 1 => {
                let n: u8 = s[1..].parse().ok()?;
                KeyCode::F(n)
            }
            s if s.chars().count() == 1 => KeyCode::Char(s.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── config ────────────

/// Application configuration — keybindings and UI preferences.
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Prefix selected chips in the browse grid with a check mark.
    pub show_check: bool,
    /// Horizontal gap between chips, in cells.
    pub chip_gap: u16,
    /// Chips per column in the selected rail.
    pub rail_rows: u16,
}

const CHIP_GAP_RANGE: (u16, u16) = (1, 4);
const RAIL_ROWS_RANGE: (u16, u16) = (1, 4);

impl AppConfig {
    /// Hard-coded default bindings.
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(MoveUp, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(MoveDown, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(MoveLeft, vec![KeyBind::new(Left, n), KeyBind::new(Char('h'), n)]);
        m.insert(MoveRight, vec![KeyBind::new(Right, n), KeyBind::new(Char('l'), n)]);
        m.insert(Toggle, vec![KeyBind::new(Char(' '), n)]);
        m.insert(Remove, vec![KeyBind::new(Delete, n), KeyBind::new(Backspace, n)]);
        m.insert(ClearSelection, vec![KeyBind::new(Char('c'), n)]);
        m.insert(Confirm, vec![KeyBind::new(Enter, n)]);
        m.insert(FocusNext, vec![KeyBind::new(Tab, n)]);
        m.insert(OpenSettings, vec![KeyBind::new(Char('?'), n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n), KeyBind::new(Esc, n)]);

        m
    }

    /// Built-in defaults, used when no config file exists.
    pub fn defaults() -> Self {
        Self {
            bindings: Self::default_bindings(),
            show_check: true,
            chip_gap: 2,
            rail_rows: 2,
        }
    }

    /// Find the action that matches a key event.  When multiple bindings
    /// match (shouldn't happen after conflict resolution), the one with
    /// the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<Action> = None;
        let mut best_mod_count = 0;

        for (&action, binds) in &self.bindings {
            for bind in binds {
                if bind.matches(event) {
                    let mc = bind.modifiers.bits().count_ones();
                    if best.is_none() || mc > best_mod_count {
                        best = Some(action);
                        best_mod_count = mc;
                    }
                }
            }
        }
        best
    }

    /// Add a binding for `action`.  Removes this key from any other action
    /// to prevent conflicts, then appends it to `action`'s bindings.
    pub fn add_binding(&mut self, action: Action, bind: KeyBind) {
        for binds in self.bindings.values_mut() {
            binds.retain(|b| b != &bind);
        }
        self.bindings.entry(action).or_default().push(bind);
    }

    /// Restore all bindings to the built-in defaults.
    pub fn reset_defaults(&mut self) {
        self.bindings = Self::default_bindings();
    }

    /// Format the binding list for a given action (e.g. `"↑/k"`).
    pub fn display_bindings(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => {
                binds.iter().map(|b| b.display()).collect::<Vec<_>>().join("/")
            }
            _ => "unbound".into(),
        }
    }

    /// Short display of the first binding only (status bar, button label).
    pub fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}: move | {}: toggle | {}: confirm | {}: focus | {}: settings",
            self.short_binding(Action::MoveUp),
            self.short_binding(Action::Toggle),
            self.short_binding(Action::Confirm),
            self.short_binding(Action::FocusNext),
            self.short_binding(Action::OpenSettings),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        if path.exists() {
            if let Ok(contents) = std::fs::read_to_string(&path) {
                return Self::parse_config(&contents);
            }
        }
        Self::defaults()
    }

    /// Persist current config to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.serialise())?;
        Ok(())
    }

    fn parse_config(s: &str) -> Self {
        let mut config = Self::defaults();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();

            // UI settings.
            match key {
                "show_check" => {
                    config.show_check = value == "true";
                    continue;
                }
                "chip_gap" => {
                    if let Ok(v) = value.parse::<u16>() {
                        config.chip_gap = v.clamp(CHIP_GAP_RANGE.0, CHIP_GAP_RANGE.1);
                    }
                    continue;
                }
                "rail_rows" => {
                    if let Ok(v) = value.parse::<u16>() {
                        config.rail_rows = v.clamp(RAIL_ROWS_RANGE.0, RAIL_ROWS_RANGE.1);
                    }
                    continue;
                }
                _ => {}
            }

            let Some(action) = Action::from_config_key(key) else {
                continue;
            };

            let mut parsed = Vec::new();
            for part in value.split(',') {
                let part = part.trim().trim_matches('"');
                if let Some(bind) = KeyBind::parse(part) {
                    parsed.push(bind);
                }
            }
            if !parsed.is_empty() {
                config.bindings.insert(action, parsed);
            }
        }

        config
    }

    fn serialise(&self) -> String {
        let mut lines = vec![
            "# tag-browser configuration".to_string(),
            String::new(),
            "# UI settings".to_string(),
            format!("show_check = {}", self.show_check),
            format!("chip_gap = {}", self.chip_gap),
            format!("rail_rows = {}", self.rail_rows),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            "# Special keys: Up, Down, Left, Right, Enter, Esc, Tab,".to_string(),
            "#   Backspace, Delete, Home, End, PageUp, PageDown, Space, F1-F12".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/tag-browser/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("tag-browser").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_default_bindings_cover_every_action() {
        let bindings = AppConfig::default_bindings();
        for action in Action::ALL {
            assert!(
                bindings.get(action).is_some_and(|b| !b.is_empty()),
                "{action:?} has no default binding"
            );
        }
    }

    #[test]
    fn test_match_key_finds_action() {
        let config = AppConfig::defaults();
        assert_eq!(config.match_key(key(KeyCode::Char(' '))), Some(Action::Toggle));
        assert_eq!(config.match_key(key(KeyCode::Enter)), Some(Action::Confirm));
        assert_eq!(config.match_key(key(KeyCode::Char('z'))), None);
    }

    #[test]
    fn test_match_key_prefers_more_modifiers() {
        let mut config = AppConfig::defaults();
        config.bindings.insert(
            Action::ClearSelection,
            vec![KeyBind::new(KeyCode::Char('k'), KeyModifiers::CONTROL)],
        );
        let ev = KeyEvent::new(KeyCode::Char('k'), KeyModifiers::CONTROL);
        assert_eq!(config.match_key(ev), Some(Action::ClearSelection));
        // Plain `k` still moves up.
        assert_eq!(config.match_key(key(KeyCode::Char('k'))), Some(Action::MoveUp));
    }

    #[test]
    fn test_add_binding_steals_key_from_other_actions() {
        let mut config = AppConfig::defaults();
        let space = KeyBind::new(KeyCode::Char(' '), KeyModifiers::NONE);
        config.add_binding(Action::Confirm, space.clone());

        assert!(!config.bindings[&Action::Toggle].contains(&space));
        assert!(config.bindings[&Action::Confirm].contains(&space));
    }

    #[test]
    fn test_keybind_config_string_roundtrip() {
        for raw in ["q", "Space", "Enter", "Alt+Up", "Ctrl+Shift+x", "F5", "Delete"] {
            let bind = KeyBind::parse(raw).unwrap_or_else(|| panic!("parse failed for {raw}"));
            let reparsed = KeyBind::parse(&bind.to_config_string()).unwrap();
            assert_eq!(bind, reparsed, "round trip failed for {raw}");
        }
    }

    #[test]
    fn test_keybind_parse_rejects_garbage() {
        assert!(KeyBind::parse("Hyper+q").is_none());
        assert!(KeyBind::parse("NotAKey").is_none());
    }

    #[test]
    fn test_parse_config_overrides_and_clamps() {
        let text = "\
# comment
show_check = false
chip_gap = 9
rail_rows = 0
toggle = t
confirm = Ctrl+Enter
ignored_key = whatever
";
        let config = AppConfig::parse_config(text);
        assert!(!config.show_check);
        assert_eq!(config.chip_gap, 4);
        assert_eq!(config.rail_rows, 1);
        assert_eq!(
            config.bindings[&Action::Toggle],
            vec![KeyBind::new(KeyCode::Char('t'), KeyModifiers::NONE)]
        );
        assert_eq!(
            config.bindings[&Action::Confirm],
            vec![KeyBind::new(KeyCode::Enter, KeyModifiers::CONTROL)]
        );
        // Untouched actions keep their defaults.
        assert_eq!(config.match_key(key(KeyCode::Char('q'))), Some(Action::Quit));
    }

    #[test]
    fn test_serialise_parse_roundtrip() {
        let mut config = AppConfig::defaults();
        config.show_check = false;
        config.chip_gap = 3;
        config.add_binding(Action::Quit, KeyBind::new(KeyCode::F(10), KeyModifiers::NONE));

        let reparsed = AppConfig::parse_config(&config.serialise());
        assert!(!reparsed.show_check);
        assert_eq!(reparsed.chip_gap, 3);
        for action in Action::ALL {
            assert_eq!(
                reparsed.bindings.get(action),
                config.bindings.get(action),
                "bindings differ for {action:?}"
            );
        }
    }
}
