//! A chip-based TUI tag picker.
//!
//! Run the binary to browse a tag catalog, toggle tags with the mouse or
//! keyboard, and confirm.  The confirmed selection is printed to stdout
//! (the UI itself renders on stderr) so the picker composes with shells:
//!
//! ```sh
//! tags=$(tag-browser --tags rust,tui,cli)
//! ```

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stderr, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    widgets::{Block, Borders, Paragraph},
    Terminal,
};

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::{ActiveView, AppState, Focus},
};
use crate::core::{catalog::TagCatalog, selection::Selection};
use crate::ui::{
    button::ConfirmButton, chips::ChipGrid, layout::AppLayout, popup, rail::SelectedRail,
    theme::Theme,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Chip-based tag picker for the terminal")]
struct Cli {
    /// File with one tag per line (`#` starts a comment).
    file: Option<PathBuf>,

    /// Tags to browse, comma-separated (overrides FILE and the built-ins).
    #[arg(long, value_delimiter = ',')]
    tags: Vec<String>,

    /// Tags to pre-select at startup, comma-separated.
    #[arg(long, value_delimiter = ',')]
    select: Vec<String>,

    /// Print the confirmed selection NUL-separated instead of one per line.
    #[arg(long)]
    print0: bool,
}

/// Pick the tag catalog: `--tags` beats the positional file, which beats
/// the built-in set.
fn resolve_catalog(cli: &Cli) -> Result<TagCatalog> {
    if !cli.tags.is_empty() {
        let catalog = TagCatalog::from_tags(cli.tags.iter().cloned());
        anyhow::ensure!(!catalog.is_empty(), "--tags produced no usable tags");
        return Ok(catalog);
    }
    if let Some(ref path) = cli.file {
        return Ok(TagCatalog::load(path)?);
    }
    Ok(TagCatalog::builtin())
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only in debug builds / when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();

    // ── build initial state ───────────────────────────────────
    let catalog = resolve_catalog(&cli)?;

    let mut selection = Selection::new();
    for tag in &cli.select {
        let tag = tag.trim();
        if !tag.is_empty() {
            selection.insert(tag);
        }
    }
    // Pre-selections must name catalog tags; anything else is dropped.
    selection.retain_known(&catalog);

    let user_config = config::AppConfig::load();
    let mut state = AppState::new(catalog, selection, user_config);

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(
        stderr_handle,
        EnterAlternateScreen,
        EnableMouseCapture
    )?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let mut events = spawn_event_reader(Duration::from_millis(100));

    // ── event loop ────────────────────────────────────────────
    loop {
        // Draw first so the UI reflects every state change immediately.
        terminal.draw(|frame| {
            state.terminal_area = frame.area();
            let layout = AppLayout::from_area(frame.area(), state.config.rail_rows);

            let on_picker = state.active_view == ActiveView::Picker;
            let browse_focused = on_picker && state.focus == Focus::Browse;
            let rail_focused = on_picker && state.focus == Focus::Rail;

            let browse_block = Block::default()
                .title(" Browse Tags ")
                .title_style(Theme::title_style())
                .borders(Borders::ALL)
                .border_style(if browse_focused {
                    Theme::border_focused_style()
                } else {
                    Theme::border_style()
                });
            let grid = ChipGrid::new(&state.catalog, &state.selection, &state.config)
                .focused(browse_focused)
                .block(browse_block);
            frame.render_stateful_widget(grid, layout.browse_area, &mut state.grid_state);

            let rail_block = Block::default()
                .title(format!(" Selected Tags ({}) ", state.selection.len()))
                .title_style(Theme::title_style())
                .borders(Borders::ALL)
                .border_style(if rail_focused {
                    Theme::border_focused_style()
                } else {
                    Theme::border_style()
                });
            let rail = SelectedRail::new(&state.selection, &state.config)
                .focused(rail_focused)
                .cursor(state.rail_cursor)
                .block(rail_block);
            frame.render_widget(rail, layout.rail_area);

            let button = ConfirmButton::new(!state.selection.is_empty())
                .key_hint(state.config.short_binding(config::Action::Confirm));
            frame.render_widget(button, layout.button_area);

            let hint = state.config.status_bar_hint();
            let status_text = match state.active_view {
                ActiveView::Picker => state.status_message.as_deref().unwrap_or(&hint),
                ActiveView::SettingsMenu | ActiveView::ControlsSubmenu => "",
            };
            let status_style = if on_picker && state.status_message.is_some() {
                Theme::status_message_style()
            } else {
                Theme::status_bar_style()
            };
            let status = Paragraph::new(status_text).style(status_style);
            frame.render_widget(status, layout.status_area);

            match state.active_view {
                ActiveView::SettingsMenu => {
                    frame.render_widget(
                        popup::SettingsPopup {
                            selected: state.settings_selected,
                            config: &state.config,
                        },
                        frame.area(),
                    );
                }
                ActiveView::ControlsSubmenu => {
                    frame.render_widget(
                        popup::ControlsPopup {
                            config: &state.config,
                            selected: state.controls_selected,
                            awaiting_rebind: state.awaiting_rebind,
                        },
                        frame.area(),
                    );
                }
                ActiveView::Picker => {}
            }
        })?;

        let Some(event) = events.recv().await else {
            break; // event reader gone
        };
        match event {
            AppEvent::Key(k) => handler::handle_key(&mut state, k),
            AppEvent::Mouse(m) => handler::handle_mouse(&mut state, m),
            AppEvent::Resize(_, _) => {}
            AppEvent::Tick => state.on_tick(),
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // Only a confirmed selection reaches stdout; quitting prints nothing.
    if state.confirmed {
        let mut out = io::stdout().lock();
        for tag in state.selection.iter() {
            if cli.print0 {
                write!(out, "{tag}\0")?;
            } else {
                writeln!(out, "{tag}")?;
            }
        }
        out.flush()?;
    }

    Ok(())
}
