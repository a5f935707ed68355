//! Terminal event abstraction.
//!
//! Wraps crossterm events into a simpler enum and runs a background task that
//! forwards them over a channel so the main loop stays non-blocking.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};
use tokio::sync::mpsc;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    /// Emitted when no terminal event arrived within the tick rate.  Drives
    /// time-based state like status-message expiry.
    Tick,
}

/// Map a raw crossterm event onto an [`AppEvent`].  Focus and paste events
/// are irrelevant to the picker and dropped.
fn convert(ev: CtEvent) -> Option<AppEvent> {
    match ev {
        CtEvent::Key(k) => Some(AppEvent::Key(k)),
        CtEvent::Mouse(m) => Some(AppEvent::Mouse(m)),
        CtEvent::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        CtEvent::FocusGained | CtEvent::FocusLost | CtEvent::Paste(_) => None,
    }
}

/// Spawns a background task that polls the terminal for events and sends them
/// through the returned channel.
pub fn spawn_event_reader(tick_rate: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        loop {
            // Use crossterm's poll with the tick rate so we can send Tick
            // events even when nothing is happening.
            let has_event = event::poll(tick_rate).unwrap_or(false);
            let app_event = if has_event {
                match event::read() {
                    Ok(ev) => match convert(ev) {
                        Some(app_event) => app_event,
                        None => continue,
                    },
                    Err(_) => continue,
                }
            } else {
                AppEvent::Tick
            };
            if tx.send(app_event).is_err() {
                break; // receiver dropped
            }
        }
    });

    rx
}
