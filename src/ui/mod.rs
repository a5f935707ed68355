//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer takes the *core* data structures and turns them into cells on
//! the terminal.  Chip placement geometry is exposed so the input handlers
//! can hit-test against exactly what was drawn.

pub mod button;
pub mod chips;
pub mod layout;
pub mod popup;
pub mod rail;
pub mod theme;
