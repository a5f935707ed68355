//! Application layer — state, the event channel, and input handling.

pub mod event;
pub mod handler;
pub mod settings;
pub mod state;
