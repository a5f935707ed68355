//! Core data model – the tag catalog, the selection set, and flow placement.
//!
//! Nothing in this module depends on any TUI or rendering crate, so the
//! selection semantics and the wrapping rules are testable without a
//! terminal.

pub mod catalog;
pub mod flow;
pub mod selection;
