//! Core logic – the scroll picker, easing, the workout model and storage.
//!
//! Nothing in this module depends on any TUI or rendering crate.

pub mod easing;
pub mod picker;
pub mod store;
pub mod workout;
