//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! This layer reads application state and turns it into cells on the
//! terminal.  No persistence happens here.

pub mod layout;
pub mod picker_widget;
pub mod theme;
pub mod workout_view;
