//! Presentation helpers for terminal shells.

pub mod presenter;

pub use presenter::{describe_event, options_line, render_board, score_line, status_line};
