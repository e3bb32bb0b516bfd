//! Dialog components for TUI

mod base;
mod completion_dialog;

pub use completion_dialog::render_completion_dialog;
