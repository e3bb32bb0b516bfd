//! Reusable UI components

mod button;
mod dialog;
mod loading;

pub use button::{render_button, submit_label, BUTTON_HEIGHT};
pub use dialog::render_completion_dialog;
pub use loading::render_loading_overlay;
