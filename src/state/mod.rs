//! Application state module

mod app_state;
mod forms;
mod lookup;

pub use app_state::*;
pub use forms::*;
pub use lookup::*;
