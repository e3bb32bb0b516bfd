//! Form rendering module
//!
//! - `field_renderer`: input and select rendering
//! - `trade_in_form`: the two steps of the trade-in form

mod field_renderer;
mod trade_in_form;

pub use trade_in_form::draw_trade_in_form;
