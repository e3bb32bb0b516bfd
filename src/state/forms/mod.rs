//! Form domain layer
//!
//! Field values, option lists, steps and validation for the trade-in form.

mod field;
mod form_state;
mod options;

pub use field::{FieldId, FormField};
pub use form_state::{Form, LeadPayload, Selection, Step, TradeInForm};
pub use options::{OptionList, STATES};
