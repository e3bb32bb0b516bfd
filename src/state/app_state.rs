//! Application state definitions

use super::forms::{FieldId, OptionList, TradeInForm};
use super::lookup::{LookupKind, LookupTracker};

/// Current view in the application
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    /// The two-step form
    #[default]
    Form,
    /// Submission accepted; shows where to continue
    Completed,
}

/// Main application state
#[derive(Debug)]
pub struct AppState {
    pub current_view: View,
    pub form: TradeInForm,

    // Option lists
    pub states: OptionList,
    pub years: OptionList,
    pub makes: OptionList,
    pub models: OptionList,

    pub lookups: LookupTracker,

    /// Single user-visible error line
    pub error: Option<String>,
    /// Final submission in flight
    pub is_submitting: bool,
    /// Where the user continues after a successful submission
    pub redirect_url: Option<String>,
}

impl AppState {
    pub fn new(default_state: &str, redirect_url: Option<String>) -> Self {
        Self {
            current_view: View::Form,
            form: TradeInForm::new(default_state),
            states: OptionList::states(),
            years: OptionList::years(),
            makes: OptionList::makes(),
            models: OptionList::models(),
            lookups: LookupTracker::default(),
            error: None,
            is_submitting: false,
            redirect_url,
        }
    }

    /// Options backing a select field
    pub fn options_for(&self, id: FieldId) -> Option<&OptionList> {
        match id {
            FieldId::State => Some(&self.states),
            FieldId::Year => Some(&self.years),
            FieldId::Make => Some(&self.makes),
            FieldId::Model => Some(&self.models),
            _ => None,
        }
    }

    /// Replace the list a lookup fills
    pub fn apply_options(&mut self, kind: LookupKind, entries: Vec<String>) {
        let list = match kind {
            LookupKind::Years => &mut self.years,
            LookupKind::Makes => &mut self.makes,
            LookupKind::Models => &mut self.models,
        };
        list.replace(entries);
    }

    /// Whether the list behind a select is still being fetched
    pub fn is_field_loading(&self, id: FieldId) -> bool {
        let kind = match id {
            FieldId::Year => LookupKind::Years,
            FieldId::Make => LookupKind::Makes,
            FieldId::Model => LookupKind::Models,
            _ => return false,
        };
        self.lookups.is_pending(kind)
    }

    /// Loading overlay is shown while any lookup runs
    pub fn is_loading(&self) -> bool {
        self.lookups.in_flight()
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}
