//! Trade-in form state, steps and validation

use super::field::{FieldId, FormField};
use serde::{Deserialize, Serialize};

/// Required fields of step 1, in message order
pub const STEP_ONE_FIELDS: &[FieldId] = &[
    FieldId::Year,
    FieldId::Make,
    FieldId::Model,
    FieldId::State,
    FieldId::Miles,
];

/// Required fields of step 2, in message order
pub const STEP_TWO_FIELDS: &[FieldId] = &[FieldId::Name, FieldId::Email, FieldId::Phone];

/// Focus order of step 1 (the state picker comes first on screen)
const STEP_ONE_FOCUS: &[FieldId] = &[
    FieldId::State,
    FieldId::Year,
    FieldId::Make,
    FieldId::Model,
    FieldId::Miles,
];

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
}

/// Which half of the form is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Step {
    /// Vehicle details
    #[default]
    One,
    /// Contact details
    Two,
}

impl Step {
    pub fn number(&self) -> u8 {
        match self {
            Step::One => 1,
            Step::Two => 2,
        }
    }

    /// Fields validated before leaving this step
    pub fn required_fields(&self) -> &'static [FieldId] {
        match self {
            Step::One => STEP_ONE_FIELDS,
            Step::Two => STEP_TWO_FIELDS,
        }
    }

    /// Fields in on-screen order
    pub fn focus_order(&self) -> &'static [FieldId] {
        match self {
            Step::One => STEP_ONE_FOCUS,
            Step::Two => STEP_TWO_FIELDS,
        }
    }
}

/// The year/make pair that drives the dependent lookups
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub year: String,
    pub make: String,
}

/// Body posted to the webhook; exactly the eight lead fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadPayload {
    pub year: String,
    pub make: String,
    pub model: String,
    pub state: String,
    pub miles: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// The two-step trade-in lead form
#[derive(Debug, Clone)]
pub struct TradeInForm {
    pub step: Step,
    pub year: FormField,
    pub make: FormField,
    pub model: FormField,
    pub state: FormField,
    pub miles: FormField,
    pub name: FormField,
    pub email: FormField,
    pub phone: FormField,
    /// Index into the step's focus order; one past the end is the submit button
    pub active_field_index: usize,
    default_state: String,
}

impl TradeInForm {
    pub fn new(default_state: &str) -> Self {
        let mut state = FormField::select(FieldId::State);
        state.set(default_state);
        Self {
            step: Step::One,
            year: FormField::select(FieldId::Year),
            make: FormField::select(FieldId::Make),
            model: FormField::select(FieldId::Model),
            state,
            miles: FormField::numeric(FieldId::Miles, "Enter miles"),
            name: FormField::text(FieldId::Name, "Enter your name"),
            email: FormField::text(FieldId::Email, "Enter your email"),
            phone: FormField::text(FieldId::Phone, "Enter your phone number"),
            active_field_index: 0,
            default_state: default_state.to_string(),
        }
    }

    pub fn field(&self, id: FieldId) -> &FormField {
        match id {
            FieldId::Year => &self.year,
            FieldId::Make => &self.make,
            FieldId::Model => &self.model,
            FieldId::State => &self.state,
            FieldId::Miles => &self.miles,
            FieldId::Name => &self.name,
            FieldId::Email => &self.email,
            FieldId::Phone => &self.phone,
        }
    }

    pub fn field_mut(&mut self, id: FieldId) -> &mut FormField {
        match id {
            FieldId::Year => &mut self.year,
            FieldId::Make => &mut self.make,
            FieldId::Model => &mut self.model,
            FieldId::State => &mut self.state,
            FieldId::Miles => &mut self.miles,
            FieldId::Name => &mut self.name,
            FieldId::Email => &mut self.email,
            FieldId::Phone => &mut self.phone,
        }
    }

    pub fn value(&self, id: FieldId) -> &str {
        &self.field(id).value
    }

    /// Field under focus, or `None` when the submit button is focused
    pub fn active_field_id(&self) -> Option<FieldId> {
        self.step
            .focus_order()
            .get(self.active_field_index)
            .copied()
    }

    /// Returns true if the submit button is currently focused
    pub fn is_button_active(&self) -> bool {
        self.active_field_id().is_none()
    }

    pub fn selection(&self) -> Selection {
        Selection {
            year: self.year.value.clone(),
            make: self.make.value.clone(),
        }
    }

    /// Required fields of `step` that are still empty, in message order
    pub fn missing_fields(&self, step: Step) -> Vec<FieldId> {
        step.required_fields()
            .iter()
            .copied()
            .filter(|id| self.field(*id).is_empty())
            .collect()
    }

    /// Check the current step, producing the combined message on failure
    pub fn validate_step(&self) -> Result<(), String> {
        let missing = self.missing_fields(self.step);
        if missing.is_empty() {
            return Ok(());
        }
        let names: Vec<&str> = missing.iter().map(FieldId::name).collect();
        Err(format!(
            "Please fill in all required fields: {}",
            names.join(", ")
        ))
    }

    /// Move from step 1 to step 2; never moves backwards
    pub fn advance(&mut self) {
        if self.step == Step::One {
            self.step = Step::Two;
            self.active_field_index = 0;
        }
    }

    pub fn payload(&self) -> LeadPayload {
        LeadPayload {
            year: self.year.value.clone(),
            make: self.make.value.clone(),
            model: self.model.value.clone(),
            state: self.state.value.clone(),
            miles: self.miles.value.clone(),
            name: self.name.value.clone(),
            email: self.email.value.clone(),
            phone: self.phone.value.clone(),
        }
    }

    /// Back to the initial values and step 1
    pub fn reset(&mut self) {
        let default_state = std::mem::take(&mut self.default_state);
        *self = Self::new(&default_state);
    }
}

impl Form for TradeInForm {
    fn field_count(&self) -> usize {
        self.step.focus_order().len() + 1 // fields + button
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.field_count() - 1);
    }
}
