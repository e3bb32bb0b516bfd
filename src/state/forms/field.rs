//! Form field value objects

/// Identifies one of the eight lead fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    Year,
    Make,
    Model,
    State,
    Miles,
    Name,
    Email,
    Phone,
}

impl FieldId {
    /// Key used in payloads and validation messages
    pub fn name(&self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Make => "make",
            Self::Model => "model",
            Self::State => "state",
            Self::Miles => "miles",
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Year => "Year",
            Self::Make => "Make",
            Self::Model => "Model",
            Self::State => "State",
            Self::Miles => "Miles",
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Phone => "Phone",
        }
    }
}

/// How a field accepts input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text
    Text,
    /// Digits only
    Numeric,
    /// Chosen from an option list
    Select,
}

/// Represents a single form field with its configuration and value
#[derive(Debug, Clone)]
pub struct FormField {
    pub id: FieldId,
    pub value: String,
    pub kind: FieldKind,
    /// Hint shown while the value is empty
    pub placeholder: &'static str,
}

impl FormField {
    /// Create a new free-text field
    pub fn text(id: FieldId, placeholder: &'static str) -> Self {
        Self {
            id,
            value: String::new(),
            kind: FieldKind::Text,
            placeholder,
        }
    }

    /// Create a new digits-only field
    pub fn numeric(id: FieldId, placeholder: &'static str) -> Self {
        Self {
            kind: FieldKind::Numeric,
            ..Self::text(id, placeholder)
        }
    }

    /// Create a new select field
    pub fn select(id: FieldId) -> Self {
        Self {
            kind: FieldKind::Select,
            ..Self::text(id, "")
        }
    }

    pub fn label(&self) -> &'static str {
        self.id.label()
    }

    pub fn is_select(&self) -> bool {
        self.kind == FieldKind::Select
    }

    /// Push a character to the field value.
    /// Returns whether the value changed.
    pub fn push_char(&mut self, c: char) -> bool {
        match self.kind {
            FieldKind::Text if !c.is_control() => {
                self.value.push(c);
                true
            }
            FieldKind::Numeric if c.is_ascii_digit() => {
                self.value.push(c);
                true
            }
            _ => false,
        }
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) -> bool {
        if self.is_select() {
            return false;
        }
        self.value.pop().is_some()
    }

    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}
