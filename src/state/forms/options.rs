//! Dropdown option lists

/// US postal state codes offered in the state dropdown
pub const STATES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA", "KS",
    "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ", "NM", "NY",
    "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT", "VA", "WA", "WV",
    "WI", "WY",
];

pub const YEARS_PLACEHOLDER: &str = "Select Years";
pub const MAKES_PLACEHOLDER: &str = "Select Makes";
pub const MODELS_PLACEHOLDER: &str = "Select Models";

/// An ordered list of choices, optionally led by a placeholder entry.
///
/// Choosing the placeholder means "no value": it maps to the empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionList {
    placeholder: Option<&'static str>,
    entries: Vec<String>,
}

impl OptionList {
    /// A list that starts as just its placeholder
    pub fn with_placeholder(placeholder: &'static str) -> Self {
        Self {
            placeholder: Some(placeholder),
            entries: Vec::new(),
        }
    }

    /// A fixed list without placeholder
    pub fn fixed(entries: &[&str]) -> Self {
        Self {
            placeholder: None,
            entries: entries.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn years() -> Self {
        Self::with_placeholder(YEARS_PLACEHOLDER)
    }

    pub fn makes() -> Self {
        Self::with_placeholder(MAKES_PLACEHOLDER)
    }

    pub fn models() -> Self {
        Self::with_placeholder(MODELS_PLACEHOLDER)
    }

    pub fn states() -> Self {
        Self::fixed(STATES)
    }

    /// Replace every non-placeholder entry
    pub fn replace(&mut self, entries: Vec<String>) {
        self.entries = entries;
    }

    /// Labels in display order, placeholder first
    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = Vec::with_capacity(self.len());
        if let Some(placeholder) = self.placeholder {
            labels.push(placeholder);
        }
        labels.extend(self.entries.iter().map(String::as_str));
        labels
    }

    pub fn len(&self) -> usize {
        self.entries.len() + usize::from(self.placeholder.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Field value for a display index; the placeholder yields ""
    pub fn value_at(&self, index: usize) -> Option<String> {
        match (self.placeholder, index) {
            (Some(_), 0) => Some(String::new()),
            (Some(_), i) => self.entries.get(i - 1).cloned(),
            (None, i) => self.entries.get(i).cloned(),
        }
    }

    /// Display index of a field value, if present
    pub fn position(&self, value: &str) -> Option<usize> {
        if value.is_empty() {
            return self.placeholder.map(|_| 0);
        }
        let offset = usize::from(self.placeholder.is_some());
        self.entries
            .iter()
            .position(|e| e == value)
            .map(|i| i + offset)
    }

    /// Value reached by moving `delta` entries from `current`, wrapping around.
    ///
    /// A value not in the list counts as sitting on the first entry.
    pub fn cycle(&self, current: &str, delta: isize) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        let len = self.len() as isize;
        let index = self.position(current).unwrap_or(0) as isize;
        let next = (index + delta).rem_euclid(len) as usize;
        self.value_at(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn makes() -> OptionList {
        let mut list = OptionList::makes();
        list.replace(vec!["Honda".into(), "Toyota".into()]);
        list
    }

    #[test]
    fn test_placeholder_always_first() {
        assert_eq!(OptionList::years().labels(), vec!["Select Years"]);
        assert_eq!(makes().labels(), vec!["Select Makes", "Honda", "Toyota"]);

        let mut models = OptionList::models();
        models.replace(vec!["Camry".into()]);
        models.replace(vec!["Corolla".into()]);
        assert_eq!(models.labels(), vec!["Select Models", "Corolla"]);
    }

    #[test]
    fn test_placeholder_maps_to_empty_value() {
        let list = makes();
        assert_eq!(list.value_at(0), Some(String::new()));
        assert_eq!(list.value_at(2), Some("Toyota".to_string()));
        assert_eq!(list.value_at(3), None);
        assert_eq!(list.position(""), Some(0));
        assert_eq!(list.position("Honda"), Some(1));
        assert_eq!(list.position("Ford"), None);
    }

    #[test]
    fn test_cycle_wraps() {
        let list = makes();
        assert_eq!(list.cycle("", 1).unwrap(), "Honda");
        assert_eq!(list.cycle("Toyota", 1).unwrap(), "");
        assert_eq!(list.cycle("", -1).unwrap(), "Toyota");
        // A stale value starts from the placeholder
        assert_eq!(list.cycle("Ford", 1).unwrap(), "Honda");
    }

    #[test]
    fn test_fixed_states() {
        let states = OptionList::states();
        assert_eq!(states.len(), 50);
        assert_eq!(states.value_at(0).unwrap(), "AL");
        assert_eq!(states.position(""), None);
        assert_eq!(states.cycle("WY", 1).unwrap(), "AL");
        assert_eq!(states.cycle("AL", -1).unwrap(), "WY");
    }

    #[test]
    fn test_empty_fixed_list_cycles_to_none() {
        assert!(OptionList::fixed(&[]).cycle("", 1).is_none());
        assert!(OptionList::fixed(&[]).is_empty());
    }
}
