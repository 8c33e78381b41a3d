//! Select options

use serde::{Deserialize, Serialize};

/// An option in the select menu
///
/// Order is significant: it is both the display order and the keyboard
/// navigation order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// The value written to the field when this option is committed
    pub value: String,
    /// The display text shown in the menu and in the combobox
    pub text: String,
}

impl SelectOption {
    /// Create a new option with value and display text
    pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
        }
    }
}

/// Index of the option whose value equals `value`
///
/// Values need not be unique; the first match is authoritative.
pub fn selected_index(options: &[SelectOption], value: &str) -> Option<usize> {
    options.iter().position(|opt| opt.value == value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<SelectOption> {
        vec![
            SelectOption::new("red", "Red"),
            SelectOption::new("green", "Green"),
            SelectOption::new("green", "Also Green"),
        ]
    }

    #[test]
    fn test_selected_index_first_match_wins() {
        assert_eq!(selected_index(&options(), "green"), Some(1));
    }

    #[test]
    fn test_selected_index_missing() {
        assert_eq!(selected_index(&options(), ""), None);
        assert_eq!(selected_index(&options(), "Red"), None);
    }

    #[test]
    fn test_option_deserialize() {
        let opt: SelectOption =
            serde_json::from_str(r#"{"value":"ca","text":"California"}"#).unwrap();
        assert_eq!(opt, SelectOption::new("ca", "California"));
    }
}
