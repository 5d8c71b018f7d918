//! Mutation intents emitted by the render layer and applied by the host store

use crate::value::FieldValue;
use serde::{Deserialize, Serialize};

/// A requested form-state mutation.
///
/// The core never mutates state itself; interactive render nodes describe the
/// intent they emit and the host applies it atomically between renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Intent {
    /// A raw value was entered for a field
    Input { path: String, value: FieldValue },
    /// Add one new item to the list at `path`
    Append { path: String },
    /// Remove the item at `index` from the list at `path`
    RemoveItem { path: String, index: usize },
    /// A field gained focus
    Focus { path: String },
    /// A field lost focus
    Blur { path: String },
    /// The form was submitted
    Submit,
}

impl Intent {
    /// Text input intent for a field
    pub fn input_text(path: impl Into<String>, value: impl Into<String>) -> Self {
        Intent::Input {
            path: path.into(),
            value: FieldValue::Text(value.into()),
        }
    }

    /// Checkbox toggle intent for a field
    pub fn input_bool(path: impl Into<String>, value: bool) -> Self {
        Intent::Input {
            path: path.into(),
            value: FieldValue::Bool(value),
        }
    }

    /// Append intent for a list
    pub fn append(path: impl Into<String>) -> Self {
        Intent::Append { path: path.into() }
    }

    /// Remove intent for a list item
    pub fn remove_item(path: impl Into<String>, index: usize) -> Self {
        Intent::RemoveItem {
            path: path.into(),
            index,
        }
    }

    /// Blur intent for a field
    pub fn blur(path: impl Into<String>) -> Self {
        Intent::Blur { path: path.into() }
    }

    /// Focus intent for a field
    pub fn focus(path: impl Into<String>) -> Self {
        Intent::Focus { path: path.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_text_constructor() {
        let intent = Intent::input_text("contacts.0.name", "Ada");
        assert_eq!(
            intent,
            Intent::Input {
                path: "contacts.0.name".to_string(),
                value: FieldValue::Text("Ada".to_string()),
            }
        );
    }

    #[test]
    fn test_input_bool_constructor() {
        let intent = Intent::input_bool("terms", true);
        assert_eq!(
            intent,
            Intent::Input {
                path: "terms".to_string(),
                value: FieldValue::Bool(true),
            }
        );
    }

    #[test]
    fn test_serialization_round_trip() {
        let intents = vec![
            Intent::input_text("a", "x"),
            Intent::append("contacts"),
            Intent::remove_item("contacts", 3),
            Intent::focus("a"),
            Intent::blur("a"),
            Intent::Submit,
        ];
        let json = serde_json::to_string(&intents).unwrap();
        let parsed: Vec<Intent> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, intents);
    }
}
