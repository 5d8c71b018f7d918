//! The declarative field tree: built first, interpreted against a form-state
//! snapshot in a separate render pass

use crate::rules::Rule;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// One selectable option of a select field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// One candidate of a set field, backed by a boolean at `set_path.value`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetMember {
    pub value: String,
    pub description: String,
}

impl SetMember {
    pub fn new(value: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            description: description.into(),
        }
    }
}

/// A trigger value paired with the subtree it activates
#[derive(Debug, Clone)]
pub struct Binding {
    pub trigger: String,
    pub fields: Vec<Field>,
}

impl Binding {
    pub fn new(trigger: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            trigger: trigger.into(),
            fields,
        }
    }
}

/// A boolean trigger paired with the subtree it activates
#[derive(Debug, Clone)]
pub struct BoolBinding {
    pub trigger: bool,
    pub fields: Vec<Field>,
}

impl BoolBinding {
    pub fn new(trigger: bool, fields: Vec<Field>) -> Self {
        Self { trigger, fields }
    }
}

type ShowIfFn = dyn Fn(Option<&str>) -> Vec<Field> + Send + Sync;

/// Caller-supplied mapping from a target's current value to the fields shown
#[derive(Clone)]
pub struct FieldsFor(Arc<ShowIfFn>);

impl FieldsFor {
    pub fn new(f: impl Fn(Option<&str>) -> Vec<Field> + Send + Sync + 'static) -> Self {
        FieldsFor(Arc::new(f))
    }

    pub fn call(&self, value: Option<&str>) -> Vec<Field> {
        (self.0)(value)
    }
}

impl fmt::Debug for FieldsFor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FieldsFor(..)")
    }
}

/// A node of the declarative form tree
#[derive(Debug, Clone)]
pub enum Field {
    /// Free-text input
    Text {
        name: String,
        label: String,
        multiline: bool,
        rules: Vec<Rule>,
    },
    /// Single choice among fixed options
    Select {
        name: String,
        label: String,
        options: Vec<SelectOption>,
        rules: Vec<Rule>,
    },
    /// Boolean toggle
    Checkbox {
        name: String,
        label: String,
        must_accept: bool,
    },
    /// Named group; children resolve under `prefix.name`
    Group {
        name: String,
        title: Option<String>,
        fields: Vec<Field>,
    },
    /// User-extensible sequence of sub-forms, one per materialized index
    List {
        name: String,
        title: Option<String>,
        add_first_label: String,
        add_more_label: String,
        item: Vec<Field>,
    },
    /// Fixed candidates, each an independent boolean at `prefix.name.value`
    Set {
        name: String,
        title: Option<String>,
        members: Vec<SetMember>,
    },
    /// Shows the first binding whose trigger equals the target's text value
    Conditional {
        target: String,
        bindings: Vec<Binding>,
    },
    /// Shows the first binding whose trigger equals the target's bool value
    ConditionalBool {
        target: String,
        bindings: Vec<BoolBinding>,
    },
    /// Shows each binding whose trigger value no current list item carries
    ConditionalInList {
        target: String,
        bindings: Vec<Binding>,
    },
    /// Unkeyed escape hatch: delegates field selection to a caller closure
    ShowIf {
        target: String,
        fields_for: FieldsFor,
    },
}

impl Field {
    /// Create a text field
    pub fn text(name: &str, label: &str, multiline: bool) -> Self {
        Field::Text {
            name: name.to_string(),
            label: label.to_string(),
            multiline,
            rules: Vec::new(),
        }
    }

    /// Create a select field
    pub fn select(name: &str, label: &str, options: Vec<SelectOption>) -> Self {
        Field::Select {
            name: name.to_string(),
            label: label.to_string(),
            options,
            rules: Vec::new(),
        }
    }

    /// Create a checkbox field
    pub fn checkbox(name: &str, label: &str) -> Self {
        Field::Checkbox {
            name: name.to_string(),
            label: label.to_string(),
            must_accept: false,
        }
    }

    /// Create a named group of fields
    pub fn group(name: &str, title: Option<&str>, fields: Vec<Field>) -> Self {
        Field::Group {
            name: name.to_string(),
            title: title.map(str::to_string),
            fields,
        }
    }

    /// Create a dynamic list of sub-forms.
    ///
    /// `add_first_label` is shown while the list is empty, `add_more_label`
    /// once at least one item exists.
    pub fn list(
        name: &str,
        title: Option<&str>,
        add_first_label: &str,
        add_more_label: &str,
        item: Vec<Field>,
    ) -> Self {
        Field::List {
            name: name.to_string(),
            title: title.map(str::to_string),
            add_first_label: add_first_label.to_string(),
            add_more_label: add_more_label.to_string(),
            item,
        }
    }

    /// Create a togglable membership set
    pub fn set(name: &str, title: Option<&str>, members: Vec<SetMember>) -> Self {
        Field::Set {
            name: name.to_string(),
            title: title.map(str::to_string),
            members,
        }
    }

    /// Create a string-triggered conditional
    pub fn conditional(target: &str, bindings: Vec<Binding>) -> Self {
        Field::Conditional {
            target: target.to_string(),
            bindings,
        }
    }

    /// Create a boolean-triggered conditional
    pub fn conditional_bool(target: &str, bindings: Vec<BoolBinding>) -> Self {
        Field::ConditionalBool {
            target: target.to_string(),
            bindings,
        }
    }

    /// Create a list-membership conditional.
    ///
    /// `target` is `"list.subfield"`: the list name, then the item sub-field
    /// path. A binding's subtree shows only while no materialized item has
    /// the trigger value in that sub-field.
    pub fn conditional_in_list(target: &str, bindings: Vec<Binding>) -> Self {
        Field::ConditionalInList {
            target: target.to_string(),
            bindings,
        }
    }

    /// Create a show-if field.
    ///
    /// Unlike the conditional variants, subtrees are not keyed by trigger;
    /// switching branches can leave residual widget state in newly shown
    /// fields. Prefer [`Field::conditional`] where triggers are enumerable.
    pub fn show_if(
        target: &str,
        fields_for: impl Fn(Option<&str>) -> Vec<Field> + Send + Sync + 'static,
    ) -> Self {
        Field::ShowIf {
            target: target.to_string(),
            fields_for: FieldsFor::new(fields_for),
        }
    }

    /// Attach validation rules (text and select fields; ignored elsewhere)
    pub fn with_rules(mut self, new_rules: Vec<Rule>) -> Self {
        match &mut self {
            Field::Text { rules, .. } | Field::Select { rules, .. } => {
                rules.extend(new_rules);
            }
            _ => {}
        }
        self
    }

    /// Demand that a checkbox is checked before the form is valid
    pub fn require_acceptance(mut self) -> Self {
        if let Field::Checkbox { must_accept, .. } = &mut self {
            *must_accept = true;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::required;

    #[test]
    fn test_text_constructor() {
        let field = Field::text("title", "Title", false);
        match field {
            Field::Text {
                name,
                label,
                multiline,
                rules,
            } => {
                assert_eq!(name, "title");
                assert_eq!(label, "Title");
                assert!(!multiline);
                assert!(rules.is_empty());
            }
            other => panic!("expected text field, got {other:?}"),
        }
    }

    #[test]
    fn test_with_rules_attaches_to_text() {
        let field = Field::text("title", "Title", false).with_rules(vec![required()]);
        match field {
            Field::Text { rules, .. } => assert_eq!(rules.len(), 1),
            other => panic!("expected text field, got {other:?}"),
        }
    }

    #[test]
    fn test_with_rules_ignored_on_checkbox() {
        let field = Field::checkbox("terms", "Accept terms").with_rules(vec![required()]);
        assert!(matches!(field, Field::Checkbox { .. }));
    }

    #[test]
    fn test_require_acceptance_flags_checkbox() {
        let field = Field::checkbox("terms", "Accept terms").require_acceptance();
        match field {
            Field::Checkbox { must_accept, .. } => assert!(must_accept),
            other => panic!("expected checkbox, got {other:?}"),
        }
    }

    #[test]
    fn test_show_if_closure_is_callable() {
        let field = Field::show_if("kind", |value| match value {
            Some("other") => vec![Field::text("detail", "Detail", false)],
            _ => Vec::new(),
        });
        if let Field::ShowIf { fields_for, .. } = field {
            assert_eq!(fields_for.call(Some("other")).len(), 1);
            assert!(fields_for.call(None).is_empty());
        } else {
            panic!("expected show_if field");
        }
    }

    #[test]
    fn test_field_tree_is_cloneable() {
        let tree = Field::group(
            "person",
            Some("Person"),
            vec![
                Field::text("name", "Name", false),
                Field::conditional(
                    "kind",
                    vec![Binding::new("other", vec![Field::text("d", "D", false)])],
                ),
            ],
        );
        let cloned = tree.clone();
        assert!(matches!(cloned, Field::Group { .. }));
    }
}
