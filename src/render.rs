//! Render-tree interpretation of a field tree against a store snapshot.
//!
//! The render pass is pure: it reads the store, runs the visibility and
//! collection logic, and produces abstract nodes the host maps to real
//! widgets. Error tags are formatted to display text here, at the boundary,
//! by the injected formatter.

use crate::access::{bool_state, text_state};
use crate::field::{Field, SelectOption};
use crate::intent::Intent;
use crate::path::{join, PathPrefix};
use crate::rules::ErrorFormatter;
use crate::store::FormStore;
use crate::visibility::{first_bool_match, first_trigger_match, in_list_active};
use serde::{Deserialize, Serialize};

/// One node of the abstract render tree.
///
/// Input leaves carry everything a widget needs (path, label, current value,
/// formatted error); `Group` nodes carry the stable keys the host's diffing
/// layer must honor: when a key disappears and reappears under a different
/// key the subtree is torn down and rebuilt, when the key is unchanged the
/// subtree keeps its identity across renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderNode {
    TextInput {
        path: String,
        label: String,
        multiline: bool,
        value: Option<String>,
        error: Option<String>,
    },
    SelectInput {
        path: String,
        label: String,
        options: Vec<SelectOption>,
        selected: Option<String>,
        error: Option<String>,
    },
    CheckboxInput {
        path: String,
        label: String,
        checked: bool,
        error: Option<String>,
    },
    Group {
        key: Option<String>,
        title: Option<String>,
        children: Vec<RenderNode>,
    },
    /// Add affordance of a list; always present, label depends on emptiness
    AddItem { path: String, label: String },
    /// Remove affordance of one list item
    RemoveItem { path: String, index: usize },
}

impl RenderNode {
    /// Intent a click on an add/remove affordance emits (None for inputs
    /// and groups; input widgets build their own `Input` intents)
    pub fn click_intent(&self) -> Option<Intent> {
        match self {
            RenderNode::AddItem { path, .. } => Some(Intent::append(path.clone())),
            RenderNode::RemoveItem { path, index } => {
                Some(Intent::remove_item(path.clone(), *index))
            }
            _ => None,
        }
    }
}

/// Interpret a field tree against the store, producing the render tree
pub fn render(
    fields: &[Field],
    store: &dyn FormStore,
    formatter: &dyn ErrorFormatter,
) -> Vec<RenderNode> {
    let mut prefix = PathPrefix::root();
    render_fields(fields, store, formatter, &mut prefix)
}

fn render_fields(
    fields: &[Field],
    store: &dyn FormStore,
    formatter: &dyn ErrorFormatter,
    prefix: &mut PathPrefix,
) -> Vec<RenderNode> {
    let mut nodes = Vec::with_capacity(fields.len());
    for field in fields {
        render_field(field, store, formatter, prefix, &mut nodes);
    }
    nodes
}

fn render_field(
    field: &Field,
    store: &dyn FormStore,
    formatter: &dyn ErrorFormatter,
    prefix: &mut PathPrefix,
    out: &mut Vec<RenderNode>,
) {
    match field {
        Field::Text {
            name,
            label,
            multiline,
            rules,
        } => {
            let state = text_state(store, prefix.resolve(name), rules);
            out.push(RenderNode::TextInput {
                path: state.path,
                label: label.clone(),
                multiline: *multiline,
                value: state
                    .value
                    .as_ref()
                    .and_then(|v| v.as_text())
                    .map(str::to_string),
                error: state.error.map(|tag| formatter.message(&tag)),
            });
        }
        Field::Select {
            name,
            label,
            options,
            rules,
        } => {
            let state = text_state(store, prefix.resolve(name), rules);
            out.push(RenderNode::SelectInput {
                path: state.path,
                label: label.clone(),
                options: options.clone(),
                selected: state
                    .value
                    .as_ref()
                    .and_then(|v| v.as_text())
                    .map(str::to_string),
                error: state.error.map(|tag| formatter.message(&tag)),
            });
        }
        Field::Checkbox {
            name,
            label,
            must_accept,
        } => {
            let state = bool_state(store, prefix.resolve(name), *must_accept);
            out.push(RenderNode::CheckboxInput {
                path: state.path,
                label: label.clone(),
                checked: state.value.as_ref().and_then(|v| v.as_bool()) == Some(true),
                error: state.error.map(|tag| formatter.message(&tag)),
            });
        }
        Field::Group {
            name,
            title,
            fields,
        } => {
            prefix.push(name);
            let children = render_fields(fields, store, formatter, prefix);
            prefix.pop();
            out.push(RenderNode::Group {
                key: None,
                title: title.clone(),
                children,
            });
        }
        Field::List {
            name,
            title,
            add_first_label,
            add_more_label,
            item,
        } => {
            let list_path = prefix.resolve(name);
            let indices = store.indices(&list_path).to_vec();
            let mut children = Vec::with_capacity(indices.len() + 1);
            prefix.push(name);
            for index in &indices {
                prefix.push_index(*index);
                let mut item_children = render_fields(item, store, formatter, prefix);
                prefix.pop();
                item_children.push(RenderNode::RemoveItem {
                    path: list_path.clone(),
                    index: *index,
                });
                children.push(RenderNode::Group {
                    key: Some(index.to_string()),
                    title: None,
                    children: item_children,
                });
            }
            prefix.pop();
            let add_label = if indices.is_empty() {
                add_first_label
            } else {
                add_more_label
            };
            children.push(RenderNode::AddItem {
                path: list_path,
                label: add_label.clone(),
            });
            out.push(RenderNode::Group {
                key: None,
                title: title.clone(),
                children,
            });
        }
        Field::Set {
            name,
            title,
            members,
        } => {
            let set_path = prefix.resolve(name);
            let children = members
                .iter()
                .map(|member| {
                    let state = bool_state(store, join(&set_path, &member.value), false);
                    RenderNode::CheckboxInput {
                        path: state.path,
                        label: member.description.clone(),
                        checked: state.value.as_ref().and_then(|v| v.as_bool()) == Some(true),
                        error: None,
                    }
                })
                .collect();
            out.push(RenderNode::Group {
                key: None,
                title: title.clone(),
                children,
            });
        }
        Field::Conditional { target, bindings } => {
            let value = store.text(&prefix.resolve(target));
            if let Some(at) = first_trigger_match(value, bindings) {
                let binding = &bindings[at];
                tracing::trace!(trigger = %binding.trigger, "conditional branch active");
                let children = render_fields(&binding.fields, store, formatter, prefix);
                out.push(RenderNode::Group {
                    key: Some(binding.trigger.clone()),
                    title: None,
                    children,
                });
            }
        }
        Field::ConditionalBool { target, bindings } => {
            let value = store.bool_value(&prefix.resolve(target));
            if let Some(at) = first_bool_match(value, bindings) {
                let binding = &bindings[at];
                let children = render_fields(&binding.fields, store, formatter, prefix);
                out.push(RenderNode::Group {
                    key: Some(binding.trigger.to_string()),
                    title: None,
                    children,
                });
            }
        }
        Field::ConditionalInList { target, bindings } => {
            for binding in bindings {
                if in_list_active(store, prefix.as_str(), target, &binding.trigger) {
                    let children = render_fields(&binding.fields, store, formatter, prefix);
                    out.push(RenderNode::Group {
                        key: Some(binding.trigger.clone()),
                        title: None,
                        children,
                    });
                }
            }
        }
        Field::ShowIf { target, fields_for } => {
            let value = store.text(&prefix.resolve(target));
            let fields = fields_for.call(value);
            out.extend(render_fields(&fields, store, formatter, prefix));
        }
    }
}
