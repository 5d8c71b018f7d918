//! Field state snapshots read from the store per render

use crate::rules::{check_all, ErrorTag, Rule};
use crate::store::FormStore;
use crate::value::FieldValue;

/// Read-only snapshot of one field, computed fresh each render.
///
/// Nothing here is persisted; the store is the only state that outlives a
/// render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldState {
    pub path: String,
    pub value: Option<FieldValue>,
    pub error: Option<ErrorTag>,
}

/// Whether validation feedback is live for a path.
///
/// Errors surface once a field has been blurred, or for every field once the
/// form has been submitted.
fn feedback_live(store: &dyn FormStore, path: &str) -> bool {
    store.submitted() || store.touched(path)
}

/// Snapshot a text-kinded field, running its rules for the live error.
///
/// A value stored under the path with the wrong kind reads as absent; rules
/// then check the empty string.
pub fn text_state(store: &dyn FormStore, path: String, rules: &[Rule]) -> FieldState {
    let value = store.text(&path);
    let error = if feedback_live(store, &path) {
        check_all(rules, value.unwrap_or("")).err()
    } else {
        None
    };
    FieldState {
        value: value.map(FieldValue::text),
        error,
        path,
    }
}

/// Snapshot a bool-kinded field.
///
/// `must_accept` demands a checked box once feedback is live.
pub fn bool_state(store: &dyn FormStore, path: String, must_accept: bool) -> FieldState {
    let value = store.bool_value(&path);
    let error = if must_accept && feedback_live(store, &path) && value != Some(true) {
        Some(ErrorTag::NotAccepted)
    } else {
        None
    };
    FieldState {
        value: value.map(FieldValue::bool),
        error,
        path,
    }
}
