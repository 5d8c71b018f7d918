//! Form state storage: the read trait the engines consume and a reference
//! in-memory reducer

use crate::intent::Intent;
use crate::path::SEPARATOR;
use crate::value::FieldValue;
use std::collections::{HashMap, HashSet};

const NO_INDICES: &[usize] = &[];

/// Read-only view of form state, as consumed by the render pass.
///
/// The store is owned by the host application; the core only reads through
/// this trait and emits [`Intent`]s describing mutations.
pub trait FormStore {
    /// Current text value at a path (None when absent or stored as a bool)
    fn text(&self, path: &str) -> Option<&str>;

    /// Current boolean value at a path (None when absent or stored as text)
    fn bool_value(&self, path: &str) -> Option<bool>;

    /// Materialized indices of the list at a path, in order
    fn indices(&self, path: &str) -> &[usize];

    /// Whether the field at a path has been blurred at least once
    fn touched(&self, path: &str) -> bool;

    /// Whether the form has been submitted
    fn submitted(&self) -> bool;
}

/// Indices materialized for one list path.
///
/// `next` is a high-water mark over the list's whole history: removing items
/// never lowers it, so re-adding after removal cannot reuse an index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ListSlots {
    indices: Vec<usize>,
    next: usize,
}

impl ListSlots {
    fn append(&mut self) -> usize {
        let index = self.next;
        self.indices.push(index);
        self.next = index + 1;
        index
    }

    fn remove(&mut self, index: usize) -> bool {
        let before = self.indices.len();
        self.indices.retain(|&i| i != index);
        self.indices.len() != before
    }
}

/// Reference form-state store with an atomic [`apply`](MemoryFormStore::apply)
/// reducer.
///
/// One instance lives for the whole form lifecycle; every render reads a
/// consistent snapshot because intents are only applied between renders.
#[derive(Debug, Clone, Default)]
pub struct MemoryFormStore {
    values: HashMap<String, FieldValue>,
    lists: HashMap<String, ListSlots>,
    touched: HashSet<String>,
    focused: Option<String>,
    submitted: bool,
}

impl MemoryFormStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one intent to the store.
    ///
    /// Unknown list paths and out-of-range removals are no-ops.
    pub fn apply(&mut self, intent: Intent) {
        match intent {
            Intent::Input { path, value } => {
                tracing::debug!(%path, ?value, "input applied");
                self.values.insert(path, value);
            }
            Intent::Append { path } => {
                let slots = self.lists.entry(path.clone()).or_default();
                let index = slots.append();
                tracing::debug!(%path, index, "list item appended");
            }
            Intent::RemoveItem { path, index } => {
                let removed = self
                    .lists
                    .get_mut(&path)
                    .is_some_and(|slots| slots.remove(index));
                if !removed {
                    tracing::debug!(%path, index, "remove ignored, index not materialized");
                    return;
                }
                let dropped = self.purge_subtree(&path, index);
                tracing::debug!(%path, index, dropped, "list item removed");
            }
            Intent::Focus { path } => {
                self.focused = Some(path);
            }
            Intent::Blur { path } => {
                if self.focused.as_deref() == Some(path.as_str()) {
                    self.focused = None;
                }
                self.touched.insert(path);
            }
            Intent::Submit => {
                tracing::debug!("form submitted");
                self.submitted = true;
            }
        }
    }

    /// Path of the currently focused field, if any
    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    /// Drop every value, touched mark, and nested list under `path.index`.
    ///
    /// Returns the number of entries dropped. Sibling items are untouched:
    /// the prefix ends with a separator, so `contacts.1` never matches a
    /// purge of `contacts.10`.
    fn purge_subtree(&mut self, path: &str, index: usize) -> usize {
        let exact = format!("{path}{SEPARATOR}{index}");
        let prefix = format!("{exact}{SEPARATOR}");
        let hit = |key: &str| key == exact || key.starts_with(&prefix);

        let values_before = self.values.len();
        let lists_before = self.lists.len();
        let touched_before = self.touched.len();
        self.values.retain(|key, _| !hit(key));
        self.lists.retain(|key, _| !hit(key));
        self.touched.retain(|key| !hit(key));
        if self.focused.as_deref().is_some_and(hit) {
            self.focused = None;
        }

        (values_before - self.values.len())
            + (lists_before - self.lists.len())
            + (touched_before - self.touched.len())
    }
}

impl FormStore for MemoryFormStore {
    fn text(&self, path: &str) -> Option<&str> {
        self.values.get(path).and_then(FieldValue::as_text)
    }

    fn bool_value(&self, path: &str) -> Option<bool> {
        self.values.get(path).and_then(FieldValue::as_bool)
    }

    fn indices(&self, path: &str) -> &[usize] {
        self.lists
            .get(path)
            .map_or(NO_INDICES, |slots| slots.indices.as_slice())
    }

    fn touched(&self, path: &str) -> bool {
        self.touched.contains(path)
    }

    fn submitted(&self) -> bool {
        self.submitted
    }
}
