//! Conditional visibility decisions.
//!
//! Pure functions from the current store snapshot to "which binding is
//! active"; the render interpreter consumes these, so the semantics are
//! testable without any rendering involved. A missing target always reads as
//! "no value", never as an error.

use crate::field::{Binding, BoolBinding};
use crate::path::{join, SEPARATOR};
use crate::store::FormStore;

/// Index of the first binding whose trigger equals the target's text value.
///
/// Duplicate triggers make later bindings unreachable; the first listed wins.
pub fn first_trigger_match(value: Option<&str>, bindings: &[Binding]) -> Option<usize> {
    let value = value?;
    bindings.iter().position(|b| b.trigger == value)
}

/// Index of the first binding whose trigger equals the target's bool value.
///
/// An absent or non-boolean target activates nothing.
pub fn first_bool_match(value: Option<bool>, bindings: &[BoolBinding]) -> Option<usize> {
    let value = value?;
    bindings.iter().position(|b| b.trigger == value)
}

/// Split a list-conditional target `"list.subfield"` at the first separator
/// into the list name and the item sub-field path.
pub fn split_list_target(target: &str) -> Option<(&str, &str)> {
    target.split_once(SEPARATOR)
}

/// Whether any materialized item of the list currently has `trigger` in its
/// sub-field.
pub fn list_has_value(
    store: &dyn FormStore,
    list_path: &str,
    sub_field: &str,
    trigger: &str,
) -> bool {
    store.indices(list_path).iter().any(|index| {
        let item_path = join(&join(list_path, &index.to_string()), sub_field);
        store.text(&item_path) == Some(trigger)
    })
}

/// Whether a list-conditional binding is active for its trigger.
///
/// The filter is inverted: presence of a matching item suppresses the
/// binding's fields; absence of any match shows them. A target without a
/// separator names no list, so zero items match and the binding is active.
pub fn in_list_active(store: &dyn FormStore, prefix: &str, target: &str, trigger: &str) -> bool {
    let active = match split_list_target(target) {
        Some((list_name, sub_field)) => {
            let list_path = join(prefix, list_name);
            !list_has_value(store, &list_path, sub_field, trigger)
        }
        None => true,
    };
    tracing::trace!(list_target = %target, trigger = %trigger, active, "in-list visibility");
    active
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;
    use crate::intent::Intent;
    use crate::store::MemoryFormStore;

    fn binding(trigger: &str) -> Binding {
        Binding::new(trigger, vec![Field::text("x", "X", false)])
    }

    mod trigger_match {
        use super::*;

        #[test]
        fn test_absent_value_matches_nothing() {
            let bindings = vec![binding("a"), binding("b")];
            assert_eq!(first_trigger_match(None, &bindings), None);
        }

        #[test]
        fn test_matches_equal_trigger() {
            let bindings = vec![binding("a"), binding("b")];
            assert_eq!(first_trigger_match(Some("b"), &bindings), Some(1));
        }

        #[test]
        fn test_unknown_value_matches_nothing() {
            let bindings = vec![binding("a"), binding("b")];
            assert_eq!(first_trigger_match(Some("c"), &bindings), None);
        }

        #[test]
        fn test_duplicate_triggers_first_listed_wins() {
            let bindings = vec![binding("a"), binding("a")];
            assert_eq!(first_trigger_match(Some("a"), &bindings), Some(0));
        }

        #[test]
        fn test_bool_match_requires_exact_equality() {
            let bindings = vec![
                BoolBinding::new(true, Vec::new()),
                BoolBinding::new(false, Vec::new()),
            ];
            assert_eq!(first_bool_match(Some(false), &bindings), Some(1));
            assert_eq!(first_bool_match(None, &bindings), None);
        }
    }

    mod list_target {
        use super::*;

        #[test]
        fn test_splits_at_first_separator() {
            assert_eq!(split_list_target("items.name"), Some(("items", "name")));
            assert_eq!(
                split_list_target("items.address.city"),
                Some(("items", "address.city"))
            );
        }

        #[test]
        fn test_no_separator_yields_none() {
            assert_eq!(split_list_target("items"), None);
        }
    }

    mod in_list {
        use super::*;

        #[test]
        fn test_empty_list_activates_binding() {
            let store = MemoryFormStore::new();
            assert!(in_list_active(&store, "", "items.name", "dentist_visit"));
        }

        #[test]
        fn test_matching_item_suppresses_binding() {
            let mut store = MemoryFormStore::new();
            store.apply(Intent::append("items"));
            store.apply(Intent::input_text("items.0.name", "dentist_visit"));
            assert!(!in_list_active(&store, "", "items.name", "dentist_visit"));
        }

        #[test]
        fn test_non_matching_items_keep_binding_active() {
            let mut store = MemoryFormStore::new();
            store.apply(Intent::append("items"));
            store.apply(Intent::input_text("items.0.name", "checkup"));
            assert!(in_list_active(&store, "", "items.name", "dentist_visit"));
        }

        #[test]
        fn test_removing_last_matching_item_reactivates() {
            let mut store = MemoryFormStore::new();
            store.apply(Intent::append("items"));
            store.apply(Intent::input_text("items.0.name", "dentist_visit"));
            assert!(!in_list_active(&store, "", "items.name", "dentist_visit"));
            store.apply(Intent::remove_item("items", 0));
            assert!(in_list_active(&store, "", "items.name", "dentist_visit"));
        }

        #[test]
        fn test_resolves_list_against_prefix() {
            let mut store = MemoryFormStore::new();
            store.apply(Intent::append("claim.items"));
            store.apply(Intent::input_text("claim.items.0.name", "dentist_visit"));
            assert!(!in_list_active(&store, "claim", "items.name", "dentist_visit"));
            // Same target at the root sees a different (empty) list
            assert!(in_list_active(&store, "", "items.name", "dentist_visit"));
        }

        #[test]
        fn test_target_without_separator_is_active() {
            let mut store = MemoryFormStore::new();
            store.apply(Intent::input_text("items", "dentist_visit"));
            assert!(in_list_active(&store, "", "items", "dentist_visit"));
        }

        #[test]
        fn test_nested_sub_field_path() {
            let mut store = MemoryFormStore::new();
            store.apply(Intent::append("items"));
            store.apply(Intent::input_text("items.0.kind.code", "A1"));
            assert!(!in_list_active(&store, "", "items.kind.code", "A1"));
            assert!(in_list_active(&store, "", "items.kind.code", "B2"));
        }
    }
}
