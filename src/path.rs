//! Dotted-path addressing for fields nested in groups and lists

/// Separator between path segments
pub const SEPARATOR: char = '.';

/// Join a path prefix and a name into a single dotted path.
///
/// An empty prefix yields the name unchanged. No validation is performed on
/// the name; callers must keep the separator character out of segment names.
pub fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}{SEPARATOR}{name}")
    }
}

/// Accumulated ancestor segments (group names and list indices) during a
/// render pass.
///
/// The interpreter pushes a segment when it descends into a named group or a
/// list item and pops it on the way out.
#[derive(Debug, Clone, Default)]
pub struct PathPrefix {
    segments: Vec<String>,
    joined: String,
}

impl PathPrefix {
    /// An empty prefix (form root)
    pub fn root() -> Self {
        Self::default()
    }

    /// Resolve a leaf or group name against this prefix
    pub fn resolve(&self, name: &str) -> String {
        join(&self.joined, name)
    }

    /// Descend into a named group
    pub fn push(&mut self, segment: &str) {
        self.joined = join(&self.joined, segment);
        self.segments.push(segment.to_string());
    }

    /// Descend into a list item
    pub fn push_index(&mut self, index: usize) {
        self.push(&index.to_string());
    }

    /// Leave the innermost group or list item
    pub fn pop(&mut self) {
        if self.segments.pop().is_some() {
            match self.joined.rfind(SEPARATOR) {
                Some(at) => self.joined.truncate(at),
                None => self.joined.clear(),
            }
        }
    }

    /// The current prefix as a dotted string (empty at the root)
    pub fn as_str(&self) -> &str {
        &self.joined
    }

    /// Number of segments currently on the stack
    pub fn depth(&self) -> usize {
        self.segments.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod join_fn {
        use super::*;

        #[test]
        fn test_empty_prefix_yields_name() {
            assert_eq!(join("", "title"), "title");
        }

        #[test]
        fn test_joins_with_separator() {
            assert_eq!(join("contacts.0", "name"), "contacts.0.name");
        }

        #[test]
        fn test_distinct_pairs_resolve_distinct_paths() {
            let pairs = [
                ("", "a"),
                ("", "b"),
                ("g", "a"),
                ("g", "b"),
                ("g.0", "a"),
                ("g.1", "a"),
            ];
            let resolved: Vec<String> = pairs.iter().map(|(p, n)| join(p, n)).collect();
            for (i, a) in resolved.iter().enumerate() {
                for b in resolved.iter().skip(i + 1) {
                    assert_ne!(a, b);
                }
            }
        }
    }

    mod prefix_stack {
        use super::*;

        #[test]
        fn test_root_is_empty() {
            let prefix = PathPrefix::root();
            assert_eq!(prefix.as_str(), "");
            assert_eq!(prefix.depth(), 0);
        }

        #[test]
        fn test_resolve_at_root() {
            let prefix = PathPrefix::root();
            assert_eq!(prefix.resolve("title"), "title");
        }

        #[test]
        fn test_push_and_resolve() {
            let mut prefix = PathPrefix::root();
            prefix.push("contacts");
            prefix.push_index(2);
            assert_eq!(prefix.as_str(), "contacts.2");
            assert_eq!(prefix.resolve("phone"), "contacts.2.phone");
        }

        #[test]
        fn test_pop_restores_parent() {
            let mut prefix = PathPrefix::root();
            prefix.push("address");
            prefix.push("city");
            prefix.pop();
            assert_eq!(prefix.as_str(), "address");
            prefix.pop();
            assert_eq!(prefix.as_str(), "");
        }

        #[test]
        fn test_pop_on_root_is_noop() {
            let mut prefix = PathPrefix::root();
            prefix.pop();
            assert_eq!(prefix.as_str(), "");
            assert_eq!(prefix.depth(), 0);
        }

        #[test]
        fn test_push_pop_round_trip_preserves_joined() {
            let mut prefix = PathPrefix::root();
            prefix.push("items");
            let before = prefix.as_str().to_string();
            prefix.push_index(7);
            prefix.pop();
            assert_eq!(prefix.as_str(), before);
        }
    }
}
