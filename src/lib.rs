//! formtree - declarative form trees for reactive hosts
//!
//! A form is declared once as a tree of [`Field`]s (text, select, checkbox,
//! groups, dynamic lists, membership sets, conditionals), then interpreted
//! against a form-state snapshot each render, producing an abstract
//! [`RenderNode`] tree the host maps to real widgets. User interaction comes
//! back as [`Intent`]s the host store applies atomically between renders;
//! the render pass itself never mutates anything.
//!
//! ```
//! use formtree::{render, Binding, DefaultMessages, Field, Intent, MemoryFormStore};
//!
//! let fields = vec![
//!     Field::text("kind", "Kind", false),
//!     Field::conditional(
//!         "kind",
//!         vec![Binding::new("person", vec![Field::text("name", "Name", false)])],
//!     ),
//! ];
//!
//! let mut store = MemoryFormStore::new();
//! store.apply(Intent::input_text("kind", "person"));
//!
//! let tree = render(&fields, &store, &DefaultMessages);
//! assert_eq!(tree.len(), 2); // the kind input plus the active branch
//! ```

pub mod access;
pub mod field;
pub mod intent;
pub mod path;
pub mod render;
pub mod rules;
pub mod store;
pub mod value;
pub mod visibility;

pub use access::FieldState;
pub use field::{Binding, BoolBinding, Field, FieldsFor, SelectOption, SetMember};
pub use intent::Intent;
pub use render::{render, RenderNode};
pub use rules::{DefaultMessages, ErrorFormatter, ErrorTag, Rule};
pub use store::{FormStore, MemoryFormStore};
pub use value::FieldValue;
