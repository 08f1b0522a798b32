//! Collection and field schemas for Quire.
//!
//! A CMS configuration declares a list of *collections*. Each collection is
//! either a folder of entries sharing one field schema, or a fixed set of
//! named files with a schema per file. This crate parses that configuration
//! (YAML, Decap-style) and answers the lookups the resolver needs while it
//! walks a document:
//!
//! - [`CollectionRegistry`]: name -> [`Collection`], and `(collection, slug)` ->
//!   field list
//! - [`Field`]: one field descriptor, with its [`FieldKind`]
//! - [`Nested`]: the sub-schema a field declares for its children
//! - [`VirtualField`]: the `loadAll(...)` / `load(..., ...)` computations
//!   encoded in hidden field hints
//!
//! # Example
//!
//! ```rust
//! use quire_schema::CollectionRegistry;
//!
//! let registry = CollectionRegistry::from_yaml_str(r#"
//! collections:
//!   - name: posts
//!     preview_path: /posts/{{slug}}
//!     fields:
//!       - { name: title, widget: string }
//!       - { name: author, widget: relation, collection: authors }
//!   - name: authors
//!     fields:
//!       - { name: name, widget: string }
//! "#).unwrap();
//!
//! let fields = registry.fields_for("posts", "hello").unwrap();
//! assert_eq!(fields.len(), 2);
//! assert!(fields[1].relation().is_some());
//! ```

mod collection;
mod error;
mod field;
mod hint;
mod registry;

pub use collection::{Collection, CollectionFile, CollectionKind, DEFAULT_INDEX_FILE, FolderCollection};
pub use error::{Result, SchemaError};
pub use field::{Field, FieldKind, ListField, Nested, RelationField, SelectField, SelectOption};
pub use hint::VirtualField;
pub use registry::{CmsConfig, CollectionRegistry};
