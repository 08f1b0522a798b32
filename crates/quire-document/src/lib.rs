//! Immutable document trees for Quire.
//!
//! Content entries are loosely-typed trees of maps, lists and scalars. This
//! crate provides [`Document`], a reference-counted tree in which every node
//! has an identity. Two handles to the same node compare equal under
//! [`Document::ptr_eq`], which is what incremental resolution uses to decide
//! whether a subtree was handed back unchanged.
//!
//! # Key Features
//!
//! - **Cheap clones**: cloning a `Document` clones an `Arc`, not the tree
//! - **Copy-on-write edits**: `with_entry`, `without_entry` and `with_item`
//!   return a new node that shares every untouched child with the original
//! - **Ordered maps**: map keys keep insertion order (`IndexMap`)
//! - **JSON interop**: conversion from and to `serde_json::Value`, plus
//!   `Serialize`/`Deserialize`
//!
//! # Example
//!
//! ```rust
//! use quire_document::Document;
//! use serde_json::json;
//!
//! let post = Document::from(json!({ "title": "Hello", "tags": ["a", "b"] }));
//! let edited = post.with_entry("title", Document::string("Hello, world"));
//!
//! // The untouched `tags` subtree is shared between both versions.
//! let before = post.get("tags").unwrap();
//! let after = edited.get("tags").unwrap();
//! assert!(Document::ptr_eq(before, after));
//! ```

mod convert;
mod types;

pub use types::{Document, DocumentKind, Scalar};
