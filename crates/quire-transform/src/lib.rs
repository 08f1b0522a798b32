/*
 * lib.rs
 * Copyright (c) 2025 Quire contributors
 *
 * Resolution of Quire entries into render-ready documents.
 */

//! Resolution of raw entries into the documents templates render from.
//!
//! - [`Transformer`]: resolves relations, computed fields and assets, with
//!   identity-keyed memoization for live editing
//! - [`ContentLoader`] / [`AssetResolver`]: the storage and media seams
//! - [`MemoryStore`]: an in-memory loader
//! - [`Site`]: URL-to-page resolution and path listing for static builds
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use quire_document::Document;
//! use quire_routing::SlugRouter;
//! use quire_schema::CollectionRegistry;
//! use quire_transform::{MemoryStore, Transformer};
//!
//! let registry = CollectionRegistry::from_yaml_str(r#"
//! collections:
//!   - name: posts
//!     preview_path: /posts/{{slug}}
//!     fields:
//!       - { name: author, widget: relation, collection: authors }
//!   - { name: authors, preview_path: "/authors/{{slug}}", fields: [] }
//! "#).unwrap();
//! let router = Arc::new(SlugRouter::new(Arc::new(registry)).unwrap());
//!
//! let store = Arc::new(MemoryStore::new());
//! store.insert("authors", "jane", Document::map([("name", Document::string("Jane"))]));
//! store.insert("posts", "hello", Document::map([("author", Document::string("jane"))]));
//!
//! let mut transformer = Transformer::new(router, store);
//! let post = pollster::block_on(transformer.load_entry("posts", "hello")).unwrap();
//! let author = post.get("author").unwrap();
//! assert_eq!(author.get("href").unwrap().as_str(), Some("/authors/jane"));
//! ```

mod error;
mod loader;
mod memo;
mod site;
mod transformer;

pub use error::{LoadError, Result, TransformError};
pub use loader::{AssetResolver, ContentLoader, MemoryStore};
pub use memo::MemoTable;
pub use site::{ResolvedPage, Site};
pub use transformer::{DEFAULT_MAX_DEPTH, TransformOptions, Transformer};
