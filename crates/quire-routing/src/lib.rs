//! Routing between entry slugs and public paths.
//!
//! Collections declare a `preview_path` template such as `/blog/{{slug}}`.
//! [`SlugRouter`] turns `(collection, slug)` into a path with that template
//! and matches incoming paths back to `(collection, slug)`. The [`tree`]
//! module derives parent/child/sibling relationships from `/`-delimited
//! slugs.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use quire_routing::SlugRouter;
//! use quire_schema::CollectionRegistry;
//!
//! let registry = CollectionRegistry::from_yaml_str(r#"
//! collections:
//!   - { name: posts, preview_path: "/posts/{{slug}}", fields: [] }
//! "#).unwrap();
//! let router = SlugRouter::new(Arc::new(registry)).unwrap();
//!
//! let path = router.path_for("posts", "hello", false).unwrap();
//! assert_eq!(path, "/posts/hello");
//! assert_eq!(router.match_path("posts", &path).as_deref(), Some("hello"));
//! ```

mod error;
mod router;
pub mod tree;

pub use error::{Result, RoutingError};
pub use router::{RouteMatch, SlugRouter, strip_index};
pub use tree::{Hierarchy, Slugged, TreeItem, TreeNode};
