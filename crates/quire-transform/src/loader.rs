/*
 * loader.rs
 * Copyright (c) 2025 Quire contributors
 *
 * Collaborator seams consumed by the transformer.
 */

//! Content and asset collaborators.
//!
//! The transformer never reads storage itself. It asks a [`ContentLoader`]
//! for entries and, optionally, an [`AssetResolver`] for servable media
//! paths. [`MemoryStore`] is an in-memory loader suited to live editing,
//! where the editor owns the entries and hands them over as they change.

use async_trait::async_trait;
use indexmap::IndexMap;
use quire_document::Document;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::error::LoadError;

/// Reads entries of a collection.
#[async_trait]
pub trait ContentLoader: Send + Sync {
    /// Load one entry. `Ok(None)` means the entry does not exist.
    async fn load(&self, collection: &str, slug: &str) -> Result<Option<Document>, LoadError>;

    /// Load every entry of a collection. Each entry should carry its `slug`.
    async fn load_all(&self, collection: &str) -> Result<Vec<Document>, LoadError>;
}

/// Rewrites a stored media path into a servable one.
pub trait AssetResolver: Send + Sync {
    fn resolve_asset(&self, path: &str) -> String;
}

impl<F> AssetResolver for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn resolve_asset(&self, path: &str) -> String {
        self(path)
    }
}

/// An in-memory [`ContentLoader`].
///
/// Entries are stored with their `slug` already set, so every load of an
/// unchanged entry returns the identical node.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, IndexMap<String, Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a bundle of the form
    /// `{ "<collection>": { "<slug>": <entry>, ... }, ... }`.
    pub fn from_bundle(bundle: &Document) -> Result<Self, LoadError> {
        let store = MemoryStore::new();
        let collections = bundle
            .as_map()
            .ok_or_else(|| LoadError::other("content bundle must be a map of collections"))?;
        for (collection, entries) in collections {
            let entries = entries.as_map().ok_or_else(|| {
                LoadError::other(format!(
                    "collection '{}' in content bundle must be a map of entries",
                    collection
                ))
            })?;
            for (slug, entry) in entries {
                store.insert(collection, slug, entry.clone());
            }
        }
        Ok(store)
    }

    /// Insert or replace an entry, returning the stored node.
    pub fn insert(&self, collection: &str, slug: &str, entry: Document) -> Document {
        let stored = if entry.is_map() {
            entry.with_entry("slug", Document::string(slug))
        } else {
            entry
        };
        let mut collections = self
            .collections
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(slug.to_string(), stored.clone());
        stored
    }

    pub fn remove(&self, collection: &str, slug: &str) -> Option<Document> {
        let mut collections = self
            .collections
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        collections.get_mut(collection)?.shift_remove(slug)
    }

    pub fn get(&self, collection: &str, slug: &str) -> Option<Document> {
        let collections = self
            .collections
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        collections.get(collection)?.get(slug).cloned()
    }
}

#[async_trait]
impl ContentLoader for MemoryStore {
    async fn load(&self, collection: &str, slug: &str) -> Result<Option<Document>, LoadError> {
        Ok(self.get(collection, slug))
    }

    async fn load_all(&self, collection: &str) -> Result<Vec<Document>, LoadError> {
        let collections = self
            .collections
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(collections
            .get(collection)
            .map(|entries| entries.values().cloned().collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insert_injects_slug() {
        let store = MemoryStore::new();
        let stored = store.insert("posts", "hello", Document::from(json!({ "title": "Hi" })));
        assert_eq!(stored.get("slug").unwrap().as_str(), Some("hello"));
    }

    #[test]
    fn test_repeated_loads_return_same_node() {
        let store = MemoryStore::new();
        store.insert("posts", "hello", Document::from(json!({ "title": "Hi" })));

        let a = pollster::block_on(store.load("posts", "hello")).unwrap().unwrap();
        let b = pollster::block_on(store.load("posts", "hello")).unwrap().unwrap();
        assert!(Document::ptr_eq(&a, &b));
    }

    #[test]
    fn test_missing_entries() {
        let store = MemoryStore::new();
        assert!(pollster::block_on(store.load("posts", "nope")).unwrap().is_none());
        assert!(pollster::block_on(store.load_all("posts")).unwrap().is_empty());
    }

    #[test]
    fn test_load_all_keeps_insertion_order() {
        let store = MemoryStore::new();
        store.insert("posts", "b", Document::from(json!({})));
        store.insert("posts", "a", Document::from(json!({})));
        let all = pollster::block_on(store.load_all("posts")).unwrap();
        let slugs: Vec<_> = all
            .iter()
            .map(|d| d.get("slug").unwrap().as_str().unwrap().to_string())
            .collect();
        assert_eq!(slugs, vec!["b", "a"]);
    }

    #[test]
    fn test_from_bundle() {
        let bundle = Document::from(json!({
            "posts": { "hello": { "title": "Hello" } },
            "authors": { "jane": { "name": "Jane" } },
        }));
        let store = MemoryStore::from_bundle(&bundle).unwrap();
        assert_eq!(
            store.get("authors", "jane").unwrap().get("name").unwrap().as_str(),
            Some("Jane")
        );
        assert!(MemoryStore::from_bundle(&Document::from(json!([]))).is_err());
        assert!(MemoryStore::from_bundle(&Document::from(json!({ "posts": 1 }))).is_err());
    }

    #[test]
    fn test_remove() {
        let store = MemoryStore::new();
        store.insert("posts", "hello", Document::from(json!({})));
        assert!(store.remove("posts", "hello").is_some());
        assert!(store.get("posts", "hello").is_none());
        assert!(store.remove("pages", "x").is_none());
    }

    #[test]
    fn test_closure_asset_resolver() {
        let resolver = |path: &str| format!("/media{}", path);
        assert_eq!(resolver.resolve_asset("/a.png"), "/media/a.png");
    }
}
