//! The collection registry.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::collection::{Collection, DEFAULT_INDEX_FILE};
use crate::error::{Result, SchemaError};
use crate::field::Field;

/// The parts of a CMS configuration file the registry reads.
///
/// Other top-level keys (backend, media folder, ...) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct CmsConfig {
    /// Global index token, overridable per collection.
    #[serde(default)]
    pub index_file: Option<String>,
    #[serde(default)]
    pub collections: Vec<Collection>,
}

/// Read-only lookup of collections by name.
#[derive(Debug, Clone, Default)]
pub struct CollectionRegistry {
    collections: Vec<Collection>,
    by_name: HashMap<String, usize>,
}

impl CollectionRegistry {
    /// Build a registry, rejecting duplicate collection names.
    pub fn new(collections: Vec<Collection>) -> Result<Self> {
        let mut by_name = HashMap::with_capacity(collections.len());
        for (i, collection) in collections.iter().enumerate() {
            if by_name.insert(collection.name.clone(), i).is_some() {
                return Err(SchemaError::DuplicateCollection(collection.name.clone()));
            }
        }
        Ok(CollectionRegistry {
            collections,
            by_name,
        })
    }

    /// Build a registry from a parsed configuration.
    pub fn from_config(config: CmsConfig) -> Result<Self> {
        let index_file = config.index_file.as_deref().unwrap_or(DEFAULT_INDEX_FILE);
        let mut collections = config.collections;
        for collection in &mut collections {
            collection.inherit_index_file(index_file);
        }
        Self::new(collections)
    }

    /// Parse a YAML configuration document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: CmsConfig = serde_yaml::from_str(yaml)?;
        Self::from_config(config)
    }

    /// Read and parse a YAML configuration file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Look up a collection by name.
    pub fn collection(&self, name: &str) -> Result<&Collection> {
        self.by_name
            .get(name)
            .map(|&i| &self.collections[i])
            .ok_or_else(|| SchemaError::UnknownCollection(name.to_string()))
    }

    /// The field schema for entry `slug` of collection `name`.
    pub fn fields_for(&self, name: &str, slug: &str) -> Result<&[Field]> {
        let collection = self.collection(name)?;
        collection
            .fields(slug)
            .ok_or_else(|| SchemaError::UnknownFile {
                collection: name.to_string(),
                file: slug.to_string(),
            })
    }

    /// All collections in declaration order.
    pub fn collections(&self) -> impl Iterator<Item = &Collection> {
        self.collections.iter()
    }

    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }
}
