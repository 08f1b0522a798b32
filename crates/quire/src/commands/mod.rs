//! Command implementations for Quire CLI
//!
//! Each command module handles the CLI interface and delegates to the
//! library crates for the actual work.

pub mod match_cmd;
pub mod path;
pub mod paths;
pub mod resolve;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use quire_document::Document;
use quire_routing::SlugRouter;
use quire_schema::CollectionRegistry;
use quire_transform::MemoryStore;

/// Load the CMS configuration and build a router over it.
pub fn load_router(config: &Path) -> Result<Arc<SlugRouter>> {
    let registry = CollectionRegistry::from_yaml_file(config)
        .with_context(|| format!("Failed to load configuration from {}", config.display()))?;
    tracing::debug!(collections = registry.len(), "Loaded configuration");
    Ok(Arc::new(SlugRouter::new(Arc::new(registry))?))
}

/// Load a content bundle into an in-memory store.
///
/// Files ending in `.json` are read as JSON, anything else as YAML.
pub fn load_store(content: &Path) -> Result<Arc<MemoryStore>> {
    let text = std::fs::read_to_string(content)
        .with_context(|| format!("Failed to read content from {}", content.display()))?;
    let is_json = content
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let value: serde_json::Value = if is_json {
        serde_json::from_str(&text)?
    } else {
        serde_yaml::from_str(&text)?
    };
    let store = MemoryStore::from_bundle(&Document::from(value))?;
    Ok(Arc::new(store))
}
