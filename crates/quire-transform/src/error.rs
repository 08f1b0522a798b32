/*
 * error.rs
 * Copyright (c) 2025 Quire contributors
 *
 * Error types for content loading and document resolution.
 */

use quire_routing::RoutingError;
use quire_schema::SchemaError;
use thiserror::Error;

/// Errors reported by a [`ContentLoader`](crate::ContentLoader).
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse '{path}': {message}")]
    Parse { path: String, message: String },

    #[error("{0}")]
    Other(String),
}

impl LoadError {
    /// Create an error from any message.
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}

#[derive(Debug, Error)]
pub enum TransformError {
    /// Unknown collection or file referenced by a relation, hint or entry.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// A relation target has no usable URL template.
    #[error(transparent)]
    Routing(#[from] RoutingError),

    /// The content loader failed; propagated unchanged.
    #[error("Failed to load content: {0}")]
    Load(#[from] LoadError),

    /// An entry requested by name does not exist.
    #[error("Entry '{slug}' not found in collection '{collection}'")]
    EntryNotFound { collection: String, slug: String },

    /// A variable-list item names a type the schema does not declare.
    #[error("Unknown type '{tag}' at '{path}'")]
    UnknownVariant { tag: String, path: String },

    #[error("Document nesting too deep (max depth: {max_depth}) at path: {path}")]
    NestingTooDeep { max_depth: usize, path: String },

    #[error("Transform cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, TransformError>;
