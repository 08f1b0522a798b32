//! Error types for routing.

use quire_schema::SchemaError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RoutingError {
    /// A path was requested for an entry whose collection has no template.
    #[error("Collection '{collection}' has no preview_path template for '{slug}'")]
    MissingTemplate { collection: String, slug: String },

    /// A template could not be compiled into a matcher.
    #[error("Invalid preview_path template '{template}': {source}")]
    InvalidTemplate {
        template: String,
        #[source]
        source: regex::Error,
    },

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

pub type Result<T> = std::result::Result<T, RoutingError>;
