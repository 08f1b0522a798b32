//! Error types for schema loading and lookup.

use thiserror::Error;

/// Errors that can occur while loading or querying collection schemas.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A collection name that the registry does not know.
    #[error("Collection '{0}' not found")]
    UnknownCollection(String),

    /// A file name that a files collection does not declare.
    #[error("File '{file}' not found in collection '{collection}'")]
    UnknownFile { collection: String, file: String },

    /// Two collections share a name.
    #[error("Collection '{0}' is declared more than once")]
    DuplicateCollection(String),

    /// A collection that is not exactly one of folder or files.
    #[error("Collection '{name}' is invalid: {message}")]
    InvalidCollection { name: String, message: String },

    /// A field definition that cannot be interpreted.
    #[error("Field '{name}' is invalid: {message}")]
    InvalidField { name: String, message: String },

    /// Configuration is not valid YAML or does not match the expected shape.
    #[error("Invalid CMS configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SchemaError>;
