//! Error types for record storage.

use std::io;
use std::path::PathBuf;

use sieve_query::QueryError;

/// Errors that can occur while fetching or querying stored records.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The provider has no mapping for the requested resource.
    #[error("resource '{0}' is not configured")]
    ResourceNotConfigured(String),

    /// No record with the requested id exists in the resource.
    #[error("record '{id}' not found in resource '{resource}'")]
    RecordNotFound { resource: String, id: String },

    /// Reading a file or directory failed.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A record file is not valid JSON, or not a JSON object.
    #[error("invalid record in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The store configuration could not be loaded.
    #[error("invalid store configuration: {0}")]
    Config(String),

    /// The query string could not be parsed.
    #[error(transparent)]
    InvalidQuery(#[from] QueryError),
}

impl StoreError {
    /// Create a not-found error.
    pub fn not_found(resource: impl Into<String>, id: impl Into<String>) -> Self {
        Self::RecordNotFound {
            resource: resource.into(),
            id: id.into(),
        }
    }

    /// Create an I/O error tagged with the path it concerns.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
