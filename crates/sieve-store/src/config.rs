//! Store configuration: which directory holds each resource, and which
//! query-string keys the repository parses.
//!
//! ```yaml
//! resources:
//!   - name: books
//!     path: ./data/books
//! keys:
//!   filter: q
//! ```
//!
//! `keys` is optional, as is every entry inside it. Relative resource paths
//! are resolved against the directory of the configuration file when loaded
//! with [`StoreConfig::from_file`].

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sieve_query::ParserKeys;

use crate::{Result, StoreError};

/// One resource name mapped to the directory holding its records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceMapping {
    /// Resource name queries refer to.
    pub name: String,
    /// Directory holding one `*.json` file per record.
    pub path: PathBuf,
}

impl ResourceMapping {
    /// Creates a mapping of `name` to `path`.
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Configuration for a file-backed store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Resource mappings, in file order.
    #[serde(default)]
    pub resources: Vec<ResourceMapping>,
    /// Query-string keys the repository parses.
    #[serde(default)]
    pub keys: ParserKeys,
}

impl StoreConfig {
    /// Creates an empty configuration with default keys.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a resource mapping, builder style.
    pub fn resource(mut self, name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.resources.push(ResourceMapping::new(name, path));
        self
    }

    /// Replaces the parser keys, builder style.
    pub fn keys(mut self, keys: ParserKeys) -> Self {
        self.keys = keys;
        self
    }

    /// Parses a configuration from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| StoreError::config(e.to_string()))
    }

    /// Parses a configuration from YAML text.
    pub fn from_yaml(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).map_err(|e| StoreError::config(e.to_string()))
    }

    /// Loads a configuration file, choosing the format by extension
    /// (`.json`, `.yaml` or `.yml`).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let text = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;

        let config = match extension.as_deref() {
            Some("json") => Self::from_json(&text)?,
            Some("yaml" | "yml") => Self::from_yaml(&text)?,
            _ => {
                return Err(StoreError::config(format!(
                    "unsupported configuration format: {}",
                    path.display()
                )))
            }
        };

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(config.relative_to(base))
    }

    /// Resolves relative resource paths against `base`.
    pub fn relative_to(mut self, base: &Path) -> Self {
        for mapping in &mut self.resources {
            if mapping.path.is_relative() {
                mapping.path = base.join(&mapping.path);
            }
        }
        self
    }

    /// Returns the resource table. A later mapping of the same name wins.
    pub fn resource_paths(&self) -> HashMap<String, PathBuf> {
        self.resources
            .iter()
            .map(|mapping| (mapping.name.clone(), mapping.path.clone()))
            .collect()
    }
}
