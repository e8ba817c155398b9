//! Provider reading records from directories of JSON files.
//!
//! Each configured resource maps to a directory. Every `*.json` file directly
//! inside it is one record, and the file stem is the record id:
//!
//! ```text
//! data/books/
//!   dune.json         -> fetch_by_id("books", "dune")
//!   neuromancer.json
//! ```
//!
//! Collections are read in file-name order. Nothing is cached; every fetch
//! reads the files again.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde_json::Value as Json;
use sieve_query::Record;

use crate::config::StoreConfig;
use crate::provider::DataProvider;
use crate::{Result, StoreError};

const RECORD_EXTENSION: &str = "json";

/// Read-only provider over a resource -> directory table.
#[derive(Debug, Clone, Default)]
pub struct JsonDirProvider {
    resources: HashMap<String, PathBuf>,
}

impl JsonDirProvider {
    /// Creates a provider with no resources.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a provider from the resource table of `config`.
    pub fn from_config(config: &StoreConfig) -> Self {
        Self {
            resources: config.resource_paths(),
        }
    }

    /// Maps `resource` to `dir`, builder style.
    pub fn resource(mut self, resource: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        self.resources.insert(resource.into(), dir.into());
        self
    }

    /// Returns the directory configured for `resource`.
    pub fn dir(&self, resource: &str) -> Result<&Path> {
        self.resources
            .get(resource)
            .map(PathBuf::as_path)
            .ok_or_else(|| StoreError::ResourceNotConfigured(resource.to_string()))
    }

    fn record_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(dir).map_err(|e| StoreError::io(dir, e))?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| StoreError::io(dir, e))?.path();
            let is_record = path.is_file()
                && path.extension().and_then(|ext| ext.to_str()) == Some(RECORD_EXTENSION);
            if is_record {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

impl DataProvider for JsonDirProvider {
    fn name(&self) -> &'static str {
        "json-dir"
    }

    fn fetch_collection(&self, resource: &str) -> Result<Vec<Record>> {
        let dir = self.dir(resource)?;
        if !dir.is_dir() {
            warn!(
                "json-dir: directory {} for resource '{}' does not exist",
                dir.display(),
                resource
            );
            return Err(StoreError::io(
                dir,
                std::io::Error::new(std::io::ErrorKind::NotFound, "directory does not exist"),
            ));
        }

        let records = self
            .record_files(dir)?
            .iter()
            .map(|path| read_record(path))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "json-dir: loaded {} records of '{}' from {}",
            records.len(),
            resource,
            dir.display()
        );
        Ok(records)
    }

    fn fetch_by_id(&self, resource: &str, id: &str) -> Result<Record> {
        let dir = self.dir(resource)?;
        if !is_plain_id(id) {
            return Err(StoreError::not_found(resource, id));
        }

        let path = dir.join(format!("{id}.{RECORD_EXTENSION}"));
        if !path.is_file() {
            return Err(StoreError::not_found(resource, id));
        }
        read_record(&path)
    }
}

/// Ids name a file directly inside the resource directory.
fn is_plain_id(id: &str) -> bool {
    !id.is_empty() && !id.contains(['/', '\\']) && !id.contains("..")
}

fn read_record(path: &Path) -> Result<Record> {
    let text = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    let value: Json = serde_json::from_str(&text).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    match value {
        Json::Object(record) => Ok(record),
        other => Err(StoreError::Json {
            path: path.to_path_buf(),
            source: serde::de::Error::custom(format!(
                "expected a JSON object, found {}",
                kind(&other)
            )),
        }),
    }
}

fn kind(value: &Json) -> &'static str {
    match value {
        Json::Null => "null",
        Json::Bool(_) => "a boolean",
        Json::Number(_) => "a number",
        Json::String(_) => "a string",
        Json::Array(_) => "an array",
        Json::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).unwrap();
    }

    fn books_dir() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "neuromancer.json", r#"{"title": "Neuromancer", "year": 1984}"#);
        write(dir.path(), "dune.json", r#"{"title": "Dune", "year": 1965}"#);
        write(dir.path(), "notes.txt", "not a record");
        fs::create_dir(dir.path().join("nested.json")).unwrap();
        dir
    }

    #[test]
    fn collection_in_file_name_order() {
        let dir = books_dir();
        let provider = JsonDirProvider::new().resource("books", dir.path());

        let records = provider.fetch_collection("books").unwrap();
        let titles: Vec<&Json> = records.iter().map(|r| &r["title"]).collect();
        assert_eq!(titles, [&json!("Dune"), &json!("Neuromancer")]);
    }

    #[test]
    fn fetch_by_file_stem() {
        let dir = books_dir();
        let provider = JsonDirProvider::new().resource("books", dir.path());

        let record = provider.fetch_by_id("books", "dune").unwrap();
        assert_eq!(record["year"], 1965);

        assert!(matches!(
            provider.fetch_by_id("books", "emma"),
            Err(StoreError::RecordNotFound { .. })
        ));
    }

    #[test]
    fn ids_cannot_escape_the_directory() {
        let root = tempfile::tempdir().unwrap();
        let books = root.path().join("books");
        fs::create_dir(&books).unwrap();
        write(root.path(), "secret.json", r#"{"secret": true}"#);

        let provider = JsonDirProvider::new().resource("books", &books);
        for id in ["../secret", "..", "a/b", "a\\b", ""] {
            assert!(
                matches!(
                    provider.fetch_by_id("books", id),
                    Err(StoreError::RecordNotFound { .. })
                ),
                "id {id:?}"
            );
        }
    }

    #[test]
    fn unknown_resource() {
        let provider = JsonDirProvider::new();
        assert!(matches!(
            provider.fetch_collection("books"),
            Err(StoreError::ResourceNotConfigured(_))
        ));
    }

    #[test]
    fn missing_directory() {
        let root = tempfile::tempdir().unwrap();
        let provider = JsonDirProvider::new().resource("books", root.path().join("absent"));
        assert!(matches!(
            provider.fetch_collection("books"),
            Err(StoreError::Io { .. })
        ));
    }

    #[test]
    fn invalid_record_files() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "broken.json", "{\"title\": ");
        let provider = JsonDirProvider::new().resource("books", dir.path());
        assert!(matches!(
            provider.fetch_collection("books"),
            Err(StoreError::Json { .. })
        ));

        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "list.json", "[1, 2]");
        let provider = JsonDirProvider::new().resource("books", dir.path());
        let err = provider.fetch_by_id("books", "list").unwrap_err();
        assert!(err.to_string().contains("expected a JSON object, found an array"));
    }

    #[test]
    fn from_config_table() {
        let dir = books_dir();
        let config = StoreConfig::new()
            .resource("books", "/nowhere")
            .resource("books", dir.path());

        let provider = JsonDirProvider::from_config(&config);
        assert_eq!(provider.dir("books").unwrap(), dir.path());
        assert_eq!(provider.fetch_collection("books").unwrap().len(), 2);
    }
}
