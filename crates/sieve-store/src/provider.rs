//! The data-provider boundary and an in-memory provider.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{PoisonError, RwLock};

use log::debug;
use serde_json::Value as Json;
use sieve_query::Record;

use crate::{Result, StoreError};

/// Field that identifies a record for [`DataProvider::fetch_by_id`].
pub const ID_FIELD: &str = "id";

/// Supplies raw record collections and single records by resource name.
///
/// Providers are read-only. They hand whole collections to the
/// [`Repository`](crate::Repository), which runs the query in memory.
///
/// # Example
///
/// ```
/// use sieve_query::Record;
/// use sieve_store::{DataProvider, Result, StoreError};
///
/// #[derive(Debug)]
/// struct Nothing;
///
/// impl DataProvider for Nothing {
///     fn name(&self) -> &'static str { "nothing" }
///
///     fn fetch_collection(&self, resource: &str) -> Result<Vec<Record>> {
///         Err(StoreError::ResourceNotConfigured(resource.to_string()))
///     }
///
///     fn fetch_by_id(&self, resource: &str, _id: &str) -> Result<Record> {
///         Err(StoreError::ResourceNotConfigured(resource.to_string()))
///     }
/// }
/// ```
pub trait DataProvider: Send + Sync + Debug {
    /// Human-readable name for this provider, used in log output.
    fn name(&self) -> &'static str;

    /// Returns every record of `resource`.
    ///
    /// # Errors
    ///
    /// [`StoreError::ResourceNotConfigured`] for an unknown resource, or
    /// whatever the backend fails with while reading.
    fn fetch_collection(&self, resource: &str) -> Result<Vec<Record>>;

    /// Returns the record of `resource` identified by `id`.
    ///
    /// # Errors
    ///
    /// [`StoreError::RecordNotFound`] when no record carries `id`, plus the
    /// errors of [`fetch_collection`](Self::fetch_collection).
    fn fetch_by_id(&self, resource: &str, id: &str) -> Result<Record>;
}

/// Provider holding its collections in memory.
///
/// Records are identified by their `id` field, which may be a string or a
/// number.
#[derive(Debug, Default)]
pub struct InMemoryProvider {
    collections: RwLock<HashMap<String, Vec<Record>>>,
}

impl InMemoryProvider {
    /// Creates an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a resource, builder style.
    pub fn with(self, resource: impl Into<String>, records: Vec<Record>) -> Self {
        self.insert(resource, records);
        self
    }

    /// Sets the records of `resource`, replacing any previous collection.
    pub fn insert(&self, resource: impl Into<String>, records: Vec<Record>) {
        self.collections
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(resource.into(), records);
    }

    /// Appends one record to `resource`, creating the resource if needed.
    pub fn push(&self, resource: &str, record: Record) {
        self.collections
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(resource.to_string())
            .or_default()
            .push(record);
    }

    /// Returns the names of the stored resources, sorted.
    pub fn resources(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .collections
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }
}

impl DataProvider for InMemoryProvider {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn fetch_collection(&self, resource: &str) -> Result<Vec<Record>> {
        let collections = self
            .collections
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let records = collections
            .get(resource)
            .ok_or_else(|| StoreError::ResourceNotConfigured(resource.to_string()))?;
        debug!("memory: loaded {} records of '{}'", records.len(), resource);
        Ok(records.clone())
    }

    fn fetch_by_id(&self, resource: &str, id: &str) -> Result<Record> {
        let collections = self
            .collections
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let records = collections
            .get(resource)
            .ok_or_else(|| StoreError::ResourceNotConfigured(resource.to_string()))?;
        records
            .iter()
            .find(|record| has_id(record, id))
            .cloned()
            .ok_or_else(|| StoreError::not_found(resource, id))
    }
}

fn has_id(record: &Record, id: &str) -> bool {
    match record.get(ID_FIELD) {
        Some(Json::String(s)) => s == id,
        Some(Json::Number(n)) => n.to_string() == id,
        _ => false,
    }
}
