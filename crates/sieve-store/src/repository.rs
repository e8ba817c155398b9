//! Repository: runs queries against collections fetched from a provider.

use log::debug;
use sieve_query::{Parser, ParserKeys, Query, Record};

use crate::config::StoreConfig;
use crate::json_dir::JsonDirProvider;
use crate::provider::DataProvider;
use crate::Result;

/// Fetches collections from a [`DataProvider`] and applies queries to them.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use sieve_store::{InMemoryProvider, Repository};
///
/// let books = [
///     json!({"id": 1, "title": "Dune", "year": 1965}),
///     json!({"id": 2, "title": "Hyperion", "year": 1989}),
/// ]
/// .into_iter()
/// .filter_map(|v| v.as_object().cloned())
/// .collect();
///
/// let repo = Repository::new(InMemoryProvider::new().with("books", books));
/// let result = repo.query_str("books", "filter=year=gt:1970&fields=title").unwrap();
///
/// assert_eq!(json!(result), json!([{"title": "Hyperion"}]));
/// ```
#[derive(Debug)]
pub struct Repository<P: DataProvider> {
    provider: P,
    parser: Parser,
}

impl<P: DataProvider> Repository<P> {
    /// Creates a repository parsing query strings with the default keys.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            parser: Parser::default(),
        }
    }

    /// Creates a repository parsing query strings with `keys`.
    ///
    /// # Errors
    ///
    /// Fails if a key name is empty.
    pub fn with_keys(provider: P, keys: ParserKeys) -> Result<Self> {
        Ok(Self {
            provider,
            parser: Parser::new(keys)?,
        })
    }

    /// Returns the underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Returns the parser used by [`query_str`](Self::query_str).
    pub fn parser(&self) -> &Parser {
        &self.parser
    }

    /// Runs `query` over the collection of `resource`.
    pub fn query(&self, resource: &str, query: &Query) -> Result<Vec<Record>> {
        let records = self.provider.fetch_collection(resource)?;
        let results = query.execute(&records);
        debug!(
            "{}: query on '{}' returned {} of {} records",
            self.provider.name(),
            resource,
            results.len(),
            records.len()
        );
        Ok(results)
    }

    /// Parses `raw` and runs it over the collection of `resource`.
    ///
    /// The query string is parsed before anything is fetched, so an invalid
    /// query never touches the provider.
    pub fn query_str(&self, resource: &str, raw: &str) -> Result<Vec<Record>> {
        let query = self.parser.parse(raw)?;
        self.query(resource, &query)
    }

    /// Returns the single record of `resource` identified by `id`, unfiltered.
    pub fn by_id(&self, resource: &str, id: &str) -> Result<Record> {
        self.provider.fetch_by_id(resource, id)
    }
}

impl Repository<JsonDirProvider> {
    /// Builds a file-backed repository from a store configuration.
    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        Self::with_keys(JsonDirProvider::from_config(config), config.keys.clone())
    }
}
