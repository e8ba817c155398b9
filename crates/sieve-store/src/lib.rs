//! Record storage for sieve queries.
//!
//! This crate puts a [`DataProvider`] boundary between stored records and
//! the query engine in `sieve-query`. A [`Repository`] fetches whole
//! collections from a provider and runs a parsed [`Query`](sieve_query::Query)
//! over them in memory.
//!
//! Two providers are included:
//!
//! - [`InMemoryProvider`] - collections held in memory, ids read from the
//!   `id` field
//! - [`JsonDirProvider`] - one directory of `*.json` record files per
//!   resource, configured through [`StoreConfig`]
//!
//! # Example
//!
//! ```no_run
//! use sieve_store::{Repository, StoreConfig};
//!
//! let config = StoreConfig::from_file("store.yaml")?;
//! let repo = Repository::from_config(&config)?;
//!
//! for book in repo.query_str("books", "filter=year=gte:1980&sort=title&limit=10")? {
//!     println!("{}", serde_json::Value::Object(book));
//! }
//! # Ok::<(), sieve_store::StoreError>(())
//! ```

mod config;
mod error;
mod json_dir;
mod provider;
mod repository;

pub use config::{ResourceMapping, StoreConfig};
pub use error::{Result, StoreError};
pub use json_dir::JsonDirProvider;
pub use provider::{DataProvider, InMemoryProvider, ID_FIELD};
pub use repository::Repository;
