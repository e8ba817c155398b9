//! Sieve - query-string driven filtering, sorting and projection of records.
//!
//! Sieve reads a compact query language out of a form-encoded query string
//! and runs it against an in-memory collection of JSON records. It supports:
//!
//! - Conjunctive filters on dotted field paths, with operators for numbers,
//!   strings and arrays
//! - Multi-field sorting in natural, case-insensitive order
//! - Pagination with count and offset
//! - Projection of nested fields
//!
//! # Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use sieve_query::{parse, Record};
//!
//! let books: Vec<Record> = [
//!     json!({"title": "Dune", "year": 1965, "author": {"name": "Herbert"}}),
//!     json!({"title": "Emma", "year": 1815, "author": {"name": "Austen"}}),
//!     json!({"title": "Hyperion", "year": 1989, "author": {"name": "Simmons"}}),
//! ]
//! .into_iter()
//! .filter_map(|v| v.as_object().cloned())
//! .collect();
//!
//! let query = parse("filter=year=gte:1900&sort=-year&fields=title,author.name&limit=1").unwrap();
//! let results = query.execute(&books);
//!
//! assert_eq!(json!(results), json!([{"title": "Hyperion", "author": {"name": "Simmons"}}]));
//! ```
//!
//! # Query Grammar
//!
//! ```text
//! filter=<field>=[<op>:]<value>,...   all rules must match
//! sort=[-]<field>,...                 first rule is primary, '-' descends
//! fields=<path>,...                   projected paths, nesting preserved
//! limit=<count>[,<offset>]            count 0 with an offset runs to the end
//! ```
//!
//! # Operators
//!
//! | Record value | Operators |
//! |--------------|-----------|
//! | Number | `eq`, `neq`, `gt`, `gte`, `lt`, `lte` (filter value read as a number) |
//! | String | `eq`, `neq`, `gt`, `gte`, `lt`, `lte` (natural, case-insensitive), `lke` |
//! | Array | `any`, `cts` (filter value is a `|`-separated token list) |
//!
//! Any other combination, and any absent field, does not match.

mod clause;
pub mod engine;
mod error;
mod limit;
pub mod natural;
mod op;
mod ordering;
mod parser;
pub mod path;
mod query;
mod value;

/// A record: a map of field names to JSON values.
pub type Record = serde_json::Map<String, serde_json::Value>;

// Re-export public API
pub use clause::{FilterRule, TOKEN_SEPARATOR};
pub use error::{QueryError, Result};
pub use limit::LimitRule;
pub use op::Op;
pub use ordering::{compare_by_rules, compare_values, Dir, SortRule};
pub use parser::{parse, Parser, ParserKeys};
pub use query::Query;
pub use value::{coerce_number, parse_number, Value};
