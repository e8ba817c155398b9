//! Query execution over in-memory record collections.
//!
//! [`execute`] runs the four stages of a [`Query`] in a fixed order:
//!
//! ```text
//! filter -> sort -> limit -> project
//! ```
//!
//! A stage is skipped when its facet is empty (or, for the limit, undefined).
//! The input slice is never modified; the result is a fresh collection.

use log::debug;
use serde_json::Map;

use crate::ordering::{compare_by_rules, SortRule};
use crate::{path, Query, Record};

/// Runs `query` against `records` and returns the resulting collection.
///
/// Execution does not fail. A filter whose field is absent or holds an
/// incompatible kind simply does not match, and projecting an absent field
/// leaves it out of the output record.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use sieve_query::{engine, parse, Record};
///
/// let records: Vec<Record> = [
///     json!({"title": "Dune", "year": 1965}),
///     json!({"title": "Neuromancer", "year": 1984}),
///     json!({"title": "Hyperion", "year": 1989}),
/// ]
/// .into_iter()
/// .filter_map(|v| v.as_object().cloned())
/// .collect();
///
/// let query = parse("filter=year=gt:1970&sort=-year&fields=title").unwrap();
/// let result = engine::execute(&records, &query);
///
/// assert_eq!(json!(result), json!([{"title": "Hyperion"}, {"title": "Neuromancer"}]));
/// ```
pub fn execute(records: &[Record], query: &Query) -> Vec<Record> {
    let mut results: Vec<Record> = if query.filters().is_empty() {
        records.to_vec()
    } else {
        let kept: Vec<Record> = records
            .iter()
            .filter(|record| query.matches(record))
            .cloned()
            .collect();
        debug!(
            "filter: {} of {} records passed {} rules",
            kept.len(),
            records.len(),
            query.filters().len()
        );
        kept
    };

    if !query.sorting().is_empty() {
        sort(&mut results, query.sorting());
    }

    if let Some(limit) = query.limit_rule().filter(|l| l.is_defined()) {
        let before = results.len();
        results = limit.apply(results);
        debug!(
            "limit: count {} offset {} kept {} of {} records",
            limit.count,
            limit.offset,
            results.len(),
            before
        );
    }

    if !query.fields().is_empty() {
        results = results
            .iter()
            .map(|record| project(record, query.fields()))
            .collect();
        debug!("project: {} fields", query.fields().len());
    }

    results
}

/// Sorts `records` in place, first rule primary.
///
/// The sort is stable, so records that compare equal under every rule keep
/// their relative order.
pub fn sort(records: &mut [Record], rules: &[SortRule]) {
    records.sort_by(|a, b| compare_by_rules(a, b, rules));
    debug!("sort: {} records by {} rules", records.len(), rules.len());
}

/// Builds a new record holding only `fields` of `record`.
///
/// Nesting is preserved: projecting `a.b` yields `{"a": {"b": ...}}`.
pub fn project(record: &Record, fields: &[String]) -> Record {
    let mut projected = Map::new();
    for field in fields {
        if let Some(value) = path::get(record, field) {
            path::assign(&mut projected, field, value.clone());
        }
    }
    projected
}
