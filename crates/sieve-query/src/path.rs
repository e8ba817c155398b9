//! Dotted field-path access into nested records.
//!
//! A path such as `author.address.city` addresses a value through nested
//! maps. Reading never fails: a missing segment, or a segment that lands on
//! something other than a map, yields the absent marker.

use serde_json::{Map, Value as Json};

use crate::value::Value;
use crate::Record;

/// Path segment separator.
pub const SEPARATOR: char = '.';

/// Returns the raw value at `path`, or `None` when it is absent.
///
/// ```
/// use serde_json::json;
/// use sieve_query::path;
///
/// let record = json!({"a": {"b": {"c": 3}}});
/// let record = record.as_object().unwrap();
///
/// assert_eq!(path::get(record, "a.b.c"), Some(&json!(3)));
/// assert_eq!(path::get(record, "a.x.c"), None);
/// assert_eq!(path::get(record, "a.b.c.d"), None);
/// ```
pub fn get<'a>(record: &'a Record, path: &str) -> Option<&'a Json> {
    let mut segments = path.split(SEPARATOR);
    let first = segments.next()?;
    let mut current = record.get(first)?;

    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Returns the value at `path` classified for comparison.
pub fn resolve<'a>(record: &'a Record, path: &str) -> Value<'a> {
    Value::from(get(record, path))
}

/// Sets `value` at `path` inside `target`, creating maps along the way.
///
/// An intermediate segment that holds something other than a map is
/// replaced by a map.
///
/// ```
/// use serde_json::{json, Map};
/// use sieve_query::path;
///
/// let mut target = Map::new();
/// path::assign(&mut target, "a.b", json!(1));
/// path::assign(&mut target, "a.c", json!(2));
///
/// assert_eq!(json!(target), json!({"a": {"b": 1, "c": 2}}));
/// ```
pub fn assign(target: &mut Record, path: &str, value: Json) {
    let Some((head, rest)) = path.split_once(SEPARATOR) else {
        target.insert(path.to_string(), value);
        return;
    };

    let slot = target
        .entry(head.to_string())
        .or_insert_with(|| Json::Object(Map::new()));
    if let Some(child) = slot.as_object_mut() {
        assign(child, rest, value);
    } else {
        let mut child = Map::new();
        assign(&mut child, rest, value);
        *slot = Json::Object(child);
    }
}
