//! Runtime value kinds for field comparison.
//!
//! The [`Value`] enum classifies whatever a record holds at a field path into
//! the kinds the engine knows how to compare. Classification happens once, in
//! [`path::resolve`](crate::path::resolve); comparisons then pattern-match on
//! the variant.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value as Json;

/// Leading numeric prefix of a token, as a loose numeric cast reads it.
static NUMERIC_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?")
        .expect("numeric prefix pattern is valid")
});

/// Field value borrowed from a record.
///
/// # Example
///
/// ```
/// use sieve_query::Value;
/// use serde_json::json;
///
/// let raw = json!(["red", "blue"]);
/// assert!(Value::from(Some(&raw)).is_list());
/// assert!(Value::from(None).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    /// JSON number.
    Number(f64),
    /// JSON string.
    Text(&'a str),
    /// JSON array.
    List(&'a [Json]),
    /// Field missing, or holding a kind filters cannot compare
    /// (null, boolean, object).
    None,
}

impl Value<'_> {
    /// Returns `true` if this is a `None` value.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Returns `true` if this is a `Number` value.
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Returns `true` if this is a `Text` value.
    pub fn is_text(&self) -> bool {
        matches!(self, Value::Text(_))
    }

    /// Returns `true` if this is a `List` value.
    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }
}

impl<'a> From<Option<&'a Json>> for Value<'a> {
    fn from(raw: Option<&'a Json>) -> Self {
        match raw {
            Some(Json::Number(n)) => n.as_f64().map(Value::Number).unwrap_or(Value::None),
            Some(Json::String(s)) => Value::Text(s),
            Some(Json::Array(items)) => Value::List(items),
            _ => Value::None,
        }
    }
}

/// Coerces a filter token to a number the way a loose numeric cast does.
///
/// The longest leading numeric prefix is used (`"12abc"` is 12); a token with
/// no numeric prefix is 0.
pub fn coerce_number(token: &str) -> f64 {
    NUMERIC_PREFIX
        .find(token)
        .and_then(|m| m.as_str().trim().parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Parses a token that must be numeric in full.
pub fn parse_number(token: &str) -> Option<f64> {
    token.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}
