//! Filter rules.
//!
//! A [`FilterRule`] is a single predicate: a field path, an operator, and the
//! raw value token from the query string.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

use crate::natural::compare_ignore_case;
use crate::op::Op;
use crate::value::{coerce_number, parse_number, Value};

/// Separator between tokens of a membership value (`tags=any:red|blue`).
pub const TOKEN_SEPARATOR: char = '|';

/// A single filter predicate.
///
/// The value is kept exactly as written. Whether it is compared as a number
/// or as a string is decided by the kind of value the record holds.
///
/// # Example
///
/// ```
/// use sieve_query::{FilterRule, Op, Value};
///
/// let rule = FilterRule::new("year", Op::Gte, "1990");
/// assert!(rule.matches(&Value::Number(1999.0)));
/// assert!(!rule.matches(&Value::Number(1980.0)));
/// assert!(!rule.matches(&Value::None));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterRule {
    /// The field path to compare.
    pub field: String,
    /// The comparison operator.
    #[serde(rename = "operator")]
    pub op: Op,
    /// The raw value token.
    pub value: String,
}

impl FilterRule {
    /// Creates a new filter rule.
    pub fn new(field: impl Into<String>, op: Op, value: impl Into<String>) -> Self {
        FilterRule {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    /// Evaluates this rule against a resolved field value.
    ///
    /// Returns `false` when the operator does not apply to the value's kind,
    /// and always for [`Value::None`].
    pub fn matches(&self, actual: &Value<'_>) -> bool {
        match actual {
            Value::Number(n) => self.match_number(*n),
            Value::Text(s) => self.match_text(s),
            Value::List(items) => self.match_list(items),
            Value::None => false,
        }
    }

    fn match_number(&self, actual: f64) -> bool {
        if !self.op.is_ordering_op() {
            return false;
        }
        match actual.partial_cmp(&coerce_number(&self.value)) {
            Some(ordering) => self.op.eval_ordering(ordering),
            None => false,
        }
    }

    fn match_text(&self, actual: &str) -> bool {
        match self.op {
            Op::Lke => actual.to_lowercase().contains(&self.value.to_lowercase()),
            op if op.is_ordering_op() => {
                op.eval_ordering(compare_ignore_case(actual, &self.value))
            }
            _ => false,
        }
    }

    fn match_list(&self, items: &[Json]) -> bool {
        if !self.op.is_membership_op() {
            return false;
        }
        // An element may itself contain the separator.
        if contains_token(items, &self.value) {
            return true;
        }
        let mut tokens = self.value.split(TOKEN_SEPARATOR);
        match self.op {
            Op::Cts => tokens.all(|token| contains_token(items, token)),
            _ => tokens.any(|token| contains_token(items, token)),
        }
    }
}

fn contains_token(items: &[Json], token: &str) -> bool {
    items.iter().any(|item| match item {
        Json::String(s) => compare_ignore_case(s, token) == Ordering::Equal,
        Json::Number(n) => match (n.as_f64(), parse_number(token)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        },
        _ => false,
    })
}
