//! Sort rules for query results.
//!
//! Provides [`Dir`] for sort direction and [`SortRule`] for field-based
//! ordering.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::natural::compare_ignore_case;
use crate::path;
use crate::value::Value;
use crate::Record;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Returns `true` if this is ascending order.
    pub fn is_asc(self) -> bool {
        matches!(self, Dir::Asc)
    }

    /// Returns `true` if this is descending order.
    pub fn is_desc(self) -> bool {
        matches!(self, Dir::Desc)
    }

    /// Applies this direction to an ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single sort rule: a field path and a direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortRule {
    /// The field path to sort by.
    pub field: String,
    /// The sort direction.
    #[serde(rename = "order")]
    pub dir: Dir,
}

impl SortRule {
    /// Creates a new ascending rule for the given field.
    pub fn asc(field: impl Into<String>) -> Self {
        SortRule::new(field, Dir::Asc)
    }

    /// Creates a new descending rule for the given field.
    pub fn desc(field: impl Into<String>) -> Self {
        SortRule::new(field, Dir::Desc)
    }

    /// Creates a new rule with the given direction.
    pub fn new(field: impl Into<String>, dir: Dir) -> Self {
        SortRule {
            field: field.into(),
            dir,
        }
    }

    /// Compares two records by this rule's field and direction.
    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        let left = path::resolve(a, &self.field);
        let right = path::resolve(b, &self.field);
        self.dir.apply(compare_values(&left, &right))
    }
}

/// Compares two field values for sorting.
///
/// Values order by kind first: absent and uncomparable values (lists,
/// booleans, nulls, objects), then numbers, then strings. Two numbers compare
/// numerically, two strings in natural, case-insensitive order, and two
/// values of the first group are equal.
///
/// ```
/// use std::cmp::Ordering;
/// use sieve_query::{compare_values, Value};
///
/// assert_eq!(compare_values(&Value::Number(-5.0), &Value::Number(-2.0)), Ordering::Less);
/// assert_eq!(compare_values(&Value::Number(10.0), &Value::Text("-3")), Ordering::Less);
/// assert_eq!(compare_values(&Value::None, &Value::Number(-5.0)), Ordering::Less);
/// ```
pub fn compare_values(a: &Value<'_>, b: &Value<'_>) -> Ordering {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
        (Value::Text(a), Value::Text(b)) => compare_ignore_case(a, b),
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

fn kind_rank(value: &Value<'_>) -> u8 {
    if value.is_number() {
        1
    } else if value.is_text() {
        2
    } else {
        0
    }
}

/// Compares two records using a list of sort rules.
///
/// The first rule is the primary key, the second breaks its ties, and so on.
/// If every rule compares equal, returns `Equal`.
pub fn compare_by_rules(a: &Record, b: &Record, rules: &[SortRule]) -> Ordering {
    for rule in rules {
        let ordering = rule.compare(a, b);
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn dir_apply() {
        assert_eq!(Dir::Asc.apply(Ordering::Less), Ordering::Less);
        assert_eq!(Dir::Asc.apply(Ordering::Equal), Ordering::Equal);
        assert_eq!(Dir::Desc.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(Dir::Desc.apply(Ordering::Greater), Ordering::Less);
        assert_eq!(Dir::Desc.apply(Ordering::Equal), Ordering::Equal);
    }

    #[test]
    fn dir_display() {
        assert_eq!(Dir::Asc.to_string(), "asc");
        assert_eq!(Dir::Desc.to_string(), "desc");
    }

    #[test]
    fn sort_rule_constructors() {
        let asc = SortRule::asc("title");
        assert_eq!(asc.field, "title");
        assert!(asc.dir.is_asc());

        let desc = SortRule::desc("year");
        assert!(desc.dir.is_desc());
    }

    #[test]
    fn compare_numbers_numerically() {
        assert_eq!(
            compare_values(&Value::Number(9.0), &Value::Number(10.0)),
            Ordering::Less
        );
        assert_eq!(
            compare_values(&Value::Number(-5.0), &Value::Number(3.0)),
            Ordering::Less
        );
    }

    #[test]
    fn compare_strings_naturally() {
        assert_eq!(
            compare_values(&Value::Text("Part 10"), &Value::Text("part 9")),
            Ordering::Greater
        );
        assert_eq!(
            compare_values(&Value::Text("B"), &Value::Text("b")),
            Ordering::Equal
        );
    }

    #[test]
    fn absent_values_sort_first() {
        assert_eq!(
            compare_values(&Value::None, &Value::Text("a")),
            Ordering::Less
        );
        assert_eq!(compare_values(&Value::None, &Value::None), Ordering::Equal);
    }

    #[test]
    fn numbers_sort_before_text() {
        assert_eq!(
            compare_values(&Value::Number(2.0), &Value::Text("10")),
            Ordering::Less
        );
        assert_eq!(
            compare_values(&Value::Text("-3"), &Value::Number(-5.0)),
            Ordering::Greater
        );
        assert_eq!(
            compare_values(&Value::Text(""), &Value::Number(0.0)),
            Ordering::Greater
        );
    }

    #[test]
    fn lists_rank_with_absent_values() {
        let raw = json!([1, 2]);
        let list = Value::from(Some(&raw));

        assert_eq!(compare_values(&list, &Value::None), Ordering::Equal);
        assert_eq!(compare_values(&list, &Value::Number(-1.0)), Ordering::Less);
    }

    #[test]
    fn mixed_kinds_form_a_total_order() {
        let raw = json!(["x"]);
        let values = [
            Value::Number(-5.0),
            Value::Number(-2.0),
            Value::Number(10.0),
            Value::Text("-3"),
            Value::Text("10"),
            Value::Text("item 9"),
            Value::Text("Item 10"),
            Value::Text(""),
            Value::None,
            Value::from(Some(&raw)),
        ];

        for a in &values {
            for b in &values {
                assert_eq!(
                    compare_values(a, b),
                    compare_values(b, a).reverse(),
                    "antisymmetry: {a:?} vs {b:?}"
                );
                for c in &values {
                    if compare_values(a, b) != Ordering::Greater
                        && compare_values(b, c) != Ordering::Greater
                    {
                        assert_ne!(
                            compare_values(a, c),
                            Ordering::Greater,
                            "transitivity: {a:?} <= {b:?} <= {c:?}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn rule_compare_reads_nested_fields() {
        let a = record(json!({"meta": {"year": 1965}}));
        let b = record(json!({"meta": {"year": 1984}}));

        assert_eq!(SortRule::asc("meta.year").compare(&a, &b), Ordering::Less);
        assert_eq!(SortRule::desc("meta.year").compare(&a, &b), Ordering::Greater);
    }

    #[test]
    fn first_rule_is_primary() {
        let a = record(json!({"group": "x", "rank": 2}));
        let b = record(json!({"group": "y", "rank": 1}));
        let c = record(json!({"group": "x", "rank": 1}));

        let rules = vec![SortRule::asc("group"), SortRule::asc("rank")];

        assert_eq!(compare_by_rules(&a, &b, &rules), Ordering::Less);
        assert_eq!(compare_by_rules(&a, &c, &rules), Ordering::Greater);
        assert_eq!(compare_by_rules(&a, &a, &rules), Ordering::Equal);
    }
}
