//! Comparison operators for filter rules.
//!
//! The [`Op`] enum is the closed set of operator tokens accepted in a filter
//! clause. Which operators apply depends on the kind of value the record
//! holds at the filtered path (see [`FilterRule::matches`](crate::FilterRule::matches)).

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QueryError;

/// Comparison operator for a filter rule.
///
/// Operators are grouped by the value kinds they support:
/// - **Ordering**: `Eq`, `Neq`, `Gt`, `Gte`, `Lt`, `Lte` - numbers and strings
/// - **Membership**: `Any`, `Cts` - arrays
/// - **Substring**: `Lke` - strings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Op {
    /// Equal. The default when a clause names no operator.
    #[default]
    Eq,
    /// Not equal.
    Neq,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
    /// The record's array holds at least one of the given tokens.
    Any,
    /// The record's array holds every one of the given tokens.
    Cts,
    /// Case-insensitive substring match.
    Lke,
}

impl Op {
    /// Every operator, in token order.
    pub const ALL: [Op; 9] = [
        Op::Eq,
        Op::Neq,
        Op::Gt,
        Op::Gte,
        Op::Lt,
        Op::Lte,
        Op::Any,
        Op::Cts,
        Op::Lke,
    ];

    /// Returns `true` if this operator compares by ordering.
    pub fn is_ordering_op(self) -> bool {
        matches!(
            self,
            Op::Eq | Op::Neq | Op::Gt | Op::Gte | Op::Lt | Op::Lte
        )
    }

    /// Returns `true` if this operator tests array membership.
    pub fn is_membership_op(self) -> bool {
        matches!(self, Op::Any | Op::Cts)
    }

    /// Evaluates the operator given the ordering of `actual` against the
    /// filter value.
    ///
    /// Non-ordering operators always return `false`.
    pub fn eval_ordering(self, ordering: Ordering) -> bool {
        match self {
            Op::Eq => ordering == Ordering::Equal,
            Op::Neq => ordering != Ordering::Equal,
            Op::Gt => ordering == Ordering::Greater,
            Op::Gte => ordering != Ordering::Less,
            Op::Lt => ordering == Ordering::Less,
            Op::Lte => ordering != Ordering::Greater,
            Op::Any | Op::Cts | Op::Lke => false,
        }
    }

    /// Returns the query-string token of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Op::Eq => "eq",
            Op::Neq => "neq",
            Op::Gt => "gt",
            Op::Gte => "gte",
            Op::Lt => "lt",
            Op::Lte => "lte",
            Op::Any => "any",
            Op::Cts => "cts",
            Op::Lke => "lke",
        }
    }
}

impl FromStr for Op {
    type Err = QueryError;

    /// Parses an operator token. Tokens are matched exactly.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        Op::ALL
            .into_iter()
            .find(|op| op.as_str() == token)
            .ok_or_else(|| QueryError::UnknownOperator(token.to_string()))
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
