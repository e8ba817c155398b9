//! Error types for the query crate.

use thiserror::Error;

/// Errors raised while parsing a query string.
///
/// Every variant is a flavour of "invalid query". They are raised eagerly by
/// the parser; executing a [`Query`](crate::Query) never fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// A sub-key name (filter/sort/fields/limit) is empty.
    #[error("the {facet} key must not be empty")]
    EmptyKey { facet: &'static str },

    /// A filter clause does not have the `<field>=[<operator>:]<value>` shape.
    #[error("invalid filter clause '{clause}', expected <field>=[<operator>:]<value>")]
    InvalidFilter { clause: String },

    /// The operator token is not one of the supported operators.
    #[error("unknown filter operator '{0}'")]
    UnknownOperator(String),

    /// The filter value is empty.
    #[error("filter value must not be empty (field: {field})")]
    EmptyValue { field: String },
}

impl QueryError {
    pub(crate) fn invalid_filter(clause: impl Into<String>) -> Self {
        QueryError::InvalidFilter {
            clause: clause.into(),
        }
    }
}

/// Result type for query operations.
pub type Result<T> = std::result::Result<T, QueryError>;
