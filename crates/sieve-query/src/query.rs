//! The query aggregate and its builder.
//!
//! A [`Query`] holds everything a query string can express: filter rules,
//! sort rules, projected field paths and an optional pagination window.
//! It is usually produced by the [`Parser`](crate::Parser), but can be built
//! directly with the fluent builder.

use serde::{Deserialize, Serialize};

use crate::clause::FilterRule;
use crate::engine;
use crate::limit::LimitRule;
use crate::op::Op;
use crate::ordering::{Dir, SortRule};
use crate::parser::ParserKeys;
use crate::{path, Record};

/// A parsed query.
///
/// - **filters**: all must match (logical AND); their order does not change
///   the result
/// - **sorting**: the first rule is the primary key, later rules break ties
/// - **fields**: projected paths, in output order; empty keeps whole records
/// - **limit**: pagination window, applied only when defined
///
/// # Example
///
/// ```
/// use sieve_query::{Query, Op};
///
/// let query = Query::new()
///     .filter("year", Op::Gte, "1960")
///     .filter("title", Op::Lke, "dune")
///     .sort_desc("year")
///     .field("title")
///     .limit(10)
///     .build();
///
/// assert_eq!(query.filters().len(), 2);
/// assert_eq!(query.sorting().len(), 1);
/// assert_eq!(query.fields(), ["title"]);
/// assert_eq!(query.limit_rule().map(|l| l.count), Some(10));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    #[serde(default)]
    filters: Vec<FilterRule>,
    #[serde(default)]
    sorting: Vec<SortRule>,
    #[serde(default)]
    fields: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    limit: Option<LimitRule>,
}

impl Query {
    /// Creates a new empty query.
    ///
    /// An empty query returns any collection unchanged.
    pub fn new() -> Self {
        Query::default()
    }

    /// Assembles a query from its parts.
    pub fn from_parts(
        filters: Vec<FilterRule>,
        sorting: Vec<SortRule>,
        fields: Vec<String>,
        limit: Option<LimitRule>,
    ) -> Self {
        Query {
            filters,
            sorting,
            fields,
            limit,
        }
    }

    // ========================================================================
    // Builder
    // ========================================================================

    /// Adds a filter rule.
    pub fn filter(mut self, field: &str, op: Op, value: impl Into<String>) -> Self {
        self.filters.push(FilterRule::new(field, op, value));
        self
    }

    /// Adds an `eq` filter rule.
    pub fn filter_eq(self, field: &str, value: impl Into<String>) -> Self {
        self.filter(field, Op::Eq, value)
    }

    /// Adds a sort rule.
    pub fn sort(mut self, field: &str, dir: Dir) -> Self {
        self.sorting.push(SortRule::new(field, dir));
        self
    }

    /// Adds an ascending sort rule.
    pub fn sort_asc(self, field: &str) -> Self {
        self.sort(field, Dir::Asc)
    }

    /// Adds a descending sort rule.
    pub fn sort_desc(self, field: &str) -> Self {
        self.sort(field, Dir::Desc)
    }

    /// Adds a projected field path.
    pub fn field(mut self, path: &str) -> Self {
        self.fields.push(path.to_string());
        self
    }

    /// Sets the maximum number of records to return.
    pub fn limit(mut self, count: usize) -> Self {
        self.limit.get_or_insert_with(LimitRule::default).count = count;
        self
    }

    /// Sets the number of records to skip.
    pub fn offset(mut self, offset: usize) -> Self {
        self.limit.get_or_insert_with(LimitRule::default).offset = offset;
        self
    }

    /// Finalizes the builder.
    ///
    /// This is a no-op that makes the builder pattern more explicit.
    pub fn build(self) -> Self {
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Returns the filter rules.
    pub fn filters(&self) -> &[FilterRule] {
        &self.filters
    }

    /// Returns the sort rules, primary first.
    pub fn sorting(&self) -> &[SortRule] {
        &self.sorting
    }

    /// Returns the projected field paths.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Returns the pagination window, if one was given.
    pub fn limit_rule(&self) -> Option<LimitRule> {
        self.limit
    }

    /// Returns `true` if the query would return any collection unchanged.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
            && self.sorting.is_empty()
            && self.fields.is_empty()
            && !self.limit.is_some_and(|l| l.is_defined())
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Tests if a single record passes every filter rule.
    pub fn matches(&self, record: &Record) -> bool {
        self.filters
            .iter()
            .all(|rule| rule.matches(&path::resolve(record, &rule.field)))
    }

    /// Runs the query against `records`. See [`engine::execute`].
    pub fn execute(&self, records: &[Record]) -> Vec<Record> {
        engine::execute(records, self)
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Renders the query as a form-encoded query string under `keys`.
    ///
    /// Facets without content are left out. Filter values containing a comma
    /// cannot be expressed in the grammar and will not parse back intact.
    ///
    /// ```
    /// use sieve_query::{parse, ParserKeys, Query};
    ///
    /// let query = Query::new().filter_eq("genre", "sf").sort_desc("year").build();
    /// let rendered = query.to_query_string(&ParserKeys::default());
    ///
    /// assert_eq!(parse(&rendered).unwrap(), query);
    /// ```
    pub fn to_query_string(&self, keys: &ParserKeys) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());

        if !self.filters.is_empty() {
            let clauses: Vec<String> = self
                .filters
                .iter()
                .map(|rule| format!("{}={}:{}", rule.field, rule.op, rule.value))
                .collect();
            serializer.append_pair(&keys.filter, &clauses.join(","));
        }

        if !self.sorting.is_empty() {
            let clauses: Vec<String> = self
                .sorting
                .iter()
                .map(|rule| match rule.dir {
                    Dir::Asc => rule.field.clone(),
                    Dir::Desc => format!("-{}", rule.field),
                })
                .collect();
            serializer.append_pair(&keys.sort, &clauses.join(","));
        }

        if !self.fields.is_empty() {
            serializer.append_pair(&keys.fields, &self.fields.join(","));
        }

        if let Some(limit) = self.limit {
            serializer.append_pair(&keys.limit, &format!("{},{}", limit.count, limit.offset));
        }

        serializer.finish()
    }
}
