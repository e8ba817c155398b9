//! Query-string parser.
//!
//! A query string is standard form-encoded data whose sub-keys carry the
//! four facets of a [`Query`]:
//!
//! ```text
//! filter=<field>=[<op>:]<value>,...   conjunctive filter rules
//! sort=[-]<field>,...                 sort rules, '-' for descending
//! fields=<path>,...                   projected field paths
//! limit=<count>[,<offset>]            pagination window
//! ```
//!
//! The sub-key names are configurable through [`ParserKeys`].

use std::collections::HashMap;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::clause::FilterRule;
use crate::error::{QueryError, Result};
use crate::limit::LimitRule;
use crate::op::Op;
use crate::ordering::SortRule;
use crate::Query;

/// Separator between clauses of one facet.
const CLAUSE_SEPARATOR: char = ',';

/// Names of the sub-keys the parser reads each facet from.
///
/// Defaults to `filter`, `sort`, `fields` and `limit`. Missing entries fall
/// back to their default when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserKeys {
    /// Sub-key holding filter clauses.
    pub filter: String,
    /// Sub-key holding sort clauses.
    pub sort: String,
    /// Sub-key holding projected fields.
    pub fields: String,
    /// Sub-key holding the pagination window.
    pub limit: String,
}

impl Default for ParserKeys {
    fn default() -> Self {
        ParserKeys {
            filter: "filter".to_string(),
            sort: "sort".to_string(),
            fields: "fields".to_string(),
            limit: "limit".to_string(),
        }
    }
}

impl ParserKeys {
    /// Creates a key set from explicit names.
    pub fn new(
        filter: impl Into<String>,
        sort: impl Into<String>,
        fields: impl Into<String>,
        limit: impl Into<String>,
    ) -> Self {
        ParserKeys {
            filter: filter.into(),
            sort: sort.into(),
            fields: fields.into(),
            limit: limit.into(),
        }
    }

    /// Checks that no key name is empty or whitespace.
    pub fn validate(&self) -> Result<()> {
        let named = [
            ("filter", &self.filter),
            ("sort", &self.sort),
            ("fields", &self.fields),
            ("limit", &self.limit),
        ];
        for (facet, key) in named {
            if key.trim().is_empty() {
                return Err(QueryError::EmptyKey { facet });
            }
        }
        Ok(())
    }

    fn trimmed(&self) -> Self {
        ParserKeys::new(
            self.filter.trim(),
            self.sort.trim(),
            self.fields.trim(),
            self.limit.trim(),
        )
    }
}

/// Parses query strings into [`Query`] values.
///
/// The parser holds only its key names and can be shared freely.
///
/// # Example
///
/// ```
/// use sieve_query::{Dir, Op, Parser, ParserKeys};
///
/// let parser = Parser::new(ParserKeys::new("q", "order", "only", "page")).unwrap();
/// let query = parser.parse("q=year=gte:1990&order=-year&page=10,20").unwrap();
///
/// assert_eq!(query.filters()[0].op, Op::Gte);
/// assert_eq!(query.sorting()[0].dir, Dir::Desc);
/// assert_eq!(query.limit_rule().map(|l| (l.count, l.offset)), Some((10, 20)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Parser {
    keys: ParserKeys,
}

impl Parser {
    /// Creates a parser reading the given sub-keys.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::EmptyKey`] if a key name is empty.
    pub fn new(keys: ParserKeys) -> Result<Self> {
        keys.validate()?;
        Ok(Parser {
            keys: keys.trimmed(),
        })
    }

    /// Returns the sub-key names this parser reads.
    pub fn keys(&self) -> &ParserKeys {
        &self.keys
    }

    /// Parses `input`, treating `None` as "no query supplied".
    pub fn parse_optional(&self, input: Option<&str>) -> Result<Query> {
        match input {
            Some(input) => self.parse(input),
            None => Ok(Query::new()),
        }
    }

    /// Parses a query string.
    ///
    /// Missing sub-keys leave their facet empty. A repeated sub-key keeps its
    /// last value.
    ///
    /// # Errors
    ///
    /// Fails on the first malformed filter clause, unknown operator, or empty
    /// filter value. No partial query is returned.
    pub fn parse(&self, input: &str) -> Result<Query> {
        let pairs: HashMap<String, String> = form_urlencoded::parse(input.trim().as_bytes())
            .into_owned()
            .collect();

        let filters = match pairs.get(&self.keys.filter) {
            Some(raw) => parse_filters(raw)?,
            None => Vec::new(),
        };
        let sorting = pairs
            .get(&self.keys.sort)
            .map(|raw| parse_sorting(raw))
            .unwrap_or_default();
        let fields = pairs
            .get(&self.keys.fields)
            .map(|raw| parse_fields(raw))
            .unwrap_or_default();
        let limit = pairs.get(&self.keys.limit).map(|raw| parse_limit(raw));

        debug!(
            "parsed query: {} filters, {} sort rules, {} fields, limit {:?}",
            filters.len(),
            sorting.len(),
            fields.len(),
            limit
        );

        Ok(Query::from_parts(filters, sorting, fields, limit))
    }
}

/// Parses a query string using the default sub-keys.
///
/// ```
/// use sieve_query::{parse, Dir, FilterRule, Op};
///
/// let query = parse("filter=foo=bar,lorem=ipsum&sort=-title").unwrap();
///
/// assert_eq!(
///     query.filters(),
///     [FilterRule::new("foo", Op::Eq, "bar"), FilterRule::new("lorem", Op::Eq, "ipsum")]
/// );
/// assert_eq!(query.sorting()[0].field, "title");
/// assert_eq!(query.sorting()[0].dir, Dir::Desc);
/// ```
pub fn parse(input: &str) -> Result<Query> {
    Parser::default().parse(input)
}

fn clauses(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(CLAUSE_SEPARATOR).map(str::trim)
}

fn parse_filters(raw: &str) -> Result<Vec<FilterRule>> {
    clauses(raw).map(parse_filter_clause).collect()
}

/// Parses one `<field>=[<op>:]<value>` clause.
///
/// The value may itself contain `:` once an operator is given
/// (`start=eq:12:30`).
fn parse_filter_clause(clause: &str) -> Result<FilterRule> {
    let parts: Vec<&str> = clause.split('=').collect();
    let [field, rest] = parts.as_slice() else {
        return Err(QueryError::invalid_filter(clause));
    };
    if field.is_empty() {
        return Err(QueryError::invalid_filter(clause));
    }

    let (op, value) = match rest.split_once(':') {
        Some((token, value)) => (token.parse::<Op>()?, value),
        None => (Op::Eq, *rest),
    };

    if value.is_empty() {
        return Err(QueryError::EmptyValue {
            field: field.to_string(),
        });
    }

    trace!("filter clause '{}' -> {} {} '{}'", clause, field, op, value);
    Ok(FilterRule::new(*field, op, value))
}

fn parse_sorting(raw: &str) -> Vec<SortRule> {
    clauses(raw)
        .filter_map(|clause| {
            let rule = match clause.strip_prefix('-') {
                Some(field) => SortRule::desc(field),
                None => SortRule::asc(clause),
            };
            (!rule.field.is_empty()).then_some(rule)
        })
        .collect()
}

fn parse_fields(raw: &str) -> Vec<String> {
    clauses(raw)
        .filter(|field| !field.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses `<count>[,<offset>]`. Tokens that are not non-negative integers
/// count as 0; tokens past the second are ignored.
fn parse_limit(raw: &str) -> LimitRule {
    let mut tokens = clauses(raw).map(|token| token.parse::<usize>().unwrap_or(0));
    let count = tokens.next().unwrap_or(0);
    let offset = tokens.next().unwrap_or(0);
    LimitRule::new(count, offset)
}
