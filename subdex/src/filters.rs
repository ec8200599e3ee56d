//! Store queries for the search and detail lookups.

use std::num::IntErrorKind;

use subdex_core::query::{Expr, Filter, Query, SortDirection};
use thiserror::Error;

/// Field every lookup matches and sorts on.
pub const NAME_FIELD: &str = "name";

/// The only fields ever fetched for a search summary.
pub const SUMMARY_FIELDS: [&str; 4] = ["name", "summary", "featured", "url"];

/// Search limit used when the caller does not send one.
pub const DEFAULT_LIMIT: i64 = 100;
pub const MIN_LIMIT: i64 = 1;
pub const MAX_LIMIT: i64 = 200;

/// Saturates a requested search limit into `[MIN_LIMIT, MAX_LIMIT]`.
pub fn clamp_limit(limit: i64) -> usize {
    // Both bounds are positive, so the cast is lossless.
    limit.clamp(MIN_LIMIT, MAX_LIMIT) as usize
}

/// A `limit` parameter that is not an integer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Input should be a valid integer, unable to parse string as an integer")]
pub struct InvalidLimit;

/// Parses a raw `limit` parameter.
///
/// Integers beyond the `i64` range saturate, so any integer clamps like a small one.
pub fn parse_limit(raw: &str) -> Result<i64, InvalidLimit> {
    match raw.parse::<i64>() {
        Ok(limit) => Ok(limit),
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow => Ok(i64::MAX),
            IntErrorKind::NegOverflow => Ok(i64::MIN),
            _ => Err(InvalidLimit),
        },
    }
}

/// Filter for a search term: case-insensitive substring match on `name`.
///
/// An absent or empty term yields no filter, matching every record.
pub fn search_filter(term: Option<&str>) -> Option<Expr> {
    term.filter(|term| !term.is_empty())
        .map(|term| Filter::contains_ignore_case(NAME_FIELD, term))
}

/// Full search query: term filter, summary projection, ascending name order, clamped limit.
pub fn search_query(term: Option<&str>, limit: i64) -> Query {
    Query::builder()
        .filter_opt(search_filter(term))
        .project(SUMMARY_FIELDS)
        .sort(NAME_FIELD, SortDirection::Asc)
        .limit(clamp_limit(limit))
        .build()
}

/// The two lookup stages for a detail request, tried in order.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailFilters {
    /// `name` equal to the requested name byte for byte.
    pub exact: Expr,
    /// `name` equal to the requested name ignoring case, over the whole string.
    pub fallback: Expr,
}

pub fn detail_filters(name: &str) -> DetailFilters {
    DetailFilters {
        exact: Filter::eq(NAME_FIELD, name),
        fallback: Filter::eq_ignore_case(NAME_FIELD, name),
    }
}
