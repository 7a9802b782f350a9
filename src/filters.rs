//! # Filter Validation & Defaults
//!
//! Turns raw caller input (already decoded from query parameters or JSON) into a
//! [`FilterSet`] the query builder can consume without further checks. Normalization
//! never fails: every unusable value degrades to a safe default.
//!
//! | Input | Normalized |
//! |---|---|
//! | empty `query` | no text predicate |
//! | `order_by` outside the projection's allow-list | projection default |
//! | `order_dir` other than asc/desc (any case) | projection default |
//! | `limit` absent or `<= 0` | `default_limit` |
//! | `limit > max_limit` | `max_limit` |
//! | `default_limit` or `max_limit` of `0` | at least `1` |
//! | `offset` absent or negative | `0` |
//! | a filter the projection has no column for | dropped |

use crate::config::{DEFAULT_LIMIT, MAX_LIMIT};
use crate::query_builder::{Projection, SortDirection};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Owner filter column
pub const USER_ID_COLUMN: &str = "user_id";
/// Publication flag filter column
pub const PUBLISHED_COLUMN: &str = "published";

/// Page-size policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    pub default_limit: u32,
    pub max_limit: u32,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            max_limit: MAX_LIMIT,
        }
    }
}

/// Raw search input as callers supply it; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    pub query: Option<String>,
    pub user_id: Option<i64>,
    pub published: Option<bool>,
    pub min_word_count: Option<i64>,
    pub order_by: Option<String>,
    pub order_dir: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Normalized search constraints. `order_by` is always an identifier taken from the
/// projection's allow-list.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSet {
    pub query: Option<String>,
    pub user_id: Option<i64>,
    pub published: Option<bool>,
    pub min_word_count: Option<i64>,
    pub order_by: &'static str,
    pub order_dir: SortDirection,
    pub limit: u32,
    pub offset: u32,
}

impl FilterSet {
    /// Normalize `params` against `projection` and `limits`
    pub fn normalize(params: &SearchParams, projection: &Projection, limits: PageLimits) -> Self {
        Self {
            query: supported(
                normalize_query(params.query.as_deref()),
                !projection.search_columns.is_empty(),
                "query",
                projection,
            ),
            user_id: supported(
                params.user_id,
                projection.has_column(USER_ID_COLUMN),
                "user_id",
                projection,
            ),
            published: supported(
                params.published,
                projection.has_column(PUBLISHED_COLUMN),
                "published",
                projection,
            ),
            min_word_count: supported(
                params.min_word_count,
                projection.word_count_column.is_some(),
                "min_word_count",
                projection,
            ),
            order_by: normalize_order_by(params.order_by.as_deref(), projection),
            order_dir: normalize_direction(
                params.order_dir.as_deref(),
                projection.default_direction,
            ),
            limit: normalize_limit(params.limit, limits),
            offset: normalize_offset(params.offset),
        }
    }

    /// No constraints: default ordering, default limit, zero offset
    pub fn unfiltered(projection: &Projection, limits: PageLimits) -> Self {
        Self::normalize(&SearchParams::default(), projection, limits)
    }

    /// `%query%` for the free-text predicate, if any
    pub fn query_pattern(&self) -> Option<String> {
        self.query.as_ref().map(|q| format!("%{q}%"))
    }

    pub fn has_predicates(&self) -> bool {
        self.query.is_some()
            || self.user_id.is_some()
            || self.published.is_some()
            || self.min_word_count.is_some()
    }
}

/// `value`, unless the projection cannot express the filter
fn supported<T>(
    value: Option<T>,
    available: bool,
    filter: &str,
    projection: &Projection,
) -> Option<T> {
    match value {
        Some(_) if !available => {
            warn!(
                projection = projection.name,
                filter = filter,
                "filter not applicable to projection, dropping"
            );
            None
        }
        value => value,
    }
}

/// Empty text means "no text filter"; anything else is matched as given
pub fn normalize_query(query: Option<&str>) -> Option<String> {
    query.filter(|q| !q.is_empty()).map(str::to_string)
}

pub fn normalize_order_by(requested: Option<&str>, projection: &Projection) -> &'static str {
    match requested {
        None => projection.default_order,
        Some(requested) => match projection.sortable_column(requested) {
            Some(column) => column,
            None => {
                warn!(
                    projection = projection.name,
                    requested_len = requested.len(),
                    default = projection.default_order,
                    "ordering column not allow-listed, using default"
                );
                projection.default_order
            }
        },
    }
}

pub fn normalize_direction(requested: Option<&str>, default: SortDirection) -> SortDirection {
    requested.and_then(SortDirection::parse).unwrap_or(default)
}

/// Always within `1..=max_limit`, even when `limits` itself holds zeros
pub fn normalize_limit(requested: Option<i64>, limits: PageLimits) -> u32 {
    let max_limit = limits.max_limit.max(1);
    match requested {
        Some(limit) if limit > 0 => {
            u32::try_from(limit).map_or(max_limit, |limit| limit.min(max_limit))
        }
        _ => limits.default_limit.clamp(1, max_limit),
    }
}

pub fn normalize_offset(requested: Option<i64>) -> u32 {
    match requested {
        Some(offset) if offset > 0 => u32::try_from(offset).unwrap_or(u32::MAX),
        _ => 0,
    }
}
