//! # Query Builder
//!
//! Composes a fixed projection with optional predicates, an allow-listed ordering and
//! LIMIT/OFFSET bounds into one parameterized statement.
//!
//! ## Key Components
//!
//! - [`builder`] - [`QueryPlan`] and the rendered [`Statement`]
//! - [`conditions`] - predicate shapes (equality, LIKE, comparisons, OR groups)
//! - [`projection`] - fixed `SELECT ... FROM ...` shapes and their ordering allow-lists
//! - [`ordering`] / [`pagination`] - ORDER BY terms and bound LIMIT/OFFSET
//! - [`placeholders`] - dialect-specific bind parameter syntax
//!
//! Values are always bound through placeholders. Identifiers (columns, tables, computed
//! expressions) are `'static` and come from the crate's projections, with the single
//! exception of ORDER BY columns, which are checked against the projection's allow-list
//! when the plan is built.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use postsearch_core::query_builder::{PlaceholderStyle, QueryPlan};
//! use postsearch_core::schema::POSTS;
//!
//! let statement = QueryPlan::select(&POSTS)
//!     .where_any_like(POSTS.search_columns, "%rust%")
//!     .where_eq("published", true)
//!     .order_desc("created_at")
//!     .limit(20)
//!     .build(PlaceholderStyle::Dollar)?;
//! ```

pub mod builder;
pub mod conditions;
pub mod joins;
pub mod ordering;
pub mod pagination;
pub mod placeholders;
pub mod projection;
pub mod value;

pub use builder::{QueryPlan, Statement};
pub use conditions::{CompareOperator, Condition, LogicalOperator, Operand, WhereClause};
pub use joins::{Join, JoinType};
pub use ordering::{OrderBy, SortDirection};
pub use pagination::Pagination;
pub use placeholders::{PlaceholderStyle, Placeholders};
pub use projection::Projection;
pub use value::SqlValue;
