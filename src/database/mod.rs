//! # Statement Execution
//!
//! Runs built statements against a datastore and maps rows back into typed records.
//!
//! - [`executor`] - the [`QueryExecutor`] seam and the cancellable [`ExecutionContext`]
//! - [`row`] - positional [`Row`]s, the [`DecodeRow`] trait and fetch helpers
//! - [`pg_executor`] - PostgreSQL implementation over `sqlx`
//! - [`connection`] - pool construction from configuration
//!
//! ## Usage Pattern
//!
//! ```rust,no_run
//! use postsearch_core::database::{fetch_records, ExecutionContext, PgQueryExecutor};
//! use postsearch_core::models::Post;
//! use postsearch_core::query_builder::{PlaceholderStyle, QueryPlan};
//! use postsearch_core::schema::POSTS;
//! use sqlx::PgPool;
//!
//! # async fn example(pool: PgPool) -> postsearch_core::Result<()> {
//! let executor = PgQueryExecutor::new(pool);
//! let statement = QueryPlan::select(&POSTS)
//!     .where_eq("published", true)
//!     .order_desc("created_at")
//!     .limit(10)
//!     .build(PlaceholderStyle::Dollar)?;
//! let posts: Vec<Post> =
//!     fetch_records(&executor, &ExecutionContext::new(), &statement).await?;
//! # Ok(())
//! # }
//! ```

pub mod connection;
pub mod executor;
pub mod pg_executor;
pub mod row;

pub use connection::connect_pool;
pub use executor::{ExecutionContext, QueryExecutor};
pub use pg_executor::PgQueryExecutor;
pub use row::{decode_rows, fetch_aggregate, fetch_record, fetch_records, DecodeRow, Row};
