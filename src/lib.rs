#![allow(clippy::doc_markdown)] // Allow technical terms like PostgreSQL, SQLx in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Post Search Core
//!
//! Safe, parameterized search over a blog datastore of users and posts.
//!
//! ## Overview
//!
//! Callers hand in optional, untrusted filter values. They are normalized into a
//! [`filters::FilterSet`], composed with a fixed [`query_builder::Projection`] into an
//! immutable [`query_builder::QueryPlan`], rendered into SQL text with bound placeholders,
//! and executed through a [`database::QueryExecutor`]. Rows come back decoded by position
//! into typed [`models`].
//!
//! ## Key Features
//!
//! - **No caller text in SQL**: identifiers are `'static`, values are always bound
//! - **Allow-listed ordering**: unknown ORDER BY columns fall back to the projection default
//! - **Reusable plans**: every clause-adding call returns a new plan
//! - **Cancellation**: every statement runs under an [`database::ExecutionContext`]
//! - **Strict mapping**: a row whose width differs from the record is an error
//!
//! ## Module Organization
//!
//! - [`query_builder`] - predicates, ordering, pagination and plan rendering
//! - [`filters`] - caller input normalization
//! - [`schema`] - the fixed projections over `users` and `posts`
//! - [`database`] - executor seam, PostgreSQL executor and row decoding
//! - [`models`] - result records
//! - [`services`] - the search operations
//! - [`config`] - configuration management
//! - [`error`] - structured error handling
//! - [`logging`] - structured logging setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use postsearch_core::config::SearchConfig;
//! use postsearch_core::database::{connect_pool, ExecutionContext, PgQueryExecutor};
//! use postsearch_core::filters::SearchParams;
//! use postsearch_core::services::SearchService;
//!
//! # async fn example() -> postsearch_core::Result<()> {
//! let config = SearchConfig::from_env()?;
//! let pool = connect_pool(&config).await?;
//! let service = SearchService::new(PgQueryExecutor::new(pool), &config);
//!
//! let params = SearchParams {
//!     query: Some("rust".to_string()),
//!     order_by: Some("title".to_string()),
//!     ..SearchParams::default()
//! };
//! let posts = service.search_posts(&ExecutionContext::new(), &params).await?;
//! println!("{} posts", posts.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing
//!
//! ```bash
//! cargo test --lib    # Unit tests
//! cargo test          # Unit and integration tests (executor tests need DATABASE_URL)
//! ```

pub mod config;
pub mod database;
pub mod error;
pub mod filters;
pub mod logging;
pub mod models;
pub mod query_builder;
pub mod schema;
pub mod services;

pub use config::SearchConfig;
pub use database::{ExecutionContext, PgQueryExecutor, QueryExecutor};
pub use error::{Result, SearchError};
pub use filters::{FilterSet, PageLimits, SearchParams};
pub use models::{Post, PostStats, User, UserSummary, UserWithStats};
pub use query_builder::{PlaceholderStyle, QueryPlan, Statement};
pub use services::{build_dynamic_query, SearchService};
