//! # Services
//!
//! Search operations composed from the query builder, filter normalization and the
//! statement executor.

pub mod search_service;

pub use search_service::{apply_page, build_dynamic_query, SearchService};
