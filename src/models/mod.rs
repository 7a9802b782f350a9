//! # Records
//!
//! Typed rows returned by the search service. Each record decodes positionally from the
//! projection of the same shape in [`crate::schema`].

pub mod post;
pub mod stats;
pub mod user;

pub use post::Post;
pub use stats::{PostStats, UserWithStats};
pub use user::{User, UserSummary};
