//! Aggregate records produced by the statistics projections.

use super::user::UserSummary;
use crate::database::{DecodeRow, Row};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Totals over all posts that have an existing author. An empty datastore reads as all
/// zeros.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostStats {
    pub total_posts: i64,
    pub published_posts: i64,
    pub active_users: i64,
    pub avg_content_length: f64,
}

impl DecodeRow for PostStats {
    const WIDTH: usize = 4;

    fn decode(row: &Row) -> Result<Self> {
        Ok(Self {
            total_posts: row.int_or_zero(0)?,
            published_posts: row.int_or_zero(1)?,
            active_users: row.int_or_zero(2)?,
            avg_content_length: row.float_or_zero(3)?,
        })
    }
}

/// A user with post totals. `last_post_date` is the textual timestamp of the newest
/// post, empty for users without posts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserWithStats {
    #[serde(flatten)]
    pub user: UserSummary,
    pub post_count: i64,
    pub published_count: i64,
    pub last_post_date: String,
}

impl DecodeRow for UserWithStats {
    const WIDTH: usize = 6;

    fn decode(row: &Row) -> Result<Self> {
        Ok(Self {
            user: UserSummary {
                id: row.int(0)?,
                name: row.text(1)?,
                email: row.text(2)?,
            },
            post_count: row.int_or_zero(3)?,
            published_count: row.int_or_zero(4)?,
            last_post_date: row.text_or_empty(5)?,
        })
    }
}
