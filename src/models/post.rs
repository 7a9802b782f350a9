use crate::database::{DecodeRow, Row};
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A blog post. Maps to the `posts` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DecodeRow for Post {
    const WIDTH: usize = 7;

    fn decode(row: &Row) -> Result<Self> {
        Ok(Self {
            id: row.int(0)?,
            user_id: row.int(1)?,
            title: row.text(2)?,
            content: row.text(3)?,
            published: row.boolean(4)?,
            created_at: row.timestamp(5)?,
            updated_at: row.timestamp(6)?,
        })
    }
}
