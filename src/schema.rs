//! Fixed projections over the `users` and `posts` tables.
//!
//! ```sql
//! users(id, name, email, created_at, updated_at)
//! posts(id, user_id REFERENCES users(id), title, content, published, created_at, updated_at)
//! ```
//!
//! Column order here is the decode order of the matching record in [`crate::models`].

use crate::query_builder::{Join, Projection, SortDirection};

pub static POSTS: Projection = Projection {
    name: "posts",
    table: "posts",
    columns: &[
        "id",
        "user_id",
        "title",
        "content",
        "published",
        "created_at",
        "updated_at",
    ],
    joins: &[],
    group_by: &[],
    search_columns: &["title", "content"],
    word_count_column: Some("content"),
    sortable: &["created_at", "title", "updated_at"],
    default_order: "created_at",
    default_direction: SortDirection::Desc,
};

pub static USERS: Projection = Projection {
    name: "users",
    table: "users",
    columns: &["id", "name", "email", "created_at", "updated_at"],
    joins: &[],
    group_by: &[],
    search_columns: &["name"],
    word_count_column: None,
    sortable: &["name", "email", "created_at"],
    default_order: "name",
    // Users list alphabetically, so an unknown direction falls back to ascending here
    default_direction: SortDirection::Asc,
};

/// Single-row totals over all posts with an existing author
pub static POST_STATS: Projection = Projection {
    name: "post_stats",
    table: "posts p",
    columns: &[
        "COUNT(p.id) AS total_posts",
        "COUNT(CASE WHEN p.published = true THEN 1 END) AS published_posts",
        "COUNT(DISTINCT p.user_id) AS active_users",
        "CAST(AVG(LENGTH(p.content)) AS DOUBLE PRECISION) AS avg_content_length",
    ],
    joins: &[Join::inner("users u", "p.user_id = u.id")],
    group_by: &[],
    search_columns: &[],
    word_count_column: None,
    sortable: &[],
    default_order: "total_posts",
    default_direction: SortDirection::Desc,
};

/// Users with their post counts, most prolific first
pub static TOP_USERS: Projection = Projection {
    name: "top_users",
    table: "users u",
    columns: &[
        "u.id",
        "u.name",
        "u.email",
        "COUNT(p.id) AS post_count",
        "COUNT(CASE WHEN p.published = true THEN 1 END) AS published_count",
        "CAST(MAX(p.created_at) AS TEXT) AS last_post_date",
    ],
    joins: &[Join::left("posts p", "u.id = p.user_id")],
    group_by: &["u.id", "u.name", "u.email"],
    search_columns: &[],
    word_count_column: None,
    sortable: &["post_count", "published_count", "last_post_date"],
    default_order: "post_count",
    default_direction: SortDirection::Desc,
};
