use crate::config::SearchConfig;
use crate::database::{
    fetch_aggregate, fetch_record, fetch_records, DecodeRow, ExecutionContext, QueryExecutor, Row,
};
use crate::error::{Result, SearchError};
use crate::filters::{FilterSet, PageLimits, SearchParams, PUBLISHED_COLUMN, USER_ID_COLUMN};
use crate::logging::{log_error, log_query_operation};
use crate::models::{Post, PostStats, User, UserWithStats};
use crate::query_builder::{CompareOperator, Operand, PlaceholderStyle, QueryPlan, Statement};
use crate::schema::{POSTS, POST_STATS, TOP_USERS, USERS};
use std::time::{Duration, Instant};
use tracing::debug;

/// Post and user search over an injected [`QueryExecutor`].
///
/// Holds no per-call state; one instance can serve any number of concurrent callers.
#[derive(Debug, Clone)]
pub struct SearchService<E> {
    executor: E,
    placeholder_style: PlaceholderStyle,
    limits: PageLimits,
    statement_timeout: Option<Duration>,
}

/// `SELECT COUNT(*)` result
#[derive(Debug, Default)]
struct RowCount(i64);

impl DecodeRow for RowCount {
    const WIDTH: usize = 1;

    fn decode(row: &Row) -> Result<Self> {
        Ok(Self(row.int_or_zero(0)?))
    }
}

impl<E: QueryExecutor> SearchService<E> {
    pub fn new(executor: E, config: &SearchConfig) -> Self {
        Self {
            executor,
            placeholder_style: config.placeholder_style,
            limits: config.page_limits(),
            statement_timeout: config.statement_timeout(),
        }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn placeholder_style(&self) -> PlaceholderStyle {
        self.placeholder_style
    }

    pub fn page_limits(&self) -> PageLimits {
        self.limits
    }

    /// The full post search plan for `params`: predicates, ordering and page
    pub fn posts_plan(&self, params: &SearchParams) -> Result<QueryPlan> {
        let filters = FilterSet::normalize(params, &POSTS, self.limits);
        let plan = build_dynamic_query(QueryPlan::select(&POSTS), &filters)?;
        Ok(apply_page(plan, &filters))
    }

    /// Posts matching `params`, in the requested order
    pub async fn search_posts(
        &self,
        ctx: &ExecutionContext,
        params: &SearchParams,
    ) -> Result<Vec<Post>> {
        let plan = self.posts_plan(params)?;
        self.fetch_many("search_posts", ctx, &plan).await
    }

    /// Number of posts matching the predicates of `params`; ordering and paging are ignored
    pub async fn count_posts(&self, ctx: &ExecutionContext, params: &SearchParams) -> Result<i64> {
        let filters = FilterSet::normalize(params, &POSTS, self.limits);
        let plan = build_dynamic_query(QueryPlan::select(&POSTS), &filters)?;
        let statement = plan.build_count(self.placeholder_style)?;
        trace_statement("count_posts", &statement);

        let started = Instant::now();
        let ctx = self.scoped(ctx);
        let result = fetch_aggregate::<RowCount, _>(&self.executor, &ctx, &statement)
            .await
            .map(|count| count.0);
        finish("count_posts", POSTS.name, started, result, |_| None)
    }

    /// The post with primary key `id`, or `NotFound`
    pub async fn find_post(&self, ctx: &ExecutionContext, id: i64) -> Result<Post> {
        let statement = QueryPlan::select(&POSTS)
            .where_eq("id", id)
            .limit(1)
            .build(self.placeholder_style)?;
        trace_statement("find_post", &statement);

        let started = Instant::now();
        let ctx = self.scoped(ctx);
        let result =
            fetch_record::<Post, _>(&self.executor, &ctx, &statement, &format!("post {id}")).await;
        finish("find_post", POSTS.name, started, result, |_| Some(1))
    }

    /// Users whose name contains `name_query`, ordered by name. An empty query matches
    /// everyone.
    pub async fn search_users(
        &self,
        ctx: &ExecutionContext,
        name_query: &str,
        limit: Option<i64>,
    ) -> Result<Vec<User>> {
        let params = SearchParams {
            query: Some(name_query.to_string()),
            limit,
            ..SearchParams::default()
        };
        let filters = FilterSet::normalize(&params, &USERS, self.limits);
        let plan = build_dynamic_query(QueryPlan::select(&USERS), &filters)?;
        let plan = apply_page(plan, &filters);
        self.fetch_many("search_users", ctx, &plan).await
    }

    /// Totals over all posts with an existing author; all zeros when there are none
    pub async fn get_post_stats(&self, ctx: &ExecutionContext) -> Result<PostStats> {
        let statement = QueryPlan::select(&POST_STATS).build(self.placeholder_style)?;
        trace_statement("get_post_stats", &statement);

        let started = Instant::now();
        let ctx = self.scoped(ctx);
        let result = fetch_aggregate::<PostStats, _>(&self.executor, &ctx, &statement).await;
        finish("get_post_stats", POST_STATS.name, started, result, |_| Some(1))
    }

    /// Users ranked by number of posts, most first
    pub async fn get_top_users(
        &self,
        ctx: &ExecutionContext,
        limit: Option<i64>,
    ) -> Result<Vec<UserWithStats>> {
        let params = SearchParams {
            limit,
            ..SearchParams::default()
        };
        let filters = FilterSet::normalize(&params, &TOP_USERS, self.limits);
        let plan = apply_page(QueryPlan::select(&TOP_USERS), &filters);
        self.fetch_many("get_top_users", ctx, &plan).await
    }

    async fn fetch_many<T: DecodeRow>(
        &self,
        operation: &str,
        ctx: &ExecutionContext,
        plan: &QueryPlan,
    ) -> Result<Vec<T>> {
        let statement = plan.build(self.placeholder_style)?;
        trace_statement(operation, &statement);

        let started = Instant::now();
        let ctx = self.scoped(ctx);
        let result = fetch_records::<T, _>(&self.executor, &ctx, &statement).await;
        finish(operation, plan.projection().name, started, result, |rows| {
            Some(rows.len())
        })
    }

    /// Caller context, tightened by the configured statement timeout
    fn scoped(&self, ctx: &ExecutionContext) -> ExecutionContext {
        match self.statement_timeout {
            Some(timeout) => ctx.clone().with_timeout(timeout),
            None => ctx.clone(),
        }
    }
}

fn trace_statement(operation: &str, statement: &Statement) {
    debug!(
        operation = operation,
        sql = %statement.sql,
        param_count = statement.params.len(),
        "built statement"
    );
}

/// Log the outcome of `operation` and hand the result back untouched
fn finish<T>(
    operation: &str,
    projection: &str,
    started: Instant,
    result: Result<T>,
    row_count: impl FnOnce(&T) -> Option<usize>,
) -> Result<T> {
    let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    match &result {
        Ok(value) => log_query_operation(
            operation,
            projection,
            "ok",
            row_count(value),
            Some(duration_ms),
            None,
        ),
        Err(SearchError::NotFound { resource }) => log_query_operation(
            operation,
            projection,
            "not_found",
            Some(0),
            Some(duration_ms),
            Some(resource),
        ),
        Err(err) => log_error("search_service", operation, &err.to_string(), Some(projection)),
    }
    result
}

/// Apply the predicate part of `filters` to `plan`, leaving ordering and paging alone.
///
/// Clauses are added in a fixed order: free-text OR-group, owner, publication flag,
/// word-count threshold. Fails with `Validation` when a present filter has no column in
/// the plan's projection.
pub fn build_dynamic_query(plan: QueryPlan, filters: &FilterSet) -> Result<QueryPlan> {
    let projection = plan.projection();
    let mut plan = plan;

    if let Some(pattern) = filters.query_pattern() {
        if projection.search_columns.is_empty() {
            return Err(unsupported("query", projection.name));
        }
        plan = plan.where_any_like(projection.search_columns, &pattern);
    }

    if let Some(user_id) = filters.user_id {
        if !projection.has_column(USER_ID_COLUMN) {
            return Err(unsupported(USER_ID_COLUMN, projection.name));
        }
        plan = plan.where_eq(USER_ID_COLUMN, user_id);
    }

    if let Some(published) = filters.published {
        if !projection.has_column(PUBLISHED_COLUMN) {
            return Err(unsupported(PUBLISHED_COLUMN, projection.name));
        }
        plan = plan.where_eq(PUBLISHED_COLUMN, published);
    }

    if let Some(min_word_count) = filters.min_word_count {
        let column = projection
            .word_count_column
            .ok_or_else(|| unsupported("min_word_count", projection.name))?;
        plan = plan.where_compare(
            Operand::WordCount(column),
            CompareOperator::Gte,
            min_word_count,
        );
    }

    Ok(plan)
}

/// Append the normalized ordering and the LIMIT/OFFSET page of `filters`
pub fn apply_page(plan: QueryPlan, filters: &FilterSet) -> QueryPlan {
    plan.order_by(filters.order_by, filters.order_dir)
        .limit(filters.limit)
        .offset(filters.offset)
}

fn unsupported(filter: &str, projection: &str) -> SearchError {
    SearchError::validation(format!(
        "filter '{filter}' is not supported by projection '{projection}'"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query_builder::{PlaceholderStyle, SortDirection, SqlValue};

    fn params(query: &str) -> SearchParams {
        SearchParams {
            query: Some(query.to_string()),
            ..SearchParams::default()
        }
    }

    #[test]
    fn test_dynamic_query_predicate_order() {
        let filters = FilterSet::normalize(
            &SearchParams {
                query: Some("go".to_string()),
                user_id: Some(4),
                published: Some(true),
                min_word_count: Some(100),
                ..SearchParams::default()
            },
            &POSTS,
            PageLimits::default(),
        );
        let statement = build_dynamic_query(QueryPlan::select(&POSTS), &filters)
            .unwrap()
            .build(PlaceholderStyle::Dollar)
            .unwrap();

        assert_eq!(
            statement.sql,
            "SELECT id, user_id, title, content, published, created_at, updated_at FROM posts \
             WHERE (title LIKE $1 OR content LIKE $2) AND user_id = $3 AND published = $4 \
             AND LENGTH(content) - LENGTH(REPLACE(content, ' ', '')) + 1 >= $5"
        );
        assert_eq!(
            statement.params,
            vec![
                SqlValue::from("%go%"),
                SqlValue::from("%go%"),
                SqlValue::Int(4),
                SqlValue::Bool(true),
                SqlValue::Int(100),
            ]
        );
    }

    #[test]
    fn test_dynamic_query_adds_no_ordering_or_page() {
        let filters = FilterSet::normalize(&params("go"), &POSTS, PageLimits::default());
        let plan = build_dynamic_query(QueryPlan::select(&POSTS), &filters).unwrap();
        assert!(plan.ordering().is_empty());
        assert!(plan.pagination().is_none());
        assert_eq!(plan.predicates().len(), 1);
    }

    #[test]
    fn test_dynamic_query_rejects_foreign_filters() {
        let filters = FilterSet::normalize(
            &SearchParams {
                min_word_count: Some(3),
                ..SearchParams::default()
            },
            &POSTS,
            PageLimits::default(),
        );
        let err = build_dynamic_query(QueryPlan::select(&USERS), &filters).unwrap_err();
        assert!(matches!(err, SearchError::Validation { .. }));
    }

    #[test]
    fn test_apply_page() {
        let filters = FilterSet::normalize(
            &SearchParams {
                order_dir: Some("asc".to_string()),
                limit: Some(5),
                offset: Some(10),
                ..SearchParams::default()
            },
            &USERS,
            PageLimits::default(),
        );
        let statement = apply_page(QueryPlan::select(&USERS), &filters)
            .build(PlaceholderStyle::Question)
            .unwrap();
        assert_eq!(
            statement.sql,
            "SELECT id, name, email, created_at, updated_at FROM users \
             ORDER BY name ASC LIMIT ? OFFSET ?"
        );
        assert_eq!(statement.params, vec![SqlValue::Int(5), SqlValue::Int(10)]);
        assert_eq!(filters.order_dir, SortDirection::Asc);
    }
}
