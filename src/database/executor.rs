use super::row::Row;
use crate::error::{Result, SearchError};
use crate::query_builder::Statement;
use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Per-call cancellation scope: a cancellation token plus an optional deadline
#[derive(Debug, Clone, Default)]
pub struct ExecutionContext {
    cancellation: CancellationToken,
    deadline: Option<Instant>,
}

impl ExecutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context cancelled through `token`
    pub fn with_cancellation(token: CancellationToken) -> Self {
        Self {
            cancellation: token,
            deadline: None,
        }
    }

    /// Same context with a deadline `timeout` from now, keeping any earlier deadline
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        let deadline = Instant::now() + timeout;
        self.deadline = Some(match self.deadline {
            Some(existing) if existing < deadline => existing,
            _ => deadline,
        });
        self
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancellation
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
            || self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Drive `operation` to completion unless the context ends first.
    ///
    /// When the context wins, the operation future is dropped, which releases any
    /// connection or cursor it was holding.
    pub async fn run<F, T>(&self, operation: &str, future: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if self.cancellation.is_cancelled() {
            return Err(SearchError::cancelled(operation, "cancelled before start"));
        }

        let deadline = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = self.cancellation.cancelled() => {
                Err(SearchError::cancelled(operation, "execution context cancelled"))
            }
            _ = deadline => {
                Err(SearchError::cancelled(operation, "deadline elapsed"))
            }
            result = future => result,
        }
    }
}

/// The datastore seam: run a parameterized statement and hand back positional rows.
///
/// Implementations must run the statement inside [`ExecutionContext::run`] (or an
/// equivalent) so that cancellation surfaces as [`SearchError::Cancelled`].
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Zero or more rows, in the order the datastore returned them
    async fn fetch_all(&self, ctx: &ExecutionContext, statement: &Statement) -> Result<Vec<Row>>;

    /// The first row, if any
    async fn fetch_optional(
        &self,
        ctx: &ExecutionContext,
        statement: &Statement,
    ) -> Result<Option<Row>>;

    /// The first row, or `NotFound`
    async fn fetch_one(&self, ctx: &ExecutionContext, statement: &Statement) -> Result<Row> {
        self.fetch_optional(ctx, statement)
            .await?
            .ok_or_else(|| SearchError::not_found("statement returned no rows"))
    }
}
