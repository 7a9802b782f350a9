//! Shared fixtures for integration tests: an in-memory [`QueryExecutor`] that records
//! every statement it is given and answers with canned rows.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use postsearch_core::database::{ExecutionContext, QueryExecutor, Row};
use postsearch_core::query_builder::{SqlValue, Statement};
use postsearch_core::{Result, SearchError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub enum StubMode {
    /// Answer every statement with the canned rows
    Rows(Vec<Row>),
    /// Fail every statement with this error
    Fail(SearchError),
    /// Never answer; the call only ends through its execution context
    Pending,
}

/// Tracks whether a simulated cursor was opened and released
#[derive(Debug, Default)]
pub struct CursorState {
    opened: AtomicBool,
    released: AtomicBool,
}

impl CursorState {
    pub fn opened(&self) -> bool {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> bool {
        self.released.load(Ordering::SeqCst)
    }
}

struct CursorGuard(Arc<CursorState>);

impl CursorGuard {
    fn open(state: &Arc<CursorState>) -> Self {
        state.opened.store(true, Ordering::SeqCst);
        Self(Arc::clone(state))
    }
}

impl Drop for CursorGuard {
    fn drop(&mut self) {
        self.0.released.store(true, Ordering::SeqCst);
    }
}

pub struct StubExecutor {
    mode: StubMode,
    statements: Mutex<Vec<Statement>>,
    cursor: Arc<CursorState>,
}

impl StubExecutor {
    pub fn with_rows(rows: Vec<Row>) -> Self {
        Self::new(StubMode::Rows(rows))
    }

    pub fn empty() -> Self {
        Self::with_rows(Vec::new())
    }

    pub fn failing(error: SearchError) -> Self {
        Self::new(StubMode::Fail(error))
    }

    pub fn pending() -> Self {
        Self::new(StubMode::Pending)
    }

    fn new(mode: StubMode) -> Self {
        Self {
            mode,
            statements: Mutex::new(Vec::new()),
            cursor: Arc::new(CursorState::default()),
        }
    }

    pub fn statements(&self) -> Vec<Statement> {
        self.statements.lock().unwrap().clone()
    }

    pub fn last_statement(&self) -> Statement {
        self.statements()
            .pop()
            .expect("executor received no statement")
    }

    pub fn cursor(&self) -> &CursorState {
        &self.cursor
    }

    async fn answer(&self, ctx: &ExecutionContext, statement: &Statement) -> Result<Vec<Row>> {
        self.statements.lock().unwrap().push(statement.clone());
        ctx.run("stub", async {
            let _cursor = CursorGuard::open(&self.cursor);
            match &self.mode {
                StubMode::Rows(rows) => Ok(rows.clone()),
                StubMode::Fail(error) => Err(error.clone()),
                StubMode::Pending => std::future::pending().await,
            }
        })
        .await
    }
}

#[async_trait]
impl QueryExecutor for StubExecutor {
    async fn fetch_all(&self, ctx: &ExecutionContext, statement: &Statement) -> Result<Vec<Row>> {
        self.answer(ctx, statement).await
    }

    async fn fetch_optional(
        &self,
        ctx: &ExecutionContext,
        statement: &Statement,
    ) -> Result<Option<Row>> {
        Ok(self.answer(ctx, statement).await?.into_iter().next())
    }
}

pub fn timestamp(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap()
}

pub fn post_row(id: i64, title: &str) -> Row {
    Row::new(vec![
        SqlValue::Int(id),
        SqlValue::Int(1),
        SqlValue::from(title),
        SqlValue::from("some go content"),
        SqlValue::Bool(true),
        SqlValue::Timestamp(timestamp(1)),
        SqlValue::Timestamp(timestamp(2)),
    ])
}

pub fn user_row(id: i64, name: &str) -> Row {
    Row::new(vec![
        SqlValue::Int(id),
        SqlValue::from(name),
        SqlValue::from(format!("{}@example.com", name.to_lowercase())),
        SqlValue::Timestamp(timestamp(1)),
        SqlValue::Timestamp(timestamp(1)),
    ])
}
