use super::conditions::{CompareOperator, Operand};
use super::placeholders::{PlaceholderStyle, Placeholders};
use super::{OrderBy, Pagination, Projection, SortDirection, SqlValue, WhereClause};
use crate::error::{Result, SearchError};

/// SQL text plus its parameters, in placeholder order
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

/// Immutable description of a SELECT over a fixed projection.
///
/// Every clause-adding method consumes the plan and returns the extended one, so a base
/// plan is never changed behind anyone's back; branch with `clone()` to build several
/// queries from the same base. Building is pure and never touches the database.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    projection: &'static Projection,
    where_clauses: Vec<WhereClause>,
    order_by: Vec<OrderBy>,
    pagination: Option<Pagination>,
}

impl QueryPlan {
    /// Start a plan selecting the projection's columns
    pub fn select(projection: &'static Projection) -> Self {
        Self {
            projection,
            where_clauses: Vec::new(),
            order_by: Vec::new(),
            pagination: None,
        }
    }

    pub fn projection(&self) -> &'static Projection {
        self.projection
    }

    /// Predicate clauses in the order they were added
    pub fn predicates(&self) -> &[WhereClause] {
        &self.where_clauses
    }

    pub fn ordering(&self) -> &[OrderBy] {
        &self.order_by
    }

    pub fn pagination(&self) -> Option<Pagination> {
        self.pagination
    }

    /// Add a WHERE clause (AND-combined with the others)
    pub fn where_clause(mut self, clause: WhereClause) -> Self {
        self.where_clauses.push(clause);
        self
    }

    pub fn where_eq(self, column: &'static str, value: impl Into<SqlValue>) -> Self {
        self.where_clause(WhereClause::eq(column, value))
    }

    pub fn where_like(self, column: &'static str, pattern: impl Into<String>) -> Self {
        self.where_clause(WhereClause::like(column, pattern))
    }

    /// OR-group matching `pattern` against every column in `columns`
    pub fn where_any_like(self, columns: &[&'static str], pattern: &str) -> Self {
        self.where_clause(WhereClause::any_like(columns, pattern))
    }

    pub fn where_compare(
        self,
        operand: Operand,
        operator: CompareOperator,
        value: impl Into<SqlValue>,
    ) -> Self {
        self.where_clause(WhereClause::compare(operand, operator, value))
    }

    /// Add ORDER BY clause. The column is checked against the projection's
    /// allow-list when the plan is built.
    pub fn order_by(mut self, column: impl Into<String>, direction: SortDirection) -> Self {
        self.order_by.push(OrderBy::new(column, direction));
        self
    }

    pub fn order_asc(self, column: impl Into<String>) -> Self {
        self.order_by(column, SortDirection::Asc)
    }

    pub fn order_desc(self, column: impl Into<String>) -> Self {
        self.order_by(column, SortDirection::Desc)
    }

    /// Add LIMIT clause
    pub fn limit(mut self, limit: u32) -> Self {
        if let Some(ref mut pagination) = self.pagination {
            pagination.limit = Some(limit);
        } else {
            self.pagination = Some(Pagination::limit_only(limit));
        }
        self
    }

    /// Add OFFSET clause
    pub fn offset(mut self, offset: u32) -> Self {
        if let Some(ref mut pagination) = self.pagination {
            pagination.offset = Some(offset);
        } else {
            self.pagination = Some(Pagination::offset_only(offset));
        }
        self
    }

    /// Render the plan into SQL text and its ordered parameter list
    pub fn build(&self, style: PlaceholderStyle) -> Result<Statement> {
        self.check_projection()?;
        self.check_ordering()?;

        let mut placeholders = Placeholders::new(style);
        let mut sql = format!(
            "SELECT {} FROM {}",
            self.projection.columns.join(", "),
            self.projection.table
        );

        self.push_joins_and_predicates(&mut sql, &mut placeholders)?;

        if self.projection.is_grouped() {
            sql.push_str(&format!(" GROUP BY {}", self.projection.group_by.join(", ")));
        }

        if !self.order_by.is_empty() {
            let terms: Vec<String> = self.order_by.iter().map(OrderBy::to_sql).collect();
            sql.push_str(&format!(" ORDER BY {}", terms.join(", ")));
        }

        if let Some(ref pagination) = self.pagination {
            sql.push_str(&pagination.to_sql(&mut placeholders));
        }

        Ok(Statement {
            sql,
            params: placeholders.into_params(),
        })
    }

    /// `SELECT COUNT(*)` over the same predicates, without ordering or pagination
    pub fn build_count(&self, style: PlaceholderStyle) -> Result<Statement> {
        self.check_projection()?;
        if self.projection.is_grouped() {
            return Err(SearchError::build(format!(
                "cannot count grouped projection '{}'",
                self.projection.name
            )));
        }

        let mut placeholders = Placeholders::new(style);
        let mut sql = format!("SELECT COUNT(*) FROM {}", self.projection.table);
        self.push_joins_and_predicates(&mut sql, &mut placeholders)?;

        Ok(Statement {
            sql,
            params: placeholders.into_params(),
        })
    }

    fn push_joins_and_predicates(
        &self,
        sql: &mut String,
        placeholders: &mut Placeholders,
    ) -> Result<()> {
        for join in self.projection.joins {
            sql.push(' ');
            sql.push_str(&join.to_sql());
        }

        if !self.where_clauses.is_empty() {
            let where_parts = self
                .where_clauses
                .iter()
                .map(|clause| clause.to_sql(placeholders))
                .collect::<Result<Vec<_>>>()?;
            sql.push_str(" WHERE ");
            sql.push_str(&where_parts.join(" AND "));
        }

        Ok(())
    }

    fn check_projection(&self) -> Result<()> {
        if self.projection.table.trim().is_empty() {
            return Err(SearchError::build(format!(
                "projection '{}' has no table",
                self.projection.name
            )));
        }
        if self.projection.columns.is_empty() {
            return Err(SearchError::build(format!(
                "projection '{}' selects no columns",
                self.projection.name
            )));
        }
        Ok(())
    }

    fn check_ordering(&self) -> Result<()> {
        match self
            .order_by
            .iter()
            .find(|term| !self.projection.is_sortable(&term.column))
        {
            Some(term) => Err(SearchError::validation(format!(
                "ordering column '{}' is not allowed for '{}'",
                term.column, self.projection.name
            ))),
            None => Ok(()),
        }
    }
}
