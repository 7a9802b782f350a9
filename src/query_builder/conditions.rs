use super::placeholders::Placeholders;
use super::SqlValue;
use crate::error::{Result, SearchError};

/// Left-hand side of a comparison. Column names are `'static` so they can only come
/// from the crate's own projections, never from caller input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Column(&'static str),
    /// Whitespace-delimited word count of a text column
    WordCount(&'static str),
}

impl Operand {
    pub fn to_sql(&self) -> String {
        match self {
            Operand::Column(column) => (*column).to_string(),
            Operand::WordCount(column) => {
                format!("LENGTH({column}) - LENGTH(REPLACE({column}, ' ', '')) + 1")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOperator {
    Eq,
    NotEq,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl CompareOperator {
    pub fn to_sql(&self) -> &'static str {
        match self {
            CompareOperator::Eq => "=",
            CompareOperator::NotEq => "<>",
            CompareOperator::Gt => ">",
            CompareOperator::Gte => ">=",
            CompareOperator::Lt => "<",
            CompareOperator::Lte => "<=",
        }
    }
}

/// Represents the supported predicate shapes
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Eq {
        column: &'static str,
        value: SqlValue,
    },
    Like {
        column: &'static str,
        pattern: String,
    },
    Compare {
        operand: Operand,
        operator: CompareOperator,
        value: SqlValue,
    },
}

impl Condition {
    /// Render the condition, binding its value through `placeholders`
    pub fn to_sql(&self, placeholders: &mut Placeholders) -> String {
        match self {
            Condition::Eq { column, value } => {
                format!("{column} = {}", placeholders.bind(value.clone()))
            }
            Condition::Like { column, pattern } => {
                format!(
                    "{column} LIKE {}",
                    placeholders.bind(SqlValue::Text(pattern.clone()))
                )
            }
            Condition::Compare {
                operand,
                operator,
                value,
            } => format!(
                "{} {} {}",
                operand.to_sql(),
                operator.to_sql(),
                placeholders.bind(value.clone())
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOperator {
    And,
    Or,
}

/// One predicate clause of a WHERE: a single condition or a group joined by AND/OR
#[derive(Debug, Clone, PartialEq)]
pub struct WhereClause {
    pub conditions: Vec<Condition>,
    pub operator: LogicalOperator,
}

impl WhereClause {
    /// `column = value`
    pub fn eq(column: &'static str, value: impl Into<SqlValue>) -> Self {
        Self {
            conditions: vec![Condition::Eq {
                column,
                value: value.into(),
            }],
            operator: LogicalOperator::And,
        }
    }

    /// `column LIKE pattern`
    pub fn like(column: &'static str, pattern: impl Into<String>) -> Self {
        Self {
            conditions: vec![Condition::Like {
                column,
                pattern: pattern.into(),
            }],
            operator: LogicalOperator::And,
        }
    }

    /// Same pattern against each column, OR-combined
    pub fn any_like(columns: &[&'static str], pattern: &str) -> Self {
        Self::or(
            columns
                .iter()
                .copied()
                .map(|column| Condition::Like {
                    column,
                    pattern: pattern.to_string(),
                })
                .collect(),
        )
    }

    pub fn compare(
        operand: Operand,
        operator: CompareOperator,
        value: impl Into<SqlValue>,
    ) -> Self {
        Self {
            conditions: vec![Condition::Compare {
                operand,
                operator,
                value: value.into(),
            }],
            operator: LogicalOperator::And,
        }
    }

    /// Combine multiple conditions with OR
    pub fn or(conditions: Vec<Condition>) -> Self {
        Self {
            conditions,
            operator: LogicalOperator::Or,
        }
    }

    /// Convert to SQL. Groups of two or more are parenthesized so that an OR group
    /// cannot absorb neighbouring AND clauses.
    pub fn to_sql(&self, placeholders: &mut Placeholders) -> Result<String> {
        if self.conditions.is_empty() {
            return Err(SearchError::build("predicate group has no conditions"));
        }

        if self.conditions.len() == 1 {
            return Ok(self.conditions[0].to_sql(placeholders));
        }

        let operator_str = match self.operator {
            LogicalOperator::And => " AND ",
            LogicalOperator::Or => " OR ",
        };

        let condition_sqls: Vec<String> = self
            .conditions
            .iter()
            .map(|c| c.to_sql(placeholders))
            .collect();

        Ok(format!("({})", condition_sqls.join(operator_str)))
    }
}
