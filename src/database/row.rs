//! Positional row decoding.
//!
//! Every record type decodes its columns by index in the exact order of the projection
//! it is read from. A row that is wider or narrower than the record is rejected before
//! any field is read.

use super::executor::{ExecutionContext, QueryExecutor};
use crate::error::{Result, SearchError};
use crate::query_builder::{SqlValue, Statement};
use chrono::{DateTime, Utc};

/// One result row, columns in projection order
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    values: Vec<SqlValue>,
}

impl Row {
    pub fn new(values: Vec<SqlValue>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    /// Fail unless the row has exactly `width` columns
    pub fn expect_width(&self, width: usize) -> Result<()> {
        if self.values.len() != width {
            return Err(SearchError::mapping(format!(
                "row has {} columns, record expects {width}",
                self.values.len()
            )));
        }
        Ok(())
    }

    fn value(&self, index: usize) -> Result<&SqlValue> {
        self.values.get(index).ok_or_else(|| {
            SearchError::mapping(format!(
                "column index {index} out of bounds (row has {})",
                self.values.len()
            ))
        })
    }

    fn mismatch(index: usize, expected: &str, found: &SqlValue) -> SearchError {
        SearchError::mapping(format!(
            "column {index}: expected {expected}, found {}",
            found.type_name()
        ))
    }

    pub fn int(&self, index: usize) -> Result<i64> {
        match self.value(index)? {
            SqlValue::Int(v) => Ok(*v),
            other => Err(Self::mismatch(index, "int", other)),
        }
    }

    pub fn float(&self, index: usize) -> Result<f64> {
        match self.value(index)? {
            SqlValue::Float(v) => Ok(*v),
            SqlValue::Int(v) => Ok(*v as f64),
            other => Err(Self::mismatch(index, "float", other)),
        }
    }

    pub fn boolean(&self, index: usize) -> Result<bool> {
        match self.value(index)? {
            SqlValue::Bool(v) => Ok(*v),
            other => Err(Self::mismatch(index, "bool", other)),
        }
    }

    pub fn text(&self, index: usize) -> Result<String> {
        match self.value(index)? {
            SqlValue::Text(v) => Ok(v.clone()),
            other => Err(Self::mismatch(index, "text", other)),
        }
    }

    pub fn timestamp(&self, index: usize) -> Result<DateTime<Utc>> {
        match self.value(index)? {
            SqlValue::Timestamp(v) => Ok(*v),
            other => Err(Self::mismatch(index, "timestamp", other)),
        }
    }

    /// Aggregate column: NULL reads as zero
    pub fn int_or_zero(&self, index: usize) -> Result<i64> {
        match self.value(index)? {
            SqlValue::Null => Ok(0),
            _ => self.int(index),
        }
    }

    /// Aggregate column: NULL reads as zero
    pub fn float_or_zero(&self, index: usize) -> Result<f64> {
        match self.value(index)? {
            SqlValue::Null => Ok(0.0),
            _ => self.float(index),
        }
    }

    /// Aggregate column: NULL reads as the empty string
    pub fn text_or_empty(&self, index: usize) -> Result<String> {
        match self.value(index)? {
            SqlValue::Null => Ok(String::new()),
            _ => self.text(index),
        }
    }
}

/// A record decoded by position from one row of a fixed projection
pub trait DecodeRow: Sized {
    /// Number of columns the record consumes
    const WIDTH: usize;

    fn decode(row: &Row) -> Result<Self>;

    /// Width check followed by [`DecodeRow::decode`]
    fn from_row(row: &Row) -> Result<Self> {
        row.expect_width(Self::WIDTH)?;
        Self::decode(row)
    }
}

/// Decode every row, preserving the order the datastore returned
pub fn decode_rows<T: DecodeRow>(rows: &[Row]) -> Result<Vec<T>> {
    rows.iter().map(T::from_row).collect()
}

/// Run a multi-row statement and decode the result
pub async fn fetch_records<T, E>(
    executor: &E,
    ctx: &ExecutionContext,
    statement: &Statement,
) -> Result<Vec<T>>
where
    T: DecodeRow,
    E: QueryExecutor + ?Sized,
{
    let rows = executor.fetch_all(ctx, statement).await?;
    decode_rows(&rows)
}

/// Run a keyed lookup; zero rows is `NotFound` naming `resource`
pub async fn fetch_record<T, E>(
    executor: &E,
    ctx: &ExecutionContext,
    statement: &Statement,
    resource: &str,
) -> Result<T>
where
    T: DecodeRow,
    E: QueryExecutor + ?Sized,
{
    match executor.fetch_one(ctx, statement).await {
        Ok(row) => T::from_row(&row),
        Err(SearchError::NotFound { .. }) => Err(SearchError::not_found(resource)),
        Err(other) => Err(other),
    }
}

/// Run a single-row aggregate; zero rows yields `T::default()`
pub async fn fetch_aggregate<T, E>(
    executor: &E,
    ctx: &ExecutionContext,
    statement: &Statement,
) -> Result<T>
where
    T: DecodeRow + Default,
    E: QueryExecutor + ?Sized,
{
    match executor.fetch_optional(ctx, statement).await? {
        Some(row) => T::from_row(&row),
        None => Ok(T::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Pair {
        id: i64,
        label: String,
    }

    impl DecodeRow for Pair {
        const WIDTH: usize = 2;

        fn decode(row: &Row) -> Result<Self> {
            Ok(Self {
                id: row.int(0)?,
                label: row.text(1)?,
            })
        }
    }

    #[test]
    fn test_decode_by_position() {
        let row = Row::new(vec![SqlValue::Int(4), SqlValue::from("four")]);
        assert_eq!(
            Pair::from_row(&row).unwrap(),
            Pair {
                id: 4,
                label: "four".to_string()
            }
        );
    }

    #[test]
    fn test_width_mismatch_is_fatal() {
        let wide = Row::new(vec![
            SqlValue::Int(4),
            SqlValue::from("four"),
            SqlValue::Bool(true),
        ]);
        assert!(matches!(
            Pair::from_row(&wide),
            Err(SearchError::Mapping { .. })
        ));

        let narrow = Row::new(vec![SqlValue::Int(4)]);
        assert!(matches!(
            Pair::from_row(&narrow),
            Err(SearchError::Mapping { .. })
        ));
    }

    #[test]
    fn test_type_mismatch_names_column() {
        let row = Row::new(vec![SqlValue::from("x"), SqlValue::from("four")]);
        let err = Pair::from_row(&row).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Row mapping error: column 0: expected int, found text"
        );
    }

    #[test]
    fn test_null_aggregates_default() {
        let row = Row::new(vec![SqlValue::Null, SqlValue::Null, SqlValue::Null]);
        assert_eq!(row.int_or_zero(0).unwrap(), 0);
        assert_eq!(row.float_or_zero(1).unwrap(), 0.0);
        assert_eq!(row.text_or_empty(2).unwrap(), "");
        assert!(row.int(0).is_err());
    }

    #[test]
    fn test_decode_rows_preserves_order() {
        let rows: Vec<Row> = [3, 1, 2]
            .into_iter()
            .map(|id| Row::new(vec![SqlValue::Int(id), SqlValue::from(format!("n{id}"))]))
            .collect();
        let ids: Vec<i64> = decode_rows::<Pair>(&rows)
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }
}
