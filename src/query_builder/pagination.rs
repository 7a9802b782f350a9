use super::placeholders::Placeholders;
use super::SqlValue;

/// Represents LIMIT/OFFSET bounds for SQL queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl Pagination {
    /// Create pagination with only limit
    pub fn limit_only(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            offset: None,
        }
    }

    /// Create pagination with only offset
    pub fn offset_only(offset: u32) -> Self {
        Self {
            limit: None,
            offset: Some(offset),
        }
    }

    /// Create pagination with both limit and offset
    pub fn limit_offset(limit: u32, offset: u32) -> Self {
        Self {
            limit: Some(limit),
            offset: Some(offset),
        }
    }

    /// Convert to SQL, binding both bounds as parameters
    pub fn to_sql(&self, placeholders: &mut Placeholders) -> String {
        let mut sql = String::new();

        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {}", placeholders.bind(SqlValue::from(limit))));
        }

        if let Some(offset) = self.offset {
            sql.push_str(&format!(
                " OFFSET {}",
                placeholders.bind(SqlValue::from(offset))
            ));
        }

        sql
    }
}
