/// Represents different types of SQL JOINs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    Inner,
    Left,
}

impl JoinType {
    pub fn to_sql(&self) -> &'static str {
        match self {
            JoinType::Inner => "JOIN",
            JoinType::Left => "LEFT JOIN",
        }
    }
}

/// A JOIN that is part of a fixed projection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Join {
    pub join_type: JoinType,
    pub table: &'static str,
    pub on_condition: &'static str,
}

impl Join {
    pub const fn inner(table: &'static str, on_condition: &'static str) -> Self {
        Self {
            join_type: JoinType::Inner,
            table,
            on_condition,
        }
    }

    pub const fn left(table: &'static str, on_condition: &'static str) -> Self {
        Self {
            join_type: JoinType::Left,
            table,
            on_condition,
        }
    }

    pub fn to_sql(&self) -> String {
        format!(
            "{} {} ON {}",
            self.join_type.to_sql(),
            self.table,
            self.on_condition
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inner_join() {
        let join = Join::inner("users u", "p.user_id = u.id");
        assert_eq!(join.to_sql(), "JOIN users u ON p.user_id = u.id");
    }

    #[test]
    fn test_left_join() {
        let join = Join::left("posts p", "u.id = p.user_id");
        assert_eq!(join.to_sql(), "LEFT JOIN posts p ON u.id = p.user_id");
    }
}
