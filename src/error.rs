//! # Search Error Types
//!
//! One error kind per failure class of the search core. Filter normalization never
//! produces an error; everything else propagates to the immediate caller unchanged in
//! kind, so a caller can tell "no such post" apart from "the database went away".

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    /// A value that normalization should have rejected reached the builder anyway
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Not found: {resource}")]
    NotFound { resource: String },

    /// Malformed projection or predicate; always a programming error
    #[error("Query build error: {message}")]
    Build { message: String },

    #[error("Execution error: {operation}: {message}")]
    Execution { operation: String, message: String },

    #[error("Cancelled: {operation}: {reason}")]
    Cancelled { operation: String, reason: String },

    #[error("Row mapping error: {message}")]
    Mapping { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl SearchError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }

    pub fn execution(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Execution {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn cancelled(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Cancelled {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    pub fn mapping(message: impl Into<String>) -> Self {
        Self::Mapping {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

impl From<sqlx::Error> for SearchError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::not_found("statement returned no rows"),
            sqlx::Error::ColumnIndexOutOfBounds { index, len } => {
                Self::mapping(format!("column index {index} out of bounds (row has {len})"))
            }
            sqlx::Error::ColumnNotFound(name) => Self::mapping(format!("column not found: {name}")),
            sqlx::Error::ColumnDecode { index, source } => {
                Self::mapping(format!("failed to decode column {index}: {source}"))
            }
            sqlx::Error::Decode(source) => Self::mapping(format!("failed to decode value: {source}")),
            other => Self::execution("statement", other.to_string()),
        }
    }
}

impl From<::config::ConfigError> for SearchError {
    fn from(err: ::config::ConfigError) -> Self {
        Self::configuration(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err: SearchError = sqlx::Error::RowNotFound.into();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_decode_errors_map_to_mapping() {
        let err: SearchError = sqlx::Error::ColumnIndexOutOfBounds { index: 7, len: 5 }.into();
        assert!(matches!(err, SearchError::Mapping { .. }));

        let err: SearchError = sqlx::Error::ColumnNotFound("title".to_string()).into();
        assert_eq!(err.to_string(), "Row mapping error: column not found: title");
    }

    #[test]
    fn test_other_driver_errors_map_to_execution() {
        let err: SearchError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, SearchError::Execution { .. }));
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            SearchError::cancelled("search_posts", "deadline elapsed").to_string(),
            "Cancelled: search_posts: deadline elapsed"
        );
        assert_eq!(
            SearchError::not_found("post 42").to_string(),
            "Not found: post 42"
        );
    }
}
