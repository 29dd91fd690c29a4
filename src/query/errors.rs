//! # List Shaping Errors

use thiserror::Error;

/// Result type for query parsing
pub type QueryResult<T> = Result<T, QueryError>;

/// Query string errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Invalid query parameter: {0}")]
    InvalidParam(String),

    #[error("Unknown filter operator: {0}")]
    UnknownOperator(String),

    #[error("Limit {0} exceeds maximum {1}")]
    LimitExceeded(usize, usize),
}
