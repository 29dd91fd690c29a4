//! # API Errors
//!
//! The error every operation reports: a message plus the status code the
//! boundary answers with.

use thiserror::Error;
use uuid::Uuid;

use crate::geocoding::GeocodeError;
use crate::model::ValidationError;
use crate::query::QueryError;
use crate::store::StoreError;

/// Result type for operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Operation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Referenced entity does not exist
    #[error("{0}")]
    NotFound(String),

    /// Missing or malformed input
    #[error("{0}")]
    BadRequest(String),

    /// Downstream failure
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::NotFound(_) => 404,
            ApiError::BadRequest(_) => 400,
            ApiError::Internal(_) => 500,
        }
    }

    pub fn bootcamp_not_found(id: impl std::fmt::Display) -> Self {
        ApiError::NotFound(format!("Bootcamp not found with id of {}", id))
    }

    pub fn course_not_found(id: impl std::fmt::Display) -> Self {
        ApiError::NotFound(format!("No course found with the id of {}", id))
    }
}

/// Parse a path id; anything that is not a UUID cannot exist
pub fn parse_id(raw: &str, not_found: fn(&str) -> ApiError) -> ApiResult<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| not_found(raw))
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate { .. } => {
                ApiError::BadRequest("Duplicate field value entered".to_string())
            }
            StoreError::MissingReference { collection, id } => {
                ApiError::NotFound(format!("No {} found with the id of {}", collection, id))
            }
            StoreError::Backend(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<GeocodeError> for ApiError {
    fn from(err: GeocodeError) -> Self {
        match err {
            GeocodeError::NoMatch(_) => ApiError::BadRequest(err.to_string()),
            GeocodeError::Provider(_) | GeocodeError::Misconfigured(_) => {
                ApiError::Internal(err.to_string())
            }
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Internal(format!("Serialization error: {}", err))
    }
}
