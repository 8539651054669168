//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Discount API                       │
//! │                                                                         │
//! │  Handler -> Result<T, ApiError>                                        │
//! │       │                                                                 │
//! │       ├── JsonRejection ─────────────────► INVALID_REQUEST   400       │
//! │       ├── CoreError::Validation/InvalidCart ► VALIDATION_ERROR 400     │
//! │       ├── DbError::NotFound ─────────────► NOT_FOUND         404       │
//! │       ├── DbError::DuplicateKey ─────────► CONFLICT          409       │
//! │       ├── DbError::{Connection,Pool,..} ─► DATABASE_ERROR    500       │
//! │       └── Ok(None) from apply ───────────► NO_APPLICABLE_DISCOUNT 404  │
//! │                                                                         │
//! │  Body:  { "code": "NOT_FOUND", "message": "Discount not found: 7" }    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Internal failures are logged with their detail; the response carries
//! only a generic message.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use discount_core::{CoreError, ValidationError};
use discount_db::{DbError, EngineError};
use serde::Serialize;

/// API error returned from handlers.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Discount not found: 7"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Apply found nothing worth applying (404)
    NoApplicableDiscount,

    /// Body could not be parsed (400)
    InvalidRequest,

    /// Input validation failed (400)
    ValidationError,

    /// Id already taken (409)
    Conflict,

    /// Store operation failed (500)
    DatabaseError,

    /// Store not reachable (503)
    Unavailable,

    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    /// HTTP status for this code.
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::NotFound | ErrorCode::NoApplicableDiscount => StatusCode::NOT_FOUND,
            ErrorCode::InvalidRequest | ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::DatabaseError | ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// The "apply" outcome when no discount wins.
    pub fn no_applicable_discount() -> Self {
        ApiError::new(ErrorCode::NoApplicableDiscount, "No applicable discount.")
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::DuplicateKey { entity, id } => ApiError::new(
                ErrorCode::Conflict,
                format!("{} '{}' already exists", entity, id),
            ),
            DbError::ConnectionFailed(e) => {
                tracing::error!("Store connection failed: {}", e);
                ApiError::new(ErrorCode::Unavailable, "Discount store unavailable")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::Unavailable, "Discount store is busy")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Migration failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                tracing::error!("Query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::Decode { id, column, reason } => {
                tracing::error!(%id, %column, "Corrupt discount row: {}", reason);
                ApiError::new(ErrorCode::DatabaseError, "Stored discount is unreadable")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal store error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidCart { reason } => {
                ApiError::validation(format!("Invalid cart: {}", reason))
            }
            CoreError::AmountOverflow { .. } => {
                ApiError::validation("Amounts are too large to compute")
            }
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Store(e) => e.into(),
            EngineError::Core(e) => e.into(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::new(ErrorCode::InvalidRequest, rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_errors_map_to_status() {
        let cases = [
            (DbError::not_found("Discount", "7"), StatusCode::NOT_FOUND),
            (DbError::duplicate("Discount", "7"), StatusCode::CONFLICT),
            (DbError::PoolExhausted, StatusCode::SERVICE_UNAVAILABLE),
            (
                DbError::QueryFailed("syntax".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).code.status(), status);
        }
    }

    #[test]
    fn test_internal_detail_is_not_leaked() {
        let err = ApiError::from(DbError::Internal("lock poisoned at 0xdead".into()));
        assert!(!err.message.contains("0xdead"));
    }

    #[test]
    fn test_wire_shape() {
        let json = serde_json::to_value(ApiError::no_applicable_discount()).unwrap();
        assert_eq!(json["code"], "NO_APPLICABLE_DISCOUNT");
        assert_eq!(json["message"], "No applicable discount.");
    }

    #[test]
    fn test_internal_is_server_error() {
        let err = ApiError::internal("Discount id cannot be addressed");
        assert_eq!(err.code, ErrorCode::Internal);
        assert_eq!(err.code.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(serde_json::to_value(&err).unwrap()["code"], "INTERNAL");
    }

    #[test]
    fn test_validation_errors_are_bad_request() {
        let err = ApiError::from(CoreError::Validation(ValidationError::Required {
            field: "id".into(),
        }));
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.code.status(), StatusCode::BAD_REQUEST);
    }
}
