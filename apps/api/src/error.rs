//! # API Error Type
//!
//! Unified error type for API handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Error Flow in the API                              │
//! │                                                                         │
//! │  Handler                                                                │
//! │  Result<T, ApiError>                                                   │
//! │         │                                                               │
//! │         ├── DbError::NotFound ─────────► 404 NOT_FOUND                 │
//! │         ├── DbError::UniqueViolation ──► 409 ALREADY_EXISTS            │
//! │         ├── CoreError::Validation ─────► 422 VALIDATION_ERROR          │
//! │         ├── missing/invalid token ─────► 401 NOT_AUTHENTICATED         │
//! │         └── anything else ─────────────► 500 DATABASE_ERROR/INTERNAL   │
//! │                                                                         │
//! │  Body: { "code": "NOT_FOUND", "message": "Car not found: ..." }        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every failure is a transient notification on the client; nothing is
//! retried automatically.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use rentora_core::CoreError;
use rentora_db::DbError;

/// API error returned from handlers.
///
/// ## Serialization
/// ```json
/// { "code": "NOT_FOUND", "message": "Car not found: abc" }
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
    /// No identity on a route that requires one (401)
    NotAuthenticated,

    /// Resource not found (404)
    NotFound,

    /// Conflicting row already exists (409)
    AlreadyExists,

    /// Input validation failed (422)
    ValidationError,

    /// Database operation failed (500)
    DatabaseError,

    /// Internal server error (500)
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not-authenticated error.
    pub fn not_authenticated() -> Self {
        ApiError::new(ErrorCode::NotAuthenticated, "Not authenticated!")
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an already-exists conflict error.
    pub fn already_exists(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::AlreadyExists, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    fn status(&self) -> StatusCode {
        match self.code {
            ErrorCode::NotAuthenticated => StatusCode::UNAUTHORIZED,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::AlreadyExists => StatusCode::CONFLICT,
            ErrorCode::ValidationError => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::DatabaseError | ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::UniqueViolation { field } => {
                ApiError::already_exists(format!("Duplicate {}: already exists", field))
            }
            DbError::ForeignKeyViolation { message } => {
                tracing::error!("Foreign key violation: {}", message);
                ApiError::validation("Invalid reference")
            }
            DbError::ConnectionFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::CorruptRecord(e) => {
                tracing::error!("Corrupt stored record: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core domain errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::CityNotFound(id) => {
                ApiError::validation(format!("City not found: {}", id))
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Unit Tests
// =============================================================================
