//! Service error types with HTTP status code mapping.
//!
//! [`EventDeskError`] is the central error type. Driver errors are
//! classified on conversion so that callers can tell an unreachable
//! database from a constraint violation or a missing row.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{EventId, TicketId};

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 2002,
///     "message": "ticket not found: 17"
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category              | HTTP Status               |
/// |-----------|-----------------------|---------------------------|
/// | 1000–1999 | Validation            | 400 Bad Request           |
/// | 2000–2999 | Not Found / Conflict  | 404 Not Found / 409       |
/// | 3000–3999 | Server / Store        | 500 / 503                 |
#[derive(Debug, thiserror::Error)]
pub enum EventDeskError {
    /// Input rejected before reaching the store.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Event with the given ID does not exist.
    #[error("event not found: {0}")]
    EventNotFound(EventId),

    /// Ticket type with the given ID does not exist.
    #[error("ticket not found: {0}")]
    TicketNotFound(TicketId),

    /// A foreign-key, uniqueness or check constraint rejected the write.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// The database could not be reached.
    #[error("database connection failed: {0}")]
    ConnectionFailed(String),

    /// Any other store failure.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl EventDeskError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::Validation(_) => 1001,
            Self::EventNotFound(_) => 2001,
            Self::TicketNotFound(_) => 2002,
            Self::ConstraintViolation(_) => 2003,
            Self::Internal(_) => 3000,
            Self::Persistence(_) => 3001,
            Self::ConnectionFailed(_) => 3002,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::EventNotFound(_) | Self::TicketNotFound(_) => StatusCode::NOT_FOUND,
            Self::ConstraintViolation(_) => StatusCode::CONFLICT,
            Self::ConnectionFailed(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Persistence(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns `true` when the store was unreachable and nothing was attempted.
    #[must_use]
    pub const fn is_connection_failure(&self) -> bool {
        matches!(self, Self::ConnectionFailed(_))
    }
}

impl From<sqlx::Error> for EventDeskError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed => Self::ConnectionFailed(err.to_string()),
            sqlx::Error::Database(db)
                if db.is_foreign_key_violation()
                    || db.is_unique_violation()
                    || db.is_check_violation() =>
            {
                Self::ConstraintViolation(db.message().to_string())
            }
            _ => Self::Persistence(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for EventDeskError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        Self::Persistence(format!("migration failed: {err}"))
    }
}

impl IntoResponse for EventDeskError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_ranges() {
        assert_eq!(EventDeskError::Validation(String::new()).error_code(), 1001);
        assert_eq!(EventDeskError::EventNotFound(EventId::new(1)).error_code(), 2001);
        assert_eq!(
            EventDeskError::TicketNotFound(TicketId::new(1)).error_code(),
            2002
        );
        assert_eq!(
            EventDeskError::ConnectionFailed(String::new()).error_code(),
            3002
        );
    }

    #[test]
    fn status_codes() {
        assert_eq!(
            EventDeskError::Validation(String::new()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            EventDeskError::TicketNotFound(TicketId::new(1)).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            EventDeskError::ConstraintViolation(String::new()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            EventDeskError::ConnectionFailed(String::new()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn pool_timeout_is_connection_failure() {
        let err = EventDeskError::from(sqlx::Error::PoolTimedOut);
        assert!(err.is_connection_failure());
    }

    #[test]
    fn row_not_found_is_persistence_error() {
        let err = EventDeskError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, EventDeskError::Persistence(_)));
    }

    #[test]
    fn into_response_sets_status() {
        let response = EventDeskError::EventNotFound(EventId::new(5)).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn response_body_carries_code_and_message_only() {
        let response = EventDeskError::EventNotFound(EventId::new(5)).into_response();
        let Ok(bytes) = axum::body::to_bytes(response.into_body(), usize::MAX).await else {
            panic!("unreadable body");
        };
        let Ok(body) = serde_json::from_slice::<serde_json::Value>(&bytes) else {
            panic!("body is not json");
        };
        let Some(error) = body.get("error").and_then(serde_json::Value::as_object) else {
            panic!("missing error object");
        };
        let mut keys: Vec<&str> = error.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["code", "message"]);
        assert_eq!(error.get("code").and_then(serde_json::Value::as_u64), Some(2001));
    }
}
