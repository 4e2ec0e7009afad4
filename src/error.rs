//! Report error types with HTTP status code mapping.
//!
//! [`ReportError`] is the central error type for the crate. Query operations
//! return it directly, collaborator failures are carried through it
//! unchanged, and each variant maps to an HTTP status code and structured
//! JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1002,
///     "message": "invalid year-month: 2023-13",
///     "details": null
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
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Error enum shared by the query service, its collaborators and the
/// HTTP layer.
///
/// # Error Code Ranges
///
/// | Range     | Category      | HTTP Status                 |
/// |-----------|---------------|-----------------------------|
/// | 1000–1999 | Validation    | 400 Bad Request             |
/// | 3000–3999 | Collaborator  | 503 Service Unavailable     |
/// | 4000–4999 | Arithmetic    | 422 Unprocessable Entity    |
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Request input could not be parsed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A calendar year-month was malformed or out of range.
    #[error("invalid year-month: {0}")]
    InvalidYearMonth(String),

    /// A payment's regular-price sum is not an exact `i32`.
    #[error("payment value {0} is not an exact integer")]
    PaymentValueNotExact(Decimal),

    /// An exact decimal sum exceeded the representable range.
    #[error("amount sum overflowed the decimal range")]
    AmountOverflow,

    /// Subtracting the day count from the current instant left the
    /// representable calendar range.
    #[error("date arithmetic out of range for {days} days")]
    DateOutOfRange {
        /// Day count that was requested.
        days: i64,
    },

    /// The payment source could not produce a snapshot.
    #[error("payment source unavailable: {0}")]
    SourceUnavailable(String),

    /// The clock could not produce the current instant.
    #[error("clock unavailable: {0}")]
    ClockUnavailable(String),
}

impl ReportError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::InvalidYearMonth(_) => 1002,
            Self::SourceUnavailable(_) => 3001,
            Self::ClockUnavailable(_) => 3002,
            Self::PaymentValueNotExact(_) => 4001,
            Self::DateOutOfRange { .. } => 4002,
            Self::AmountOverflow => 4003,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::InvalidYearMonth(_) => StatusCode::BAD_REQUEST,
            Self::PaymentValueNotExact(_)
            | Self::DateOutOfRange { .. }
            | Self::AmountOverflow => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::SourceUnavailable(_) | Self::ClockUnavailable(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
        }
    }
}

impl IntoResponse for ReportError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::warn!(error = %self, "report request failed");
        }
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_bad_request() {
        let err = ReportError::InvalidYearMonth("2023-13".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), 1002);
        assert_eq!(err.to_string(), "invalid year-month: 2023-13");
    }

    #[test]
    fn collaborator_errors_are_unavailable() {
        let err = ReportError::SourceUnavailable("disk gone".to_string());
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        let err = ReportError::ClockUnavailable("no time".to_string());
        assert_eq!(err.error_code(), 3002);
    }

    #[test]
    fn inexact_value_is_unprocessable() {
        let err = ReportError::PaymentValueNotExact(Decimal::new(1050, 2));
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.to_string(), "payment value 10.50 is not an exact integer");
    }

    #[test]
    fn amount_overflow_is_unprocessable() {
        let err = ReportError::AmountOverflow;
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.error_code(), 4003);
    }

    #[test]
    fn into_response_carries_status() {
        let response = ReportError::DateOutOfRange { days: i64::MAX }.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
