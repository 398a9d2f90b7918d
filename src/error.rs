//! API error types and HTTP response conversion
//!
//! Every recoverable failure in the catalog maps to one [`ApiError`] variant,
//! which in turn maps to a structured JSON response with the right status
//! code. Validation failures always carry the complete set of violated
//! fields, not just the first one detected.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::StoreError;

/// A single violated field constraint
///
/// # Example
///
/// ```rust
/// use marquee::error::FieldViolation;
///
/// let violation = FieldViolation::new("title", "required", "title must not be empty");
/// assert_eq!(violation.field, "title");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldViolation {
    /// Field name on the DTO
    pub field: String,
    /// Machine-readable code (e.g. "required", "max_length", "range")
    pub code: String,
    /// Human-readable message
    pub message: String,
}

impl FieldViolation {
    pub fn new(
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Error taxonomy for catalog operations
///
/// All variants except `Internal` are expected outcomes recovered at the
/// operation boundary; `Internal` wraps unexpected store failures and is the
/// only one surfaced as a generic 500.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource id absent
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },

    /// DTO constraint violations, aggregated
    #[error("validation failed")]
    Validation(Vec<FieldViolation>),

    /// Domain rule violation (e.g. duplicate review by the same author)
    #[error("{0}")]
    Conflict(String),

    /// Caller lacks ownership or role for the target resource
    #[error("forbidden")]
    Forbidden,

    /// Missing or invalid credentials
    #[error("authentication required")]
    Unauthorized,

    /// Malformed patch document or filter value
    #[error("{0}")]
    BadRequest(String),

    /// Unexpected store/infrastructure failure
    #[error("internal error")]
    Internal(#[from] StoreError),
}

impl ApiError {
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        Self::NotFound { entity, id }
    }

    /// HTTP status code for this error
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    const fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_FAILED",
            Self::Conflict(_) => "CONFLICT",
            Self::Forbidden => "FORBIDDEN",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

/// JSON body for error responses
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: String,
    pub status: u16,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldViolation>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if let Self::Internal(ref err) = self {
            tracing::error!(error = %err, "store failure");
        }

        let errors = match &self {
            Self::Validation(violations) => violations.clone(),
            _ => Vec::new(),
        };

        let body = ErrorBody {
            error: self.to_string(),
            code: self.code().to_string(),
            status: status.as_u16(),
            errors,
        };

        (status, Json(body)).into_response()
    }
}
