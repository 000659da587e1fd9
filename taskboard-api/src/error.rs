/// Error handling for the API server
///
/// This module provides the single place where failures become HTTP
/// responses. Handlers return `ApiResult<T>`; domain errors are classified
/// by kind:
///
/// | Kind | Status |
/// |---|---|
/// | Validation | 400 |
/// | NotFound | 404 |
/// | Infrastructure | 500 |
///
/// 500 responses carry the route's context message, never the cause. The
/// cause is logged and attached to the response extensions so
/// `middleware::error_details` can echo it in development.
///
/// # Example
///
/// ```no_run
/// use taskboard_api::error::{ApiResult, ReportExt};
/// use taskboard_shared::{domain, store::memory::MemoryStore};
/// use axum::Json;
///
/// async fn handler(store: &MemoryStore) -> ApiResult<Json<String>> {
///     let user = domain::get_user(store, 1).await.report("Could not fetch user")?;
///     Ok(Json(user.email))
/// }
/// ```

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use taskboard_shared::domain::{DomainError, ErrorKind};
use validator::ValidationErrors;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400)
    BadRequest(String),

    /// Missing or malformed request fields (400)
    ValidationError(Vec<ValidationErrorDetail>),

    /// Not found (404)
    NotFound(String),

    /// Internal server error (500)
    InternalError {
        /// What the route was trying to do
        context: String,

        /// Underlying failure, logged but not returned in production
        cause: String,
    },
}

/// Validation error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

/// Error response format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "bad_request", "not_found")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Per-field validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ValidationErrorDetail>>,

    /// Underlying cause of a 500, only outside production
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
}

/// Response extension carrying the cause of a 500
#[derive(Debug, Clone)]
pub struct ErrorCause {
    pub body: ErrorResponse,
    pub cause: String,
}

impl ApiError {
    /// Classifies a domain error, using `context` as the 500 message
    pub fn from_domain(err: DomainError, context: &str) -> Self {
        match err.kind() {
            ErrorKind::Validation => ApiError::BadRequest(err.to_string()),
            ErrorKind::NotFound => ApiError::NotFound(err.to_string()),
            ErrorKind::Infrastructure => ApiError::InternalError {
                context: context.to_string(),
                cause: err.to_string(),
            },
        }
    }

    /// Returns the HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Attaches a route context to domain failures
pub trait ReportExt<T> {
    /// Converts the error, naming what the route was doing if it becomes a 500
    fn report(self, context: &str) -> ApiResult<T>;
}

impl<T> ReportExt<T> for Result<T, DomainError> {
    fn report(self, context: &str) -> ApiResult<T> {
        self.map_err(|err| ApiError::from_domain(err, context))
    }
}

/// Takes a required field out of a request body
///
/// Handlers call `validate()` first so all missing fields are reported
/// together; this only fails if a field slipped past validation.
pub fn required<T>(value: Option<T>, field: &str) -> ApiResult<T> {
    value.ok_or_else(|| {
        ApiError::ValidationError(vec![ValidationErrorDetail {
            field: field.to_string(),
            message: format!("{} is required", field),
        }])
    })
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::ValidationError(errors) => {
                write!(f, "Validation failed: {} errors", errors.len())
            }
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::InternalError { context, cause } => {
                write!(f, "Internal error: {} caused by: {}", context, cause)
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let (body, cause) = match self {
            ApiError::BadRequest(message) => {
                tracing::warn!(%message, "Bad request");
                (error_body("bad_request", message, None), None)
            }
            ApiError::ValidationError(errors) => {
                tracing::warn!(errors = errors.len(), "Request validation failed");
                (
                    error_body(
                        "validation_error",
                        "Request validation failed".to_string(),
                        Some(errors),
                    ),
                    None,
                )
            }
            ApiError::NotFound(message) => {
                tracing::warn!(%message, "Not found");
                (error_body("not_found", message, None), None)
            }
            ApiError::InternalError { context, cause } => {
                tracing::error!("{} caused by: {}", context, cause);
                (error_body("internal_error", context, None), Some(cause))
            }
        };

        let mut response = (status, Json(body.clone())).into_response();
        if let Some(cause) = cause {
            response.extensions_mut().insert(ErrorCause { body, cause });
        }
        response
    }
}

fn error_body(
    code: &str,
    message: String,
    details: Option<Vec<ValidationErrorDetail>>,
) -> ErrorResponse {
    ErrorResponse {
        error: code.to_string(),
        message,
        details,
        cause: None,
    }
}

/// Malformed or non-JSON bodies are client errors
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Unparseable path segments are client errors
impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Field-level failures from `validator` derive
impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut details: Vec<ValidationErrorDetail> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| ValidationErrorDetail {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is required", field)),
                })
            })
            .collect();
        details.sort_by(|a, b| a.field.cmp(&b.field));
        ApiError::ValidationError(details)
    }
}
