use std::sync::atomic::{AtomicBool, Ordering};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;

/// When true, internal error responses carry the underlying detail in the
/// `error` field. Enabled in development via `server.verbose_errors`.
static VERBOSE_ERRORS: AtomicBool = AtomicBool::new(false);

pub fn set_verbose_errors(enabled: bool) {
    VERBOSE_ERRORS.store(enabled, Ordering::Relaxed);
}

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Always `false` for error responses.
    #[schema(example = false)]
    pub success: bool,
    /// Machine-readable error code. One of: `VALIDATION_ERROR`, `TOKEN_MISSING`,
    /// `TOKEN_INVALID`, `INVALID_CREDENTIALS`, `NOT_FOUND`, `CONFLICT`,
    /// `EMAIL_TAKEN`, `PHONE_TAKEN`, `INTERNAL_ERROR`.
    #[schema(example = "VALIDATION_ERROR")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "Harga must be a positive number")]
    pub message: String,
    /// Underlying error detail. Only present when verbose errors are enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    TokenMissing,
    TokenInvalid,
    InvalidCredentials,
    NotFound(String),
    Conflict(String),
    EmailTaken,
    PhoneTaken,
    Internal(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        let body = |code, message: String| ErrorBody {
            success: false,
            code,
            message,
            error: None,
        };

        match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, body("VALIDATION_ERROR", msg)),
            AppError::TokenMissing => (
                StatusCode::UNAUTHORIZED,
                body("TOKEN_MISSING", "Authentication required".into()),
            ),
            AppError::TokenInvalid => (
                StatusCode::UNAUTHORIZED,
                body("TOKEN_INVALID", "Invalid or expired token".into()),
            ),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                body("INVALID_CREDENTIALS", "Invalid email or password".into()),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, body("NOT_FOUND", msg)),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, body("CONFLICT", msg)),
            AppError::EmailTaken => (
                StatusCode::CONFLICT,
                body("EMAIL_TAKEN", "Email is already registered".into()),
            ),
            AppError::PhoneTaken => (
                StatusCode::CONFLICT,
                body("PHONE_TAKEN", "Phone number is already in use".into()),
            ),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                let error = VERBOSE_ERRORS.load(Ordering::Relaxed).then_some(detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        success: false,
                        code: "INTERNAL_ERROR",
                        message: "An unexpected error occurred".into(),
                        error,
                    },
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Internal(err.to_string())
    }
}
