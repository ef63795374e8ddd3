//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::notify::DeliveryError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Request body was empty or `{}`
    #[error("Empty request body")]
    EmptyBody,

    /// Body could not be parsed
    #[error("Invalid JSON body")]
    MalformedBody,

    /// Sign-up body lacks a required field
    #[error("Email, password and phone are required")]
    MissingSignUpFields,

    /// Value object rejected the input
    #[error("{}", .0.message())]
    Validation(AppError),

    /// Password appears in a known breach
    #[error("This password has appeared in a data breach")]
    BreachedPassword,

    /// Email already registered
    #[error("User already exists")]
    UserExists,

    /// Unknown email or wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// OTP missing, wrong, expired, used or for another purpose
    #[error("Invalid or expired OTP")]
    InvalidOtp,

    /// No bearer token on a protected route
    #[error("Access token required")]
    TokenMissing,

    /// Bearer token malformed, forged or expired
    #[error("Invalid token")]
    TokenInvalid,

    /// User not found
    #[error("User not found")]
    UserNotFound,

    /// SMS/email channel failed
    #[error("Could not deliver the one-time code")]
    Delivery(#[from] DeliveryError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::EmptyBody
            | AuthError::MalformedBody
            | AuthError::MissingSignUpFields
            | AuthError::BreachedPassword
            | AuthError::UserExists => ErrorKind::BadRequest,
            AuthError::Validation(err) => err.kind(),
            AuthError::InvalidCredentials | AuthError::InvalidOtp | AuthError::TokenMissing => {
                ErrorKind::Unauthorized
            }
            AuthError::TokenInvalid => ErrorKind::Forbidden,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::Delivery(_) => ErrorKind::ServiceUnavailable,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError.
    ///
    /// Server-side failures get a generic message; details stay in the log.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Database(_) | AuthError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::Delivery(e) => {
                tracing::error!(error = %e, "OTP delivery failed");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::InvalidOtp => {
                tracing::warn!("Invalid or expired OTP presented");
            }
            AuthError::TokenInvalid => {
                tracing::warn!("Invalid access token presented");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        match self {
            // Keeps the value object's action hint
            AuthError::Validation(err) => err.into_response(),
            other => other.to_app_error().into_response(),
        }
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest | ErrorKind::UnprocessableEntity => AuthError::Validation(err),
            _ => AuthError::Internal(err.to_string()),
        }
    }
}
