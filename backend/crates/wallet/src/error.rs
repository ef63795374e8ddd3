//! Wallet Error Types
//!
//! Wallet-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::notify::DeliveryError;
use thiserror::Error;

/// Wallet-specific result type alias
pub type WalletResult<T> = Result<T, WalletError>;

#[derive(Debug, Error)]
pub enum WalletError {
    /// Request body was empty or `{}`
    #[error("Empty request body")]
    EmptyBody,

    #[error("Invalid JSON body")]
    MalformedBody,

    /// Card creation without name, number or category
    #[error("Name, number, and categoryId are required")]
    MissingCardFields,

    /// Other required fields, message names them
    #[error("{0}")]
    MissingFields(&'static str),

    /// Value object rejected the input
    #[error("{}", .0.message())]
    Validation(AppError),

    /// Ledger total on the card would leave the representable range
    #[error("Card balance would be out of range")]
    BalanceOutOfRange,

    #[error("Card not found")]
    CardNotFound,

    /// Payment source missing, not the caller's or not a bank card
    #[error("Bank card not found")]
    BankCardNotFound,

    #[error("Payment not found")]
    PaymentNotFound,

    #[error("Verification record not found")]
    VerificationNotFound,

    #[error("Invalid or expired verification code")]
    InvalidPossessionCode,

    #[error("You cannot review your own card")]
    SelfReview,

    #[error("Verification has already been reviewed")]
    AlreadyReviewed,

    /// Email channel failed
    #[error("Failed to send verification code")]
    Delivery(#[from] DeliveryError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl WalletError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            WalletError::EmptyBody
            | WalletError::MalformedBody
            | WalletError::MissingCardFields
            | WalletError::MissingFields(_)
            | WalletError::BalanceOutOfRange
            | WalletError::InvalidPossessionCode => ErrorKind::BadRequest,
            WalletError::Validation(err) => err.kind(),
            WalletError::CardNotFound
            | WalletError::BankCardNotFound
            | WalletError::PaymentNotFound
            | WalletError::VerificationNotFound => ErrorKind::NotFound,
            WalletError::SelfReview => ErrorKind::Forbidden,
            WalletError::AlreadyReviewed => ErrorKind::Conflict,
            WalletError::Delivery(_) => ErrorKind::ServiceUnavailable,
            WalletError::Database(_) | WalletError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError, hiding server-side details
    pub fn to_app_error(&self) -> AppError {
        match self {
            WalletError::Database(_) | WalletError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            WalletError::Database(e) => {
                tracing::error!(error = %e, "Wallet database error");
            }
            WalletError::Internal(msg) => {
                tracing::error!(message = %msg, "Wallet internal error");
            }
            WalletError::Delivery(e) => {
                tracing::error!(error = %e, "Possession code delivery failed");
            }
            WalletError::InvalidPossessionCode => {
                tracing::warn!("Invalid or expired possession code presented");
            }
            WalletError::SelfReview => {
                tracing::warn!("Attempt to review own card");
            }
            _ => {
                tracing::debug!(error = %self, "Wallet error");
            }
        }
    }
}

impl IntoResponse for WalletError {
    fn into_response(self) -> Response {
        self.log();
        match self {
            WalletError::Validation(err) => err.into_response(),
            other => other.to_app_error().into_response(),
        }
    }
}

impl From<AppError> for WalletError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest | ErrorKind::UnprocessableEntity => WalletError::Validation(err),
            _ => WalletError::Internal(err.to_string()),
        }
    }
}
