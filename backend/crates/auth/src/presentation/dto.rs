//! API DTOs (Data Transfer Objects)

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::domain::entity::user::User;
use crate::error::{AuthError, AuthResult};

/// Parse a JSON body, telling an empty body (or `{}`) apart from a
/// malformed one
pub fn parse_body<T: DeserializeOwned>(body: &[u8]) -> AuthResult<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(AuthError::EmptyBody);
    }

    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|_| AuthError::MalformedBody)?;
    match &value {
        serde_json::Value::Null => return Err(AuthError::EmptyBody),
        serde_json::Value::Object(map) if map.is_empty() => return Err(AuthError::EmptyBody),
        serde_json::Value::Object(_) => {}
        _ => return Err(AuthError::MalformedBody),
    }

    serde_json::from_value(value).map_err(|_| AuthError::MalformedBody)
}

// ============================================================================
// Sign Up
// ============================================================================

/// Sign up request
///
/// Fields are optional so a missing one is reported as such rather than
/// as a parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Sign up response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpResponse {
    pub message: String,
    pub user_id: String,
}

// ============================================================================
// Log In
// ============================================================================

/// Log in request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogInRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

// ============================================================================
// OTP Verification
// ============================================================================

/// Body of `/signup/verify` and `/login/verify`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub otp_code: Option<String>,
}

/// Verify response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpResponse {
    pub message: String,
    pub token: String,
    /// Token expiry (Unix milliseconds)
    pub expires_at_ms: i64,
    pub user: UserResponse,
}

// ============================================================================
// Shared
// ============================================================================

/// Public view of a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub phone: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.as_str().to_string(),
            phone: user.phone.as_str().to_string(),
        }
    }
}

/// `{ "message": ... }`
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
