//! Access Tokens
//!
//! Stateless bearer tokens: `base64url(claims JSON) "." base64url(HMAC-SHA256)`.
//! The signature covers the encoded payload, so the payload is never
//! parsed before it is authenticated.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::crypto::{from_base64url, hmac_sha256, to_base64url, verify_hmac_sha256};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::entity::user::User;

/// Claims carried inside an access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    #[serde(rename = "sub")]
    pub user_id: Uuid,
    pub email: String,
    pub phone: String,
    /// Unix seconds
    #[serde(rename = "iat")]
    pub issued_at: i64,
    /// Unix seconds
    #[serde(rename = "exp")]
    pub expires_at: i64,
}

impl AccessClaims {
    pub fn for_user(user: &User, now: DateTime<Utc>, ttl: chrono::Duration) -> Self {
        Self {
            user_id: user.id.into_uuid(),
            email: user.email.as_str().to_string(),
            phone: user.phone.as_str().to_string(),
            issued_at: now.timestamp(),
            expires_at: (now + ttl).timestamp(),
        }
    }

    pub fn user_id(&self) -> UserId {
        UserId::from_uuid(self.user_id)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.expires_at
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token is not in payload.signature form")]
    Malformed,

    #[error("token signature does not match")]
    BadSignature,

    #[error("token has expired")]
    Expired,
}

/// Sign `claims` with `secret`
pub fn issue(secret: &[u8], claims: &AccessClaims) -> String {
    // Serializing a struct of strings and integers cannot fail
    let json = serde_json::to_vec(claims).unwrap_or_default();
    let payload = to_base64url(&json);
    let signature = hmac_sha256(secret, payload.as_bytes());
    format!("{payload}.{}", to_base64url(&signature))
}

/// Check signature, then expiry, and return the claims
pub fn verify(secret: &[u8], token: &str, now: DateTime<Utc>) -> Result<AccessClaims, TokenError> {
    let (payload, signature) = token.split_once('.').ok_or(TokenError::Malformed)?;
    if payload.is_empty() || signature.contains('.') {
        return Err(TokenError::Malformed);
    }

    let signature = from_base64url(signature).map_err(|_| TokenError::Malformed)?;
    if !verify_hmac_sha256(secret, payload.as_bytes(), &signature) {
        return Err(TokenError::BadSignature);
    }

    let json = from_base64url(payload).map_err(|_| TokenError::Malformed)?;
    let claims: AccessClaims = serde_json::from_slice(&json).map_err(|_| TokenError::Malformed)?;

    if claims.is_expired(now) {
        return Err(TokenError::Expired);
    }
    Ok(claims)
}
