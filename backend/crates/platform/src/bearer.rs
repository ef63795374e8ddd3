//! Bearer token extraction
//!
//! Reads `Authorization: Bearer <token>` from request headers.

use axum::http::{HeaderMap, header};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BearerError {
    /// No Authorization header at all
    #[error("Authorization header missing")]
    Missing,

    /// Header present but not `Bearer <token>`
    #[error("Authorization header is not a bearer token")]
    Malformed,
}

/// Extract the bearer token from request headers
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, BearerError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(BearerError::Missing)?
        .to_str()
        .map_err(|_| BearerError::Malformed)?;

    let (scheme, token) = value.trim_start().split_once(' ').ok_or(BearerError::Malformed)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(BearerError::Malformed);
    }

    let token = token.trim();
    if token.is_empty() {
        // "Bearer " with nothing after it is treated like no token
        return Err(BearerError::Missing);
    }
    Ok(token)
}

/// Build an `Authorization` header value
pub fn bearer_header_value(token: &str) -> String {
    format!("Bearer {token}")
}
