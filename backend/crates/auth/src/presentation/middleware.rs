//! Auth Middleware
//!
//! Middleware for requiring an access token on protected routes, and the
//! [`AuthUser`] extractor handlers use to read the caller.

use axum::body::Body;
use axum::extract::{FromRequestParts, State};
use axum::http::Request;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;
use kernel::id::UserId;
use platform::bearer::{BearerError, extract_bearer_token};
use std::sync::Arc;

use crate::application::access_token;
use crate::application::config::AuthConfig;
use crate::error::AuthError;

/// Middleware state
#[derive(Clone)]
pub struct AuthMiddlewareState {
    pub config: Arc<AuthConfig>,
}

impl AuthMiddlewareState {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }
}

/// Authenticated caller, inserted into request extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: UserId,
    pub email: String,
    pub phone: String,
}

/// Middleware that requires a valid access token
///
/// Missing token is 401, anything wrong with a present token is 403.
pub async fn require_access_token(
    State(state): State<AuthMiddlewareState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let token = extract_bearer_token(req.headers()).map_err(|e| match e {
        BearerError::Missing => AuthError::TokenMissing,
        BearerError::Malformed => AuthError::TokenInvalid,
    })?;

    let claims = access_token::verify(&state.config.token_secret, token, Utc::now()).map_err(|e| {
        tracing::debug!(reason = %e, "Access token rejected");
        AuthError::TokenInvalid
    })?;

    let user = AuthUser {
        user_id: claims.user_id(),
        email: claims.email,
        phone: claims.phone,
    };
    tracing::trace!(user_id = %user.user_id, "Access token accepted");
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Only present behind `require_access_token`
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or(AuthError::TokenMissing)
    }
}
