//! Sign Out Use Case
//!
//! Access tokens are stateless, so signing out only means the client drops
//! its token. The token is still checked so the event can be attributed in
//! the log.

use std::sync::Arc;

use chrono::Utc;
use kernel::id::UserId;

use crate::application::access_token;
use crate::application::config::AuthConfig;

/// Sign out use case
pub struct SignOutUseCase {
    config: Arc<AuthConfig>,
}

impl SignOutUseCase {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    /// Always succeeds. Returns the user the token belonged to, if valid.
    pub fn execute(&self, token: Option<&str>) -> Option<UserId> {
        let claims = token
            .and_then(|t| access_token::verify(&self.config.token_secret, t, Utc::now()).ok());

        match claims {
            Some(claims) => {
                let user_id = claims.user_id();
                tracing::info!(user_id = %user_id, "User signed out");
                Some(user_id)
            }
            None => {
                tracing::debug!("Sign out without a valid token");
                None
            }
        }
    }
}
