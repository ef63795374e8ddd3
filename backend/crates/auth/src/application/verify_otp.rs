//! Verify OTP Use Case
//!
//! Second factor for both sign-up and login. Consumes the code and issues
//! an access token.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::access_token::{self, AccessClaims};
use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::{LoginOtpRepository, UserRepository};
use crate::domain::value_object::{email::Email, otp_code::OtpCode, otp_code::OtpPurpose};
use crate::error::{AuthError, AuthResult};

/// Verify OTP input
pub struct VerifyOtpInput {
    pub email: String,
    pub otp_code: String,
    pub purpose: OtpPurpose,
}

/// Verify OTP output
#[derive(Debug)]
pub struct VerifyOtpOutput {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: User,
}

/// Verify OTP use case
pub struct VerifyOtpUseCase<U, O>
where
    U: UserRepository,
    O: LoginOtpRepository,
{
    user_repo: Arc<U>,
    otp_repo: Arc<O>,
    config: Arc<AuthConfig>,
}

impl<U, O> VerifyOtpUseCase<U, O>
where
    U: UserRepository,
    O: LoginOtpRepository,
{
    pub fn new(user_repo: Arc<U>, otp_repo: Arc<O>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            otp_repo,
            config,
        }
    }

    pub async fn execute(&self, input: VerifyOtpInput) -> AuthResult<VerifyOtpOutput> {
        let email = Email::new(input.email).map_err(|_| AuthError::InvalidOtp)?;
        let code = OtpCode::parse(&input.otp_code).ok_or(AuthError::InvalidOtp)?;

        let mut user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidOtp)?;

        let now = Utc::now();
        let code_hash = code.digest(&self.config.token_secret, &user.id);
        self.otp_repo
            .consume(&user.id, input.purpose, &code_hash, now)
            .await?
            .ok_or(AuthError::InvalidOtp)?;

        user.record_verification(now);
        self.user_repo.update(&user).await?;

        let claims = AccessClaims::for_user(&user, now, self.config.token_ttl_chrono());
        let token = access_token::issue(&self.config.token_secret, &claims);
        let expires_at = now + self.config.token_ttl_chrono();

        tracing::info!(
            user_id = %user.id,
            purpose = %input.purpose,
            "OTP verified, access token issued"
        );

        Ok(VerifyOtpOutput {
            token,
            expires_at,
            user,
        })
    }
}
