//! Log In Use Case
//!
//! First factor: email and password. On success a login OTP is texted to
//! the account's phone; the token is only issued by [`VerifyOtpUseCase`].
//!
//! [`VerifyOtpUseCase`]: crate::application::verify_otp::VerifyOtpUseCase

use std::sync::Arc;

use platform::notify::OtpDelivery;

use crate::application::config::AuthConfig;
use crate::application::send_otp::issue_and_send;
use crate::domain::repository::{LoginOtpRepository, UserRepository};
use crate::domain::value_object::{
    email::Email, otp_code::OtpPurpose, user_password::RawPassword,
};
use crate::error::{AuthError, AuthResult};

/// Log in input
pub struct LogInInput {
    pub email: String,
    pub password: String,
}

/// Log in use case
pub struct LogInUseCase<U, O, D>
where
    U: UserRepository,
    O: LoginOtpRepository,
    D: OtpDelivery,
{
    user_repo: Arc<U>,
    otp_repo: Arc<O>,
    delivery: Arc<D>,
    config: Arc<AuthConfig>,
}

impl<U, O, D> LogInUseCase<U, O, D>
where
    U: UserRepository,
    O: LoginOtpRepository,
    D: OtpDelivery,
{
    pub fn new(user_repo: Arc<U>, otp_repo: Arc<O>, delivery: Arc<D>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            otp_repo,
            delivery,
            config,
        }
    }

    pub async fn execute(&self, input: LogInInput) -> AuthResult<()> {
        // Unknown, malformed and wrong-password all look the same to the caller
        let email = Email::new(input.email).map_err(|_| AuthError::InvalidCredentials)?;
        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let raw_password = RawPassword::for_verification(input.password);
        if !user.password_hash.verify(&raw_password, self.config.pepper()) {
            tracing::warn!(user_id = %user.id, "Password mismatch on login");
            return Err(AuthError::InvalidCredentials);
        }

        issue_and_send(
            self.otp_repo.as_ref(),
            self.delivery.as_ref(),
            &self.config,
            &user,
            OtpPurpose::Login,
        )
        .await?;

        tracing::info!(user_id = %user.id, "Login OTP sent");
        Ok(())
    }
}
