//! Sign Up Use Case
//!
//! Creates a new user account and texts a sign-up OTP to the given phone.

use std::sync::Arc;

use platform::notify::OtpDelivery;

use crate::application::config::AuthConfig;
use crate::application::send_otp::issue_and_send;
use crate::domain::entity::user::User;
use crate::domain::repository::{LoginOtpRepository, UserRepository};
use crate::domain::value_object::{
    email::Email,
    otp_code::OtpPurpose,
    phone::Phone,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub email: String,
    pub password: String,
    pub phone: String,
}

/// Sign up output
#[derive(Debug)]
pub struct SignUpOutput {
    pub user_id: String,
}

/// Sign up use case
pub struct SignUpUseCase<U, O, D>
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

impl<U, O, D> SignUpUseCase<U, O, D>
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

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        if input.email.trim().is_empty()
            || input.password.is_empty()
            || input.phone.trim().is_empty()
        {
            return Err(AuthError::MissingSignUpFields);
        }

        let email = Email::new(input.email)?;
        let phone = Phone::new(&input.phone)?;
        let raw_password = RawPassword::new(input.password)?;

        if self.user_repo.exists_by_email(&email).await? {
            return Err(AuthError::UserExists);
        }

        if self.config.check_breached_passwords {
            match raw_password.is_breached().await {
                Ok(true) => return Err(AuthError::BreachedPassword),
                Ok(false) => {}
                // Lookup outage must not block sign-up
                Err(e) => tracing::warn!(error = %e, "Breached-password lookup failed"),
            }
        }

        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())?;
        let user = User::new(email, phone, password_hash);
        self.user_repo.create(&user).await?;

        tracing::info!(user_id = %user.id, email = %user.email, "User signed up");

        issue_and_send(
            self.otp_repo.as_ref(),
            self.delivery.as_ref(),
            &self.config,
            &user,
            OtpPurpose::Signup,
        )
        .await?;

        Ok(SignUpOutput {
            user_id: user.id.to_string(),
        })
    }
}
