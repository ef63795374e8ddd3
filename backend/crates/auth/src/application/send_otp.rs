//! OTP issuance shared by sign-up and login

use chrono::Utc;
use platform::notify::{OtpDelivery, otp_message};

use crate::application::config::AuthConfig;
use crate::domain::entity::{login_otp::LoginOtp, user::User};
use crate::domain::repository::LoginOtpRepository;
use crate::domain::value_object::otp_code::OtpPurpose;
use crate::error::AuthResult;

/// Persist a fresh code for `user` and text it to their phone
pub(crate) async fn issue_and_send<O, D>(
    otp_repo: &O,
    delivery: &D,
    config: &AuthConfig,
    user: &User,
    purpose: OtpPurpose,
) -> AuthResult<()>
where
    O: LoginOtpRepository,
    D: OtpDelivery,
{
    let (otp, code) = LoginOtp::issue(
        user.id,
        purpose,
        &config.token_secret,
        config.otp_ttl_chrono(),
        Utc::now(),
    );
    otp_repo.create(&otp).await?;

    let message = otp_message(code.as_str(), config.otp_ttl_minutes());
    delivery.send_sms(user.phone.as_str(), &message).await?;

    tracing::debug!(
        user_id = %user.id,
        purpose = %purpose,
        expires_at = %otp.expires_at,
        "OTP issued"
    );
    Ok(())
}
