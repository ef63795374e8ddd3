//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::entity::{login_otp::LoginOtp, user::User};
use crate::domain::value_object::{email::Email, otp_code::OtpPurpose};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Find user by (normalized) email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Check if email is registered
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// Update user
    async fn update(&self, user: &User) -> AuthResult<()>;
}

/// One-time code repository trait
#[trait_variant::make(LoginOtpRepository: Send)]
pub trait LocalLoginOtpRepository {
    /// Store a newly issued code
    async fn create(&self, otp: &LoginOtp) -> AuthResult<()>;

    /// Mark the newest unused, unexpired code for `user_id` and `purpose`
    /// whose digest equals `code_hash` as used, and return it.
    ///
    /// Must be atomic: of two concurrent calls with the same code at most
    /// one gets `Some`.
    async fn consume(
        &self,
        user_id: &UserId,
        purpose: OtpPurpose,
        code_hash: &[u8],
        now: DateTime<Utc>,
    ) -> AuthResult<Option<LoginOtp>>;

    /// Delete expired codes, returning how many were removed
    async fn delete_expired(&self, now: DateTime<Utc>) -> AuthResult<u64>;
}
