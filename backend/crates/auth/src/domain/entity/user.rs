//! User Entity

use chrono::{DateTime, Utc};
use kernel::id::{Id, UserId};

use crate::domain::value_object::{email::Email, phone::Phone, user_password::UserPassword};

/// Wallet account holder
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    /// Login identifier (unique, lower-cased)
    pub email: Email,
    /// Receives OTPs by SMS
    pub phone: Phone,
    pub password_hash: UserPassword,
    /// First successful OTP verification
    pub verified_at: Option<DateTime<Utc>>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: Email, phone: Phone, password_hash: UserPassword) -> Self {
        let now = Utc::now();
        Self {
            id: Id::new(),
            email,
            phone,
            password_hash,
            verified_at: None,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Record a successful OTP verification.
    ///
    /// `verified_at` is only set the first time.
    pub fn record_verification(&mut self, now: DateTime<Utc>) {
        if self.verified_at.is_none() {
            self.verified_at = Some(now);
        }
        self.last_login_at = Some(now);
        self.updated_at = now;
    }

    pub fn is_verified(&self) -> bool {
        self.verified_at.is_some()
    }
}
