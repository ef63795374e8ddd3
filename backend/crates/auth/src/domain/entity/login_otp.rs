//! Login OTP Entity
//!
//! A one-time code issued at sign-up or login. The code itself is never
//! stored; only its keyed digest is.

use chrono::{DateTime, Duration, Utc};
use kernel::id::{Id, LoginOtpId, UserId};

use crate::domain::value_object::otp_code::{OtpCode, OtpPurpose};

#[derive(Debug, Clone)]
pub struct LoginOtp {
    pub id: LoginOtpId,
    pub user_id: UserId,
    pub purpose: OtpPurpose,
    pub code_hash: Vec<u8>,
    pub expires_at: DateTime<Utc>,
    pub used: bool,
    pub created_at: DateTime<Utc>,
}

impl LoginOtp {
    /// Issue a fresh code for `user_id`.
    ///
    /// Returns the entity to persist and the clear code to deliver.
    pub fn issue(
        user_id: UserId,
        purpose: OtpPurpose,
        key: &[u8],
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> (Self, OtpCode) {
        let code = OtpCode::generate();
        let otp = Self {
            id: Id::new(),
            user_id,
            purpose,
            code_hash: code.digest(key, &user_id).to_vec(),
            expires_at: now + ttl,
            used: false,
            created_at: now,
        };
        (otp, code)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Unused, unexpired and matching `code_hash`
    pub fn accepts(&self, purpose: OtpPurpose, code_hash: &[u8], now: DateTime<Utc>) -> bool {
        !self.used
            && !self.is_expired(now)
            && self.purpose == purpose
            && platform::crypto::constant_time_eq(&self.code_hash, code_hash)
    }
}
