//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC key for access tokens and OTP digests (32 bytes)
    pub token_secret: [u8; 32],
    /// Access token lifetime (24 hours)
    pub token_ttl: Duration,
    /// One-time code lifetime (5 minutes)
    pub otp_ttl: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Reject sign-up passwords found in public breach corpora
    pub check_breached_passwords: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: [0u8; 32],
            token_ttl: Duration::from_secs(24 * 3600), // 24 hours
            otp_ttl: Duration::from_secs(5 * 60),      // 5 minutes
            password_pepper: None,
            check_breached_passwords: false,
        }
    }
}

impl AuthConfig {
    /// Create config with a random token secret (for development)
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = [0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self {
            token_secret: secret,
            ..Default::default()
        }
    }

    /// Create config for development
    pub fn development() -> Self {
        Self::with_random_secret()
    }

    /// Create config with a specific secret
    pub fn with_secret(secret: [u8; 32]) -> Self {
        Self {
            token_secret: secret,
            ..Default::default()
        }
    }

    /// Set password pepper
    pub fn with_pepper(mut self, pepper: Vec<u8>) -> Self {
        self.password_pepper = Some(pepper);
        self
    }

    /// Enable or disable the breached-password lookup on sign-up
    pub fn with_breach_check(mut self, enabled: bool) -> Self {
        self.check_breached_passwords = enabled;
        self
    }

    /// Get pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// OTP lifetime in whole minutes, as shown in the SMS text
    pub fn otp_ttl_minutes(&self) -> u64 {
        self.otp_ttl.as_secs().div_ceil(60)
    }

    pub fn token_ttl_chrono(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.token_ttl).unwrap_or(chrono::Duration::hours(24))
    }

    pub fn otp_ttl_chrono(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.otp_ttl).unwrap_or(chrono::Duration::minutes(5))
    }
}
