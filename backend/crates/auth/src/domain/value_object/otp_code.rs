//! One-time code value objects

use derive_more::Display;
use kernel::id::UserId;
use platform::crypto::{hmac_sha256, random_numeric_code};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const OTP_DIGITS: u32 = 6;

/// Six-digit one-time code
#[derive(Clone, PartialEq, Eq)]
pub struct OtpCode(String);

impl OtpCode {
    /// Fresh random code in `100000..=999999`
    pub fn generate() -> Self {
        Self(random_numeric_code(OTP_DIGITS))
    }

    /// Parse user input. Surrounding whitespace is ignored.
    pub fn parse(input: &str) -> Option<Self> {
        let code = input.trim();
        if code.len() == OTP_DIGITS as usize && code.bytes().all(|b| b.is_ascii_digit()) {
            Some(Self(code.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Keyed digest stored instead of the code.
    ///
    /// Scoping by user keeps equal codes for different users from sharing
    /// a digest.
    pub fn digest(&self, key: &[u8], user_id: &UserId) -> [u8; 32] {
        let data = format!("{user_id}:{}", self.0);
        hmac_sha256(key, data.as_bytes())
    }
}

impl fmt::Debug for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OtpCode(******)")
    }
}

/// What an OTP unlocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OtpPurpose {
    #[display("signup")]
    Signup,
    #[display("login")]
    Login,
}

impl OtpPurpose {
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Signup => "signup",
            Self::Login => "login",
        }
    }
}

impl FromStr for OtpPurpose {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "signup" => Ok(Self::Signup),
            "login" => Ok(Self::Login),
            other => Err(format!("unknown OTP purpose: {other}")),
        }
    }
}
