//! Password policy, hashing and breach lookup
//!
//! - Policy follows NIST SP 800-63B: NFKC normalization, 8..=128 code
//!   points, no control characters, no trivially guessable values.
//! - Hashes are Argon2id PHC strings, optionally peppered.
//! - Clear text is zeroized on drop and never printed.
//! - Breach lookup uses the Pwned Passwords k-anonymity range API.

use std::fmt;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use sha1::{Digest, Sha1};
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 128;

const PWNED_RANGE_URL: &str = "https://api.pwnedpasswords.com/range/";

/// Policy violations, safe to show to the user
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters")]
    TooShort { min: usize },

    #[error("Password must be at most {max} characters")]
    TooLong { max: usize },

    #[error("Password cannot be empty")]
    Empty,

    #[error("Password contains control characters")]
    ControlCharacter,

    #[error("Password is too easy to guess")]
    Guessable,
}

#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Stored password hash is not a valid PHC string")]
    InvalidHash,

    #[error("Breach lookup failed: {0}")]
    BreachLookup(String),
}

/// Validated clear-text password
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let raw = Zeroizing::new(raw);
        let normalized: String = raw.nfkc().collect();
        let candidate = Self(normalized);
        candidate.check_policy()?;
        Ok(candidate)
    }

    /// Wrap input without policy checks.
    ///
    /// Used on the login path: the stored hash is the authority there, and
    /// a policy change must not lock out existing accounts.
    pub fn for_verification(raw: String) -> Self {
        let raw = Zeroizing::new(raw);
        Self(raw.nfkc().collect())
    }

    fn check_policy(&self) -> Result<(), PasswordPolicyError> {
        let value = self.0.as_str();
        if value.trim().is_empty() {
            return Err(PasswordPolicyError::Empty);
        }

        let length = value.chars().count();
        if length < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
            });
        }
        if length > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
            });
        }

        if value.chars().any(|c| c.is_control() && c != '\t') {
            return Err(PasswordPolicyError::ControlCharacter);
        }

        if is_guessable(value) {
            return Err(PasswordPolicyError::Guessable);
        }
        Ok(())
    }

    fn peppered(&self, pepper: Option<&[u8]>) -> Zeroizing<Vec<u8>> {
        let mut bytes = Zeroizing::new(self.0.as_bytes().to_vec());
        if let Some(pepper) = pepper {
            bytes.extend_from_slice(pepper);
        }
        bytes
    }

    /// Hash with Argon2id (default OWASP parameters: m=19 MiB, t=2, p=1)
    pub fn hash(&self, pepper: Option<&[u8]>) -> Result<HashedPassword, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(&self.peppered(pepper), &salt)
            .map_err(|e| PasswordHashError::Hashing(e.to_string()))?;

        Ok(HashedPassword(hash.to_string()))
    }

    /// `Ok(true)` when the password appears in a known breach.
    ///
    /// Only the first five hex characters of the SHA-1 leave the process.
    pub async fn is_breached(&self) -> Result<bool, PasswordHashError> {
        let digest = Sha1::digest(self.0.as_bytes());
        let hex: String = digest.iter().map(|b| format!("{:02X}", b)).collect();
        let (prefix, suffix) = hex.split_at(5);

        let response = reqwest::get(format!("{PWNED_RANGE_URL}{prefix}"))
            .await
            .map_err(|e| PasswordHashError::BreachLookup(e.to_string()))?;
        if !response.status().is_success() {
            return Err(PasswordHashError::BreachLookup(format!(
                "status {}",
                response.status()
            )));
        }
        let body = response
            .text()
            .await
            .map_err(|e| PasswordHashError::BreachLookup(e.to_string()))?;

        Ok(range_contains(&body, suffix))
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClearTextPassword([REDACTED])")
    }
}

/// Argon2id PHC string
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword(String);

impl HashedPassword {
    /// Load a stored hash, rejecting anything that is not a PHC string
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let s = s.into();
        PasswordHash::new(&s).map_err(|_| PasswordHashError::InvalidHash)?;
        Ok(Self(s))
    }

    pub fn as_phc_string(&self) -> &str {
        &self.0
    }

    pub fn verify(&self, password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.0) else {
            return false;
        };
        Argon2::default()
            .verify_password(&password.peppered(pepper), &parsed)
            .is_ok()
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HashedPassword([HASH])")
    }
}

/// Pwned Passwords range body: one `SUFFIX:COUNT` per line
fn range_contains(body: &str, suffix: &str) -> bool {
    body.lines()
        .filter_map(|line| line.split_once(':'))
        .any(|(candidate, _)| candidate.trim().eq_ignore_ascii_case(suffix))
}

fn is_guessable(password: &str) -> bool {
    const DENYLIST: &[&str] = &[
        "password",
        "password1",
        "password123",
        "passw0rd",
        "12345678",
        "123456789",
        "1234567890",
        "abcdefgh",
        "letmein1",
        "welcome1",
        "iloveyou",
        "sunshine",
        "football",
        "baseball",
        "trustno1",
    ];
    const KEYBOARD_RUNS: &[&str] = &["qwerty", "asdfgh", "zxcvbn", "azerty", "1qaz2wsx"];

    let lower = password.to_lowercase();
    if DENYLIST.contains(&lower.as_str()) {
        return true;
    }
    if KEYBOARD_RUNS.iter().any(|run| lower.contains(run)) {
        return true;
    }

    let mut chars = lower.chars();
    if let Some(first) = chars.next() {
        if chars.all(|c| c == first) {
            return true;
        }
    }

    is_digit_run(&lower)
}

/// All-digit strings that step by +1 or -1 (wrapping 9/0)
fn is_digit_run(s: &str) -> bool {
    if s.len() < 4 || !s.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    let digits: Vec<u8> = s.bytes().map(|b| b - b'0').collect();
    let ascending = digits.windows(2).all(|w| (w[0] + 1) % 10 == w[1]);
    let descending = digits.windows(2).all(|w| (w[1] + 1) % 10 == w[0]);
    ascending || descending
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_short() {
        assert_eq!(
            ClearTextPassword::new("Ab1!".to_string()).unwrap_err(),
            PasswordPolicyError::TooShort { min: 8 }
        );
    }

    #[test]
    fn test_too_long() {
        let long = "Xy7!".repeat(40);
        assert!(matches!(
            ClearTextPassword::new(long),
            Err(PasswordPolicyError::TooLong { .. })
        ));
    }

    #[test]
    fn test_whitespace_only() {
        assert_eq!(
            ClearTextPassword::new("          ".to_string()).unwrap_err(),
            PasswordPolicyError::Empty
        );
    }

    #[test]
    fn test_control_character() {
        assert_eq!(
            ClearTextPassword::new("Wallet\u{0007}Secret9".to_string()).unwrap_err(),
            PasswordPolicyError::ControlCharacter
        );
    }

    #[test]
    fn test_guessable() {
        for weak in ["password123", "Qwerty2024!", "12345678", "98765432", "zzzzzzzz"] {
            assert_eq!(
                ClearTextPassword::new(weak.to_string()).unwrap_err(),
                PasswordPolicyError::Guessable,
                "{weak} should be rejected"
            );
        }
    }

    #[test]
    fn test_accepts_reasonable_password() {
        assert!(ClearTextPassword::new("Kigali-Sunrise-42".to_string()).is_ok());
        assert!(ClearTextPassword::new("ウォレット安全パス".to_string()).is_ok());
    }

    #[test]
    fn test_hash_verify_with_pepper() {
        let password = ClearTextPassword::new("Kigali-Sunrise-42".to_string()).unwrap();
        let hashed = password.hash(Some(b"pepper")).unwrap();

        assert!(hashed.verify(&password, Some(b"pepper")));
        assert!(!hashed.verify(&password, None));

        let other = ClearTextPassword::for_verification("Kigali-Sunrise-43".to_string());
        assert!(!hashed.verify(&other, Some(b"pepper")));
    }

    #[test]
    fn test_for_verification_skips_policy() {
        let password = ClearTextPassword::for_verification("short".to_string());
        let hashed = password.hash(None).unwrap();
        assert!(hashed.verify(&password, None));
    }

    #[test]
    fn test_phc_roundtrip_and_rejection() {
        let password = ClearTextPassword::new("Kigali-Sunrise-42".to_string()).unwrap();
        let stored = password.hash(None).unwrap().as_phc_string().to_string();
        assert!(stored.starts_with("$argon2id$"));

        let restored = HashedPassword::from_phc_string(stored).unwrap();
        assert!(restored.verify(&password, None));
        assert!(HashedPassword::from_phc_string("plain-text").is_err());
    }

    #[test]
    fn test_debug_redacted() {
        let password = ClearTextPassword::for_verification("hunter22hunter".to_string());
        assert!(!format!("{password:?}").contains("hunter"));
    }

    #[test]
    fn test_range_contains() {
        let body = "0018A45C4D1DEF81644B54AB7F969B88D65:1\r\n1E4C9B93F3F0682250B6CF8331B7EE68FD8:3861493\r\n";
        assert!(range_contains(body, "1e4c9b93f3f0682250b6cf8331b7ee68fd8"));
        assert!(!range_contains(body, "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF"));
    }

    #[test]
    fn test_digit_run() {
        assert!(is_digit_run("7890123"));
        assert!(is_digit_run("3210"));
        assert!(!is_digit_run("1357"));
        assert!(!is_digit_run("12a4"));
    }
}
