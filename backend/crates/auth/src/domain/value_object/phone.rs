//! Phone Value Object
//!
//! Destination for SMS one-time codes. Spaces, dashes, dots and
//! parentheses are stripped; what remains must be an optional leading `+`
//! followed by 7 to 15 digits (E.164 allows at most 15).

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

const PHONE_MIN_DIGITS: usize = 7;
const PHONE_MAX_DIGITS: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Phone(String);

impl Phone {
    pub fn new(phone: impl AsRef<str>) -> AppResult<Self> {
        let compact: String = phone
            .as_ref()
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '.' | '(' | ')'))
            .collect();

        if compact.is_empty() {
            return Err(AppError::bad_request("Phone number cannot be empty"));
        }

        let digits = compact.strip_prefix('+').unwrap_or(&compact);
        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(AppError::bad_request("Phone number may only contain digits"));
        }
        if !(PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits.len()) {
            return Err(AppError::bad_request(format!(
                "Phone number must have between {PHONE_MIN_DIGITS} and {PHONE_MAX_DIGITS} digits"
            )));
        }

        Ok(Self(compact))
    }

    pub fn from_db(phone: impl Into<String>) -> Self {
        Self(phone.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Phone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_separators() {
        assert_eq!(
            Phone::new("+250 788-123 456").unwrap().as_str(),
            "+250788123456"
        );
        assert_eq!(Phone::new("(078) 812.3456").unwrap().as_str(), "0788123456");
    }

    #[test]
    fn test_length_bounds() {
        assert!(Phone::new("123456").is_err());
        assert!(Phone::new("1234567").is_ok());
        assert!(Phone::new("+123456789012345").is_ok());
        assert!(Phone::new("+1234567890123456").is_err());
    }

    #[test]
    fn test_rejects_letters_and_inner_plus() {
        assert!(Phone::new("0788ABC456").is_err());
        assert!(Phone::new("250+788123456").is_err());
        assert!(Phone::new("   ").is_err());
    }
}
