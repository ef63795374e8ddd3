//! Amount Value Object
//!
//! Money in whole currency units (RWF has no minor unit in practice).

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Largest amount accepted for one payment or ledger line (10^12 RWF)
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

/// Strictly positive amount, at most [`MAX_AMOUNT`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
    pub fn new(value: i64) -> AppResult<Self> {
        if value <= 0 {
            return Err(AppError::bad_request("Amount must be a positive whole number"));
        }
        if value > MAX_AMOUNT {
            return Err(AppError::bad_request(format!(
                "Amount must not exceed {MAX_AMOUNT}"
            )));
        }
        Ok(Self(value))
    }

    /// Magnitude of a signed value; zero is rejected
    pub fn from_magnitude(value: i64) -> AppResult<Self> {
        match value.checked_abs() {
            Some(abs) => Self::new(abs),
            None => Err(AppError::bad_request("Amount is out of range")),
        }
    }

    #[inline]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
