//! Card Category Value Object
//!
//! A wallet holds payment cards and identity documents side by side; the
//! category decides which.

use derive_more::Display;
use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardCategory {
    /// Debit/credit card, the only category that can pay
    #[display("bank")]
    Bank,
    /// National ID
    #[display("ids")]
    Ids,
    #[display("license")]
    License,
    /// Metro and bus passes
    #[display("transit")]
    Transit,
    /// Passports and other documents
    #[display("documents")]
    Documents,
}

impl CardCategory {
    pub const ALL: [CardCategory; 5] = [
        Self::Bank,
        Self::Ids,
        Self::License,
        Self::Transit,
        Self::Documents,
    ];

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Bank => "bank",
            Self::Ids => "ids",
            Self::License => "license",
            Self::Transit => "transit",
            Self::Documents => "documents",
        }
    }

    #[inline]
    pub const fn is_bank(&self) -> bool {
        matches!(self, Self::Bank)
    }

    /// Identity documents rather than payment instruments
    #[inline]
    pub const fn is_identity_document(&self) -> bool {
        matches!(self, Self::Ids | Self::License | Self::Documents)
    }
}

impl FromStr for CardCategory {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        let code = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.code() == code)
            .ok_or_else(|| {
                AppError::bad_request(format!("Unknown category: {}", s.trim()))
                    .with_action("Use one of: bank, ids, license, transit, documents")
            })
    }
}
