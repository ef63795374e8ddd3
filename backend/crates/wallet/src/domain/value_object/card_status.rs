//! Card verification status

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Whether possession of the physical card has been proven
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardStatus {
    /// Not verified yet, or waiting for a manual review
    #[default]
    #[display("pending")]
    Pending,
    #[display("verified")]
    Verified,
    /// Rejected by a reviewer; a new attempt is allowed
    #[display("failed")]
    Failed,
}

impl CardStatus {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Verified => "verified",
            Self::Failed => "failed",
        }
    }
}

impl FromStr for CardStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "verified" => Ok(Self::Verified),
            "failed" => Ok(Self::Failed),
            other => Err(format!("unknown card status: {other}")),
        }
    }
}
