//! Possession verification method and result

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationMethod {
    /// Short video of the user holding the card and the code
    #[default]
    #[display("selfie_video")]
    SelfieVideo,
    #[display("otp")]
    Otp,
    #[display("biometric")]
    Biometric,
}

impl VerificationMethod {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::SelfieVideo => "selfie_video",
            Self::Otp => "otp",
            Self::Biometric => "biometric",
        }
    }
}

impl FromStr for VerificationMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "selfie_video" => Ok(Self::SelfieVideo),
            "otp" => Ok(Self::Otp),
            "biometric" => Ok(Self::Biometric),
            other => Err(format!("unknown verification method: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationResult {
    #[display("passed")]
    Passed,
    #[display("failed")]
    Failed,
    /// Automated check was inconclusive; a human must decide
    #[display("pending_review")]
    PendingReview,
}

impl VerificationResult {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::PendingReview => "pending_review",
        }
    }

    #[inline]
    pub const fn is_final(&self) -> bool {
        !matches!(self, Self::PendingReview)
    }
}

impl FromStr for VerificationResult {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "passed" => Ok(Self::Passed),
            "failed" => Ok(Self::Failed),
            "pending_review" => Ok(Self::PendingReview),
            other => Err(format!("unknown verification result: {other}")),
        }
    }
}
