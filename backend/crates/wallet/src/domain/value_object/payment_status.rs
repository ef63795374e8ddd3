//! Payment status and method

use derive_more::Display;
use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    #[display("pending")]
    Pending,
    #[display("completed")]
    Completed,
    #[display("failed")]
    Failed,
}

impl PaymentStatus {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            other => Err(format!("unknown payment status: {other}")),
        }
    }
}

/// How the recipient was entered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Typed in by the user
    #[default]
    #[display("manual")]
    Manual,
    /// Read from a QR/bar code
    #[display("scan")]
    Scan,
}

impl PaymentMethod {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Scan => "scan",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        match s.trim() {
            "manual" => Ok(Self::Manual),
            "scan" => Ok(Self::Scan),
            other => Err(AppError::bad_request(format!(
                "Unknown payment method: {other}"
            ))),
        }
    }
}
