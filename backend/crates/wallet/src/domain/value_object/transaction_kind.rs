//! Transaction kind and status

use derive_more::Display;
use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::amount::Amount;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Money in
    #[display("credit")]
    Credit,
    /// Money out
    #[display("debit")]
    Debit,
}

impl TransactionKind {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Credit => "credit",
            Self::Debit => "debit",
        }
    }

    /// Stored amount: debits are negative
    #[inline]
    pub const fn signed(&self, amount: Amount) -> i64 {
        match self {
            Self::Credit => amount.value(),
            Self::Debit => -amount.value(),
        }
    }
}

impl FromStr for TransactionKind {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        match s.trim() {
            "credit" => Ok(Self::Credit),
            "debit" => Ok(Self::Debit),
            other => Err(AppError::bad_request(format!(
                "Transaction type must be credit or debit, got: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    #[default]
    #[display("completed")]
    Completed,
    #[display("pending")]
    Pending,
    #[display("failed")]
    Failed,
}

impl TransactionStatus {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Pending => "pending",
            Self::Failed => "failed",
        }
    }

    /// Only completed entries move the balance
    #[inline]
    pub const fn counts_toward_balance(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl FromStr for TransactionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "completed" => Ok(Self::Completed),
            "pending" => Ok(Self::Pending),
            "failed" => Ok(Self::Failed),
            other => Err(format!("unknown transaction status: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_amount() {
        let amount = Amount::new(120).unwrap();
        assert_eq!(TransactionKind::Debit.signed(amount), -120);
        assert_eq!(TransactionKind::Credit.signed(amount), 120);
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!(
            "debit".parse::<TransactionKind>().unwrap(),
            TransactionKind::Debit
        );
        assert!("refund".parse::<TransactionKind>().is_err());
    }
}
