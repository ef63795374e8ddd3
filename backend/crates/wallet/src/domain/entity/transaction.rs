//! Transaction Entity
//!
//! One ledger line on a card. The stored amount is signed and `balance` is
//! the card's running total after this line; the repository fills it in
//! when appending.

use chrono::{DateTime, Utc};
use kernel::id::{CardId, Id, PaymentId, TransactionId};

use crate::domain::entity::payment::Payment;
use crate::domain::value_object::{
    amount::Amount,
    transaction_kind::{TransactionKind, TransactionStatus},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: TransactionId,
    pub card_id: CardId,
    pub kind: TransactionKind,
    /// Negative for debits
    pub amount: i64,
    pub description: String,
    pub merchant: Option<String>,
    pub category: Option<String>,
    pub date: DateTime<Utc>,
    pub balance: i64,
    pub currency: String,
    pub status: TransactionStatus,
    pub payment_id: Option<PaymentId>,
    pub created_at: DateTime<Utc>,
}

/// Fields of a manually recorded transaction
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub card_id: CardId,
    pub kind: TransactionKind,
    pub amount: Amount,
    pub description: String,
    pub merchant: Option<String>,
    pub category: Option<String>,
}

impl Transaction {
    pub fn record(fields: NewTransaction, currency: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Id::new(),
            card_id: fields.card_id,
            kind: fields.kind,
            amount: fields.kind.signed(fields.amount),
            description: fields.description,
            merchant: fields.merchant,
            category: fields.category,
            date: now,
            balance: 0,
            currency: currency.into(),
            status: TransactionStatus::Completed,
            payment_id: None,
            created_at: now,
        }
    }

    /// Completed debit settling `payment`
    pub fn for_payment(payment: &Payment, now: DateTime<Utc>) -> Self {
        Self {
            id: Id::new(),
            card_id: payment.from_card_id,
            kind: TransactionKind::Debit,
            amount: TransactionKind::Debit.signed(payment.amount),
            description: format!("Payment to {}", payment.to),
            merchant: Some(payment.to.clone()),
            category: Some("payment".to_string()),
            date: now,
            balance: 0,
            currency: payment.currency.clone(),
            status: TransactionStatus::Completed,
            payment_id: Some(payment.id),
            created_at: now,
        }
    }

    /// Set `balance` from the card's total before this line.
    ///
    /// Returns false, leaving the line untouched, when the total would leave
    /// the `i64` range.
    pub fn apply_running_balance(&mut self, previous: i64) -> bool {
        match previous.checked_add(self.balance_delta()) {
            Some(balance) => {
                self.balance = balance;
                true
            }
            None => false,
        }
    }

    /// Balance contribution of this line
    pub fn balance_delta(&self) -> i64 {
        if self.status.counts_toward_balance() {
            self.amount
        } else {
            0
        }
    }
}
