//! Payment Entity

use chrono::{DateTime, Utc};
use kernel::id::{CardId, Id, PaymentId, TransactionId};

use crate::domain::value_object::{
    amount::Amount,
    payment_status::{PaymentMethod, PaymentStatus},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    pub id: PaymentId,
    pub from_card_id: CardId,
    /// Recipient as entered or scanned
    pub to: String,
    pub amount: Amount,
    pub currency: String,
    pub status: PaymentStatus,
    pub method: PaymentMethod,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub transaction_id: Option<TransactionId>,
}

impl Payment {
    pub fn new(
        from_card_id: CardId,
        to: String,
        amount: Amount,
        currency: impl Into<String>,
        method: PaymentMethod,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Id::new(),
            from_card_id,
            to,
            amount,
            currency: currency.into(),
            status: PaymentStatus::Pending,
            method,
            created_at: now,
            completed_at: None,
            transaction_id: None,
        }
    }

    /// Link the settling debit and mark completed
    pub fn complete(&mut self, transaction_id: TransactionId, now: DateTime<Utc>) {
        self.status = PaymentStatus::Completed;
        self.completed_at = Some(now);
        self.transaction_id = Some(transaction_id);
    }
}
