//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.
//! Method names are distinct across traits so one type can implement them all.

use chrono::{DateTime, Utc};
use kernel::id::{CardId, PaymentId, UserId, VerificationId};
use kernel::pagination::PageRequest;

use crate::domain::entity::{
    card::Card,
    payment::Payment,
    transaction::Transaction,
    verification::{PossessionCode, VerificationRecord},
};
use crate::domain::value_object::card_category::CardCategory;
use crate::error::WalletResult;

/// Card repository trait
#[trait_variant::make(CardRepository: Send)]
pub trait LocalCardRepository {
    async fn create_card(&self, card: &Card) -> WalletResult<()>;

    /// Any owner
    async fn find_card(&self, card_id: &CardId) -> WalletResult<Option<Card>>;

    /// Only if `user_id` owns it
    async fn find_card_for_user(
        &self,
        card_id: &CardId,
        user_id: &UserId,
    ) -> WalletResult<Option<Card>>;

    /// Newest first, optionally filtered by category
    async fn list_cards(
        &self,
        user_id: &UserId,
        category: Option<CardCategory>,
    ) -> WalletResult<Vec<Card>>;

    /// Write the editable card fields; verification status and date are
    /// only written alongside a verification record
    async fn update_card(&self, card: &Card) -> WalletResult<()>;

    /// Returns false when no card of `user_id` matched
    async fn delete_card(&self, card_id: &CardId, user_id: &UserId) -> WalletResult<bool>;
}

/// Payment repository trait
#[trait_variant::make(PaymentRepository: Send)]
pub trait LocalPaymentRepository {
    /// Store a completed payment and its settling debit as one unit.
    ///
    /// Returns the debit with its running balance filled in.
    async fn save_settled_payment(
        &self,
        payment: &Payment,
        debit: Transaction,
    ) -> WalletResult<Transaction>;

    /// Payments from any of the user's cards, newest first
    async fn list_payments(&self, user_id: &UserId) -> WalletResult<Vec<Payment>>;

    async fn find_payment_for_user(
        &self,
        payment_id: &PaymentId,
        user_id: &UserId,
    ) -> WalletResult<Option<Payment>>;
}

/// Transaction repository trait
#[trait_variant::make(TransactionRepository: Send)]
pub trait LocalTransactionRepository {
    /// Append to the card's ledger, setting `balance` to the running total
    /// after this line. Concurrent appends on one card must serialize.
    async fn append_transaction(&self, transaction: Transaction) -> WalletResult<Transaction>;

    /// One page, newest first, with the card's total line count
    async fn list_card_transactions(
        &self,
        card_id: &CardId,
        page: PageRequest,
    ) -> WalletResult<(Vec<Transaction>, u64)>;

    /// Every line on the user's cards, newest first
    async fn list_user_transactions(&self, user_id: &UserId) -> WalletResult<Vec<Transaction>>;
}

/// Possession verification repository trait
#[trait_variant::make(VerificationRepository: Send)]
pub trait LocalVerificationRepository {
    async fn create_code(&self, code: &PossessionCode) -> WalletResult<()>;

    /// Mark the newest unused, unexpired code of `card_id` whose digest
    /// equals `code_hash` as used, and return it. Atomic.
    async fn consume_code(
        &self,
        card_id: &CardId,
        code_hash: &[u8],
        now: DateTime<Utc>,
    ) -> WalletResult<Option<PossessionCode>>;

    /// Delete expired codes, returning how many were removed
    async fn delete_expired_codes(&self, now: DateTime<Utc>) -> WalletResult<u64>;

    /// Insert an attempt and store the card's resulting status together
    async fn save_attempt(&self, record: &VerificationRecord, card: &Card) -> WalletResult<()>;

    async fn find_record(
        &self,
        verification_id: &VerificationId,
    ) -> WalletResult<Option<VerificationRecord>>;

    async fn latest_for_card(&self, card_id: &CardId) -> WalletResult<Option<VerificationRecord>>;

    /// Store a review only if the record is still pending review.
    ///
    /// Returns false when another review got there first.
    async fn save_review(&self, record: &VerificationRecord, card: &Card) -> WalletResult<bool>;
}
