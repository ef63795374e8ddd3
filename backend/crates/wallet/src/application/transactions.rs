//! Transaction Use Cases

use std::sync::Arc;

use chrono::Utc;
use kernel::id::{CardId, UserId};
use kernel::pagination::Pagination;

use crate::application::config::WalletConfig;
use crate::domain::entity::transaction::{NewTransaction, Transaction};
use crate::domain::repository::{CardRepository, TransactionRepository};
use crate::domain::value_object::{amount::Amount, transaction_kind::TransactionKind};
use crate::error::{WalletError, WalletResult};

/// One page of a card's ledger
#[derive(Debug)]
pub struct CardTransactionsOutput {
    pub transactions: Vec<Transaction>,
    pub pagination: Pagination,
}

/// Card transactions use case
pub struct CardTransactionsUseCase<C, T>
where
    C: CardRepository,
    T: TransactionRepository,
{
    card_repo: Arc<C>,
    transaction_repo: Arc<T>,
    config: Arc<WalletConfig>,
}

impl<C, T> CardTransactionsUseCase<C, T>
where
    C: CardRepository,
    T: TransactionRepository,
{
    pub fn new(card_repo: Arc<C>, transaction_repo: Arc<T>, config: Arc<WalletConfig>) -> Self {
        Self {
            card_repo,
            transaction_repo,
            config,
        }
    }

    pub async fn execute(
        &self,
        user_id: UserId,
        card_id: CardId,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> WalletResult<CardTransactionsOutput> {
        self.card_repo
            .find_card_for_user(&card_id, &user_id)
            .await?
            .ok_or(WalletError::CardNotFound)?;

        let request = self.config.page_request(page, limit);
        let (transactions, total) = self
            .transaction_repo
            .list_card_transactions(&card_id, request)
            .await?;

        Ok(CardTransactionsOutput {
            transactions,
            pagination: Pagination::new(request, total),
        })
    }
}

/// All transactions on the caller's cards
pub struct ListTransactionsUseCase<T: TransactionRepository> {
    repo: Arc<T>,
}

impl<T: TransactionRepository> ListTransactionsUseCase<T> {
    pub fn new(repo: Arc<T>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, user_id: UserId) -> WalletResult<Vec<Transaction>> {
        self.repo.list_user_transactions(&user_id).await
    }
}

/// Record transaction input
pub struct RecordTransactionInput {
    pub card_id: Option<CardId>,
    pub description: Option<String>,
    pub amount: Option<i64>,
    pub kind: Option<String>,
    pub merchant: Option<String>,
    pub category: Option<String>,
}

/// Record transaction use case
pub struct RecordTransactionUseCase<C, T>
where
    C: CardRepository,
    T: TransactionRepository,
{
    card_repo: Arc<C>,
    transaction_repo: Arc<T>,
    config: Arc<WalletConfig>,
}

impl<C, T> RecordTransactionUseCase<C, T>
where
    C: CardRepository,
    T: TransactionRepository,
{
    pub fn new(card_repo: Arc<C>, transaction_repo: Arc<T>, config: Arc<WalletConfig>) -> Self {
        Self {
            card_repo,
            transaction_repo,
            config,
        }
    }

    pub async fn execute(
        &self,
        user_id: UserId,
        input: RecordTransactionInput,
    ) -> WalletResult<Transaction> {
        const REQUIRED: &str = "cardId, description, amount, and type are required";

        let description = input
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        let (Some(card_id), Some(description), Some(amount), Some(kind)) =
            (input.card_id, description, input.amount, input.kind)
        else {
            return Err(WalletError::MissingFields(REQUIRED));
        };
        let kind: TransactionKind = kind.parse()?;
        let amount = Amount::from_magnitude(amount)?;

        let card = self
            .card_repo
            .find_card_for_user(&card_id, &user_id)
            .await?
            .ok_or(WalletError::CardNotFound)?;

        let transaction = Transaction::record(
            NewTransaction {
                card_id: card.id,
                kind,
                amount,
                description,
                merchant: input.merchant.filter(|m| !m.trim().is_empty()),
                category: input.category.filter(|c| !c.trim().is_empty()),
            },
            &self.config.currency,
            Utc::now(),
        );
        let transaction = self.transaction_repo.append_transaction(transaction).await?;

        tracing::info!(
            user_id = %user_id,
            card_id = %card.id,
            transaction_id = %transaction.id,
            kind = %transaction.kind,
            amount = transaction.amount,
            balance = transaction.balance,
            "Transaction recorded"
        );
        Ok(transaction)
    }
}
