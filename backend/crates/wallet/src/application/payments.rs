//! Payment Use Cases
//!
//! Payments are simulated: nothing leaves the wallet. A payment is settled
//! immediately by a debit on the source bank card.

use std::sync::Arc;

use chrono::Utc;
use kernel::id::{CardId, PaymentId, UserId};

use crate::application::config::WalletConfig;
use crate::domain::entity::{payment::Payment, transaction::Transaction};
use crate::domain::repository::{CardRepository, PaymentRepository};
use crate::domain::value_object::{amount::Amount, payment_status::PaymentMethod};
use crate::error::{WalletError, WalletResult};

/// Make payment input
pub struct MakePaymentInput {
    pub from_card_id: Option<CardId>,
    pub to: Option<String>,
    pub amount: Option<i64>,
    pub method: Option<String>,
}

/// Make payment output
#[derive(Debug)]
pub struct MakePaymentOutput {
    pub payment: Payment,
    pub transaction: Transaction,
}

/// Make payment use case
pub struct MakePaymentUseCase<C, P>
where
    C: CardRepository,
    P: PaymentRepository,
{
    card_repo: Arc<C>,
    payment_repo: Arc<P>,
    config: Arc<WalletConfig>,
}

impl<C, P> MakePaymentUseCase<C, P>
where
    C: CardRepository,
    P: PaymentRepository,
{
    pub fn new(card_repo: Arc<C>, payment_repo: Arc<P>, config: Arc<WalletConfig>) -> Self {
        Self {
            card_repo,
            payment_repo,
            config,
        }
    }

    pub async fn execute(
        &self,
        user_id: UserId,
        input: MakePaymentInput,
    ) -> WalletResult<MakePaymentOutput> {
        let to = input
            .to
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(WalletError::MissingFields("Recipient is required"))?;
        let amount = Amount::new(
            input
                .amount
                .ok_or(WalletError::MissingFields("Amount is required"))?,
        )?;
        let method = match input.method.as_deref().map(str::trim) {
            None | Some("") => PaymentMethod::Manual,
            Some(raw) => raw.parse()?,
        };

        let from_card_id = input.from_card_id.ok_or(WalletError::BankCardNotFound)?;
        let card = self
            .card_repo
            .find_card_for_user(&from_card_id, &user_id)
            .await?
            .filter(|card| card.category.is_bank())
            .ok_or(WalletError::BankCardNotFound)?;

        let now = Utc::now();
        let mut payment = Payment::new(card.id, to, amount, &self.config.currency, method, now);
        let debit = Transaction::for_payment(&payment, now);
        payment.complete(debit.id, now);

        let transaction = self
            .payment_repo
            .save_settled_payment(&payment, debit)
            .await?;

        tracing::info!(
            user_id = %user_id,
            payment_id = %payment.id,
            card_id = %card.id,
            amount = payment.amount.value(),
            method = %payment.method,
            "Payment completed"
        );

        Ok(MakePaymentOutput {
            payment,
            transaction,
        })
    }
}

/// List payments use case
pub struct ListPaymentsUseCase<P: PaymentRepository> {
    repo: Arc<P>,
}

impl<P: PaymentRepository> ListPaymentsUseCase<P> {
    pub fn new(repo: Arc<P>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, user_id: UserId) -> WalletResult<Vec<Payment>> {
        self.repo.list_payments(&user_id).await
    }
}

/// Get payment use case
pub struct GetPaymentUseCase<P: PaymentRepository> {
    repo: Arc<P>,
}

impl<P: PaymentRepository> GetPaymentUseCase<P> {
    pub fn new(repo: Arc<P>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, user_id: UserId, payment_id: PaymentId) -> WalletResult<Payment> {
        self.repo
            .find_payment_for_user(&payment_id, &user_id)
            .await?
            .ok_or(WalletError::PaymentNotFound)
    }
}
