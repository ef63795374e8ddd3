//! Unit tests for wallet crate
//! Use cases run against an in-memory repository; router tests drive the
//! real axum router with `tower::ServiceExt::oneshot`.

#[cfg(test)]
mod support {
    use chrono::{DateTime, Utc};
    use kernel::id::{CardId, Id, PaymentId, UserId, VerificationId};
    use kernel::pagination::PageRequest;
    use std::sync::Mutex;

    use crate::application::cards::{CardInput, CreateCardUseCase};
    use crate::domain::entity::{
        card::Card,
        payment::Payment,
        transaction::Transaction,
        verification::{PossessionCode, VerificationRecord},
    };
    use crate::domain::repository::{
        CardRepository, PaymentRepository, TransactionRepository, VerificationRepository,
    };
    use crate::domain::value_object::card_category::CardCategory;
    use crate::error::{WalletError, WalletResult};
    use std::sync::Arc;

    pub const EMAIL: &str = "alice@example.rw";

    #[derive(Default)]
    pub struct MemoryWalletRepository {
        pub cards: Mutex<Vec<Card>>,
        pub payments: Mutex<Vec<Payment>>,
        pub transactions: Mutex<Vec<Transaction>>,
        pub codes: Mutex<Vec<PossessionCode>>,
        pub records: Mutex<Vec<VerificationRecord>>,
    }

    impl MemoryWalletRepository {
        pub fn card(&self, card_id: &CardId) -> Option<Card> {
            self.cards
                .lock()
                .unwrap()
                .iter()
                .find(|c| &c.id == card_id)
                .cloned()
        }

        pub fn payment_count(&self) -> usize {
            self.payments.lock().unwrap().len()
        }

        pub fn transactions_for(&self, card_id: &CardId) -> Vec<Transaction> {
            self.transactions
                .lock()
                .unwrap()
                .iter()
                .filter(|t| &t.card_id == card_id)
                .cloned()
                .collect()
        }

        /// Move every possession code's expiry to `at`
        pub fn expire_codes(&self, at: DateTime<Utc>) {
            for code in self.codes.lock().unwrap().iter_mut() {
                code.expires_at = at;
            }
        }

        fn card_ids_of(&self, user_id: &UserId) -> Vec<CardId> {
            self.cards
                .lock()
                .unwrap()
                .iter()
                .filter(|c| &c.user_id == user_id)
                .map(|c| c.id)
                .collect()
        }

        /// Running balance, computed under the ledger lock
        fn append_locked(&self, mut transaction: Transaction) -> WalletResult<Transaction> {
            let mut ledger = self.transactions.lock().unwrap();
            let previous = ledger
                .iter()
                .filter(|t| t.card_id == transaction.card_id)
                .try_fold(0i64, |total, t| total.checked_add(t.balance_delta()))
                .ok_or(WalletError::BalanceOutOfRange)?;
            if !transaction.apply_running_balance(previous) {
                return Err(WalletError::BalanceOutOfRange);
            }
            ledger.push(transaction.clone());
            Ok(transaction)
        }

        /// Verification fields only, the way status writes reach the table
        fn store_status(&self, card: &Card) {
            let mut cards = self.cards.lock().unwrap();
            if let Some(stored) = cards.iter_mut().find(|c| c.id == card.id) {
                stored.verified_status = card.verified_status;
                stored.verification_date = card.verification_date;
                stored.updated_at = card.updated_at;
            }
        }
    }

    impl CardRepository for MemoryWalletRepository {
        async fn create_card(&self, card: &Card) -> WalletResult<()> {
            self.cards.lock().unwrap().push(card.clone());
            Ok(())
        }

        async fn find_card(&self, card_id: &CardId) -> WalletResult<Option<Card>> {
            Ok(self.card(card_id))
        }

        async fn find_card_for_user(
            &self,
            card_id: &CardId,
            user_id: &UserId,
        ) -> WalletResult<Option<Card>> {
            Ok(self.card(card_id).filter(|c| c.is_owned_by(user_id)))
        }

        async fn list_cards(
            &self,
            user_id: &UserId,
            category: Option<CardCategory>,
        ) -> WalletResult<Vec<Card>> {
            let mut cards: Vec<Card> = self
                .cards
                .lock()
                .unwrap()
                .iter()
                .filter(|c| c.is_owned_by(user_id))
                .filter(|c| category.is_none_or(|cat| c.category == cat))
                .cloned()
                .collect();
            cards.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(cards)
        }

        async fn update_card(&self, card: &Card) -> WalletResult<()> {
            let mut cards = self.cards.lock().unwrap();
            if let Some(stored) = cards.iter_mut().find(|c| c.id == card.id) {
                // Verification fields have their own writer
                *stored = Card {
                    verified_status: stored.verified_status,
                    verification_date: stored.verification_date,
                    ..card.clone()
                };
            }
            Ok(())
        }

        async fn delete_card(&self, card_id: &CardId, user_id: &UserId) -> WalletResult<bool> {
            let mut cards = self.cards.lock().unwrap();
            let before = cards.len();
            cards.retain(|c| !(&c.id == card_id && c.is_owned_by(user_id)));
            Ok(cards.len() < before)
        }
    }

    impl PaymentRepository for MemoryWalletRepository {
        async fn save_settled_payment(
            &self,
            payment: &Payment,
            debit: Transaction,
        ) -> WalletResult<Transaction> {
            if self.card(&payment.from_card_id).is_none() {
                return Err(WalletError::CardNotFound);
            }
            let debit = self.append_locked(debit)?;
            self.payments.lock().unwrap().push(payment.clone());
            Ok(debit)
        }

        async fn list_payments(&self, user_id: &UserId) -> WalletResult<Vec<Payment>> {
            let cards = self.card_ids_of(user_id);
            let mut payments: Vec<Payment> = self
                .payments
                .lock()
                .unwrap()
                .iter()
                .filter(|p| cards.contains(&p.from_card_id))
                .cloned()
                .collect();
            payments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(payments)
        }

        async fn find_payment_for_user(
            &self,
            payment_id: &PaymentId,
            user_id: &UserId,
        ) -> WalletResult<Option<Payment>> {
            let cards = self.card_ids_of(user_id);
            Ok(self
                .payments
                .lock()
                .unwrap()
                .iter()
                .find(|p| &p.id == payment_id && cards.contains(&p.from_card_id))
                .cloned())
        }
    }

    impl TransactionRepository for MemoryWalletRepository {
        async fn append_transaction(&self, transaction: Transaction) -> WalletResult<Transaction> {
            if self.card(&transaction.card_id).is_none() {
                return Err(WalletError::CardNotFound);
            }
            self.append_locked(transaction)
        }

        async fn list_card_transactions(
            &self,
            card_id: &CardId,
            page: PageRequest,
        ) -> WalletResult<(Vec<Transaction>, u64)> {
            let mut all = self.transactions_for(card_id);
            all.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
            let total = all.len() as u64;
            let items = all
                .into_iter()
                .skip(page.offset() as usize)
                .take(page.limit() as usize)
                .collect();
            Ok((items, total))
        }

        async fn list_user_transactions(&self, user_id: &UserId) -> WalletResult<Vec<Transaction>> {
            let cards = self.card_ids_of(user_id);
            let mut all: Vec<Transaction> = self
                .transactions
                .lock()
                .unwrap()
                .iter()
                .filter(|t| cards.contains(&t.card_id))
                .cloned()
                .collect();
            all.sort_by(|a, b| b.date.cmp(&a.date));
            Ok(all)
        }
    }

    impl VerificationRepository for MemoryWalletRepository {
        async fn create_code(&self, code: &PossessionCode) -> WalletResult<()> {
            self.codes.lock().unwrap().push(code.clone());
            Ok(())
        }

        async fn consume_code(
            &self,
            card_id: &CardId,
            code_hash: &[u8],
            now: DateTime<Utc>,
        ) -> WalletResult<Option<PossessionCode>> {
            let mut codes = self.codes.lock().unwrap();
            let newest = codes
                .iter_mut()
                .filter(|c| &c.card_id == card_id && c.accepts(code_hash, now))
                .max_by_key(|c| c.created_at);

            Ok(newest.map(|code| {
                code.used = true;
                code.clone()
            }))
        }

        async fn delete_expired_codes(&self, now: DateTime<Utc>) -> WalletResult<u64> {
            let mut codes = self.codes.lock().unwrap();
            let before = codes.len();
            codes.retain(|c| !c.is_expired(now));
            Ok((before - codes.len()) as u64)
        }

        async fn save_attempt(&self, record: &VerificationRecord, card: &Card) -> WalletResult<()> {
            self.records.lock().unwrap().push(record.clone());
            self.store_status(card);
            Ok(())
        }

        async fn find_record(
            &self,
            verification_id: &VerificationId,
        ) -> WalletResult<Option<VerificationRecord>> {
            Ok(self
                .records
                .lock()
                .unwrap()
                .iter()
                .find(|r| &r.id == verification_id)
                .cloned())
        }

        async fn latest_for_card(
            &self,
            card_id: &CardId,
        ) -> WalletResult<Option<VerificationRecord>> {
            Ok(self
                .records
                .lock()
                .unwrap()
                .iter()
                .filter(|r| &r.card_id == card_id)
                .max_by_key(|r| r.timestamp)
                .cloned())
        }

        async fn save_review(
            &self,
            record: &VerificationRecord,
            card: &Card,
        ) -> WalletResult<bool> {
            {
                let mut records = self.records.lock().unwrap();
                let Some(stored) = records
                    .iter_mut()
                    .find(|r| r.id == record.id && r.awaits_review())
                else {
                    return Ok(false);
                };
                *stored = record.clone();
            }
            self.store_status(card);
            Ok(true)
        }
    }

    pub fn user() -> UserId {
        Id::new()
    }

    pub fn card_input(name: &str, number: &str, category: &str) -> CardInput {
        CardInput {
            name: Some(name.to_string()),
            number: Some(number.to_string()),
            category_id: Some(category.to_string()),
            ..Default::default()
        }
    }

    /// Store a card for `owner` through the create use case
    pub async fn add_card(
        repo: &Arc<MemoryWalletRepository>,
        owner: UserId,
        category: &str,
    ) -> Card {
        CreateCardUseCase::new(repo.clone())
            .execute(owner, card_input("Test card", "4111 1111 1111 4242", category))
            .await
            .unwrap()
    }
}

#[cfg(test)]
mod card_tests {
    use super::support::*;
    use crate::application::cards::*;
    use crate::domain::value_object::{card_category::CardCategory, card_status::CardStatus};
    use crate::error::WalletError;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_create_applies_defaults() {
        let repo = Arc::new(MemoryWalletRepository::default());
        let owner = user();

        let card = CreateCardUseCase::new(repo.clone())
            .execute(owner, card_input("  Equity Visa ", "4111 1111 1111 1234", "bank"))
            .await
            .unwrap();

        assert_eq!(card.name, "Equity Visa");
        assert_eq!(card.category, CardCategory::Bank);
        assert_eq!(card.expiry, "");
        assert_eq!(card.card_holder, "");
        assert_eq!(card.issuer, "");
        assert_eq!(card.verified_status, CardStatus::Pending);
        assert!(card.token_id.is_some());
        assert_eq!(repo.card(&card.id), Some(card));
    }

    #[tokio::test]
    async fn test_create_requires_fields() {
        let repo = Arc::new(MemoryWalletRepository::default());
        let use_case = CreateCardUseCase::new(repo.clone());

        for input in [
            card_input("", "123", "bank"),
            card_input("ID", "  ", "ids"),
            CardInput {
                name: Some("ID".into()),
                number: Some("1199".into()),
                ..Default::default()
            },
        ] {
            let err = use_case.execute(user(), input).await.unwrap_err();
            assert!(matches!(err, WalletError::MissingCardFields));
        }
    }

    #[tokio::test]
    async fn test_create_unknown_category() {
        let repo = Arc::new(MemoryWalletRepository::default());
        let err = CreateCardUseCase::new(repo)
            .execute(user(), card_input("Loyalty", "77", "loyalty"))
            .await
            .unwrap_err();
        assert!(matches!(err, WalletError::Validation(_)));
        assert_eq!(err.to_string(), "Unknown category: loyalty");
    }

    #[tokio::test]
    async fn test_list_is_scoped_and_filtered() {
        let repo = Arc::new(MemoryWalletRepository::default());
        let owner = user();
        add_card(&repo, owner, "bank").await;
        add_card(&repo, owner, "ids").await;
        add_card(&repo, user(), "bank").await;

        let use_case = ListCardsUseCase::new(repo.clone());
        assert_eq!(use_case.execute(owner, None).await.unwrap().len(), 2);

        let ids = use_case.execute(owner, Some("ids".into())).await.unwrap();
        assert_eq!(ids.len(), 1);
        assert_eq!(ids[0].category, CardCategory::Ids);

        assert!(use_case.execute(owner, Some("bogus".into())).await.is_err());
    }

    #[tokio::test]
    async fn test_other_users_card_is_not_found() {
        let repo = Arc::new(MemoryWalletRepository::default());
        let owner = user();
        let card = add_card(&repo, owner, "bank").await;
        let stranger = user();

        let err = GetCardUseCase::new(repo.clone())
            .execute(stranger, card.id)
            .await
            .unwrap_err();
        assert!(matches!(err, WalletError::CardNotFound));

        let err = UpdateCardUseCase::new(repo.clone())
            .execute(stranger, card.id, card_input("Mine now", "1", "bank"))
            .await
            .unwrap_err();
        assert!(matches!(err, WalletError::CardNotFound));

        let err = DeleteCardUseCase::new(repo.clone())
            .execute(stranger, card.id)
            .await
            .unwrap_err();
        assert!(matches!(err, WalletError::CardNotFound));
        assert!(repo.card(&card.id).is_some());
    }

    #[tokio::test]
    async fn test_partial_update() {
        let repo = Arc::new(MemoryWalletRepository::default());
        let owner = user();
        let card = add_card(&repo, owner, "transit").await;

        let updated = UpdateCardUseCase::new(repo.clone())
            .execute(
                owner,
                card.id,
                CardInput {
                    issuer: Some("AC Group".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.issuer, "AC Group");
        assert_eq!(updated.name, card.name);
        assert_eq!(updated.number, card.number);
        assert_eq!(repo.card(&card.id).unwrap().issuer, "AC Group");
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = Arc::new(MemoryWalletRepository::default());
        let owner = user();
        let card = add_card(&repo, owner, "license").await;

        let use_case = DeleteCardUseCase::new(repo.clone());
        use_case.execute(owner, card.id).await.unwrap();
        assert!(repo.card(&card.id).is_none());
        assert!(matches!(
            use_case.execute(owner, card.id).await,
            Err(WalletError::CardNotFound)
        ));
    }
}

#[cfg(test)]
mod payment_tests {
    use super::support::*;
    use crate::application::payments::*;
    use crate::application::config::WalletConfig;
    use crate::domain::value_object::{
        payment_status::{PaymentMethod, PaymentStatus},
        transaction_kind::TransactionKind,
    };
    use crate::domain::value_object::amount::MAX_AMOUNT;
    use crate::error::WalletError;
    use kernel::id::CardId;
    use std::sync::Arc;

    fn make(
        repo: &Arc<MemoryWalletRepository>,
    ) -> MakePaymentUseCase<MemoryWalletRepository, MemoryWalletRepository> {
        MakePaymentUseCase::new(repo.clone(), repo.clone(), Arc::new(WalletConfig::default()))
    }

    fn input(card_id: CardId, to: &str, amount: i64) -> MakePaymentInput {
        MakePaymentInput {
            from_card_id: Some(card_id),
            to: Some(to.to_string()),
            amount: Some(amount),
            method: None,
        }
    }

    #[tokio::test]
    async fn test_payment_settles_with_one_debit() {
        let repo = Arc::new(MemoryWalletRepository::default());
        let owner = user();
        let card = add_card(&repo, owner, "bank").await;

        let output = make(&repo)
            .execute(owner, input(card.id, "Kigali Heights Cafe", 4_500))
            .await
            .unwrap();

        let payment = &output.payment;
        assert_eq!(payment.status, PaymentStatus::Completed);
        assert_eq!(payment.method, PaymentMethod::Manual);
        assert_eq!(payment.currency, "RWF");
        assert!(payment.completed_at.is_some());
        assert_eq!(payment.transaction_id, Some(output.transaction.id));

        let ledger = repo.transactions_for(&card.id);
        assert_eq!(ledger.len(), 1);
        let debit = &ledger[0];
        assert_eq!(debit.kind, TransactionKind::Debit);
        assert_eq!(debit.amount, -4_500);
        assert_eq!(debit.balance, -4_500);
        assert_eq!(debit.description, "Payment to Kigali Heights Cafe");
        assert_eq!(debit.merchant.as_deref(), Some("Kigali Heights Cafe"));
        assert_eq!(debit.payment_id, Some(payment.id));
    }

    #[tokio::test]
    async fn test_source_must_be_own_bank_card() {
        let repo = Arc::new(MemoryWalletRepository::default());
        let owner = user();
        let id_card = add_card(&repo, owner, "ids").await;
        let someone_elses = add_card(&repo, user(), "bank").await;

        for card_id in [id_card.id, someone_elses.id] {
            let err = make(&repo)
                .execute(owner, input(card_id, "Shop", 100))
                .await
                .unwrap_err();
            assert!(matches!(err, WalletError::BankCardNotFound));
        }
        assert_eq!(repo.payment_count(), 0);
    }

    #[tokio::test]
    async fn test_payment_validation() {
        let repo = Arc::new(MemoryWalletRepository::default());
        let owner = user();
        let card = add_card(&repo, owner, "bank").await;

        for (to, amount) in [("Shop", 0), ("Shop", -10), ("   ", 100)] {
            let err = make(&repo)
                .execute(owner, input(card.id, to, amount))
                .await
                .unwrap_err();
            assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
        }

        let err = make(&repo)
            .execute(
                owner,
                MakePaymentInput {
                    method: Some("wire".into()),
                    ..input(card.id, "Shop", 100)
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
        assert_eq!(repo.payment_count(), 0);
    }

    #[tokio::test]
    async fn test_payment_amount_upper_bound() {
        let repo = Arc::new(MemoryWalletRepository::default());
        let owner = user();
        let card = add_card(&repo, owner, "bank").await;

        for amount in [MAX_AMOUNT + 1, i64::MAX] {
            let err = make(&repo)
                .execute(owner, input(card.id, "Shop", amount))
                .await
                .unwrap_err();
            assert!(matches!(err, WalletError::Validation(_)));
            assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
        }
        assert_eq!(repo.payment_count(), 0);

        let output = make(&repo)
            .execute(owner, input(card.id, "Shop", MAX_AMOUNT))
            .await
            .unwrap();
        assert_eq!(output.transaction.balance, -MAX_AMOUNT);
    }

    #[tokio::test]
    async fn test_list_and_get_are_scoped() {
        let repo = Arc::new(MemoryWalletRepository::default());
        let owner = user();
        let card = add_card(&repo, owner, "bank").await;
        let output = make(&repo)
            .execute(
                owner,
                MakePaymentInput {
                    method: Some("scan".into()),
                    ..input(card.id, "Bus", 400)
                },
            )
            .await
            .unwrap();
        assert_eq!(output.payment.method, PaymentMethod::Scan);

        let listed = ListPaymentsUseCase::new(repo.clone()).execute(owner).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert!(ListPaymentsUseCase::new(repo.clone())
            .execute(user())
            .await
            .unwrap()
            .is_empty());

        let get = GetPaymentUseCase::new(repo.clone());
        assert_eq!(get.execute(owner, output.payment.id).await.unwrap(), output.payment);
        assert!(matches!(
            get.execute(user(), output.payment.id).await,
            Err(WalletError::PaymentNotFound)
        ));
    }
}

#[cfg(test)]
mod transaction_tests {
    use super::support::*;
    use crate::application::config::WalletConfig;
    use crate::application::transactions::*;
    use crate::domain::value_object::transaction_kind::TransactionKind;
    use crate::error::WalletError;
    use kernel::id::CardId;
    use std::sync::Arc;

    fn record(
        repo: &Arc<MemoryWalletRepository>,
    ) -> RecordTransactionUseCase<MemoryWalletRepository, MemoryWalletRepository> {
        RecordTransactionUseCase::new(repo.clone(), repo.clone(), Arc::new(WalletConfig::default()))
    }

    fn input(card_id: CardId, kind: &str, amount: i64) -> RecordTransactionInput {
        RecordTransactionInput {
            card_id: Some(card_id),
            description: Some("Entry".into()),
            amount: Some(amount),
            kind: Some(kind.into()),
            merchant: None,
            category: None,
        }
    }

    #[tokio::test]
    async fn test_sign_follows_type_and_balance_runs() {
        let repo = Arc::new(MemoryWalletRepository::default());
        let owner = user();
        let card = add_card(&repo, owner, "bank").await;
        let use_case = record(&repo);

        let salary = use_case.execute(owner, input(card.id, "credit", 50_000)).await.unwrap();
        assert_eq!(salary.kind, TransactionKind::Credit);
        assert_eq!(salary.amount, 50_000);
        assert_eq!(salary.balance, 50_000);

        // Sign of the submitted amount is ignored
        let rent = use_case.execute(owner, input(card.id, "debit", 30_000)).await.unwrap();
        assert_eq!(rent.amount, -30_000);
        assert_eq!(rent.balance, 20_000);

        let refund = use_case.execute(owner, input(card.id, "credit", -500)).await.unwrap();
        assert_eq!(refund.amount, 500);
        assert_eq!(refund.balance, 20_500);
    }

    #[tokio::test]
    async fn test_rejections() {
        let repo = Arc::new(MemoryWalletRepository::default());
        let owner = user();
        let card = add_card(&repo, owner, "bank").await;
        let use_case = record(&repo);

        let err = use_case.execute(owner, input(card.id, "credit", 0)).await.unwrap_err();
        assert!(matches!(err, WalletError::Validation(_)));

        let err = use_case.execute(owner, input(card.id, "refund", 5)).await.unwrap_err();
        assert!(matches!(err, WalletError::Validation(_)));

        let err = use_case
            .execute(
                owner,
                RecordTransactionInput {
                    description: None,
                    ..input(card.id, "debit", 5)
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, WalletError::MissingFields(_)));

        let other = add_card(&repo, user(), "bank").await;
        let err = use_case.execute(owner, input(other.id, "debit", 5)).await.unwrap_err();
        assert!(matches!(err, WalletError::CardNotFound));

        assert!(repo.transactions_for(&card.id).is_empty());
    }

    #[tokio::test]
    async fn test_balance_out_of_range_is_rejected() {
        let repo = Arc::new(MemoryWalletRepository::default());
        let owner = user();
        let card = add_card(&repo, owner, "bank").await;
        let use_case = record(&repo);

        let mut opening = use_case.execute(owner, input(card.id, "credit", 10)).await.unwrap();
        // Legacy line loaded straight into the ledger
        opening.id = kernel::id::Id::new();
        opening.amount = i64::MAX - 10;
        repo.transactions.lock().unwrap().push(opening);

        let err = use_case.execute(owner, input(card.id, "credit", 100)).await.unwrap_err();
        assert!(matches!(err, WalletError::BalanceOutOfRange));
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
        assert_eq!(repo.transactions_for(&card.id).len(), 2);
    }

    #[tokio::test]
    async fn test_card_pagination() {
        let repo = Arc::new(MemoryWalletRepository::default());
        let owner = user();
        let card = add_card(&repo, owner, "bank").await;
        for amount in 1..=25 {
            record(&repo)
                .execute(owner, input(card.id, "credit", amount))
                .await
                .unwrap();
        }

        let use_case = CardTransactionsUseCase::new(
            repo.clone(),
            repo.clone(),
            Arc::new(WalletConfig::default()),
        );

        let first = use_case.execute(owner, card.id, None, None).await.unwrap();
        assert_eq!(first.transactions.len(), 10);
        assert_eq!(first.pagination.current_page, 1);
        assert_eq!(first.pagination.total_pages, 3);
        assert_eq!(first.pagination.total_items, 25);
        assert!(first.pagination.has_next);
        assert!(!first.pagination.has_prev);

        let last = use_case.execute(owner, card.id, Some(3), Some(10)).await.unwrap();
        assert_eq!(last.transactions.len(), 5);
        assert!(!last.pagination.has_next);
        assert!(last.pagination.has_prev);

        let err = use_case.execute(user(), card.id, None, None).await.unwrap_err();
        assert!(matches!(err, WalletError::CardNotFound));
    }

    #[tokio::test]
    async fn test_user_listing_spans_own_cards_only() {
        let repo = Arc::new(MemoryWalletRepository::default());
        let owner = user();
        let first = add_card(&repo, owner, "bank").await;
        let second = add_card(&repo, owner, "transit").await;
        let stranger = user();
        let foreign = add_card(&repo, stranger, "bank").await;

        record(&repo).execute(owner, input(first.id, "credit", 10)).await.unwrap();
        record(&repo).execute(owner, input(second.id, "debit", 3)).await.unwrap();
        record(&repo).execute(stranger, input(foreign.id, "credit", 99)).await.unwrap();

        let mine = ListTransactionsUseCase::new(repo.clone()).execute(owner).await.unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|t| t.card_id != foreign.id));
    }
}

#[cfg(test)]
mod verification_tests {
    use super::support::*;
    use crate::application::config::WalletConfig;
    use crate::application::verification::*;
    use crate::domain::entity::card::Card;
    use crate::domain::entity::verification::MANUAL_REVIEW_NOTE;
    use crate::domain::repository::{CardRepository, VerificationRepository};
    use crate::domain::services::FixedVerifier;
    use crate::domain::value_object::{
        card_status::CardStatus, verification_result::VerificationResult,
    };
    use crate::error::WalletError;
    use chrono::{Duration, Utc};
    use kernel::id::{Id, UserId};
    use platform::notify::{Channel, RecordingDelivery};
    use std::sync::Arc;

    struct Fixture {
        repo: Arc<MemoryWalletRepository>,
        delivery: RecordingDelivery,
        config: Arc<WalletConfig>,
        owner: UserId,
        card: Card,
    }

    impl Fixture {
        async fn new() -> Self {
            let repo = Arc::new(MemoryWalletRepository::default());
            let owner = user();
            let card = add_card(&repo, owner, "bank").await;
            Self {
                repo,
                delivery: RecordingDelivery::new(),
                config: Arc::new(WalletConfig::development()),
                owner,
                card,
            }
        }

        async fn generate(&self) -> String {
            GenerateCodeUseCase::new(
                self.repo.clone(),
                self.repo.clone(),
                Arc::new(self.delivery.clone()),
                self.config.clone(),
            )
            .execute(self.owner, EMAIL, Some(self.card.id))
            .await
            .unwrap()
            .code
        }

        async fn submit(
            &self,
            code: &str,
            passes: bool,
        ) -> Result<SubmitVerificationOutput, WalletError> {
            self.submit_with(self.config.clone(), code, passes).await
        }

        async fn submit_with(
            &self,
            config: Arc<WalletConfig>,
            code: &str,
            passes: bool,
        ) -> Result<SubmitVerificationOutput, WalletError> {
            SubmitVerificationUseCase::new(
                self.repo.clone(),
                self.repo.clone(),
                Arc::new(FixedVerifier(passes)),
                config,
            )
            .execute(
                self.owner,
                SubmitVerificationInput {
                    card_id: self.card.id,
                    code: Some(code.to_string()),
                    video_url: Some("https://cdn.example.rw/v/1.mp4".into()),
                },
            )
            .await
        }

        fn reviewer(&self) -> ReviewVerificationUseCase<MemoryWalletRepository, MemoryWalletRepository> {
            ReviewVerificationUseCase::new(self.repo.clone(), self.repo.clone())
        }
    }

    fn review(record_id: kernel::id::VerificationId, approved: Option<bool>) -> ReviewInput {
        ReviewInput {
            verification_id: record_id,
            approved,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_generate_emails_code() {
        let fx = Fixture::new().await;
        let code = fx.generate().await;

        assert_eq!(code.len(), 6);
        let sent = fx.delivery.last().unwrap();
        assert_eq!(sent.channel, Channel::Email);
        assert_eq!(sent.to, EMAIL);
        assert_eq!(fx.delivery.last_code().as_deref(), Some(code.as_str()));
        assert!(sent.body.contains("10 minutes"));
    }

    #[tokio::test]
    async fn test_generate_for_foreign_card() {
        let fx = Fixture::new().await;
        let err = GenerateCodeUseCase::new(
            fx.repo.clone(),
            fx.repo.clone(),
            Arc::new(fx.delivery.clone()),
            Arc::new(WalletConfig::default()),
        )
        .execute(user(), EMAIL, Some(fx.card.id))
        .await
        .unwrap_err();
        assert!(matches!(err, WalletError::CardNotFound));
        assert!(fx.delivery.messages().is_empty());
    }

    #[tokio::test]
    async fn test_generate_delivery_failure() {
        let fx = Fixture::new().await;
        let err = GenerateCodeUseCase::new(
            fx.repo.clone(),
            fx.repo.clone(),
            Arc::new(RecordingDelivery::failing()),
            Arc::new(WalletConfig::default()),
        )
        .execute(fx.owner, EMAIL, Some(fx.card.id))
        .await
        .unwrap_err();
        assert!(matches!(err, WalletError::Delivery(_)));
    }

    #[tokio::test]
    async fn test_passing_check_verifies_card() {
        let fx = Fixture::new().await;
        let code = fx.generate().await;

        let output = fx.submit(&code, true).await.unwrap();
        assert!(output.passed);
        assert_eq!(output.status, CardStatus::Verified);
        assert_eq!(output.record.result, VerificationResult::Passed);

        let card = fx.repo.card(&fx.card.id).unwrap();
        assert_eq!(card.verified_status, CardStatus::Verified);
        assert!(card.verification_date.is_some());
    }

    #[tokio::test]
    async fn test_inconclusive_check_awaits_review() {
        let fx = Fixture::new().await;
        let code = fx.generate().await;

        let output = fx.submit(&code, false).await.unwrap();
        assert!(!output.passed);
        assert_eq!(output.status, CardStatus::Pending);
        assert_eq!(output.record.result, VerificationResult::PendingReview);
        assert_eq!(output.record.notes.as_deref(), Some(MANUAL_REVIEW_NOTE));
        assert_eq!(
            output.record.evidence_url.as_deref(),
            Some("https://cdn.example.rw/v/1.mp4")
        );
    }

    #[tokio::test]
    async fn test_code_single_use_and_checked() {
        let fx = Fixture::new().await;
        let code = fx.generate().await;

        assert!(matches!(
            fx.submit("000000", true).await,
            Err(WalletError::InvalidPossessionCode)
        ));
        fx.submit(&code, true).await.unwrap();
        assert!(matches!(
            fx.submit(&code, true).await,
            Err(WalletError::InvalidPossessionCode)
        ));
    }

    #[tokio::test]
    async fn test_code_digest_needs_secret() {
        let fx = Fixture::new().await;
        let code = fx.generate().await;

        let stored = fx.repo.codes.lock().unwrap()[0].code_hash.clone();
        let bare = platform::crypto::sha256(format!("{}:{code}", fx.card.id).as_bytes());
        assert_ne!(stored, bare.to_vec());

        // Same code under another secret does not match
        let other = Arc::new(WalletConfig::with_secret([9u8; 32]));
        assert!(matches!(
            fx.submit_with(other, &code, true).await,
            Err(WalletError::InvalidPossessionCode)
        ));
        assert!(fx.submit(&code, true).await.unwrap().passed);
    }

    #[tokio::test]
    async fn test_expired_code_rejected() {
        let fx = Fixture::new().await;
        let code = fx.generate().await;
        fx.repo.expire_codes(Utc::now() - Duration::seconds(1));

        assert!(matches!(
            fx.submit(&code, true).await,
            Err(WalletError::InvalidPossessionCode)
        ));
        assert_eq!(fx.repo.delete_expired_codes(Utc::now()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_review_flow() {
        let fx = Fixture::new().await;
        let code = fx.generate().await;
        let record = fx.submit(&code, false).await.unwrap().record;
        let reviewer = user();

        // Missing decision
        let err = fx.reviewer().execute(reviewer, review(record.id, None)).await.unwrap_err();
        assert!(matches!(err, WalletError::MissingFields(_)));

        // Owner cannot approve their own card
        let err = fx
            .reviewer()
            .execute(fx.owner, review(record.id, Some(true)))
            .await
            .unwrap_err();
        assert!(matches!(err, WalletError::SelfReview));

        let reviewed = fx
            .reviewer()
            .execute(
                reviewer,
                ReviewInput {
                    notes: Some("Card and code both legible".into()),
                    ..review(record.id, Some(true))
                },
            )
            .await
            .unwrap();
        assert_eq!(reviewed.result, VerificationResult::Passed);
        assert_eq!(reviewed.reviewer_id, Some(reviewer));
        assert_eq!(reviewed.notes.as_deref(), Some("Card and code both legible"));

        let card = fx.repo.card(&fx.card.id).unwrap();
        assert_eq!(card.verified_status, CardStatus::Verified);
        assert!(card.verification_date.is_some());

        let err = fx
            .reviewer()
            .execute(user(), review(record.id, Some(false)))
            .await
            .unwrap_err();
        assert!(matches!(err, WalletError::AlreadyReviewed));
    }

    #[tokio::test]
    async fn test_stale_card_edit_keeps_review_outcome() {
        let fx = Fixture::new().await;
        let code = fx.generate().await;
        let record = fx.submit(&code, false).await.unwrap().record;

        // Edit read before the reviewer acted
        let mut stale = fx.repo.card(&fx.card.id).unwrap();
        assert_eq!(stale.verified_status, CardStatus::Pending);

        fx.reviewer()
            .execute(user(), review(record.id, Some(true)))
            .await
            .unwrap();
        let reviewed = fx.repo.card(&fx.card.id).unwrap();

        stale.name = "Renamed".into();
        fx.repo.update_card(&stale).await.unwrap();

        let card = fx.repo.card(&fx.card.id).unwrap();
        assert_eq!(card.name, "Renamed");
        assert_eq!(card.verified_status, CardStatus::Verified);
        assert_eq!(card.verification_date, reviewed.verification_date);
        assert!(card.verification_date.is_some());
    }

    #[tokio::test]
    async fn test_rejection_fails_card() {
        let fx = Fixture::new().await;
        let code = fx.generate().await;
        let record = fx.submit(&code, false).await.unwrap().record;

        fx.reviewer()
            .execute(user(), review(record.id, Some(false)))
            .await
            .unwrap();
        assert_eq!(
            fx.repo.card(&fx.card.id).unwrap().verified_status,
            CardStatus::Failed
        );
    }

    #[tokio::test]
    async fn test_review_unknown_or_automated_record() {
        let fx = Fixture::new().await;
        let err = fx
            .reviewer()
            .execute(user(), review(Id::new(), Some(true)))
            .await
            .unwrap_err();
        assert!(matches!(err, WalletError::VerificationNotFound));

        let code = fx.generate().await;
        let passed = fx.submit(&code, true).await.unwrap().record;
        let err = fx
            .reviewer()
            .execute(user(), review(passed.id, Some(false)))
            .await
            .unwrap_err();
        assert!(matches!(err, WalletError::AlreadyReviewed));
    }

    #[tokio::test]
    async fn test_status_reports_latest_attempt() {
        let fx = Fixture::new().await;
        let status = VerificationStatusUseCase::new(fx.repo.clone(), fx.repo.clone());

        let before = status.execute(fx.owner, fx.card.id).await.unwrap();
        assert_eq!(before.card.verified_status, CardStatus::Pending);
        assert!(before.latest.is_none());

        let code = fx.generate().await;
        let record = fx.submit(&code, false).await.unwrap().record;
        let after = status.execute(fx.owner, fx.card.id).await.unwrap();
        assert_eq!(after.latest.map(|r| r.id), Some(record.id));

        assert!(matches!(
            status.execute(user(), fx.card.id).await,
            Err(WalletError::CardNotFound)
        ));
    }
}

#[cfg(test)]
mod router_tests {
    use super::support::*;
    use crate::application::config::WalletConfig;
    use crate::domain::services::FixedVerifier;
    use crate::presentation::router::wallet_router_generic;
    use auth::AuthConfig;
    use auth::application::access_token::{self, AccessClaims};
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request, StatusCode, header};
    use kernel::id::{Id, UserId};
    use platform::notify::RecordingDelivery;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tower::ServiceExt;

    const SECRET: [u8; 32] = [9u8; 32];

    fn app(delivery: &RecordingDelivery, passes: bool) -> Router {
        wallet_router_generic(
            MemoryWalletRepository::default(),
            delivery.clone(),
            FixedVerifier(passes),
            Arc::new(WalletConfig::default()),
            Arc::new(AuthConfig::with_secret(SECRET)),
        )
    }

    fn token_for(user_id: UserId) -> String {
        let now = chrono::Utc::now();
        let claims = AccessClaims {
            user_id: user_id.into_uuid(),
            email: EMAIL.to_string(),
            phone: "+250788123456".to_string(),
            issued_at: now.timestamp(),
            expires_at: (now + chrono::Duration::hours(1)).timestamp(),
        };
        access_token::issue(&SECRET, &claims)
    }

    async fn call(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn request(method: Method, uri: &str, token: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"));
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn create_card(app: &Router, token: &str, category: &str) -> Value {
        let (status, body) = call(
            app,
            request(
                Method::POST,
                "/cards",
                token,
                Some(json!({
                    "name": "Equity Visa",
                    "number": "4111 1111 1111 1234",
                    "categoryId": category,
                    "expiry": "09/28"
                })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body
    }

    #[tokio::test]
    async fn test_token_required() {
        let app = app(&RecordingDelivery::new(), true);

        let (status, body) = call(&app, Request::get("/cards").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Access token required");

        let (status, body) = call(&app, request(Method::GET, "/payments", "bogus", None)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "Invalid token");
    }

    #[tokio::test]
    async fn test_card_crud() {
        let app = app(&RecordingDelivery::new(), true);
        let token = token_for(Id::new());

        let created = create_card(&app, &token, "bank").await;
        assert_eq!(created["categoryId"], "bank");
        assert_eq!(created["verifiedStatus"], "pending");
        assert_eq!(created["cardHolder"], "");
        assert!(created["tokenId"].as_str().unwrap().starts_with("tok_"));
        let id = created["id"].as_str().unwrap().to_string();

        let (status, body) = call(&app, request(Method::GET, "/cards", &token, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["number"], "**** **** **** 1234");

        let (status, body) =
            call(&app, request(Method::GET, &format!("/cards/{id}"), &token, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["number"], "4111 1111 1111 1234");

        let (status, body) = call(
            &app,
            request(
                Method::PUT,
                &format!("/cards/{id}"),
                &token,
                Some(json!({ "cardHolder": "ALICE U" })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["cardHolder"], "ALICE U");
        assert_eq!(body["expiry"], "09/28");

        let other = token_for(Id::new());
        let (status, body) =
            call(&app, request(Method::GET, &format!("/cards/{id}"), &other, None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Card not found");

        let (status, body) =
            call(&app, request(Method::DELETE, &format!("/cards/{id}"), &token, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Card deleted successfully");

        let (status, _) =
            call(&app, request(Method::GET, "/cards/not-a-uuid", &token, None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_card_create_errors() {
        let app = app(&RecordingDelivery::new(), true);
        let token = token_for(Id::new());

        let (status, body) = call(
            &app,
            request(Method::POST, "/cards", &token, Some(json!({ "name": "x" }))),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Name, number, and categoryId are required");

        let (status, _) = call(
            &app,
            request(
                Method::POST,
                "/cards",
                &token,
                Some(json!({ "name": "x", "number": "1", "categoryId": "gift" })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_payment_and_ledger() {
        let app = app(&RecordingDelivery::new(), true);
        let token = token_for(Id::new());
        let card = create_card(&app, &token, "bank").await;
        let card_id = card["id"].as_str().unwrap();

        let (status, body) = call(
            &app,
            request(
                Method::POST,
                "/payments",
                &token,
                Some(json!({ "fromCardId": card_id, "to": "Simba Supermarket", "amount": 12000 })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["payment"]["status"], "completed");
        assert_eq!(body["payment"]["amount"], 12000);
        assert!(body["payment"]["completedAt"].is_string());
        assert_eq!(body["transaction"]["amount"], -12000);
        assert_eq!(body["transaction"]["description"], "Payment to Simba Supermarket");
        let payment_id = body["payment"]["id"].as_str().unwrap().to_string();

        let (status, body) = call(
            &app,
            request(Method::GET, &format!("/payments/{payment_id}"), &token, None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["to"], "Simba Supermarket");
        assert_eq!(body["currency"], "RWF");

        let (status, body) = call(
            &app,
            request(
                Method::POST,
                "/transactions",
                &token,
                Some(json!({
                    "cardId": card_id,
                    "description": "Salary",
                    "amount": 20000,
                    "type": "credit",
                    "category": "Income"
                })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["type"], "credit");
        assert_eq!(body["balance"], 8000);

        let (status, body) = call(
            &app,
            request(
                Method::GET,
                &format!("/transactions/card/{card_id}?page=abc&limit=1"),
                &token,
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["transactions"].as_array().unwrap().len(), 1);
        assert_eq!(body["pagination"]["currentPage"], 1);
        assert_eq!(body["pagination"]["totalPages"], 2);
        assert_eq!(body["pagination"]["totalTransactions"], 2);
        assert_eq!(body["pagination"]["hasNext"], true);

        let (status, body) = call(&app, request(Method::GET, "/transactions", &token, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_payment_from_identity_document() {
        let app = app(&RecordingDelivery::new(), true);
        let token = token_for(Id::new());
        let card = create_card(&app, &token, "ids").await;

        let (status, body) = call(
            &app,
            request(
                Method::POST,
                "/payments",
                &token,
                Some(json!({ "fromCardId": card["id"], "to": "Shop", "amount": 10 })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Bank card not found");
    }

    #[tokio::test]
    async fn test_scan_placeholder() {
        let app = app(&RecordingDelivery::new(), true);
        let token = token_for(Id::new());

        let (status, body) = call(
            &app,
            request(
                Method::POST,
                "/payments/scan",
                &token,
                Some(json!({ "scannedData": "merchant:42", "amount": 300 })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Scan-to-pay functionality coming soon");
        assert_eq!(body["scannedData"], "merchant:42");
        assert_eq!(body["amount"], 300);
    }

    #[tokio::test]
    async fn test_verification_flow() {
        let delivery = RecordingDelivery::new();
        let app = app(&delivery, false);
        let owner = token_for(Id::new());
        let card = create_card(&app, &owner, "bank").await;
        let card_id = card["id"].as_str().unwrap();

        let (status, body) = call(
            &app,
            request(
                Method::POST,
                "/verification/generate-code",
                &owner,
                Some(json!({ "cardId": card_id })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert!(body["instructions"].as_str().unwrap().contains("selfie video"));
        let code = body["code"].as_str().unwrap().to_string();
        assert_eq!(delivery.last_code(), Some(code.clone()));

        let (status, body) = call(
            &app,
            request(
                Method::POST,
                &format!("/verification/verify/{card_id}"),
                &owner,
                Some(json!({ "code": "111111", "videoUrl": "v.mp4" })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid or expired verification code");

        let (status, body) = call(
            &app,
            request(
                Method::POST,
                &format!("/verification/verify/{card_id}"),
                &owner,
                Some(json!({ "code": code, "videoUrl": "v.mp4" })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], false);
        assert_eq!(body["status"], "pending");
        assert_eq!(body["message"], "Verification submitted for review");

        let (status, body) = call(
            &app,
            request(Method::GET, &format!("/verification/status/{card_id}"), &owner, None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["verifiedStatus"], "pending");
        assert_eq!(body["latestVerification"]["result"], "pending_review");
        let verification_id = body["latestVerification"]["id"].as_str().unwrap().to_string();

        let review_uri = format!("/verification/review/{verification_id}");
        let (status, body) = call(
            &app,
            request(Method::POST, &review_uri, &owner, Some(json!({ "approved": true }))),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "You cannot review your own card");

        let reviewer = token_for(Id::new());
        let (status, body) = call(
            &app,
            request(Method::POST, &review_uri, &reviewer, Some(json!({ "notes": "ok" }))),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "approved is required");

        let (status, body) = call(
            &app,
            request(Method::POST, &review_uri, &reviewer, Some(json!({ "approved": true }))),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Verification reviewed successfully");

        let (status, body) = call(
            &app,
            request(Method::POST, &review_uri, &reviewer, Some(json!({ "approved": false }))),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "Verification has already been reviewed");

        let (_, body) = call(
            &app,
            request(Method::GET, &format!("/verification/status/{card_id}"), &owner, None),
        )
        .await;
        assert_eq!(body["verifiedStatus"], "verified");
        assert!(body["verificationDate"].is_string());
    }
}
