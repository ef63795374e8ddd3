//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{CardId, PaymentId, PossessionCodeId, TransactionId, UserId, VerificationId};
use kernel::pagination::PageRequest;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::domain::entity::{
    card::Card,
    payment::Payment,
    transaction::Transaction,
    verification::{PossessionCode, VerificationRecord},
};
use crate::domain::repository::{
    CardRepository, PaymentRepository, TransactionRepository, VerificationRepository,
};
use crate::domain::value_object::{
    Amount, CardCategory, CardStatus, PaymentMethod, PaymentStatus, TransactionKind,
    TransactionStatus, VerificationMethod, VerificationResult,
};
use crate::error::{WalletError, WalletResult};

/// PostgreSQL-backed wallet repository
#[derive(Clone)]
pub struct PgWalletRepository {
    pool: PgPool,
}

impl PgWalletRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Clean up expired possession codes
    pub async fn cleanup_expired(&self) -> WalletResult<u64> {
        let deleted = self.delete_expired_codes(Utc::now()).await?;
        tracing::info!(codes_deleted = deleted, "Cleaned up expired possession codes");
        Ok(deleted)
    }
}

const CARD_COLUMNS: &str = r#"
    card_id,
    user_id,
    name,
    number,
    expiry,
    category,
    card_holder,
    issuer,
    image_url,
    verified_status,
    verification_date,
    token_id,
    created_at,
    updated_at
"#;

const TRANSACTION_COLUMNS: &str = r#"
    t.transaction_id,
    t.card_id,
    t.kind,
    t.amount,
    t.description,
    t.merchant,
    t.category,
    t.date,
    t.balance,
    t.currency,
    t.status,
    t.payment_id,
    t.created_at
"#;

const VERIFICATION_COLUMNS: &str = r#"
    verification_id,
    card_id,
    method,
    result,
    timestamp,
    reviewer_id,
    evidence_url,
    notes
"#;

/// Lock the card row so ledger appends on one card run one at a time
async fn lock_card(conn: &mut PgConnection, card_id: &CardId) -> WalletResult<()> {
    sqlx::query_scalar::<_, Uuid>("SELECT card_id FROM cards WHERE card_id = $1 FOR UPDATE")
        .bind(card_id.as_uuid())
        .fetch_optional(&mut *conn)
        .await?
        .ok_or(WalletError::CardNotFound)?;
    Ok(())
}

/// Insert a ledger line with its running balance. Caller holds the card lock.
async fn insert_transaction(
    conn: &mut PgConnection,
    mut transaction: Transaction,
) -> WalletResult<Transaction> {
    // NULL when the stored total no longer fits a BIGINT
    let previous: Option<i64> = sqlx::query_scalar(
        r#"
        SELECT CASE
            WHEN total BETWEEN -9223372036854775808 AND 9223372036854775807
            THEN total::BIGINT
        END
        FROM (
            SELECT COALESCE(SUM(amount), 0) AS total
            FROM transactions
            WHERE card_id = $1 AND status = 'completed'
        ) AS ledger
        "#,
    )
    .bind(transaction.card_id.as_uuid())
    .fetch_one(&mut *conn)
    .await?;
    let previous = previous.ok_or(WalletError::BalanceOutOfRange)?;
    if !transaction.apply_running_balance(previous) {
        return Err(WalletError::BalanceOutOfRange);
    }

    sqlx::query(
        r#"
        INSERT INTO transactions (
            transaction_id,
            card_id,
            kind,
            amount,
            description,
            merchant,
            category,
            date,
            balance,
            currency,
            status,
            payment_id,
            created_at
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        "#,
    )
    .bind(transaction.id.as_uuid())
    .bind(transaction.card_id.as_uuid())
    .bind(transaction.kind.code())
    .bind(transaction.amount)
    .bind(&transaction.description)
    .bind(&transaction.merchant)
    .bind(&transaction.category)
    .bind(transaction.date)
    .bind(transaction.balance)
    .bind(&transaction.currency)
    .bind(transaction.status.code())
    .bind(transaction.payment_id.map(|id| id.into_uuid()))
    .bind(transaction.created_at)
    .execute(&mut *conn)
    .await?;

    Ok(transaction)
}

/// Write a card's verification fields
async fn store_card_status(conn: &mut PgConnection, card: &Card) -> WalletResult<()> {
    sqlx::query(
        r#"
        UPDATE cards SET
            verified_status = $2,
            verification_date = $3,
            updated_at = $4
        WHERE card_id = $1
        "#,
    )
    .bind(card.id.as_uuid())
    .bind(card.verified_status.code())
    .bind(card.verification_date)
    .bind(card.updated_at)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

// ============================================================================
// Card Repository Implementation
// ============================================================================

impl CardRepository for PgWalletRepository {
    async fn create_card(&self, card: &Card) -> WalletResult<()> {
        sqlx::query(
            r#"
            INSERT INTO cards (
                card_id,
                user_id,
                name,
                number,
                expiry,
                category,
                card_holder,
                issuer,
                image_url,
                verified_status,
                verification_date,
                token_id,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(card.id.as_uuid())
        .bind(card.user_id.as_uuid())
        .bind(&card.name)
        .bind(&card.number)
        .bind(&card.expiry)
        .bind(card.category.code())
        .bind(&card.card_holder)
        .bind(&card.issuer)
        .bind(&card.image_url)
        .bind(card.verified_status.code())
        .bind(card.verification_date)
        .bind(&card.token_id)
        .bind(card.created_at)
        .bind(card.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_card(&self, card_id: &CardId) -> WalletResult<Option<Card>> {
        let sql = format!("SELECT {CARD_COLUMNS} FROM cards WHERE card_id = $1");
        let row = sqlx::query_as::<_, CardRow>(&sql)
            .bind(card_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_card()).transpose()
    }

    async fn find_card_for_user(
        &self,
        card_id: &CardId,
        user_id: &UserId,
    ) -> WalletResult<Option<Card>> {
        let sql = format!("SELECT {CARD_COLUMNS} FROM cards WHERE card_id = $1 AND user_id = $2");
        let row = sqlx::query_as::<_, CardRow>(&sql)
            .bind(card_id.as_uuid())
            .bind(user_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_card()).transpose()
    }

    async fn list_cards(
        &self,
        user_id: &UserId,
        category: Option<CardCategory>,
    ) -> WalletResult<Vec<Card>> {
        let sql = format!(
            r#"
            SELECT {CARD_COLUMNS}
            FROM cards
            WHERE user_id = $1
              AND ($2::TEXT IS NULL OR category = $2)
            ORDER BY created_at DESC
            "#
        );
        let rows = sqlx::query_as::<_, CardRow>(&sql)
            .bind(user_id.as_uuid())
            .bind(category.map(|c| c.code()))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(|r| r.into_card()).collect()
    }

    async fn update_card(&self, card: &Card) -> WalletResult<()> {
        sqlx::query(
            r#"
            UPDATE cards SET
                name = $2,
                number = $3,
                expiry = $4,
                category = $5,
                card_holder = $6,
                issuer = $7,
                image_url = $8,
                token_id = $9,
                updated_at = $10
            WHERE card_id = $1
            "#,
        )
        .bind(card.id.as_uuid())
        .bind(&card.name)
        .bind(&card.number)
        .bind(&card.expiry)
        .bind(card.category.code())
        .bind(&card.card_holder)
        .bind(&card.issuer)
        .bind(&card.image_url)
        .bind(&card.token_id)
        .bind(card.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_card(&self, card_id: &CardId, user_id: &UserId) -> WalletResult<bool> {
        let deleted = sqlx::query("DELETE FROM cards WHERE card_id = $1 AND user_id = $2")
            .bind(card_id.as_uuid())
            .bind(user_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Payment Repository Implementation
// ============================================================================

impl PaymentRepository for PgWalletRepository {
    async fn save_settled_payment(
        &self,
        payment: &Payment,
        debit: Transaction,
    ) -> WalletResult<Transaction> {
        let mut tx = self.pool.begin().await?;
        lock_card(&mut *tx, &payment.from_card_id).await?;

        sqlx::query(
            r#"
            INSERT INTO payments (
                payment_id,
                from_card_id,
                recipient,
                amount,
                currency,
                status,
                method,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, 'pending', $6, $7)
            "#,
        )
        .bind(payment.id.as_uuid())
        .bind(payment.from_card_id.as_uuid())
        .bind(&payment.to)
        .bind(payment.amount.value())
        .bind(&payment.currency)
        .bind(payment.method.code())
        .bind(payment.created_at)
        .execute(&mut *tx)
        .await?;

        let debit = insert_transaction(&mut *tx, debit).await?;

        sqlx::query(
            r#"
            UPDATE payments SET
                status = $2,
                completed_at = $3,
                transaction_id = $4
            WHERE payment_id = $1
            "#,
        )
        .bind(payment.id.as_uuid())
        .bind(payment.status.code())
        .bind(payment.completed_at)
        .bind(debit.id.as_uuid())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(debit)
    }

    async fn list_payments(&self, user_id: &UserId) -> WalletResult<Vec<Payment>> {
        let rows = sqlx::query_as::<_, PaymentRow>(
            r#"
            SELECT
                p.payment_id,
                p.from_card_id,
                p.recipient,
                p.amount,
                p.currency,
                p.status,
                p.method,
                p.created_at,
                p.completed_at,
                p.transaction_id
            FROM payments p
            JOIN cards c ON c.card_id = p.from_card_id
            WHERE c.user_id = $1
            ORDER BY p.created_at DESC
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_payment()).collect()
    }

    async fn find_payment_for_user(
        &self,
        payment_id: &PaymentId,
        user_id: &UserId,
    ) -> WalletResult<Option<Payment>> {
        let row = sqlx::query_as::<_, PaymentRow>(
            r#"
            SELECT
                p.payment_id,
                p.from_card_id,
                p.recipient,
                p.amount,
                p.currency,
                p.status,
                p.method,
                p.created_at,
                p.completed_at,
                p.transaction_id
            FROM payments p
            JOIN cards c ON c.card_id = p.from_card_id
            WHERE p.payment_id = $1 AND c.user_id = $2
            "#,
        )
        .bind(payment_id.as_uuid())
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_payment()).transpose()
    }
}

// ============================================================================
// Transaction Repository Implementation
// ============================================================================

impl TransactionRepository for PgWalletRepository {
    async fn append_transaction(&self, transaction: Transaction) -> WalletResult<Transaction> {
        let mut tx = self.pool.begin().await?;
        lock_card(&mut *tx, &transaction.card_id).await?;
        let transaction = insert_transaction(&mut *tx, transaction).await?;
        tx.commit().await?;
        Ok(transaction)
    }

    async fn list_card_transactions(
        &self,
        card_id: &CardId,
        page: PageRequest,
    ) -> WalletResult<(Vec<Transaction>, u64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions WHERE card_id = $1")
            .bind(card_id.as_uuid())
            .fetch_one(&self.pool)
            .await?;

        let sql = format!(
            r#"
            SELECT {TRANSACTION_COLUMNS}
            FROM transactions t
            WHERE t.card_id = $1
            ORDER BY t.date DESC, t.created_at DESC
            LIMIT $2 OFFSET $3
            "#
        );
        let rows = sqlx::query_as::<_, TransactionRow>(&sql)
            .bind(card_id.as_uuid())
            .bind(i64::from(page.limit()))
            .bind(i64::try_from(page.offset()).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await?;

        let transactions = rows
            .into_iter()
            .map(|r| r.into_transaction())
            .collect::<WalletResult<Vec<_>>>()?;
        Ok((transactions, u64::try_from(total).unwrap_or(0)))
    }

    async fn list_user_transactions(&self, user_id: &UserId) -> WalletResult<Vec<Transaction>> {
        let sql = format!(
            r#"
            SELECT {TRANSACTION_COLUMNS}
            FROM transactions t
            JOIN cards c ON c.card_id = t.card_id
            WHERE c.user_id = $1
            ORDER BY t.date DESC, t.created_at DESC
            "#
        );
        let rows = sqlx::query_as::<_, TransactionRow>(&sql)
            .bind(user_id.as_uuid())
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(|r| r.into_transaction()).collect()
    }
}

// ============================================================================
// Verification Repository Implementation
// ============================================================================

impl VerificationRepository for PgWalletRepository {
    async fn create_code(&self, code: &PossessionCode) -> WalletResult<()> {
        sqlx::query(
            r#"
            INSERT INTO possession_codes (
                possession_code_id,
                card_id,
                code_hash,
                expires_at,
                used,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(code.id.as_uuid())
        .bind(code.card_id.as_uuid())
        .bind(&code.code_hash)
        .bind(code.expires_at)
        .bind(code.used)
        .bind(code.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn consume_code(
        &self,
        card_id: &CardId,
        code_hash: &[u8],
        now: DateTime<Utc>,
    ) -> WalletResult<Option<PossessionCode>> {
        let row = sqlx::query_as::<_, PossessionCodeRow>(
            r#"
            UPDATE possession_codes
            SET used = TRUE, used_at = $3
            WHERE possession_code_id = (
                SELECT possession_code_id
                FROM possession_codes
                WHERE card_id = $1
                  AND code_hash = $2
                  AND used = FALSE
                  AND expires_at > $3
                ORDER BY created_at DESC
                LIMIT 1
                FOR UPDATE
            )
            AND used = FALSE
            RETURNING
                possession_code_id,
                card_id,
                code_hash,
                expires_at,
                used,
                created_at
            "#,
        )
        .bind(card_id.as_uuid())
        .bind(code_hash)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PossessionCodeRow::into_code))
    }

    async fn delete_expired_codes(&self, now: DateTime<Utc>) -> WalletResult<u64> {
        let deleted = sqlx::query("DELETE FROM possession_codes WHERE expires_at < $1")
            .bind(now)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }

    async fn save_attempt(&self, record: &VerificationRecord, card: &Card) -> WalletResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO verification_records (
                verification_id,
                card_id,
                method,
                result,
                timestamp,
                reviewer_id,
                evidence_url,
                notes
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(record.card_id.as_uuid())
        .bind(record.method.code())
        .bind(record.result.code())
        .bind(record.timestamp)
        .bind(record.reviewer_id.map(|id| id.into_uuid()))
        .bind(&record.evidence_url)
        .bind(&record.notes)
        .execute(&mut *tx)
        .await?;

        store_card_status(&mut *tx, card).await?;

        tx.commit().await?;
        Ok(())
    }

    async fn find_record(
        &self,
        verification_id: &VerificationId,
    ) -> WalletResult<Option<VerificationRecord>> {
        let sql =
            format!("SELECT {VERIFICATION_COLUMNS} FROM verification_records WHERE verification_id = $1");
        let row = sqlx::query_as::<_, VerificationRow>(&sql)
            .bind(verification_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_record()).transpose()
    }

    async fn latest_for_card(&self, card_id: &CardId) -> WalletResult<Option<VerificationRecord>> {
        let sql = format!(
            r#"
            SELECT {VERIFICATION_COLUMNS}
            FROM verification_records
            WHERE card_id = $1
            ORDER BY timestamp DESC
            LIMIT 1
            "#
        );
        let row = sqlx::query_as::<_, VerificationRow>(&sql)
            .bind(card_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_record()).transpose()
    }

    async fn save_review(&self, record: &VerificationRecord, card: &Card) -> WalletResult<bool> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE verification_records SET
                result = $2,
                reviewer_id = $3,
                notes = $4
            WHERE verification_id = $1
              AND result = 'pending_review'
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(record.result.code())
        .bind(record.reviewer_id.map(|id| id.into_uuid()))
        .bind(&record.notes)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if updated == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        store_card_status(&mut *tx, card).await?;

        tx.commit().await?;
        Ok(true)
    }
}

// ============================================================================
// Row Types
// ============================================================================

fn corrupt(column: &str, err: impl std::fmt::Display) -> WalletError {
    WalletError::Internal(format!("Invalid {column}: {err}"))
}

#[derive(sqlx::FromRow)]
struct CardRow {
    card_id: Uuid,
    user_id: Uuid,
    name: String,
    number: String,
    expiry: String,
    category: String,
    card_holder: String,
    issuer: String,
    image_url: Option<String>,
    verified_status: String,
    verification_date: Option<DateTime<Utc>>,
    token_id: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CardRow {
    fn into_card(self) -> WalletResult<Card> {
        Ok(Card {
            id: CardId::from_uuid(self.card_id),
            user_id: UserId::from_uuid(self.user_id),
            name: self.name,
            number: self.number,
            expiry: self.expiry,
            category: self
                .category
                .parse::<CardCategory>()
                .map_err(|e| corrupt("category", e.message()))?,
            card_holder: self.card_holder,
            issuer: self.issuer,
            image_url: self.image_url,
            verified_status: self
                .verified_status
                .parse::<CardStatus>()
                .map_err(|e| corrupt("verified_status", e))?,
            verification_date: self.verification_date,
            token_id: self.token_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct PaymentRow {
    payment_id: Uuid,
    from_card_id: Uuid,
    recipient: String,
    amount: i64,
    currency: String,
    status: String,
    method: String,
    created_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    transaction_id: Option<Uuid>,
}

impl PaymentRow {
    fn into_payment(self) -> WalletResult<Payment> {
        Ok(Payment {
            id: PaymentId::from_uuid(self.payment_id),
            from_card_id: CardId::from_uuid(self.from_card_id),
            to: self.recipient,
            amount: Amount::new(self.amount).map_err(|e| corrupt("amount", e.message()))?,
            currency: self.currency,
            status: self
                .status
                .parse::<PaymentStatus>()
                .map_err(|e| corrupt("status", e))?,
            method: self
                .method
                .parse::<PaymentMethod>()
                .map_err(|e| corrupt("method", e.message()))?,
            created_at: self.created_at,
            completed_at: self.completed_at,
            transaction_id: self.transaction_id.map(TransactionId::from_uuid),
        })
    }
}

#[derive(sqlx::FromRow)]
struct TransactionRow {
    transaction_id: Uuid,
    card_id: Uuid,
    kind: String,
    amount: i64,
    description: String,
    merchant: Option<String>,
    category: Option<String>,
    date: DateTime<Utc>,
    balance: i64,
    currency: String,
    status: String,
    payment_id: Option<Uuid>,
    created_at: DateTime<Utc>,
}

impl TransactionRow {
    fn into_transaction(self) -> WalletResult<Transaction> {
        Ok(Transaction {
            id: TransactionId::from_uuid(self.transaction_id),
            card_id: CardId::from_uuid(self.card_id),
            kind: self
                .kind
                .parse::<TransactionKind>()
                .map_err(|e| corrupt("kind", e.message()))?,
            amount: self.amount,
            description: self.description,
            merchant: self.merchant,
            category: self.category,
            date: self.date,
            balance: self.balance,
            currency: self.currency,
            status: self
                .status
                .parse::<TransactionStatus>()
                .map_err(|e| corrupt("status", e))?,
            payment_id: self.payment_id.map(PaymentId::from_uuid),
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct PossessionCodeRow {
    possession_code_id: Uuid,
    card_id: Uuid,
    code_hash: Vec<u8>,
    expires_at: DateTime<Utc>,
    used: bool,
    created_at: DateTime<Utc>,
}

impl PossessionCodeRow {
    fn into_code(self) -> PossessionCode {
        PossessionCode {
            id: PossessionCodeId::from_uuid(self.possession_code_id),
            card_id: CardId::from_uuid(self.card_id),
            code_hash: self.code_hash,
            expires_at: self.expires_at,
            used: self.used,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct VerificationRow {
    verification_id: Uuid,
    card_id: Uuid,
    method: String,
    result: String,
    timestamp: DateTime<Utc>,
    reviewer_id: Option<Uuid>,
    evidence_url: Option<String>,
    notes: Option<String>,
}

impl VerificationRow {
    fn into_record(self) -> WalletResult<VerificationRecord> {
        Ok(VerificationRecord {
            id: VerificationId::from_uuid(self.verification_id),
            card_id: CardId::from_uuid(self.card_id),
            method: self
                .method
                .parse::<VerificationMethod>()
                .map_err(|e| corrupt("method", e))?,
            result: self
                .result
                .parse::<VerificationResult>()
                .map_err(|e| corrupt("result", e))?,
            timestamp: self.timestamp,
            reviewer_id: self.reviewer_id.map(UserId::from_uuid),
            evidence_url: self.evidence_url,
            notes: self.notes,
        })
    }
}
