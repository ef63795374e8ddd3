//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::pagination::Pagination;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::domain::entity::{
    card::Card, payment::Payment, transaction::Transaction, verification::VerificationRecord,
};
use crate::domain::value_object::{
    card_category::CardCategory,
    card_status::CardStatus,
    payment_status::{PaymentMethod, PaymentStatus},
    transaction_kind::{TransactionKind, TransactionStatus},
    verification_result::{VerificationMethod, VerificationResult},
};
use crate::error::{WalletError, WalletResult};

/// Parse a JSON object body; empty, `null` and `{}` are reported as empty
pub fn parse_body<T: DeserializeOwned>(body: &[u8]) -> WalletResult<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(WalletError::EmptyBody);
    }

    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|_| WalletError::MalformedBody)?;
    match &value {
        serde_json::Value::Null => return Err(WalletError::EmptyBody),
        serde_json::Value::Object(map) if map.is_empty() => return Err(WalletError::EmptyBody),
        serde_json::Value::Object(_) => {}
        _ => return Err(WalletError::MalformedBody),
    }

    serde_json::from_value(value).map_err(|_| WalletError::MalformedBody)
}

/// Lenient numeric query value: anything unparsable counts as absent
pub fn query_number(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|v| v.trim().parse().ok())
}

// ============================================================================
// Cards
// ============================================================================

/// Body of `POST /cards` and `PUT /cards/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub expiry: Option<String>,
    #[serde(default)]
    pub card_holder: Option<String>,
    #[serde(default)]
    pub issuer: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CardListQuery {
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardResponse {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub number: String,
    pub expiry: String,
    pub category_id: CardCategory,
    pub card_holder: String,
    pub issuer: String,
    pub image_url: Option<String>,
    pub verified_status: CardStatus,
    pub verification_date: Option<DateTime<Utc>>,
    pub token_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CardResponse {
    /// Listing view: bank card numbers masked
    pub fn masked(card: &Card) -> Self {
        Self {
            number: card.masked_number(),
            ..Self::from(card)
        }
    }
}

impl From<&Card> for CardResponse {
    fn from(card: &Card) -> Self {
        Self {
            id: card.id.to_string(),
            user_id: card.user_id.to_string(),
            name: card.name.clone(),
            number: card.number.clone(),
            expiry: card.expiry.clone(),
            category_id: card.category,
            card_holder: card.card_holder.clone(),
            issuer: card.issuer.clone(),
            image_url: card.image_url.clone(),
            verified_status: card.verified_status,
            verification_date: card.verification_date,
            token_id: card.token_id.clone(),
            created_at: card.created_at,
            updated_at: card.updated_at,
        }
    }
}

// ============================================================================
// Payments
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    #[serde(default)]
    pub from_card_id: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default)]
    pub method: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub id: String,
    pub from_card_id: String,
    pub to: String,
    pub amount: i64,
    pub currency: String,
    pub status: PaymentStatus,
    pub method: PaymentMethod,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub transaction_id: Option<String>,
}

impl From<&Payment> for PaymentResponse {
    fn from(payment: &Payment) -> Self {
        Self {
            id: payment.id.to_string(),
            from_card_id: payment.from_card_id.to_string(),
            to: payment.to.clone(),
            amount: payment.amount.value(),
            currency: payment.currency.clone(),
            status: payment.status,
            method: payment.method,
            created_at: payment.created_at,
            completed_at: payment.completed_at,
            transaction_id: payment.transaction_id.map(|id| id.to_string()),
        }
    }
}

/// Payment part of the settlement receipt
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSummary {
    pub id: String,
    pub amount: i64,
    pub to: String,
    pub status: PaymentStatus,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Transaction part of the settlement receipt
#[derive(Debug, Clone, Serialize)]
pub struct TransactionSummary {
    pub id: String,
    pub amount: i64,
    pub description: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MakePaymentResponse {
    pub success: bool,
    pub payment: PaymentSummary,
    pub transaction: TransactionSummary,
}

impl MakePaymentResponse {
    pub fn new(payment: &Payment, transaction: &Transaction) -> Self {
        Self {
            success: true,
            payment: PaymentSummary {
                id: payment.id.to_string(),
                amount: payment.amount.value(),
                to: payment.to.clone(),
                status: payment.status,
                completed_at: payment.completed_at,
            },
            transaction: TransactionSummary {
                id: transaction.id.to_string(),
                amount: transaction.amount,
                description: transaction.description.clone(),
                date: transaction.date,
            },
        }
    }
}

/// Body of `POST /payments/scan`; echoed back as-is
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest {
    #[serde(default)]
    pub scanned_data: Option<serde_json::Value>,
    #[serde(default)]
    pub amount: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResponse {
    pub message: String,
    pub scanned_data: Option<serde_json::Value>,
    pub amount: Option<serde_json::Value>,
}

// ============================================================================
// Transactions
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    #[serde(default)]
    pub card_id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub merchant: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// `?page=&limit=`, kept as text so junk falls back to defaults
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub id: String,
    pub card_id: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: i64,
    pub description: String,
    pub merchant: Option<String>,
    pub category: Option<String>,
    pub date: DateTime<Utc>,
    pub balance: i64,
    pub currency: String,
    pub status: TransactionStatus,
    pub payment_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Transaction> for TransactionResponse {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: tx.id.to_string(),
            card_id: tx.card_id.to_string(),
            kind: tx.kind,
            amount: tx.amount,
            description: tx.description.clone(),
            merchant: tx.merchant.clone(),
            category: tx.category.clone(),
            date: tx.date,
            balance: tx.balance,
            currency: tx.currency.clone(),
            status: tx.status,
            payment_id: tx.payment_id.map(|id| id.to_string()),
            created_at: tx.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_transactions: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl From<Pagination> for TransactionPagination {
    fn from(p: Pagination) -> Self {
        Self {
            current_page: p.current_page,
            total_pages: p.total_pages,
            total_transactions: p.total_items,
            has_next: p.has_next,
            has_prev: p.has_prev,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CardTransactionsResponse {
    pub transactions: Vec<TransactionResponse>,
    pub pagination: TransactionPagination,
}

// ============================================================================
// Verification
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateCodeRequest {
    #[serde(default)]
    pub card_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateCodeResponse {
    pub success: bool,
    pub code: String,
    pub instructions: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitVerificationRequest {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitVerificationResponse {
    pub success: bool,
    pub status: CardStatus,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationRecordResponse {
    pub id: String,
    pub card_id: String,
    pub method: VerificationMethod,
    pub result: VerificationResult,
    pub timestamp: DateTime<Utc>,
    pub reviewer_id: Option<String>,
    pub evidence_url: Option<String>,
    pub notes: Option<String>,
}

impl From<&VerificationRecord> for VerificationRecordResponse {
    fn from(record: &VerificationRecord) -> Self {
        Self {
            id: record.id.to_string(),
            card_id: record.card_id.to_string(),
            method: record.method,
            result: record.result,
            timestamp: record.timestamp,
            reviewer_id: record.reviewer_id.map(|id| id.to_string()),
            evidence_url: record.evidence_url.clone(),
            notes: record.notes.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationStatusResponse {
    pub verified_status: CardStatus,
    pub verification_date: Option<DateTime<Utc>>,
    pub latest_verification: Option<VerificationRecordResponse>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewRequest {
    #[serde(default)]
    pub approved: Option<bool>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
    pub message: String,
}

impl SuccessResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// `{ "message": ... }`
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
