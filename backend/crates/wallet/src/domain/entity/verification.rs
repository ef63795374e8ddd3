//! Possession Verification Entities
//!
//! - `PossessionCode`: short-lived code the user shows next to the card
//! - `VerificationRecord`: outcome of one attempt, automated or reviewed

use chrono::{DateTime, Duration, Utc};
use kernel::id::{CardId, Id, PossessionCodeId, UserId, VerificationId};

use crate::domain::value_object::verification_result::{VerificationMethod, VerificationResult};

/// Digits in a possession code
pub const POSSESSION_CODE_DIGITS: u32 = 6;

pub const AUTOMATED_PASS_NOTE: &str = "Automated verification passed";
pub const MANUAL_REVIEW_NOTE: &str = "Requires manual review";

#[derive(Debug, Clone, PartialEq)]
pub struct PossessionCode {
    pub id: PossessionCodeId,
    pub card_id: CardId,
    pub code_hash: Vec<u8>,
    pub expires_at: DateTime<Utc>,
    pub used: bool,
    pub created_at: DateTime<Utc>,
}

impl PossessionCode {
    /// Issue a code for `card_id`; returns the entity and the clear code
    pub fn issue(
        key: &[u8],
        card_id: CardId,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> (Self, String) {
        let code = platform::crypto::random_numeric_code(POSSESSION_CODE_DIGITS);
        let record = Self {
            id: Id::new(),
            card_id,
            code_hash: Self::digest(key, &card_id, &code).to_vec(),
            expires_at: now + ttl,
            used: false,
            created_at: now,
        };
        (record, code)
    }

    /// Keyed digest stored in place of the code, scoped to the card
    pub fn digest(key: &[u8], card_id: &CardId, code: &str) -> [u8; 32] {
        platform::crypto::hmac_sha256(key, format!("{card_id}:{}", code.trim()).as_bytes())
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn accepts(&self, code_hash: &[u8], now: DateTime<Utc>) -> bool {
        !self.used
            && !self.is_expired(now)
            && platform::crypto::constant_time_eq(&self.code_hash, code_hash)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VerificationRecord {
    pub id: VerificationId,
    pub card_id: CardId,
    pub method: VerificationMethod,
    pub result: VerificationResult,
    pub timestamp: DateTime<Utc>,
    pub reviewer_id: Option<UserId>,
    pub evidence_url: Option<String>,
    pub notes: Option<String>,
}

impl VerificationRecord {
    /// Record of an automated selfie-video check
    pub fn automated(
        card_id: CardId,
        passed: bool,
        evidence_url: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        let (result, notes) = if passed {
            (VerificationResult::Passed, AUTOMATED_PASS_NOTE)
        } else {
            (VerificationResult::PendingReview, MANUAL_REVIEW_NOTE)
        };
        Self {
            id: Id::new(),
            card_id,
            method: VerificationMethod::SelfieVideo,
            result,
            timestamp: now,
            reviewer_id: None,
            evidence_url,
            notes: Some(notes.to_string()),
        }
    }

    pub fn awaits_review(&self) -> bool {
        self.result == VerificationResult::PendingReview
    }

    /// Human decision on a pending record
    pub fn review(&mut self, reviewer_id: UserId, approved: bool, notes: Option<String>) {
        self.result = if approved {
            VerificationResult::Passed
        } else {
            VerificationResult::Failed
        };
        self.reviewer_id = Some(reviewer_id);
        if notes.is_some() {
            self.notes = notes;
        }
    }
}
