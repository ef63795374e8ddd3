//! Possession Verification Use Cases
//!
//! Flow:
//! 1. `generate-code`: a six-digit code is emailed to the card owner
//! 2. `verify`: the owner submits the code and a selfie video showing the
//!    card next to it; the verifier passes it or sends it to review
//! 3. `review`: another user approves or rejects a pending attempt

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::{CardId, UserId, VerificationId};
use platform::notify::{OtpDelivery, otp_message};

use crate::application::config::WalletConfig;
use crate::domain::entity::card::Card;
use crate::domain::entity::verification::{PossessionCode, VerificationRecord};
use crate::domain::repository::{CardRepository, VerificationRepository};
use crate::domain::services::PossessionVerifier;
use crate::domain::value_object::card_status::CardStatus;
use crate::error::{WalletError, WalletResult};

pub const EMAIL_SUBJECT: &str = "Your OTP Code for Verification";
pub const INSTRUCTIONS: &str = "Hold your physical card and this code on paper next to it; take a short selfie video while showing both.";

// ============================================================================
// Generate Code
// ============================================================================

#[derive(Debug)]
pub struct GenerateCodeOutput {
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

pub struct GenerateCodeUseCase<C, V, D>
where
    C: CardRepository,
    V: VerificationRepository,
    D: OtpDelivery,
{
    card_repo: Arc<C>,
    verification_repo: Arc<V>,
    delivery: Arc<D>,
    config: Arc<WalletConfig>,
}

impl<C, V, D> GenerateCodeUseCase<C, V, D>
where
    C: CardRepository,
    V: VerificationRepository,
    D: OtpDelivery,
{
    pub fn new(
        card_repo: Arc<C>,
        verification_repo: Arc<V>,
        delivery: Arc<D>,
        config: Arc<WalletConfig>,
    ) -> Self {
        Self {
            card_repo,
            verification_repo,
            delivery,
            config,
        }
    }

    pub async fn execute(
        &self,
        user_id: UserId,
        email: &str,
        card_id: Option<CardId>,
    ) -> WalletResult<GenerateCodeOutput> {
        let card_id = card_id.ok_or(WalletError::CardNotFound)?;
        let card = self
            .card_repo
            .find_card_for_user(&card_id, &user_id)
            .await?
            .ok_or(WalletError::CardNotFound)?;

        let now = Utc::now();
        let (record, code) = PossessionCode::issue(
            &self.config.code_secret,
            card.id,
            self.config.possession_code_ttl_chrono(),
            now,
        );
        self.verification_repo.create_code(&record).await?;

        let body = otp_message(&code, self.config.possession_code_ttl_minutes());
        self.delivery
            .send_email(email, EMAIL_SUBJECT, &body)
            .await?;

        tracing::info!(
            user_id = %user_id,
            card_id = %card.id,
            expires_at = %record.expires_at,
            "Possession code issued"
        );

        Ok(GenerateCodeOutput {
            code,
            expires_at: record.expires_at,
        })
    }
}

// ============================================================================
// Submit Evidence
// ============================================================================

pub struct SubmitVerificationInput {
    pub card_id: CardId,
    pub code: Option<String>,
    pub video_url: Option<String>,
}

#[derive(Debug)]
pub struct SubmitVerificationOutput {
    pub passed: bool,
    pub status: CardStatus,
    pub record: VerificationRecord,
}

pub struct SubmitVerificationUseCase<C, V, P>
where
    C: CardRepository,
    V: VerificationRepository,
    P: PossessionVerifier,
{
    card_repo: Arc<C>,
    verification_repo: Arc<V>,
    verifier: Arc<P>,
    config: Arc<WalletConfig>,
}

impl<C, V, P> SubmitVerificationUseCase<C, V, P>
where
    C: CardRepository,
    V: VerificationRepository,
    P: PossessionVerifier,
{
    pub fn new(
        card_repo: Arc<C>,
        verification_repo: Arc<V>,
        verifier: Arc<P>,
        config: Arc<WalletConfig>,
    ) -> Self {
        Self {
            card_repo,
            verification_repo,
            verifier,
            config,
        }
    }

    pub async fn execute(
        &self,
        user_id: UserId,
        input: SubmitVerificationInput,
    ) -> WalletResult<SubmitVerificationOutput> {
        let mut card = self
            .card_repo
            .find_card_for_user(&input.card_id, &user_id)
            .await?
            .ok_or(WalletError::CardNotFound)?;

        let code = input
            .code
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or(WalletError::InvalidPossessionCode)?;

        let now = Utc::now();
        let code_hash = PossessionCode::digest(&self.config.code_secret, &card.id, &code);
        self.verification_repo
            .consume_code(&card.id, &code_hash, now)
            .await?
            .ok_or(WalletError::InvalidPossessionCode)?;

        let video_url = input.video_url.filter(|u| !u.trim().is_empty());
        let passed = self.verifier.verify(&card, video_url.as_deref()).await;

        let record = VerificationRecord::automated(card.id, passed, video_url, now);
        if passed {
            card.mark_verified(now);
        } else {
            card.mark_pending(now);
        }
        self.verification_repo.save_attempt(&record, &card).await?;

        tracing::info!(
            user_id = %user_id,
            card_id = %card.id,
            verification_id = %record.id,
            result = %record.result,
            "Possession evidence submitted"
        );

        Ok(SubmitVerificationOutput {
            passed,
            status: card.verified_status,
            record,
        })
    }
}

// ============================================================================
// Status
// ============================================================================

#[derive(Debug)]
pub struct VerificationStatusOutput {
    pub card: Card,
    pub latest: Option<VerificationRecord>,
}

pub struct VerificationStatusUseCase<C, V>
where
    C: CardRepository,
    V: VerificationRepository,
{
    card_repo: Arc<C>,
    verification_repo: Arc<V>,
}

impl<C, V> VerificationStatusUseCase<C, V>
where
    C: CardRepository,
    V: VerificationRepository,
{
    pub fn new(card_repo: Arc<C>, verification_repo: Arc<V>) -> Self {
        Self {
            card_repo,
            verification_repo,
        }
    }

    pub async fn execute(
        &self,
        user_id: UserId,
        card_id: CardId,
    ) -> WalletResult<VerificationStatusOutput> {
        let card = self
            .card_repo
            .find_card_for_user(&card_id, &user_id)
            .await?
            .ok_or(WalletError::CardNotFound)?;
        let latest = self.verification_repo.latest_for_card(&card.id).await?;
        Ok(VerificationStatusOutput { card, latest })
    }
}

// ============================================================================
// Review
// ============================================================================

pub struct ReviewInput {
    pub verification_id: VerificationId,
    pub approved: Option<bool>,
    pub notes: Option<String>,
}

pub struct ReviewVerificationUseCase<C, V>
where
    C: CardRepository,
    V: VerificationRepository,
{
    card_repo: Arc<C>,
    verification_repo: Arc<V>,
}

impl<C, V> ReviewVerificationUseCase<C, V>
where
    C: CardRepository,
    V: VerificationRepository,
{
    pub fn new(card_repo: Arc<C>, verification_repo: Arc<V>) -> Self {
        Self {
            card_repo,
            verification_repo,
        }
    }

    pub async fn execute(
        &self,
        reviewer_id: UserId,
        input: ReviewInput,
    ) -> WalletResult<VerificationRecord> {
        let approved = input
            .approved
            .ok_or(WalletError::MissingFields("approved is required"))?;

        let mut record = self
            .verification_repo
            .find_record(&input.verification_id)
            .await?
            .ok_or(WalletError::VerificationNotFound)?;
        // Cards cascade to their records, so a dangling record is treated as gone
        let mut card = self
            .card_repo
            .find_card(&record.card_id)
            .await?
            .ok_or(WalletError::VerificationNotFound)?;

        if card.is_owned_by(&reviewer_id) {
            return Err(WalletError::SelfReview);
        }
        if !record.awaits_review() {
            return Err(WalletError::AlreadyReviewed);
        }

        let now = Utc::now();
        let notes = input.notes.filter(|n| !n.trim().is_empty());
        record.review(reviewer_id, approved, notes);
        if approved {
            card.mark_verified(now);
        } else {
            card.mark_failed(now);
        }

        if !self.verification_repo.save_review(&record, &card).await? {
            return Err(WalletError::AlreadyReviewed);
        }

        tracing::info!(
            reviewer_id = %reviewer_id,
            verification_id = %record.id,
            card_id = %card.id,
            approved,
            "Verification reviewed"
        );
        Ok(record)
    }
}
