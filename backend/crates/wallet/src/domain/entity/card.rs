//! Card Entity
//!
//! A payment card or identity document stored in the user's wallet.

use chrono::{DateTime, Utc};
use kernel::id::{CardId, Id, UserId};

use crate::domain::value_object::{card_category::CardCategory, card_status::CardStatus};

/// Length of the random part of a bank card token
const TOKEN_LEN: usize = 24;

#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub id: CardId,
    pub user_id: UserId,
    pub name: String,
    pub number: String,
    pub expiry: String,
    pub category: CardCategory,
    pub card_holder: String,
    pub issuer: String,
    pub image_url: Option<String>,
    pub verified_status: CardStatus,
    pub verification_date: Option<DateTime<Utc>>,
    /// Opaque stand-in for a network token; bank cards only
    pub token_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted on creation
#[derive(Debug, Clone)]
pub struct NewCard {
    pub name: String,
    pub number: String,
    pub category: CardCategory,
    pub expiry: Option<String>,
    pub card_holder: Option<String>,
    pub issuer: Option<String>,
    pub image_url: Option<String>,
}

/// Partial update; `None` leaves the field alone
#[derive(Debug, Clone, Default)]
pub struct CardChanges {
    pub name: Option<String>,
    pub number: Option<String>,
    pub category: Option<CardCategory>,
    pub expiry: Option<String>,
    pub card_holder: Option<String>,
    pub issuer: Option<String>,
    pub image_url: Option<String>,
}

impl CardChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.number.is_none()
            && self.category.is_none()
            && self.expiry.is_none()
            && self.card_holder.is_none()
            && self.issuer.is_none()
            && self.image_url.is_none()
    }
}

impl Card {
    pub fn new(user_id: UserId, fields: NewCard, now: DateTime<Utc>) -> Self {
        let token_id = fields.category.is_bank().then(new_token_id);
        Self {
            id: Id::new(),
            user_id,
            name: fields.name,
            number: fields.number,
            expiry: fields.expiry.unwrap_or_default(),
            category: fields.category,
            card_holder: fields.card_holder.unwrap_or_default(),
            issuer: fields.issuer.unwrap_or_default(),
            image_url: fields.image_url,
            verified_status: CardStatus::Pending,
            verification_date: None,
            token_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        self.user_id == *user_id
    }

    /// Apply a partial update.
    ///
    /// A card that becomes a bank card gets a token if it has none.
    pub fn apply(&mut self, changes: CardChanges, now: DateTime<Utc>) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(number) = changes.number {
            self.number = number;
        }
        if let Some(category) = changes.category {
            self.category = category;
        }
        if let Some(expiry) = changes.expiry {
            self.expiry = expiry;
        }
        if let Some(card_holder) = changes.card_holder {
            self.card_holder = card_holder;
        }
        if let Some(issuer) = changes.issuer {
            self.issuer = issuer;
        }
        if let Some(image_url) = changes.image_url {
            self.image_url = Some(image_url);
        }
        if self.category.is_bank() && self.token_id.is_none() {
            self.token_id = Some(new_token_id());
        }
        self.updated_at = now;
    }

    /// Number as shown in listings: bank cards keep the last four digits
    pub fn masked_number(&self) -> String {
        if !self.category.is_bank() {
            return self.number.clone();
        }
        let digits: Vec<char> = self.number.chars().filter(char::is_ascii_alphanumeric).collect();
        let last4: String = digits[digits.len().saturating_sub(4)..].iter().collect();
        format!("**** **** **** {last4}")
    }

    pub fn mark_verified(&mut self, now: DateTime<Utc>) {
        self.verified_status = CardStatus::Verified;
        self.verification_date = Some(now);
        self.updated_at = now;
    }

    pub fn mark_failed(&mut self, now: DateTime<Utc>) {
        self.verified_status = CardStatus::Failed;
        self.updated_at = now;
    }

    /// Back to pending while a review is outstanding
    pub fn mark_pending(&mut self, now: DateTime<Utc>) {
        self.verified_status = CardStatus::Pending;
        self.updated_at = now;
    }
}

fn new_token_id() -> String {
    format!("tok_{}", platform::crypto::random_token(TOKEN_LEN))
}
