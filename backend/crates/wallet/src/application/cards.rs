//! Card Use Cases
//!
//! CRUD over the caller's cards and identity documents. Every lookup is
//! scoped to the owner; someone else's card is indistinguishable from a
//! missing one.

use std::sync::Arc;

use chrono::Utc;
use kernel::id::{CardId, UserId};

use crate::domain::entity::card::{Card, CardChanges, NewCard};
use crate::domain::repository::CardRepository;
use crate::domain::value_object::card_category::CardCategory;
use crate::error::{WalletError, WalletResult};

/// Raw card fields as received
#[derive(Debug, Clone, Default)]
pub struct CardInput {
    pub name: Option<String>,
    pub number: Option<String>,
    pub category_id: Option<String>,
    pub expiry: Option<String>,
    pub card_holder: Option<String>,
    pub issuer: Option<String>,
    pub image_url: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_category(raw: Option<String>) -> WalletResult<Option<CardCategory>> {
    match non_blank(raw) {
        Some(code) => Ok(Some(code.parse::<CardCategory>()?)),
        None => Ok(None),
    }
}

// ============================================================================
// List / Get
// ============================================================================

pub struct ListCardsUseCase<C: CardRepository> {
    repo: Arc<C>,
}

impl<C: CardRepository> ListCardsUseCase<C> {
    pub fn new(repo: Arc<C>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        user_id: UserId,
        category: Option<String>,
    ) -> WalletResult<Vec<Card>> {
        let category = parse_category(category)?;
        self.repo.list_cards(&user_id, category).await
    }
}

pub struct GetCardUseCase<C: CardRepository> {
    repo: Arc<C>,
}

impl<C: CardRepository> GetCardUseCase<C> {
    pub fn new(repo: Arc<C>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, user_id: UserId, card_id: CardId) -> WalletResult<Card> {
        self.repo
            .find_card_for_user(&card_id, &user_id)
            .await?
            .ok_or(WalletError::CardNotFound)
    }
}

// ============================================================================
// Create
// ============================================================================

pub struct CreateCardUseCase<C: CardRepository> {
    repo: Arc<C>,
}

impl<C: CardRepository> CreateCardUseCase<C> {
    pub fn new(repo: Arc<C>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, user_id: UserId, input: CardInput) -> WalletResult<Card> {
        let name = non_blank(input.name);
        let number = non_blank(input.number);
        let category = non_blank(input.category_id);
        let (Some(name), Some(number), Some(category)) = (name, number, category) else {
            return Err(WalletError::MissingCardFields);
        };
        let category: CardCategory = category.parse()?;

        let card = Card::new(
            user_id,
            NewCard {
                name,
                number,
                category,
                expiry: input.expiry,
                card_holder: input.card_holder,
                issuer: input.issuer,
                image_url: non_blank(input.image_url),
            },
            Utc::now(),
        );
        self.repo.create_card(&card).await?;

        tracing::info!(
            user_id = %user_id,
            card_id = %card.id,
            category = %card.category,
            "Card added"
        );
        Ok(card)
    }
}

// ============================================================================
// Update
// ============================================================================

pub struct UpdateCardUseCase<C: CardRepository> {
    repo: Arc<C>,
}

impl<C: CardRepository> UpdateCardUseCase<C> {
    pub fn new(repo: Arc<C>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        user_id: UserId,
        card_id: CardId,
        input: CardInput,
    ) -> WalletResult<Card> {
        let mut card = self
            .repo
            .find_card_for_user(&card_id, &user_id)
            .await?
            .ok_or(WalletError::CardNotFound)?;

        let changes = CardChanges {
            name: non_blank(input.name),
            number: non_blank(input.number),
            category: parse_category(input.category_id)?,
            expiry: input.expiry,
            card_holder: input.card_holder,
            issuer: input.issuer,
            image_url: non_blank(input.image_url),
        };
        if changes.is_empty() {
            return Ok(card);
        }

        card.apply(changes, Utc::now());
        self.repo.update_card(&card).await?;

        tracing::info!(user_id = %user_id, card_id = %card.id, "Card updated");
        Ok(card)
    }
}

// ============================================================================
// Delete
// ============================================================================

pub struct DeleteCardUseCase<C: CardRepository> {
    repo: Arc<C>,
}

impl<C: CardRepository> DeleteCardUseCase<C> {
    pub fn new(repo: Arc<C>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, user_id: UserId, card_id: CardId) -> WalletResult<()> {
        if !self.repo.delete_card(&card_id, &user_id).await? {
            return Err(WalletError::CardNotFound);
        }
        tracing::info!(user_id = %user_id, card_id = %card_id, "Card deleted");
        Ok(())
    }
}
