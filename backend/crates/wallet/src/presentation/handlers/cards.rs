//! Card handlers (`/api/cards`)

use auth::AuthUser;
use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use kernel::id::CardId;
use platform::notify::OtpDelivery;

use super::{WalletAppState, WalletStore, parse_id};
use crate::application::{
    CardInput, CreateCardUseCase, DeleteCardUseCase, GetCardUseCase, ListCardsUseCase,
    UpdateCardUseCase,
};
use crate::domain::services::PossessionVerifier;
use crate::error::{WalletError, WalletResult};
use crate::presentation::dto::{
    CardListQuery, CardRequest, CardResponse, MessageResponse, parse_body,
};

impl From<CardRequest> for CardInput {
    fn from(req: CardRequest) -> Self {
        Self {
            name: req.name,
            number: req.number,
            category_id: req.category_id,
            expiry: req.expiry,
            card_holder: req.card_holder,
            issuer: req.issuer,
            image_url: req.image_url,
        }
    }
}

/// GET /api/cards
pub async fn list<R, D, P>(
    State(state): State<WalletAppState<R, D, P>>,
    user: AuthUser,
    Query(query): Query<CardListQuery>,
) -> WalletResult<Json<Vec<CardResponse>>>
where
    R: WalletStore,
    D: OtpDelivery + Send + Sync + 'static,
    P: PossessionVerifier + Send + Sync + 'static,
{
    let cards = ListCardsUseCase::new(state.repo.clone())
        .execute(user.user_id, query.category)
        .await?;

    Ok(Json(cards.iter().map(CardResponse::masked).collect()))
}

/// GET /api/cards/{id}
pub async fn get<R, D, P>(
    State(state): State<WalletAppState<R, D, P>>,
    user: AuthUser,
    Path(id): Path<String>,
) -> WalletResult<Json<CardResponse>>
where
    R: WalletStore,
    D: OtpDelivery + Send + Sync + 'static,
    P: PossessionVerifier + Send + Sync + 'static,
{
    let card_id: CardId = parse_id(&id, WalletError::CardNotFound)?;
    let card = GetCardUseCase::new(state.repo.clone())
        .execute(user.user_id, card_id)
        .await?;

    Ok(Json(CardResponse::from(&card)))
}

/// POST /api/cards
pub async fn create<R, D, P>(
    State(state): State<WalletAppState<R, D, P>>,
    user: AuthUser,
    body: Bytes,
) -> WalletResult<impl IntoResponse>
where
    R: WalletStore,
    D: OtpDelivery + Send + Sync + 'static,
    P: PossessionVerifier + Send + Sync + 'static,
{
    let req: CardRequest = match parse_body(&body) {
        Err(WalletError::EmptyBody) => return Err(WalletError::MissingCardFields),
        other => other?,
    };

    let card = CreateCardUseCase::new(state.repo.clone())
        .execute(user.user_id, req.into())
        .await?;

    Ok((StatusCode::CREATED, Json(CardResponse::from(&card))))
}

/// PUT /api/cards/{id}
pub async fn update<R, D, P>(
    State(state): State<WalletAppState<R, D, P>>,
    user: AuthUser,
    Path(id): Path<String>,
    body: Bytes,
) -> WalletResult<Json<CardResponse>>
where
    R: WalletStore,
    D: OtpDelivery + Send + Sync + 'static,
    P: PossessionVerifier + Send + Sync + 'static,
{
    let card_id: CardId = parse_id(&id, WalletError::CardNotFound)?;
    // Nothing to change is not an error
    let req: CardRequest = match parse_body(&body) {
        Err(WalletError::EmptyBody) => CardRequest::default(),
        other => other?,
    };

    let card = UpdateCardUseCase::new(state.repo.clone())
        .execute(user.user_id, card_id, req.into())
        .await?;

    Ok(Json(CardResponse::from(&card)))
}

/// DELETE /api/cards/{id}
pub async fn delete<R, D, P>(
    State(state): State<WalletAppState<R, D, P>>,
    user: AuthUser,
    Path(id): Path<String>,
) -> WalletResult<Json<MessageResponse>>
where
    R: WalletStore,
    D: OtpDelivery + Send + Sync + 'static,
    P: PossessionVerifier + Send + Sync + 'static,
{
    let card_id: CardId = parse_id(&id, WalletError::CardNotFound)?;
    DeleteCardUseCase::new(state.repo.clone())
        .execute(user.user_id, card_id)
        .await?;

    Ok(Json(MessageResponse::new("Card deleted successfully")))
}
