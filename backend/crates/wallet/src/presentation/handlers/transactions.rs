//! Transaction handlers (`/api/transactions`)

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
    CardTransactionsUseCase, ListTransactionsUseCase, RecordTransactionInput,
    RecordTransactionUseCase,
};
use crate::domain::services::PossessionVerifier;
use crate::error::{WalletError, WalletResult};
use crate::presentation::dto::{
    CardTransactionsResponse, PageQuery, TransactionRequest, TransactionResponse, parse_body,
    query_number,
};

/// GET /api/transactions/card/{cardId}
pub async fn for_card<R, D, P>(
    State(state): State<WalletAppState<R, D, P>>,
    user: AuthUser,
    Path(card_id): Path<String>,
    Query(query): Query<PageQuery>,
) -> WalletResult<Json<CardTransactionsResponse>>
where
    R: WalletStore,
    D: OtpDelivery + Send + Sync + 'static,
    P: PossessionVerifier + Send + Sync + 'static,
{
    let card_id: CardId = parse_id(&card_id, WalletError::CardNotFound)?;

    let use_case = CardTransactionsUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
    );
    let output = use_case
        .execute(
            user.user_id,
            card_id,
            query_number(query.page.as_deref()),
            query_number(query.limit.as_deref()),
        )
        .await?;

    Ok(Json(CardTransactionsResponse {
        transactions: output
            .transactions
            .iter()
            .map(TransactionResponse::from)
            .collect(),
        pagination: output.pagination.into(),
    }))
}

/// GET /api/transactions
pub async fn list<R, D, P>(
    State(state): State<WalletAppState<R, D, P>>,
    user: AuthUser,
) -> WalletResult<Json<Vec<TransactionResponse>>>
where
    R: WalletStore,
    D: OtpDelivery + Send + Sync + 'static,
    P: PossessionVerifier + Send + Sync + 'static,
{
    let transactions = ListTransactionsUseCase::new(state.repo.clone())
        .execute(user.user_id)
        .await?;

    Ok(Json(
        transactions.iter().map(TransactionResponse::from).collect(),
    ))
}

/// POST /api/transactions
pub async fn record<R, D, P>(
    State(state): State<WalletAppState<R, D, P>>,
    user: AuthUser,
    body: Bytes,
) -> WalletResult<impl IntoResponse>
where
    R: WalletStore,
    D: OtpDelivery + Send + Sync + 'static,
    P: PossessionVerifier + Send + Sync + 'static,
{
    let req: TransactionRequest = parse_body(&body)?;
    let card_id = req
        .card_id
        .as_deref()
        .map(|id| parse_id::<CardId>(id, WalletError::CardNotFound))
        .transpose()?;

    let use_case = RecordTransactionUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
    );
    let transaction = use_case
        .execute(
            user.user_id,
            RecordTransactionInput {
                card_id,
                description: req.description,
                amount: req.amount,
                kind: req.kind,
                merchant: req.merchant,
                category: req.category,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(TransactionResponse::from(&transaction)),
    ))
}
