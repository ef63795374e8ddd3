//! Possession verification handlers (`/api/verification`)

use auth::AuthUser;
use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use kernel::id::{CardId, VerificationId};
use platform::notify::OtpDelivery;

use super::{WalletAppState, WalletStore, parse_id};
use crate::application::verification::INSTRUCTIONS;
use crate::application::{
    GenerateCodeUseCase, ReviewInput, ReviewVerificationUseCase, SubmitVerificationInput,
    SubmitVerificationUseCase, VerificationStatusUseCase,
};
use crate::domain::services::PossessionVerifier;
use crate::error::{WalletError, WalletResult};
use crate::presentation::dto::{
    GenerateCodeRequest, GenerateCodeResponse, ReviewRequest, SubmitVerificationRequest,
    SubmitVerificationResponse, SuccessResponse, VerificationRecordResponse,
    VerificationStatusResponse, parse_body,
};

/// POST /api/verification/generate-code
pub async fn generate_code<R, D, P>(
    State(state): State<WalletAppState<R, D, P>>,
    user: AuthUser,
    body: Bytes,
) -> WalletResult<Json<GenerateCodeResponse>>
where
    R: WalletStore,
    D: OtpDelivery + Send + Sync + 'static,
    P: PossessionVerifier + Send + Sync + 'static,
{
    let req: GenerateCodeRequest = match parse_body(&body) {
        Err(WalletError::EmptyBody) => GenerateCodeRequest::default(),
        other => other?,
    };
    let card_id = req
        .card_id
        .as_deref()
        .map(|id| parse_id::<CardId>(id, WalletError::CardNotFound))
        .transpose()?;

    let use_case = GenerateCodeUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.delivery.clone(),
        state.config.clone(),
    );
    let output = use_case
        .execute(user.user_id, &user.email, card_id)
        .await?;

    Ok(Json(GenerateCodeResponse {
        success: true,
        code: output.code,
        instructions: INSTRUCTIONS.to_string(),
        expires_at: output.expires_at,
    }))
}

/// POST /api/verification/verify/{cardId}
pub async fn submit<R, D, P>(
    State(state): State<WalletAppState<R, D, P>>,
    user: AuthUser,
    Path(card_id): Path<String>,
    body: Bytes,
) -> WalletResult<Json<SubmitVerificationResponse>>
where
    R: WalletStore,
    D: OtpDelivery + Send + Sync + 'static,
    P: PossessionVerifier + Send + Sync + 'static,
{
    let card_id: CardId = parse_id(&card_id, WalletError::CardNotFound)?;
    let req: SubmitVerificationRequest = match parse_body(&body) {
        Err(WalletError::EmptyBody) => SubmitVerificationRequest::default(),
        other => other?,
    };

    let use_case = SubmitVerificationUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.verifier.clone(),
        state.config.clone(),
    );
    let output = use_case
        .execute(
            user.user_id,
            SubmitVerificationInput {
                card_id,
                code: req.code,
                video_url: req.video_url,
            },
        )
        .await?;

    let message = if output.passed {
        "Card verified successfully"
    } else {
        "Verification submitted for review"
    };

    Ok(Json(SubmitVerificationResponse {
        success: output.passed,
        status: output.status,
        message: message.to_string(),
    }))
}

/// GET /api/verification/status/{cardId}
pub async fn status<R, D, P>(
    State(state): State<WalletAppState<R, D, P>>,
    user: AuthUser,
    Path(card_id): Path<String>,
) -> WalletResult<Json<VerificationStatusResponse>>
where
    R: WalletStore,
    D: OtpDelivery + Send + Sync + 'static,
    P: PossessionVerifier + Send + Sync + 'static,
{
    let card_id: CardId = parse_id(&card_id, WalletError::CardNotFound)?;
    let output = VerificationStatusUseCase::new(state.repo.clone(), state.repo.clone())
        .execute(user.user_id, card_id)
        .await?;

    Ok(Json(VerificationStatusResponse {
        verified_status: output.card.verified_status,
        verification_date: output.card.verification_date,
        latest_verification: output.latest.as_ref().map(VerificationRecordResponse::from),
    }))
}

/// POST /api/verification/review/{verificationId}
pub async fn review<R, D, P>(
    State(state): State<WalletAppState<R, D, P>>,
    user: AuthUser,
    Path(verification_id): Path<String>,
    body: Bytes,
) -> WalletResult<Json<SuccessResponse>>
where
    R: WalletStore,
    D: OtpDelivery + Send + Sync + 'static,
    P: PossessionVerifier + Send + Sync + 'static,
{
    let verification_id: VerificationId =
        parse_id(&verification_id, WalletError::VerificationNotFound)?;
    let req: ReviewRequest = match parse_body(&body) {
        Err(WalletError::EmptyBody) => ReviewRequest::default(),
        other => other?,
    };

    ReviewVerificationUseCase::new(state.repo.clone(), state.repo.clone())
        .execute(
            user.user_id,
            ReviewInput {
                verification_id,
                approved: req.approved,
                notes: req.notes,
            },
        )
        .await?;

    Ok(Json(SuccessResponse::new("Verification reviewed successfully")))
}
