//! Payment handlers (`/api/payments`)

use auth::AuthUser;
use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use kernel::id::{CardId, PaymentId};
use platform::notify::OtpDelivery;

use super::{WalletAppState, WalletStore, parse_id};
use crate::application::{
    GetPaymentUseCase, ListPaymentsUseCase, MakePaymentInput, MakePaymentUseCase,
};
use crate::domain::services::PossessionVerifier;
use crate::error::{WalletError, WalletResult};
use crate::presentation::dto::{
    MakePaymentResponse, PaymentRequest, PaymentResponse, ScanRequest, ScanResponse, parse_body,
};

/// POST /api/payments
pub async fn make<R, D, P>(
    State(state): State<WalletAppState<R, D, P>>,
    user: AuthUser,
    body: Bytes,
) -> WalletResult<Json<MakePaymentResponse>>
where
    R: WalletStore,
    D: OtpDelivery + Send + Sync + 'static,
    P: PossessionVerifier + Send + Sync + 'static,
{
    let req: PaymentRequest = parse_body(&body)?;
    let from_card_id = req
        .from_card_id
        .as_deref()
        .map(|id| parse_id::<CardId>(id, WalletError::BankCardNotFound))
        .transpose()?;

    let use_case = MakePaymentUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
    );
    let output = use_case
        .execute(
            user.user_id,
            MakePaymentInput {
                from_card_id,
                to: req.to,
                amount: req.amount,
                method: req.method,
            },
        )
        .await?;

    Ok(Json(MakePaymentResponse::new(
        &output.payment,
        &output.transaction,
    )))
}

/// GET /api/payments
pub async fn list<R, D, P>(
    State(state): State<WalletAppState<R, D, P>>,
    user: AuthUser,
) -> WalletResult<Json<Vec<PaymentResponse>>>
where
    R: WalletStore,
    D: OtpDelivery + Send + Sync + 'static,
    P: PossessionVerifier + Send + Sync + 'static,
{
    let payments = ListPaymentsUseCase::new(state.repo.clone())
        .execute(user.user_id)
        .await?;

    Ok(Json(payments.iter().map(PaymentResponse::from).collect()))
}

/// GET /api/payments/{id}
pub async fn get<R, D, P>(
    State(state): State<WalletAppState<R, D, P>>,
    user: AuthUser,
    Path(id): Path<String>,
) -> WalletResult<Json<PaymentResponse>>
where
    R: WalletStore,
    D: OtpDelivery + Send + Sync + 'static,
    P: PossessionVerifier + Send + Sync + 'static,
{
    let payment_id: PaymentId = parse_id(&id, WalletError::PaymentNotFound)?;
    let payment = GetPaymentUseCase::new(state.repo.clone())
        .execute(user.user_id, payment_id)
        .await?;

    Ok(Json(PaymentResponse::from(&payment)))
}

/// POST /api/payments/scan
///
/// Placeholder until QR payloads are defined; echoes the input.
pub async fn scan(_user: AuthUser, body: Bytes) -> WalletResult<Json<ScanResponse>> {
    let req: ScanRequest = match parse_body(&body) {
        Err(WalletError::EmptyBody) => ScanRequest::default(),
        other => other?,
    };

    Ok(Json(ScanResponse {
        message: "Scan-to-pay functionality coming soon".to_string(),
        scanned_data: req.scanned_data,
        amount: req.amount,
    }))
}
