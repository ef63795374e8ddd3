//! HTTP Handlers

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use std::sync::Arc;

use platform::bearer::extract_bearer_token;
use platform::notify::OtpDelivery;

use crate::application::config::AuthConfig;
use crate::application::{
    CurrentUserUseCase, LogInInput, LogInUseCase, SignOutUseCase, SignUpInput, SignUpUseCase,
    VerifyOtpInput, VerifyOtpUseCase,
};
use crate::domain::repository::{LoginOtpRepository, UserRepository};
use crate::domain::value_object::otp_code::OtpPurpose;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    LogInRequest, MessageResponse, SignUpRequest, SignUpResponse, UserResponse, VerifyOtpRequest,
    VerifyOtpResponse, parse_body,
};
use crate::presentation::middleware::AuthUser;

/// Shared state for auth handlers
pub struct AuthAppState<R, D>
where
    R: UserRepository + LoginOtpRepository + Send + Sync + 'static,
    D: OtpDelivery + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub delivery: Arc<D>,
    pub config: Arc<AuthConfig>,
}

// derive(Clone) would demand `R: Clone` and `D: Clone`
impl<R, D> Clone for AuthAppState<R, D>
where
    R: UserRepository + LoginOtpRepository + Send + Sync + 'static,
    D: OtpDelivery + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            delivery: self.delivery.clone(),
            config: self.config.clone(),
        }
    }
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /api/auth/signup
pub async fn sign_up<R, D>(
    State(state): State<AuthAppState<R, D>>,
    body: Bytes,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + LoginOtpRepository + Send + Sync + 'static,
    D: OtpDelivery + Send + Sync + 'static,
{
    let req: SignUpRequest = parse_body(&body)?;

    let use_case = SignUpUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.delivery.clone(),
        state.config.clone(),
    );

    let input = SignUpInput {
        email: req.email.unwrap_or_default(),
        password: req.password.unwrap_or_default(),
        phone: req.phone.unwrap_or_default(),
    };

    let output = use_case.execute(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(SignUpResponse {
            message: "User created. OTP sent to your phone.".to_string(),
            user_id: output.user_id,
        }),
    ))
}

/// POST /api/auth/signup/verify
pub async fn sign_up_verify<R, D>(
    State(state): State<AuthAppState<R, D>>,
    body: Bytes,
) -> AuthResult<Json<VerifyOtpResponse>>
where
    R: UserRepository + LoginOtpRepository + Send + Sync + 'static,
    D: OtpDelivery + Send + Sync + 'static,
{
    verify_otp(&state, &body, OtpPurpose::Signup).await
}

// ============================================================================
// Log In
// ============================================================================

/// POST /api/auth/login
pub async fn log_in<R, D>(
    State(state): State<AuthAppState<R, D>>,
    body: Bytes,
) -> AuthResult<Json<MessageResponse>>
where
    R: UserRepository + LoginOtpRepository + Send + Sync + 'static,
    D: OtpDelivery + Send + Sync + 'static,
{
    // Anything short of a usable email/password pair is a failed login
    let req: LogInRequest = parse_body(&body).map_err(|_| AuthError::InvalidCredentials)?;

    let use_case = LogInUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.delivery.clone(),
        state.config.clone(),
    );

    use_case
        .execute(LogInInput {
            email: req.email.unwrap_or_default(),
            password: req.password.unwrap_or_default(),
        })
        .await?;

    Ok(Json(MessageResponse::new("OTP sent")))
}

/// POST /api/auth/login/verify
pub async fn log_in_verify<R, D>(
    State(state): State<AuthAppState<R, D>>,
    body: Bytes,
) -> AuthResult<Json<VerifyOtpResponse>>
where
    R: UserRepository + LoginOtpRepository + Send + Sync + 'static,
    D: OtpDelivery + Send + Sync + 'static,
{
    verify_otp(&state, &body, OtpPurpose::Login).await
}

async fn verify_otp<R, D>(
    state: &AuthAppState<R, D>,
    body: &[u8],
    purpose: OtpPurpose,
) -> AuthResult<Json<VerifyOtpResponse>>
where
    R: UserRepository + LoginOtpRepository + Send + Sync + 'static,
    D: OtpDelivery + Send + Sync + 'static,
{
    let req: VerifyOtpRequest = parse_body(body).map_err(|_| AuthError::InvalidOtp)?;

    let use_case =
        VerifyOtpUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(VerifyOtpInput {
            email: req.email.unwrap_or_default(),
            otp_code: req.otp_code.unwrap_or_default(),
            purpose,
        })
        .await?;

    let message = match purpose {
        OtpPurpose::Signup => "Signup confirmation successful",
        OtpPurpose::Login => "Login successful",
    };

    Ok(Json(VerifyOtpResponse {
        message: message.to_string(),
        token: output.token,
        expires_at_ms: output.expires_at.timestamp_millis(),
        user: UserResponse::from(&output.user),
    }))
}

// ============================================================================
// Log Out
// ============================================================================

/// POST /api/auth/logout
pub async fn log_out<R, D>(
    State(state): State<AuthAppState<R, D>>,
    headers: HeaderMap,
) -> Json<MessageResponse>
where
    R: UserRepository + LoginOtpRepository + Send + Sync + 'static,
    D: OtpDelivery + Send + Sync + 'static,
{
    let token = extract_bearer_token(&headers).ok();
    SignOutUseCase::new(state.config.clone()).execute(token);

    Json(MessageResponse::new("Logged out successfully"))
}

// ============================================================================
// Current User (requires authentication)
// ============================================================================

/// GET /api/auth/me
pub async fn me<R, D>(
    State(state): State<AuthAppState<R, D>>,
    auth_user: AuthUser,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + LoginOtpRepository + Send + Sync + 'static,
    D: OtpDelivery + Send + Sync + 'static,
{
    let user = CurrentUserUseCase::new(state.repo.clone())
        .execute(&auth_user.user_id)
        .await?;

    Ok(Json(UserResponse::from(&user)))
}
