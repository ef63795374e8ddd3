//! Wallet Router
//!
//! Paths are absolute below the API prefix so the router can be merged
//! next to other bounded contexts.

use auth::{AuthConfig, AuthMiddlewareState, require_access_token};
use axum::{
    Router, middleware,
    routing::{get, post},
};
use platform::notify::OtpDelivery;
use std::sync::Arc;

use crate::application::config::WalletConfig;
use crate::domain::services::{PossessionVerifier, SimulatedVerifier};
use crate::infra::postgres::PgWalletRepository;
use crate::presentation::handlers::{
    WalletAppState, WalletStore, cards, payments, transactions, verification,
};

/// Create the Wallet router with PostgreSQL repository and the simulated
/// possession check
pub fn wallet_router<D>(
    repo: PgWalletRepository,
    delivery: D,
    config: Arc<WalletConfig>,
    auth_config: Arc<AuthConfig>,
) -> Router
where
    D: OtpDelivery + Send + Sync + 'static,
{
    let verifier = SimulatedVerifier::new(config.automated_pass_rate);
    wallet_router_generic(repo, delivery, verifier, config, auth_config)
}

/// Create a generic Wallet router for any repository implementation
pub fn wallet_router_generic<R, D, P>(
    repo: R,
    delivery: D,
    verifier: P,
    config: Arc<WalletConfig>,
    auth_config: Arc<AuthConfig>,
) -> Router
where
    R: WalletStore,
    D: OtpDelivery + Send + Sync + 'static,
    P: PossessionVerifier + Send + Sync + 'static,
{
    let guard = AuthMiddlewareState::new(auth_config);
    let state = WalletAppState {
        repo: Arc::new(repo),
        delivery: Arc::new(delivery),
        verifier: Arc::new(verifier),
        config,
    };

    Router::new()
        // Cards and identity documents
        .route(
            "/cards",
            get(cards::list::<R, D, P>).post(cards::create::<R, D, P>),
        )
        .route(
            "/cards/{id}",
            get(cards::get::<R, D, P>)
                .put(cards::update::<R, D, P>)
                .delete(cards::delete::<R, D, P>),
        )
        // Payments
        .route(
            "/payments",
            get(payments::list::<R, D, P>).post(payments::make::<R, D, P>),
        )
        .route("/payments/scan", post(payments::scan))
        .route("/payments/{id}", get(payments::get::<R, D, P>))
        // Transactions
        .route(
            "/transactions",
            get(transactions::list::<R, D, P>).post(transactions::record::<R, D, P>),
        )
        .route(
            "/transactions/card/{card_id}",
            get(transactions::for_card::<R, D, P>),
        )
        // Possession verification
        .route(
            "/verification/generate-code",
            post(verification::generate_code::<R, D, P>),
        )
        .route(
            "/verification/verify/{card_id}",
            post(verification::submit::<R, D, P>),
        )
        .route(
            "/verification/status/{card_id}",
            get(verification::status::<R, D, P>),
        )
        .route(
            "/verification/review/{verification_id}",
            post(verification::review::<R, D, P>),
        )
        .route_layer(middleware::from_fn_with_state(guard, require_access_token))
        .with_state(state)
}
