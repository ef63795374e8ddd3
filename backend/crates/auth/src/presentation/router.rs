//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post},
};
use platform::notify::OtpDelivery;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::{LoginOtpRepository, UserRepository};
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{AuthMiddlewareState, require_access_token};

/// Create the Auth router with PostgreSQL repository
pub fn auth_router<D>(repo: PgAuthRepository, delivery: D, config: Arc<AuthConfig>) -> Router
where
    D: OtpDelivery + Send + Sync + 'static,
{
    auth_router_generic(repo, delivery, config)
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R, D>(repo: R, delivery: D, config: Arc<AuthConfig>) -> Router
where
    R: UserRepository + LoginOtpRepository + Send + Sync + 'static,
    D: OtpDelivery + Send + Sync + 'static,
{
    let guard = AuthMiddlewareState::new(config.clone());
    let state = AuthAppState {
        repo: Arc::new(repo),
        delivery: Arc::new(delivery),
        config,
    };

    Router::new()
        .route("/signup", post(handlers::sign_up::<R, D>))
        .route("/signup/verify", post(handlers::sign_up_verify::<R, D>))
        .route("/login", post(handlers::log_in::<R, D>))
        .route("/login/verify", post(handlers::log_in_verify::<R, D>))
        .route("/logout", post(handlers::log_out::<R, D>))
        .route(
            "/me",
            get(handlers::me::<R, D>)
                .route_layer(middleware::from_fn_with_state(guard, require_access_token)),
        )
        .with_state(state)
}
