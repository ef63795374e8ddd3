//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use auth::{AuthConfig, PgAuthRepository, auth_router};
use axum::{
    Json, Router, http,
    http::{Method, header},
    routing::get,
};
use platform::config::{env_bytes, env_or, env_parse, env_required, secret_from_env, split_list};
use platform::notify::LogDelivery;
use serde_json::json;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wallet::{PgWalletRepository, WalletConfig, wallet_router};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,wallet=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env_required("DATABASE_URL")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Startup cleanup: expired one-time codes
    // Errors here should not prevent server startup
    let auth_repo = PgAuthRepository::new(pool.clone());
    match auth_repo.cleanup_expired().await {
        Ok(otps) => {
            tracing::info!(otps_deleted = otps, "Login OTP cleanup completed");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Login OTP cleanup failed, continuing anyway");
        }
    }

    let wallet_repo = PgWalletRepository::new(pool.clone());
    if let Err(e) = wallet_repo.cleanup_expired().await {
        tracing::warn!(error = %e, "Possession code cleanup failed, continuing anyway");
    }

    // Auth configuration
    let mut auth_config = if cfg!(debug_assertions) {
        AuthConfig::development()
    } else {
        // In production, load secret from environment
        AuthConfig::with_secret(secret_from_env("AUTH_TOKEN_SECRET")?)
    }
    .with_breach_check(env_parse("CHECK_BREACHED_PASSWORDS", false)?);
    if let Some(pepper) = env_bytes("PASSWORD_PEPPER") {
        auth_config = auth_config.with_pepper(pepper);
    }
    let auth_config = Arc::new(auth_config);
    let wallet_config = Arc::new(if cfg!(debug_assertions) {
        WalletConfig::development()
    } else {
        WalletConfig::with_secret(secret_from_env("WALLET_CODE_SECRET")?)
    });

    // SMS and email go through the logging stub
    let delivery = LogDelivery::new(env_or("SMTP_FROM", "no-reply@wallet.local"));

    // CORS configuration
    let allowed_origins: Vec<http::HeaderValue> =
        split_list(&env_or("FRONTEND_ORIGINS", "http://localhost:3000"))
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let api = Router::new()
        .route("/health", get(|| async { Json(json!({ "status": "ok" })) }))
        .nest(
            "/auth",
            auth_router(auth_repo, delivery.clone(), auth_config.clone()),
        )
        .merge(wallet_router(
            wallet_repo,
            delivery,
            wallet_config,
            auth_config,
        ));

    let app = Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr: SocketAddr = env_or("BIND_ADDR", "0.0.0.0:5000").parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
