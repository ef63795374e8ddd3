//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Sign-up with email, phone and password, confirmed by an SMS OTP
//! - Two-step login: password, then SMS OTP
//! - Stateless HMAC-signed access tokens (24 h)
//! - `require_access_token` middleware for other bounded contexts
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (NIST SP 800-63B policy)
//! - OTPs stored as keyed digests, single use, 5-minute expiry
//! - Unknown email and wrong password are indistinguishable

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAuthRepository;
pub use presentation::middleware::{AuthMiddlewareState, AuthUser, require_access_token};
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod router {
    pub use crate::presentation::router::*;
}
