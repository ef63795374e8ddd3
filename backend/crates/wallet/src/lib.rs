//! Wallet Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits, possession verifier
//! - `application/` - Use cases and configuration
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Payment cards and identity documents, scoped to their owner
//! - Simulated payments settled by a debit on the source bank card
//! - Per-card ledger with running balance and pagination
//! - Proof of card possession: emailed code, selfie video, manual review
//!
//! All routes sit behind `auth::require_access_token`.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::WalletConfig;
pub use domain::services::{FixedVerifier, PossessionVerifier, SimulatedVerifier};
pub use error::{WalletError, WalletResult};
pub use infra::postgres::PgWalletRepository;
pub use presentation::router::wallet_router;

pub mod router {
    pub use crate::presentation::router::*;
}

#[cfg(test)]
mod tests;
