//! HTTP Handlers
//!
//! Every handler runs behind `auth::require_access_token` and reads the
//! caller through the [`auth::AuthUser`] extractor.

pub mod cards;
pub mod payments;
pub mod transactions;
pub mod verification;

use std::str::FromStr;
use std::sync::Arc;

use platform::notify::OtpDelivery;

use crate::application::config::WalletConfig;
use crate::domain::repository::{
    CardRepository, PaymentRepository, TransactionRepository, VerificationRepository,
};
use crate::domain::services::PossessionVerifier;
use crate::error::WalletError;

/// Everything the wallet persists, behind one handle
pub trait WalletStore:
    CardRepository
    + PaymentRepository
    + TransactionRepository
    + VerificationRepository
    + Send
    + Sync
    + 'static
{
}

impl<T> WalletStore for T where
    T: CardRepository
        + PaymentRepository
        + TransactionRepository
        + VerificationRepository
        + Send
        + Sync
        + 'static
{
}

/// Shared state for wallet handlers
pub struct WalletAppState<R, D, P>
where
    R: WalletStore,
    D: OtpDelivery + Send + Sync + 'static,
    P: PossessionVerifier + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub delivery: Arc<D>,
    pub verifier: Arc<P>,
    pub config: Arc<WalletConfig>,
}

// derive(Clone) would demand `R: Clone` and friends
impl<R, D, P> Clone for WalletAppState<R, D, P>
where
    R: WalletStore,
    D: OtpDelivery + Send + Sync + 'static,
    P: PossessionVerifier + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            delivery: self.delivery.clone(),
            verifier: self.verifier.clone(),
            config: self.config.clone(),
        }
    }
}

/// Parse an id from a path or body; anything unparsable is `not_found`
pub(crate) fn parse_id<T: FromStr>(raw: &str, not_found: WalletError) -> Result<T, WalletError> {
    raw.trim().parse().map_err(|_| not_found)
}
