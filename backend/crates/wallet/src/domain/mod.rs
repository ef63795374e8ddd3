//! Domain Layer
//!
//! Contains entities, value objects, repository traits and the possession
//! verifier.

pub mod entity;
pub mod repository;
pub mod services;
pub mod value_object;

// Re-exports
pub use entity::{Card, Payment, PossessionCode, Transaction, VerificationRecord};
pub use repository::{
    CardRepository, PaymentRepository, TransactionRepository, VerificationRepository,
};
pub use services::PossessionVerifier;
