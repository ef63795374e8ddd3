//! Entity Module

pub mod card;
pub mod payment;
pub mod transaction;
pub mod verification;

pub use card::{Card, CardChanges, NewCard};
pub use payment::Payment;
pub use transaction::{NewTransaction, Transaction};
pub use verification::{PossessionCode, VerificationRecord};
