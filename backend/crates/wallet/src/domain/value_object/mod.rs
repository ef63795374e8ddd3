//! Value Object Module

pub mod amount;
pub mod card_category;
pub mod card_status;
pub mod payment_status;
pub mod transaction_kind;
pub mod verification_result;

pub use amount::Amount;
pub use card_category::CardCategory;
pub use card_status::CardStatus;
pub use payment_status::{PaymentMethod, PaymentStatus};
pub use transaction_kind::{TransactionKind, TransactionStatus};
pub use verification_result::{VerificationMethod, VerificationResult};
