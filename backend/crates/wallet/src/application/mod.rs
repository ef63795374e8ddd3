//! Application Layer
//!
//! Use cases and application services.

pub mod cards;
pub mod config;
pub mod payments;
pub mod transactions;
pub mod verification;

// Re-exports
pub use cards::{
    CardInput, CreateCardUseCase, DeleteCardUseCase, GetCardUseCase, ListCardsUseCase,
    UpdateCardUseCase,
};
pub use config::WalletConfig;
pub use payments::{
    GetPaymentUseCase, ListPaymentsUseCase, MakePaymentInput, MakePaymentOutput,
    MakePaymentUseCase,
};
pub use transactions::{
    CardTransactionsOutput, CardTransactionsUseCase, ListTransactionsUseCase,
    RecordTransactionInput, RecordTransactionUseCase,
};
pub use verification::{
    GenerateCodeOutput, GenerateCodeUseCase, ReviewInput, ReviewVerificationUseCase,
    SubmitVerificationInput, SubmitVerificationOutput, SubmitVerificationUseCase,
    VerificationStatusOutput, VerificationStatusUseCase,
};
