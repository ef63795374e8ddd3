//! Application Layer
//!
//! Use cases and application services.

pub mod access_token;
pub mod config;
pub mod current_user;
pub mod log_in;
mod send_otp;
pub mod sign_out;
pub mod sign_up;
pub mod verify_otp;

// Re-exports
pub use access_token::{AccessClaims, TokenError};
pub use config::AuthConfig;
pub use current_user::CurrentUserUseCase;
pub use log_in::{LogInInput, LogInUseCase};
pub use sign_out::SignOutUseCase;
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
pub use verify_otp::{VerifyOtpInput, VerifyOtpOutput, VerifyOtpUseCase};
