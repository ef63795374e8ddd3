//! Value Object Module

pub mod email;
pub mod otp_code;
pub mod phone;
pub mod user_password;

pub use email::Email;
pub use otp_code::{OtpCode, OtpPurpose};
pub use phone::Phone;
pub use user_password::{RawPassword, UserPassword};
