//! Entity Module

pub mod login_otp;
pub mod user;

pub use login_otp::LoginOtp;
pub use user::User;
