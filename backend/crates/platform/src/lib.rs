//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations for the wallet services:
//! - Cryptographic helpers (SHA-256, HMAC, URL-safe Base64, numeric codes)
//! - Password policy and Argon2id hashing
//! - Bearer token extraction
//! - SMS / email delivery channels for one-time codes
//! - Environment configuration helpers

pub mod bearer;
pub mod config;
pub mod crypto;
pub mod notify;
pub mod password;
