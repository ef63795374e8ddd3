//! Application Configuration

use std::time::Duration;

use kernel::pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PageRequest};

/// Wallet application configuration
#[derive(Debug, Clone)]
pub struct WalletConfig {
    /// HMAC key for possession code digests (32 bytes)
    pub code_secret: [u8; 32],
    /// ISO code stamped on payments and transactions
    pub currency: String,
    /// Possession code lifetime (10 minutes)
    pub possession_code_ttl: Duration,
    /// Probability that the simulated video check passes
    pub automated_pass_rate: f64,
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            code_secret: [0u8; 32],
            currency: "RWF".to_string(),
            possession_code_ttl: Duration::from_secs(10 * 60),
            automated_pass_rate: 0.7,
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

impl WalletConfig {
    /// Create config for development, with a random code secret
    pub fn development() -> Self {
        use rand::RngCore;
        let mut secret = [0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self::with_secret(secret)
    }

    /// Create config with a specific code secret
    pub fn with_secret(secret: [u8; 32]) -> Self {
        Self {
            code_secret: secret,
            ..Default::default()
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn with_pass_rate(mut self, rate: f64) -> Self {
        self.automated_pass_rate = rate;
        self
    }

    /// Code lifetime in whole minutes, as shown in the email
    pub fn possession_code_ttl_minutes(&self) -> u64 {
        self.possession_code_ttl.as_secs().div_ceil(60)
    }

    pub fn possession_code_ttl_chrono(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.possession_code_ttl)
            .unwrap_or(chrono::Duration::minutes(10))
    }

    /// Page request from raw query values, clamped to this config
    pub fn page_request(&self, page: Option<u32>, limit: Option<u32>) -> PageRequest {
        PageRequest::new(page, limit, self.default_page_size, self.max_page_size)
    }
}
