//! Outbound notification channels (SMS and email)
//!
//! Neither channel talks to a real provider yet. [`LogDelivery`] writes the
//! message to the tracing log and [`RecordingDelivery`] keeps it in memory
//! so tests can read back the code that was "sent".

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum DeliveryError {
    #[error("Invalid recipient: {0}")]
    InvalidRecipient(String),

    #[error("Delivery failed: {0}")]
    Failed(String),
}

/// Delivery channel used for one-time codes
#[trait_variant::make(OtpDelivery: Send)]
pub trait LocalOtpDelivery {
    async fn send_sms(&self, phone: &str, message: &str) -> Result<(), DeliveryError>;

    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), DeliveryError>;
}

/// Text sent with every one-time code
pub fn otp_message(code: &str, ttl_minutes: u64) -> String {
    format!("Your OTP code is: {code}. It expires in {ttl_minutes} minutes.")
}

/// Keep the last four characters of a phone number visible
pub fn mask_phone(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    let hidden = chars.len() - 4;
    match chars.first() {
        Some('+') => format!("+{}{}", "*".repeat(hidden - 1), visible),
        _ => format!("{}{}", "*".repeat(hidden), visible),
    }
}

/// Stub channel that only logs
#[derive(Debug, Clone)]
pub struct LogDelivery {
    from: String,
    sent: Arc<AtomicU64>,
}

impl LogDelivery {
    pub fn new(from: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            sent: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn sent_count(&self) -> u64 {
        self.sent.load(Ordering::Relaxed)
    }
}

impl OtpDelivery for LogDelivery {
    async fn send_sms(&self, phone: &str, message: &str) -> Result<(), DeliveryError> {
        if phone.trim().is_empty() {
            return Err(DeliveryError::InvalidRecipient("empty phone".to_string()));
        }
        let n = self.sent.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::info!(
            target: "otp_delivery",
            channel = "sms",
            to = %mask_phone(phone),
            seq = n,
            message = %message,
            "SMS delivery stub"
        );
        Ok(())
    }

    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), DeliveryError> {
        if !to.contains('@') {
            return Err(DeliveryError::InvalidRecipient(to.to_string()));
        }
        let n = self.sent.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::info!(
            target: "otp_delivery",
            channel = "email",
            from = %self.from,
            to = %to,
            subject = %subject,
            seq = n,
            body = %body,
            "Email delivery stub"
        );
        Ok(())
    }
}

/// A message captured by [`RecordingDelivery`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub channel: Channel,
    pub to: String,
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Sms,
    Email,
}

/// In-memory channel for tests and local tooling
#[derive(Debug, Clone, Default)]
pub struct RecordingDelivery {
    outbox: Arc<Mutex<Vec<SentMessage>>>,
    fail: bool,
}

impl RecordingDelivery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Channel whose every send fails
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn messages(&self) -> Vec<SentMessage> {
        self.outbox
            .lock()
            .map(|outbox| outbox.clone())
            .unwrap_or_default()
    }

    pub fn last(&self) -> Option<SentMessage> {
        self.messages().pop()
    }

    /// First run of six consecutive digits in the last message
    pub fn last_code(&self) -> Option<String> {
        let body = self.last()?.body;
        body.split(|c: char| !c.is_ascii_digit())
            .find(|run| run.len() == 6)
            .map(str::to_string)
    }

    fn push(&self, channel: Channel, to: &str, body: &str) -> Result<(), DeliveryError> {
        if self.fail {
            return Err(DeliveryError::Failed("recording channel set to fail".to_string()));
        }
        let mut outbox = self
            .outbox
            .lock()
            .map_err(|_| DeliveryError::Failed("outbox lock poisoned".to_string()))?;
        outbox.push(SentMessage {
            channel,
            to: to.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

impl OtpDelivery for RecordingDelivery {
    async fn send_sms(&self, phone: &str, message: &str) -> Result<(), DeliveryError> {
        self.push(Channel::Sms, phone, message)
    }

    async fn send_email(&self, to: &str, _subject: &str, body: &str) -> Result<(), DeliveryError> {
        self.push(Channel::Email, to, body)
    }
}
