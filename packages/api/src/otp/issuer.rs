//! In-memory one-time code issuer.
//!
//! One outstanding code per `(channel, recipient)`. Issuing again replaces the
//! previous code, a correct guess consumes it, and it is dropped once it expires
//! or after `max_attempts` wrong guesses.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, PoisonError};
use std::time::Instant;

use rand::Rng;
use thiserror::Error;

use super::config::OtpConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OtpChannel {
    Phone,
    Aadhaar,
}

impl fmt::Display for OtpChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OtpChannel::Phone => "phone",
            OtpChannel::Aadhaar => "aadhaar",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OtpError {
    #[error("Invalid phone number")]
    InvalidPhone,
    #[error("Aadhaar number must be exactly 12 digits")]
    InvalidAadhaar,
}

#[derive(Debug)]
struct PendingCode {
    code: String,
    expires_at: Instant,
    failed_attempts: u32,
}

#[derive(Debug)]
pub struct OtpIssuer {
    config: OtpConfig,
    pending: Mutex<HashMap<(OtpChannel, String), PendingCode>>,
}

impl OtpIssuer {
    pub fn new(config: OtpConfig) -> Self {
        Self {
            config,
            pending: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &OtpConfig {
        &self.config
    }

    /// Generate a fresh code for `recipient`, invalidating any earlier one.
    pub fn issue(&self, channel: OtpChannel, recipient: &str) -> Result<String, OtpError> {
        self.issue_at(channel, recipient, Instant::now())
    }

    pub fn verify(&self, channel: OtpChannel, recipient: &str, code: &str) -> bool {
        self.verify_at(channel, recipient, code, Instant::now())
    }

    fn issue_at(
        &self,
        channel: OtpChannel,
        recipient: &str,
        now: Instant,
    ) -> Result<String, OtpError> {
        validate(channel, recipient)?;

        let mut rng = rand::thread_rng();
        let code: String = (0..self.config.code_length)
            .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
            .collect();

        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        pending.retain(|_, p| p.expires_at > now);
        pending.insert(
            (channel, recipient.to_string()),
            PendingCode {
                code: code.clone(),
                expires_at: now + self.config.ttl,
                failed_attempts: 0,
            },
        );
        Ok(code)
    }

    fn verify_at(&self, channel: OtpChannel, recipient: &str, code: &str, now: Instant) -> bool {
        let key = (channel, recipient.to_string());
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);

        let Some(entry) = pending.get_mut(&key) else {
            return false;
        };

        if entry.expires_at <= now {
            pending.remove(&key);
            return false;
        }

        if entry.code == code.trim() {
            pending.remove(&key);
            return true;
        }

        entry.failed_attempts += 1;
        if entry.failed_attempts >= self.config.max_attempts {
            tracing::warn!(%channel, "too many wrong OTP attempts, code discarded");
            pending.remove(&key);
        }
        false
    }
}

/// Shape check applied before a code is issued.
pub fn validate(channel: OtpChannel, recipient: &str) -> Result<(), OtpError> {
    match channel {
        OtpChannel::Phone => {
            let digits = recipient.strip_prefix('+').unwrap_or(recipient);
            if digits.len() < 10 || !digits.chars().all(|c| c.is_ascii_digit()) {
                return Err(OtpError::InvalidPhone);
            }
        }
        OtpChannel::Aadhaar => {
            if recipient.len() != 12 || !recipient.chars().all(|c| c.is_ascii_digit()) {
                return Err(OtpError::InvalidAadhaar);
            }
        }
    }
    Ok(())
}

/// Keep only the last four characters, e.g. `******3210`.
pub fn mask(recipient: &str) -> String {
    let count = recipient.chars().count();
    recipient
        .chars()
        .enumerate()
        .map(|(i, c)| if i + 4 < count { '*' } else { c })
        .collect()
}
