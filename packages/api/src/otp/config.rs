//! OTP issuer settings from environment variables.

use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

/// How codes are generated, how long they live and how often they may be guessed.
#[derive(Debug, Clone, PartialEq)]
pub struct OtpConfig {
    pub code_length: usize,
    pub ttl: Duration,
    pub max_attempts: u32,
    /// Log issued codes instead of only their recipients. Development only.
    pub log_codes: bool,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            code_length: 6,
            ttl: Duration::from_secs(300),
            max_attempts: 5,
            log_codes: false,
        }
    }
}

impl OtpConfig {
    /// Read `OTP_CODE_LENGTH`, `OTP_TTL_SECS`, `OTP_MAX_ATTEMPTS` and `OTP_LOG_CODES`,
    /// falling back to [`OtpConfig::default`] for unset variables.
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        let config = Self {
            code_length: env_or("OTP_CODE_LENGTH", defaults.code_length)?,
            ttl: Duration::from_secs(env_or("OTP_TTL_SECS", defaults.ttl.as_secs())?),
            max_attempts: env_or("OTP_MAX_ATTEMPTS", defaults.max_attempts)?,
            log_codes: env_or("OTP_LOG_CODES", defaults.log_codes)?,
        };

        if !(4..=10).contains(&config.code_length) {
            return Err(format!(
                "OTP_CODE_LENGTH must be between 4 and 10, got {}",
                config.code_length
            ));
        }
        if config.max_attempts == 0 {
            return Err("OTP_MAX_ATTEMPTS must be at least 1".to_string());
        }
        Ok(config)
    }
}

fn env_or<T>(name: &str, default: T) -> Result<T, String>
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| format!("{name} is invalid: {e}")),
        Err(_) => Ok(default),
    }
}
