//! # Server-side one-time codes
//!
//! A lazily-created, process-wide [`OtpIssuer`] configured from the environment
//! (see [`OtpConfig::from_env`]), plus [`deliver`], which hands a freshly issued
//! code to the delivery channel.
//!
//! There is no SMS/UIDAI gateway wired in: delivery is a log line, and the code
//! itself is only included when `OTP_LOG_CODES=true`.

mod config;
mod issuer;

pub use config::OtpConfig;
pub use issuer::{mask, validate, OtpChannel, OtpError, OtpIssuer};

use tokio::sync::OnceCell;

static ISSUER: OnceCell<OtpIssuer> = OnceCell::const_new();

/// Get or initialize the OTP issuer.
pub async fn get_issuer() -> Result<&'static OtpIssuer, String> {
    ISSUER
        .get_or_try_init(|| async { OtpConfig::from_env().map(OtpIssuer::new) })
        .await
}

/// Send `code` to `recipient` over `channel`.
pub fn deliver(config: &OtpConfig, channel: OtpChannel, recipient: &str, code: &str) {
    if config.log_codes {
        tracing::info!(%channel, recipient = %mask(recipient), %code, "OTP issued");
    } else {
        tracing::info!(%channel, recipient = %mask(recipient), "OTP issued");
    }
}
