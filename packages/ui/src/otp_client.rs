//! [`OtpService`] over the OTP server functions.

use flow::{OtpService, OtpVerification, ServiceError};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ApiOtp;

impl OtpService for ApiOtp {
    async fn send_phone_otp(&self, phone: &str) -> Result<(), ServiceError> {
        api::send_otp(phone.to_string())
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))
    }

    async fn verify_phone_otp(
        &self,
        phone: &str,
        code: &str,
    ) -> Result<OtpVerification, ServiceError> {
        api::verify_otp(phone.to_string(), code.to_string())
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))
    }

    async fn send_aadhaar_otp(&self, aadhaar: &str) -> Result<(), ServiceError> {
        api::send_aadhaar_otp(aadhaar.to_string())
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))
    }

    async fn verify_aadhaar_otp(
        &self,
        aadhaar: &str,
        code: &str,
    ) -> Result<OtpVerification, ServiceError> {
        api::verify_aadhaar_otp(aadhaar.to_string(), code.to_string())
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))
    }
}
