//! Collaborators the login form talks to.
//!
//! Both traits are injected into [`crate::LoginFormController`], so the web app
//! wires them to server functions and an auth context while tests use doubles.

use crate::error::ServiceError;
use crate::models::{Credentials, OtpVerification, Role};

/// The session provider: establishes a credentialed session or switches role.
pub trait AuthSession {
    fn login(
        &self,
        credentials: &Credentials,
    ) -> impl std::future::Future<Output = Result<(), ServiceError>>;

    fn switch_role(&self, role: Role);
}

/// Issues and checks one-time codes for phone numbers and Aadhaar identifiers.
///
/// A send succeeds on any successful response regardless of payload.
pub trait OtpService {
    fn send_phone_otp(
        &self,
        phone: &str,
    ) -> impl std::future::Future<Output = Result<(), ServiceError>>;

    fn verify_phone_otp(
        &self,
        phone: &str,
        code: &str,
    ) -> impl std::future::Future<Output = Result<OtpVerification, ServiceError>>;

    fn send_aadhaar_otp(
        &self,
        aadhaar: &str,
    ) -> impl std::future::Future<Output = Result<(), ServiceError>>;

    fn verify_aadhaar_otp(
        &self,
        aadhaar: &str,
        code: &str,
    ) -> impl std::future::Future<Output = Result<OtpVerification, ServiceError>>;
}
