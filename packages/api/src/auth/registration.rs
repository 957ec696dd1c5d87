//! Validation of self-service account registration.

use thiserror::Error;

use crate::otp::{self, OtpChannel};

pub const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Password must be at least {} characters", MIN_PASSWORD_LENGTH)]
    PasswordTooShort,
    #[error("Name is required")]
    MissingName,
    #[error("Invalid phone number")]
    InvalidPhone,
}

/// A registration request after trimming and validation.
///
/// The phone is stored exactly as it must later be entered for the login OTP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub email: String,
    pub name: String,
    pub phone: String,
    pub password: String,
}

impl Registration {
    pub fn parse(
        email: &str,
        password: String,
        name: &str,
        phone: &str,
    ) -> Result<Self, RegistrationError> {
        let email = email.trim().to_lowercase();
        let name = name.trim().to_string();
        let phone = phone.trim().to_string();

        if email.is_empty() || !email.contains('@') {
            return Err(RegistrationError::InvalidEmail);
        }
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(RegistrationError::PasswordTooShort);
        }
        if name.is_empty() {
            return Err(RegistrationError::MissingName);
        }
        otp::validate(OtpChannel::Phone, &phone).map_err(|_| RegistrationError::InvalidPhone)?;

        Ok(Self {
            email,
            name,
            phone,
            password,
        })
    }
}
