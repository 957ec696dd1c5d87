//! Error types for the login flow.
//!
//! [`FlowError`] covers client-side preconditions (the user pressed a button the
//! state machine does not allow right now). [`ServiceError`] is what the auth and
//! OTP collaborators report when a request could not be completed.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("Please enter a valid phone number (at least {min} digits)")]
    PhoneTooShort { min: usize },

    #[error("Aadhaar number must be exactly {expected} digits")]
    AadhaarLength { expected: usize },

    #[error("Please enter the OTP")]
    MissingCode,

    #[error("Please request an OTP first")]
    NotSent,

    #[error("Phone number is already verified")]
    AlreadyVerified,

    #[error("A request is already in progress")]
    Pending,

    #[error("Please verify your phone number with the OTP before logging in")]
    NotVerified,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The request never produced a successful response.
    #[error("network error: {0}")]
    Transport(String),

    /// The service answered but refused the request.
    #[error("{0}")]
    Rejected(String),
}
