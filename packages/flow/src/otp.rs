//! # Phone OTP sub-flow
//!
//! A linear state machine that gates the login tab's submit button:
//!
//! ```text
//! Idle ──send──▶ Sending ──ok──▶ Sent ──verify──▶ Verifying ──success──▶ Verified
//!   ▲               │              ▲  │                │
//!   └────failure────┘              │  └────resend──────┼──▶ Sending
//!                                  └──invalid / error──┘
//! ```
//!
//! Every request is split into a synchronous `begin_*` call, which validates the
//! precondition and moves into the pending state, and a `finish_*` call applied
//! when the request settles. Because the pending state is entered before any
//! request is issued, a second trigger is rejected with [`FlowError::Pending`].

use crate::error::FlowError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OtpState {
    #[default]
    Idle,
    Sending,
    Sent,
    Verifying,
    Verified,
}

/// Phone number, entered code and progress of the phone verification.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PhoneOtp {
    phone: String,
    code: String,
    state: OtpState,
}

impl PhoneOtp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn state(&self) -> OtpState {
        self.state
    }

    /// A code has been delivered at least once in the current attempt.
    pub fn is_sent(&self) -> bool {
        matches!(
            self.state,
            OtpState::Sent | OtpState::Verifying | OtpState::Verified
        )
    }

    pub fn is_verified(&self) -> bool {
        self.state == OtpState::Verified
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, OtpState::Sending | OtpState::Verifying)
    }

    pub fn can_send(&self, min_phone_length: usize) -> bool {
        matches!(self.state, OtpState::Idle | OtpState::Sent)
            && self.phone.chars().count() >= min_phone_length
    }

    pub fn can_verify(&self) -> bool {
        self.state == OtpState::Sent && !self.code.is_empty()
    }

    /// Update the phone number. Ignored while a request is in flight.
    ///
    /// Changing the number after a code went out drops back to `Idle`, so a
    /// verification always belongs to the number that will be submitted.
    pub fn set_phone(&mut self, phone: impl Into<String>) -> bool {
        if self.is_pending() {
            return false;
        }
        let phone = phone.into();
        if phone != self.phone && self.state != OtpState::Idle {
            tracing::debug!(from = ?self.state, "phone changed, resetting OTP");
            self.state = OtpState::Idle;
            self.code.clear();
        }
        self.phone = phone;
        true
    }

    /// Update the entered code. Ignored while verifying or once verified.
    pub fn set_code(&mut self, code: impl Into<String>) -> bool {
        if matches!(self.state, OtpState::Verifying | OtpState::Verified) {
            return false;
        }
        self.code = code.into();
        true
    }

    /// `Idle | Sent → Sending`. Returns the phone number to send the code to.
    pub fn begin_send(&mut self, min_phone_length: usize) -> Result<String, FlowError> {
        match self.state {
            OtpState::Sending | OtpState::Verifying => return Err(FlowError::Pending),
            OtpState::Verified => return Err(FlowError::AlreadyVerified),
            OtpState::Idle | OtpState::Sent => {}
        }
        if self.phone.chars().count() < min_phone_length {
            return Err(FlowError::PhoneTooShort {
                min: min_phone_length,
            });
        }
        self.transition(OtpState::Sending);
        self.code.clear();
        Ok(self.phone.clone())
    }

    /// `Sending → Sent` on success, `Sending → Idle` on failure.
    pub fn finish_send(&mut self, delivered: bool) {
        if self.state != OtpState::Sending {
            return;
        }
        self.transition(if delivered {
            OtpState::Sent
        } else {
            OtpState::Idle
        });
    }

    /// `Sent → Verifying`. Returns `(phone, code)` for the verify request.
    pub fn begin_verify(&mut self) -> Result<(String, String), FlowError> {
        match self.state {
            OtpState::Sending | OtpState::Verifying => return Err(FlowError::Pending),
            OtpState::Verified => return Err(FlowError::AlreadyVerified),
            OtpState::Idle => return Err(FlowError::NotSent),
            OtpState::Sent => {}
        }
        if self.code.is_empty() {
            return Err(FlowError::MissingCode);
        }
        self.transition(OtpState::Verifying);
        Ok((self.phone.clone(), self.code.clone()))
    }

    /// `Verifying → Verified` when the server accepted the code, otherwise back to `Sent`.
    pub fn finish_verify(&mut self, verified: bool) {
        if self.state != OtpState::Verifying {
            return;
        }
        self.transition(if verified {
            OtpState::Verified
        } else {
            OtpState::Sent
        });
    }

    fn transition(&mut self, to: OtpState) {
        tracing::debug!(from = ?self.state, ?to, "phone OTP transition");
        self.state = to;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sent(phone: &str) -> PhoneOtp {
        let mut otp = PhoneOtp::new();
        otp.set_phone(phone);
        otp.begin_send(10).unwrap();
        otp.finish_send(true);
        otp
    }

    #[test]
    fn test_send_requires_min_length() {
        let mut otp = PhoneOtp::new();
        for len in 0..10 {
            otp.set_phone("9".repeat(len));
            assert!(!otp.can_send(10), "length {len} should not be sendable");
            assert_eq!(
                otp.begin_send(10),
                Err(FlowError::PhoneTooShort { min: 10 })
            );
            assert_eq!(otp.state(), OtpState::Idle);
        }
        otp.set_phone("9876543210");
        assert!(otp.can_send(10));
        otp.set_phone("+919876543210");
        assert!(otp.can_send(10));
    }

    #[test]
    fn test_send_success_and_failure() {
        let mut otp = PhoneOtp::new();
        otp.set_phone("9876543210");

        assert_eq!(otp.begin_send(10).unwrap(), "9876543210");
        assert!(otp.is_pending());
        otp.finish_send(false);
        assert_eq!(otp.state(), OtpState::Idle);
        assert_eq!(otp.phone(), "9876543210");

        otp.begin_send(10).unwrap();
        otp.finish_send(true);
        assert_eq!(otp.state(), OtpState::Sent);
        assert!(otp.is_sent());
        assert!(!otp.is_verified());
    }

    #[test]
    fn test_second_trigger_while_pending_is_rejected() {
        let mut otp = PhoneOtp::new();
        otp.set_phone("9876543210");
        otp.begin_send(10).unwrap();
        assert_eq!(otp.begin_send(10), Err(FlowError::Pending));
        assert_eq!(otp.begin_verify(), Err(FlowError::Pending));
        assert!(!otp.set_phone("0000000000"));
        assert_eq!(otp.phone(), "9876543210");
    }

    #[test]
    fn test_verify_preconditions() {
        let mut otp = PhoneOtp::new();
        otp.set_phone("9876543210");
        otp.set_code("123456");
        assert_eq!(otp.begin_verify(), Err(FlowError::NotSent));

        let mut otp = sent("9876543210");
        assert!(!otp.can_verify());
        assert_eq!(otp.begin_verify(), Err(FlowError::MissingCode));

        // No format check: anything non-empty goes to the server.
        otp.set_code("12");
        assert!(otp.can_verify());
        assert_eq!(
            otp.begin_verify().unwrap(),
            ("9876543210".to_string(), "12".to_string())
        );
    }

    #[test]
    fn test_whitespace_code_is_sent_as_entered() {
        let mut otp = sent("9876543210");
        otp.set_code("   ");
        assert!(otp.can_verify());
        assert_eq!(
            otp.begin_verify().unwrap(),
            ("9876543210".to_string(), "   ".to_string())
        );
    }

    #[test]
    fn test_verify_rejected_returns_to_sent() {
        let mut otp = sent("9876543210");
        otp.set_code("000000");
        otp.begin_verify().unwrap();
        otp.finish_verify(false);
        assert_eq!(otp.state(), OtpState::Sent);
        assert_eq!(otp.code(), "000000");

        otp.set_code("123456");
        otp.begin_verify().unwrap();
        otp.finish_verify(true);
        assert!(otp.is_verified());
        assert_eq!(otp.begin_send(10), Err(FlowError::AlreadyVerified));
        assert!(!otp.set_code("999999"));
    }

    #[test]
    fn test_resend_clears_code() {
        let mut otp = sent("9876543210");
        otp.set_code("111111");
        otp.begin_send(10).unwrap();
        assert_eq!(otp.code(), "");
        otp.finish_send(true);
        assert_eq!(otp.state(), OtpState::Sent);
    }

    #[test]
    fn test_changing_phone_after_verification_resets() {
        let mut otp = sent("9876543210");
        otp.set_code("123456");
        otp.begin_verify().unwrap();
        otp.finish_verify(true);

        // Same number is a no-op.
        otp.set_phone("9876543210");
        assert!(otp.is_verified());

        otp.set_phone("9876543211");
        assert_eq!(otp.state(), OtpState::Idle);
        assert_eq!(otp.code(), "");
    }

    #[test]
    fn test_stale_completion_is_ignored() {
        let mut otp = PhoneOtp::new();
        otp.finish_send(true);
        otp.finish_verify(true);
        assert_eq!(otp.state(), OtpState::Idle);
    }
}
