//! Family-head (Aadhaar) verification: request a code for a fixed-length
//! identifier, then submit the code. Independent of the phone OTP sub-flow.

use crate::error::FlowError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AadhaarStep {
    #[default]
    EnterId,
    EnterCode,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FamilyHeadOtp {
    aadhaar: String,
    code: String,
    step: AadhaarStep,
    loading: bool,
    verified: bool,
}

impl FamilyHeadOtp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn aadhaar(&self) -> &str {
        &self.aadhaar
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn step(&self) -> AadhaarStep {
        self.step
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_verified(&self) -> bool {
        self.verified
    }

    /// "Send OTP" is only enabled for an identifier of exactly `length` characters.
    pub fn can_send(&self, length: usize) -> bool {
        !self.loading && !self.verified && self.aadhaar.chars().count() == length
    }

    pub fn can_verify(&self) -> bool {
        !self.loading
            && !self.verified
            && self.step == AadhaarStep::EnterCode
            && !self.code.is_empty()
    }

    /// Only editable at the identifier step.
    pub fn set_aadhaar(&mut self, aadhaar: impl Into<String>) -> bool {
        if self.loading || self.step != AadhaarStep::EnterId {
            return false;
        }
        self.aadhaar = aadhaar.into();
        true
    }

    pub fn set_code(&mut self, code: impl Into<String>) -> bool {
        if self.loading || self.verified || self.step != AadhaarStep::EnterCode {
            return false;
        }
        self.code = code.into();
        true
    }

    /// Go back to the identifier step, e.g. to correct a mistyped number.
    pub fn restart(&mut self) -> bool {
        if self.loading {
            return false;
        }
        *self = Self {
            aadhaar: std::mem::take(&mut self.aadhaar),
            ..Self::default()
        };
        true
    }

    /// Start a send (or resend) request. Returns the identifier to send it for.
    pub fn begin_send(&mut self, length: usize) -> Result<String, FlowError> {
        if self.loading {
            return Err(FlowError::Pending);
        }
        if self.verified {
            return Err(FlowError::AlreadyVerified);
        }
        if self.aadhaar.chars().count() != length {
            return Err(FlowError::AadhaarLength { expected: length });
        }
        self.loading = true;
        Ok(self.aadhaar.clone())
    }

    /// On success move to code entry; on failure stay where we were.
    pub fn finish_send(&mut self, delivered: bool) {
        if !self.loading {
            return;
        }
        self.loading = false;
        if delivered {
            tracing::debug!("aadhaar OTP sent, awaiting code");
            self.step = AadhaarStep::EnterCode;
            self.code.clear();
        }
    }

    /// Returns `(aadhaar, code)` for the verify request.
    pub fn begin_verify(&mut self) -> Result<(String, String), FlowError> {
        if self.loading {
            return Err(FlowError::Pending);
        }
        if self.verified {
            return Err(FlowError::AlreadyVerified);
        }
        if self.step != AadhaarStep::EnterCode {
            return Err(FlowError::NotSent);
        }
        if self.code.is_empty() {
            return Err(FlowError::MissingCode);
        }
        self.loading = true;
        Ok((self.aadhaar.clone(), self.code.clone()))
    }

    /// Failed verifications stay at the code step so the user can retry.
    pub fn finish_verify(&mut self, verified: bool) {
        if !self.loading {
            return;
        }
        self.loading = false;
        self.verified = verified;
    }
}
