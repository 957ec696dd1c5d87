//! The complete, transient state behind the login card.

use crate::aadhaar::FamilyHeadOtp;
use crate::error::FlowError;
use crate::models::Credentials;
use crate::notice::{Notice, NoticeLevel};
use crate::otp::PhoneOtp;

/// Older notices are dropped once this many are queued.
pub const MAX_NOTICES: usize = 4;

/// The three mutually exclusive tabs of the login card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoginTab {
    #[default]
    Login,
    FamilyHead,
    Demo,
}

impl LoginTab {
    pub const ALL: [LoginTab; 3] = [LoginTab::Login, LoginTab::FamilyHead, LoginTab::Demo];

    pub fn label(&self) -> &'static str {
        match self {
            LoginTab::Login => "Login",
            LoginTab::FamilyHead => "Family Head",
            LoginTab::Demo => "Quick Demo",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub tab: LoginTab,
    pub phone_otp: PhoneOtp,
    pub family_head: FamilyHeadOtp,
    email: String,
    password: String,
    submitting: bool,
    notices: Vec<Notice>,
    next_notice_id: u64,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            email: self.email.clone(),
            phone: self.phone_otp.phone().to_string(),
            password: self.password.clone(),
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// The login button is enabled only once the phone number is verified.
    pub fn can_submit(&self) -> bool {
        self.phone_otp.is_verified() && !self.submitting
    }

    /// Start a login. Fails without side effects unless the phone is verified.
    pub fn begin_submit(&mut self) -> Result<Credentials, FlowError> {
        if !self.phone_otp.is_verified() {
            return Err(FlowError::NotVerified);
        }
        if self.submitting {
            return Err(FlowError::Pending);
        }
        self.submitting = true;
        Ok(self.credentials())
    }

    pub fn finish_submit(&mut self) {
        self.submitting = false;
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Queue a notice, evicting the oldest beyond [`MAX_NOTICES`].
    pub fn push_notice(&mut self, level: NoticeLevel, message: impl Into<String>) -> u64 {
        let id = self.next_notice_id;
        self.next_notice_id += 1;
        if self.notices.len() >= MAX_NOTICES {
            let excess = self.notices.len() + 1 - MAX_NOTICES;
            self.notices.drain(..excess);
        }
        self.notices.push(Notice {
            id,
            level,
            message: message.into(),
        });
        id
    }

    pub fn dismiss_notice(&mut self, id: u64) {
        self.notices.retain(|n| n.id != id);
    }

    /// Remove and return every queued notice, oldest first.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}
