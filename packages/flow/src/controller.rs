//! # LoginFormController — drives the login card
//!
//! The controller owns no state itself. Form state lives behind a [`FormStore`]
//! (a Dioxus signal in the web app, [`crate::MemoryForm`] in tests) and the two
//! collaborators are injected as [`AuthSession`] and [`OtpService`].
//!
//! Every async operation has the same shape:
//!
//! 1. a short `update` that checks the precondition and enters the pending state
//!    (a failed precondition becomes a [`NoticeLevel::Warning`] and nothing is sent);
//! 2. the collaborator call, awaited with no borrow of the form held;
//! 3. a second `update` applying the completion and queueing a [`Notice`].
//!
//! | Operation | Collaborator call | Outcome notices |
//! |-----------|-------------------|-----------------|
//! | [`send_otp`](LoginFormController::send_otp) | `OtpService::send_phone_otp` | sent / send failed |
//! | [`verify_otp`](LoginFormController::verify_otp) | `OtpService::verify_phone_otp` | verified / invalid code / verify failed |
//! | [`submit`](LoginFormController::submit) | `AuthSession::login` | login failed |
//! | [`send_aadhaar_otp`](LoginFormController::send_aadhaar_otp) | `OtpService::send_aadhaar_otp` | sent / send failed |
//! | [`verify_aadhaar_otp`](LoginFormController::verify_aadhaar_otp) | `OtpService::verify_aadhaar_otp`, then `AuthSession::switch_role` | verified / invalid code / verify failed |
//! | [`quick_login`](LoginFormController::quick_login) | `AuthSession::switch_role` | — |
//!
//! Nothing is retried; every failure ends as a notice on the form.

use crate::config::FlowConfig;
use crate::error::FlowError;
use crate::form::{LoginForm, LoginTab};
use crate::models::Role;
use crate::notice::{Notice, NoticeLevel};
use crate::service::{AuthSession, OtpService};

pub const INVALID_OTP: &str = "Invalid OTP. Please try again.";
pub const SEND_FAILED: &str = "Failed to send OTP. Please try again.";
pub const VERIFY_FAILED: &str =
    "Could not verify the OTP right now. Please check your connection and try again.";

/// Synchronous access to the form state.
///
/// Implementations must not hold a borrow beyond the closure call.
pub trait FormStore {
    fn with<R>(&self, f: impl FnOnce(&LoginForm) -> R) -> R;
    fn update<R>(&self, f: impl FnOnce(&mut LoginForm) -> R) -> R;
}

#[derive(Clone, Debug)]
pub struct LoginFormController<S, A, O> {
    form: S,
    auth: A,
    otp: O,
    config: FlowConfig,
}

impl<S, A, O> LoginFormController<S, A, O>
where
    S: FormStore,
    A: AuthSession,
    O: OtpService,
{
    pub fn new(form: S, auth: A, otp: O) -> Self {
        Self {
            form,
            auth,
            otp,
            config: FlowConfig::default(),
        }
    }

    pub fn with_config(mut self, config: FlowConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    pub fn form(&self) -> &S {
        &self.form
    }

    pub fn can_send_otp(&self) -> bool {
        let min = self.config.phone.min_length;
        self.form.with(|f| f.phone_otp.can_send(min))
    }

    pub fn can_send_aadhaar_otp(&self) -> bool {
        let len = self.config.aadhaar.length;
        self.form.with(|f| f.family_head.can_send(len))
    }

    pub fn can_submit(&self) -> bool {
        self.form.with(LoginForm::can_submit)
    }

    pub fn select_tab(&self, tab: LoginTab) {
        self.form.update(|f| f.tab = tab);
    }

    pub fn set_email(&self, email: String) {
        self.form.update(|f| f.set_email(email));
    }

    pub fn set_password(&self, password: String) {
        self.form.update(|f| f.set_password(password));
    }

    pub fn set_phone(&self, phone: String) {
        self.form.update(|f| f.phone_otp.set_phone(phone));
    }

    pub fn set_otp_code(&self, code: String) {
        self.form.update(|f| f.phone_otp.set_code(code));
    }

    pub fn set_aadhaar(&self, aadhaar: String) {
        self.form.update(|f| f.family_head.set_aadhaar(aadhaar));
    }

    pub fn set_aadhaar_code(&self, code: String) {
        self.form.update(|f| f.family_head.set_code(code));
    }

    pub fn restart_aadhaar(&self) {
        self.form.update(|f| f.family_head.restart());
    }

    pub fn dismiss_notice(&self, id: u64) {
        self.form.update(|f| f.dismiss_notice(id));
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.form.with(|f| f.notices().to_vec())
    }

    /// "Send OTP" / "Resend" on the login tab.
    pub async fn send_otp(&self) {
        let min = self.config.phone.min_length;
        let Some(phone) = self.begin(|f| f.phone_otp.begin_send(min)) else {
            return;
        };

        let result = self.otp.send_phone_otp(&phone).await;

        self.form.update(|f| {
            f.phone_otp.finish_send(result.is_ok());
            match result {
                Ok(()) => {
                    tracing::info!("phone OTP sent");
                    f.push_notice(NoticeLevel::Success, format!("OTP sent to {phone}"));
                }
                Err(e) => {
                    tracing::warn!("Failed to send phone OTP: {}", e);
                    f.push_notice(NoticeLevel::Error, SEND_FAILED);
                }
            }
        });
    }

    /// "Verify" on the login tab.
    pub async fn verify_otp(&self) {
        let Some((phone, code)) = self.begin(|f| f.phone_otp.begin_verify()) else {
            return;
        };

        let result = self.otp.verify_phone_otp(&phone, &code).await;

        self.form.update(|f| match result {
            Ok(v) if v.success => {
                f.phone_otp.finish_verify(true);
                tracing::info!("phone number verified");
                f.push_notice(NoticeLevel::Success, "Phone number verified.");
            }
            Ok(_) => {
                f.phone_otp.finish_verify(false);
                tracing::info!("phone OTP rejected");
                f.push_notice(NoticeLevel::Error, INVALID_OTP);
            }
            Err(e) => {
                f.phone_otp.finish_verify(false);
                tracing::warn!("Failed to verify phone OTP: {}", e);
                f.push_notice(NoticeLevel::Error, VERIFY_FAILED);
            }
        });
    }

    /// The login tab's submit action.
    pub async fn submit(&self) {
        let Some(credentials) = self.begin(LoginForm::begin_submit) else {
            return;
        };

        let result = self.auth.login(&credentials).await;

        self.form.update(|f| {
            f.finish_submit();
            if let Err(e) = result {
                tracing::warn!("Login failed: {}", e);
                f.push_notice(NoticeLevel::Error, format!("Login failed: {e}"));
            }
        });
    }

    pub async fn send_aadhaar_otp(&self) {
        let len = self.config.aadhaar.length;
        let Some(aadhaar) = self.begin(|f| f.family_head.begin_send(len)) else {
            return;
        };

        let result = self.otp.send_aadhaar_otp(&aadhaar).await;

        self.form.update(|f| {
            f.family_head.finish_send(result.is_ok());
            match result {
                Ok(()) => {
                    tracing::info!("aadhaar OTP sent");
                    f.push_notice(
                        NoticeLevel::Success,
                        "OTP sent to the mobile number linked with this Aadhaar.",
                    );
                }
                Err(e) => {
                    tracing::warn!("Failed to send Aadhaar OTP: {}", e);
                    f.push_notice(NoticeLevel::Error, SEND_FAILED);
                }
            }
        });
    }

    /// "Verify & Login" on the family-head tab. Switches role on success only.
    pub async fn verify_aadhaar_otp(&self) {
        let Some((aadhaar, code)) = self.begin(|f| f.family_head.begin_verify()) else {
            return;
        };

        let result = self.otp.verify_aadhaar_otp(&aadhaar, &code).await;

        let verified = self.form.update(|f| match result {
            Ok(v) if v.success => {
                f.family_head.finish_verify(true);
                f.push_notice(NoticeLevel::Success, "Family head verified.");
                true
            }
            Ok(_) => {
                f.family_head.finish_verify(false);
                tracing::info!("aadhaar OTP rejected");
                f.push_notice(NoticeLevel::Error, INVALID_OTP);
                false
            }
            Err(e) => {
                f.family_head.finish_verify(false);
                tracing::warn!("Failed to verify Aadhaar OTP: {}", e);
                f.push_notice(NoticeLevel::Error, VERIFY_FAILED);
                false
            }
        });

        if verified {
            let role = self.config.family_head.role;
            tracing::warn!(%role, "granting role after family-head Aadhaar verification");
            self.auth.switch_role(role);
        }
    }

    /// Demo tab: switch straight to `role`, no request, no validation.
    pub fn quick_login(&self, role: Role) {
        tracing::info!(%role, "demo quick login");
        self.auth.switch_role(role);
    }

    fn begin<T>(&self, start: impl FnOnce(&mut LoginForm) -> Result<T, FlowError>) -> Option<T> {
        self.form.update(|f| match start(f) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!("precondition failed: {}", e);
                f.push_notice(NoticeLevel::Warning, e.to_string());
                None
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::aadhaar::AadhaarStep;
    use crate::error::ServiceError;
    use crate::memory::MemoryForm;
    use crate::models::{Credentials, OtpVerification};
    use crate::otp::OtpState;

    #[derive(Clone, Debug, PartialEq)]
    enum Call {
        SendPhone(String),
        VerifyPhone(String, String),
        SendAadhaar(String),
        VerifyAadhaar(String, String),
    }

    #[derive(Clone, Default)]
    struct FakeAuth {
        logins: Arc<Mutex<Vec<Credentials>>>,
        roles: Arc<Mutex<Vec<Role>>>,
        fail_login: bool,
    }

    impl AuthSession for FakeAuth {
        async fn login(&self, credentials: &Credentials) -> Result<(), ServiceError> {
            self.logins.lock().unwrap().push(credentials.clone());
            if self.fail_login {
                Err(ServiceError::Rejected("Invalid email or password".into()))
            } else {
                Ok(())
            }
        }

        fn switch_role(&self, role: Role) {
            self.roles.lock().unwrap().push(role);
        }
    }

    #[derive(Clone)]
    struct FakeOtp {
        calls: Arc<Mutex<Vec<Call>>>,
        send: Result<(), ServiceError>,
        verify: Result<OtpVerification, ServiceError>,
        expected_code: Option<String>,
    }

    impl Default for FakeOtp {
        fn default() -> Self {
            Self {
                calls: Arc::default(),
                send: Ok(()),
                verify: Ok(OtpVerification::accepted()),
                expected_code: None,
            }
        }
    }

    impl FakeOtp {
        fn expecting(code: &str) -> Self {
            Self {
                expected_code: Some(code.to_string()),
                ..Self::default()
            }
        }

        fn check(&self, code: &str) -> Result<OtpVerification, ServiceError> {
            match &self.expected_code {
                Some(expected) => Ok(OtpVerification {
                    success: expected == code,
                }),
                None => self.verify.clone(),
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl OtpService for FakeOtp {
        async fn send_phone_otp(&self, phone: &str) -> Result<(), ServiceError> {
            self.calls.lock().unwrap().push(Call::SendPhone(phone.into()));
            tokio::task::yield_now().await;
            self.send.clone()
        }

        async fn verify_phone_otp(
            &self,
            phone: &str,
            code: &str,
        ) -> Result<OtpVerification, ServiceError> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::VerifyPhone(phone.into(), code.into()));
            tokio::task::yield_now().await;
            self.check(code)
        }

        async fn send_aadhaar_otp(&self, aadhaar: &str) -> Result<(), ServiceError> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::SendAadhaar(aadhaar.into()));
            self.send.clone()
        }

        async fn verify_aadhaar_otp(
            &self,
            aadhaar: &str,
            code: &str,
        ) -> Result<OtpVerification, ServiceError> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::VerifyAadhaar(aadhaar.into(), code.into()));
            self.check(code)
        }
    }

    type Controller = LoginFormController<MemoryForm, FakeAuth, FakeOtp>;

    fn controller(auth: FakeAuth, otp: FakeOtp) -> Controller {
        LoginFormController::new(MemoryForm::new(), auth, otp)
    }

    fn last_notice(c: &Controller) -> Notice {
        c.notices().last().cloned().expect("a notice")
    }

    #[tokio::test]
    async fn test_phone_login_end_to_end() {
        let auth = FakeAuth::default();
        let otp = FakeOtp::expecting("123456");
        let c = controller(auth.clone(), otp.clone());

        c.set_phone("9876543210".into());
        assert!(c.can_send_otp());
        c.send_otp().await;
        assert_eq!(c.form().snapshot().phone_otp.state(), OtpState::Sent);

        c.set_otp_code("123456".into());
        c.verify_otp().await;
        assert!(c.form().snapshot().phone_otp.is_verified());
        assert!(c.can_submit());

        c.set_email("doctor@valuekare.in".into());
        c.set_password("hunter22".into());
        c.submit().await;

        let logins = auth.logins.lock().unwrap().clone();
        assert_eq!(
            logins,
            vec![Credentials {
                email: "doctor@valuekare.in".into(),
                phone: "9876543210".into(),
                password: "hunter22".into(),
            }]
        );
        assert_eq!(
            otp.calls(),
            vec![
                Call::SendPhone("9876543210".into()),
                Call::VerifyPhone("9876543210".into(), "123456".into()),
            ]
        );
        assert!(auth.roles.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_short_phone_sends_nothing() {
        let otp = FakeOtp::default();
        let c = controller(FakeAuth::default(), otp.clone());

        c.set_phone("98765".into());
        assert!(!c.can_send_otp());
        c.send_otp().await;

        assert!(otp.calls().is_empty());
        assert_eq!(c.form().snapshot().phone_otp.state(), OtpState::Idle);
        assert_eq!(last_notice(&c).level, NoticeLevel::Warning);
    }

    #[tokio::test]
    async fn test_submit_before_verification_does_not_login() {
        let auth = FakeAuth::default();
        let c = controller(auth.clone(), FakeOtp::default());

        c.set_email("doctor@valuekare.in".into());
        c.set_password("hunter22".into());
        c.set_phone("9876543210".into());
        c.send_otp().await;
        assert!(!c.can_submit());

        c.submit().await;

        assert!(auth.logins.lock().unwrap().is_empty());
        let notice = last_notice(&c);
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert_eq!(notice.message, FlowError::NotVerified.to_string());
    }

    #[tokio::test]
    async fn test_failed_send_returns_to_idle() {
        let otp = FakeOtp {
            send: Err(ServiceError::Transport("connection refused".into())),
            ..FakeOtp::default()
        };
        let c = controller(FakeAuth::default(), otp);

        c.set_phone("9876543210".into());
        c.send_otp().await;

        let form = c.form().snapshot();
        assert_eq!(form.phone_otp.state(), OtpState::Idle);
        assert_eq!(form.phone_otp.phone(), "9876543210");
        assert_eq!(last_notice(&c).message, SEND_FAILED);
        assert!(c.can_send_otp());
    }

    #[tokio::test]
    async fn test_invalid_and_failed_verification_are_distinct() {
        let otp = FakeOtp::expecting("123456");
        let c = controller(FakeAuth::default(), otp);
        c.set_phone("9876543210".into());
        c.send_otp().await;

        c.set_otp_code("000000".into());
        c.verify_otp().await;
        assert_eq!(c.form().snapshot().phone_otp.state(), OtpState::Sent);
        assert_eq!(last_notice(&c).message, INVALID_OTP);
        assert!(!c.can_submit());

        let otp = FakeOtp {
            verify: Err(ServiceError::Transport("timed out".into())),
            ..FakeOtp::default()
        };
        let c = controller(FakeAuth::default(), otp);
        c.set_phone("9876543210".into());
        c.send_otp().await;
        c.set_otp_code("123456".into());
        c.verify_otp().await;
        assert_eq!(c.form().snapshot().phone_otp.state(), OtpState::Sent);
        assert_eq!(last_notice(&c).message, VERIFY_FAILED);
        assert!(last_notice(&c).is_error());
    }

    #[tokio::test]
    async fn test_failed_resend_requires_a_new_send() {
        let c = controller(FakeAuth::default(), FakeOtp::default());
        c.set_phone("9876543210".into());
        c.send_otp().await;
        assert_eq!(c.form().snapshot().phone_otp.state(), OtpState::Sent);

        let offline = FakeOtp {
            send: Err(ServiceError::Transport("network down".into())),
            ..FakeOtp::default()
        };
        let c = LoginFormController::new(c.form().clone(), FakeAuth::default(), offline.clone());
        c.send_otp().await;

        assert_eq!(c.form().snapshot().phone_otp.state(), OtpState::Idle);
        assert_eq!(last_notice(&c).message, SEND_FAILED);

        c.set_otp_code("123456".into());
        c.verify_otp().await;

        assert_eq!(offline.calls(), vec![Call::SendPhone("9876543210".into())]);
        assert_eq!(last_notice(&c).message, FlowError::NotSent.to_string());
        assert!(!c.can_submit());
    }

    #[tokio::test]
    async fn test_whitespace_code_reaches_service() {
        let otp = FakeOtp::expecting("123456");
        let c = controller(FakeAuth::default(), otp.clone());
        c.set_phone("9876543210".into());
        c.send_otp().await;

        c.set_otp_code("   ".into());
        c.verify_otp().await;

        assert_eq!(
            otp.calls().last(),
            Some(&Call::VerifyPhone("9876543210".into(), "   ".into()))
        );
        assert_eq!(last_notice(&c).message, INVALID_OTP);
    }

    #[tokio::test]
    async fn test_double_click_sends_once() {
        let otp = FakeOtp::default();
        let c = controller(FakeAuth::default(), otp.clone());
        c.set_phone("9876543210".into());

        tokio::join!(c.send_otp(), c.send_otp());

        assert_eq!(otp.calls(), vec![Call::SendPhone("9876543210".into())]);
        assert_eq!(c.form().snapshot().phone_otp.state(), OtpState::Sent);
        assert!(c
            .notices()
            .iter()
            .any(|n| n.message == FlowError::Pending.to_string()));
    }

    #[tokio::test]
    async fn test_login_failure_becomes_notice() {
        let auth = FakeAuth {
            fail_login: true,
            ..FakeAuth::default()
        };
        let c = controller(auth.clone(), FakeOtp::default());
        c.set_phone("9876543210".into());
        c.send_otp().await;
        c.set_otp_code("123456".into());
        c.verify_otp().await;

        c.submit().await;

        assert_eq!(auth.logins.lock().unwrap().len(), 1);
        assert!(last_notice(&c).message.starts_with("Login failed"));
        assert!(c.can_submit());
    }

    #[tokio::test]
    async fn test_aadhaar_wrong_code_does_not_switch_role() {
        let auth = FakeAuth::default();
        let otp = FakeOtp::expecting("654321");
        let c = controller(auth.clone(), otp.clone());

        c.select_tab(LoginTab::FamilyHead);
        c.set_aadhaar("123456789012".into());
        assert!(c.can_send_aadhaar_otp());
        c.send_aadhaar_otp().await;
        assert_eq!(c.form().snapshot().family_head.step(), AadhaarStep::EnterCode);

        c.set_aadhaar_code("111111".into());
        c.verify_aadhaar_otp().await;

        assert_eq!(last_notice(&c).message, "Invalid OTP. Please try again.");
        assert!(auth.roles.lock().unwrap().is_empty());
        assert_eq!(c.form().snapshot().family_head.step(), AadhaarStep::EnterCode);
        assert_eq!(
            otp.calls(),
            vec![
                Call::SendAadhaar("123456789012".into()),
                Call::VerifyAadhaar("123456789012".into(), "111111".into()),
            ]
        );
    }

    #[tokio::test]
    async fn test_aadhaar_verify_failure_keeps_code_step() {
        let auth = FakeAuth::default();
        let otp = FakeOtp {
            verify: Err(ServiceError::Transport("gateway timeout".into())),
            ..FakeOtp::default()
        };
        let c = controller(auth.clone(), otp.clone());

        c.set_aadhaar("123456789012".into());
        c.send_aadhaar_otp().await;
        c.set_aadhaar_code("654321".into());
        c.verify_aadhaar_otp().await;

        let form = c.form().snapshot();
        assert_eq!(form.family_head.step(), AadhaarStep::EnterCode);
        assert!(!form.family_head.is_verified());
        assert!(!form.family_head.is_loading());
        assert_eq!(last_notice(&c).message, VERIFY_FAILED);
        assert!(last_notice(&c).is_error());
        assert!(auth.roles.lock().unwrap().is_empty());
        assert_eq!(
            otp.calls().last(),
            Some(&Call::VerifyAadhaar("123456789012".into(), "654321".into()))
        );
    }

    #[tokio::test]
    async fn test_aadhaar_success_switches_to_configured_role() {
        let auth = FakeAuth::default();
        let c = controller(auth.clone(), FakeOtp::expecting("654321"))
            .with_config(FlowConfig::default().with_family_head_role(Role::Patient));

        c.set_aadhaar("123456789012".into());
        c.send_aadhaar_otp().await;
        c.set_aadhaar_code("654321".into());
        c.verify_aadhaar_otp().await;

        assert_eq!(*auth.roles.lock().unwrap(), vec![Role::Patient]);
        assert!(c.form().snapshot().family_head.is_verified());
    }

    #[tokio::test]
    async fn test_aadhaar_send_requires_exact_length() {
        let otp = FakeOtp::default();
        let c = controller(FakeAuth::default(), otp.clone());

        c.set_aadhaar("1234567890123".into());
        assert!(!c.can_send_aadhaar_otp());
        c.send_aadhaar_otp().await;

        assert!(otp.calls().is_empty());
        assert_eq!(last_notice(&c).level, NoticeLevel::Warning);
    }

    #[tokio::test]
    async fn test_aadhaar_send_failure_stays_at_id_step() {
        let otp = FakeOtp {
            send: Err(ServiceError::Transport("503".into())),
            ..FakeOtp::default()
        };
        let c = controller(FakeAuth::default(), otp);
        c.set_aadhaar("123456789012".into());
        c.send_aadhaar_otp().await;

        assert_eq!(c.form().snapshot().family_head.step(), AadhaarStep::EnterId);
        assert_eq!(last_notice(&c).message, SEND_FAILED);
    }

    #[test]
    fn test_demo_login_switches_role_without_requests() {
        let auth = FakeAuth::default();
        let otp = FakeOtp::default();
        let c = controller(auth.clone(), otp.clone());

        c.quick_login(Role::Doctor);

        assert_eq!(*auth.roles.lock().unwrap(), vec![Role::Doctor]);
        assert!(otp.calls().is_empty());
        assert!(auth.logins.lock().unwrap().is_empty());
    }

    #[test]
    fn test_dismiss_notice() {
        let c = controller(FakeAuth::default(), FakeOtp::default());
        let id = c.form().update(|f| f.push_notice(NoticeLevel::Info, "hello"));
        c.dismiss_notice(id);
        assert!(c.notices().is_empty());
    }
}
