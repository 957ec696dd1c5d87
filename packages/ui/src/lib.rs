//! This crate contains all shared UI for the workspace.

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

mod auth;
pub use auth::{use_auth, AuthProvider, AuthState, LogoutButton, SessionAuth};

mod form_store;
pub use form_store::SignalForm;

mod otp_client;
pub use otp_client::ApiOtp;

mod notices;
pub use notices::NoticeList;

mod login_form;
pub use login_form::LoginFormView;
