//! Authentication context and hooks for the UI.
//!
//! [`AuthProvider`] owns the session state for the whole app. [`SessionAuth`] is
//! the handle the login form uses to establish a session or switch role.

use api::UserInfo;
use dioxus::prelude::*;
use flow::{AuthSession, Credentials, Role, ServiceError};

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<UserInfo>,
    /// Role picked without a credentialed session (demo or family head).
    pub switched_role: Option<Role>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            switched_role: None,
            loading: true,
        }
    }
}

impl AuthState {
    /// The role the app should render for, if any.
    pub fn role(&self) -> Option<Role> {
        self.switched_role
            .or_else(|| self.user.as_ref().map(|u| u.role))
    }

    pub fn is_signed_in(&self) -> bool {
        self.role().is_some()
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in, switches role or logs out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// Provider component that manages authentication state.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let mut auth_state = use_signal(AuthState::default);

    // Pick up an existing session on mount
    let _ = use_resource(move || async move {
        let user = match api::get_current_user().await {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!("Failed to load current user: {}", e);
                None
            }
        };
        let mut state = auth_state.write();
        state.user = user;
        state.loading = false;
    });

    use_context_provider(|| auth_state);

    rsx! {
        {children}
    }
}

/// [`AuthSession`] backed by the [`AuthProvider`] signal and the login server function.
#[derive(Clone, Copy, PartialEq)]
pub struct SessionAuth {
    state: Signal<AuthState>,
}

impl SessionAuth {
    pub fn new(state: Signal<AuthState>) -> Self {
        Self { state }
    }
}

impl AuthSession for SessionAuth {
    async fn login(&self, credentials: &Credentials) -> Result<(), ServiceError> {
        let user = api::login(
            credentials.email.clone(),
            credentials.password.clone(),
            credentials.phone.clone(),
        )
        .await
        .map_err(|e| ServiceError::Rejected(e.to_string()))?;

        tracing::info!(role = %user.role, "session established");
        let mut state = self.state;
        let mut state = state.write();
        state.user = Some(user);
        state.switched_role = None;
        state.loading = false;
        Ok(())
    }

    fn switch_role(&self, role: Role) {
        let mut state = self.state;
        state.write().switched_role = Some(role);
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
    #[props(default)] on_logout: EventHandler<()>,
) -> Element {
    let mut auth_state = use_auth();

    let onclick = move |_| async move {
        if let Err(e) = api::logout().await {
            tracing::error!("Failed to log out: {}", e);
            return;
        }
        auth_state.set(AuthState {
            user: None,
            switched_role: None,
            loading: false,
        });
        on_logout.call(());
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
