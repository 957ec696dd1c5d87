//! Login page view wrapping the shared login card.

use dioxus::prelude::*;
use flow::FlowConfig;
use ui::{use_auth, LoginFormView};

use crate::Route;

const LOGIN_TOML: &str = include_str!("../../login.toml");

fn load_config() -> FlowConfig {
    FlowConfig::from_toml(LOGIN_TOML).unwrap_or_else(|e| {
        tracing::warn!("Invalid {}: {}; using defaults", FlowConfig::filename(), e);
        FlowConfig::default()
    })
}

/// Login page component.
#[component]
pub fn Login() -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let config = use_hook(load_config);

    // Once a session or role exists, move on
    use_effect(move || {
        let state = auth();
        if !state.loading && state.is_signed_in() {
            nav.replace(Route::Home {});
        }
    });

    rsx! {
        LoginFormView { config }
        p {
            class: "auth-switch",
            "No account yet? "
            Link { to: Route::Register {}, "Register" }
        }
    }
}
