use dioxus::prelude::*;
use ui::{use_auth, LogoutButton};

use crate::Route;

/// Landing page after login, showing who is signed in and as what.
#[component]
pub fn Home() -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let state = auth();

    if state.loading {
        return rsx! {
            div { class: "home", p { class: "muted", "Loading..." } }
        };
    }

    let Some(role) = state.role() else {
        nav.replace(Route::Login {});
        return rsx! {};
    };

    let who = state
        .user
        .as_ref()
        .map(|u| u.display_name().to_string())
        .unwrap_or_else(|| "Guest".to_string());

    rsx! {
        div {
            class: "home",
            h1 { "Welcome, {who}" }
            p { class: "muted", "Signed in as {role.label()}" }
            if state.user.is_none() {
                p { class: "muted", "No credentialed session: this role was assigned without a password login." }
            }
            LogoutButton {
                class: "btn btn--outline",
                on_logout: move |_| {
                    nav.replace(Route::Login {});
                },
            }
        }
    }
}
