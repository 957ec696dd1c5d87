//! Account registration page.

use dioxus::prelude::*;

use crate::Route;

/// Register page component. A new account still logs in through the phone OTP.
#[component]
pub fn Register() -> Element {
    let nav = use_navigator();
    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut phone = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirm_password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            error.set(None);

            if password() != confirm_password() {
                error.set(Some("Passwords do not match".to_string()));
                return;
            }

            loading.set(true);
            match api::register(email(), password(), name(), phone()).await {
                Ok(user) => {
                    tracing::info!(user_id = %user.id, "registered, continuing to login");
                    nav.replace(Route::Login {});
                }
                Err(e) => {
                    loading.set(false);
                    error.set(Some(e.to_string()));
                }
            }
        });
    };

    rsx! {
        div {
            class: "login-page",

            div {
                class: "login-card",
                h2 { "Create Account" }
                p { class: "login-card-description", "Register as a patient" }

                if let Some(err) = error() {
                    div { class: "notice notice--error", "{err}" }
                }

                form {
                    class: "tab-panel",
                    onsubmit: handle_register,

                    div {
                        class: "field",
                        label { r#for: "reg-name", "Name" }
                        input {
                            id: "reg-name",
                            r#type: "text",
                            required: true,
                            value: "{name}",
                            oninput: move |evt: FormEvent| name.set(evt.value()),
                        }
                    }
                    div {
                        class: "field",
                        label { r#for: "reg-email", "Email" }
                        input {
                            id: "reg-email",
                            r#type: "email",
                            required: true,
                            value: "{email}",
                            oninput: move |evt: FormEvent| email.set(evt.value()),
                        }
                    }
                    div {
                        class: "field",
                        label { r#for: "reg-phone", "Phone Number" }
                        input {
                            id: "reg-phone",
                            r#type: "tel",
                            placeholder: "Used for the login OTP",
                            required: true,
                            value: "{phone}",
                            oninput: move |evt: FormEvent| phone.set(evt.value()),
                        }
                    }
                    div {
                        class: "field",
                        label { r#for: "reg-password", "Password" }
                        input {
                            id: "reg-password",
                            r#type: "password",
                            placeholder: "At least 8 characters",
                            required: true,
                            value: "{password}",
                            oninput: move |evt: FormEvent| password.set(evt.value()),
                        }
                    }
                    div {
                        class: "field",
                        label { r#for: "reg-confirm", "Confirm Password" }
                        input {
                            id: "reg-confirm",
                            r#type: "password",
                            required: true,
                            value: "{confirm_password}",
                            oninput: move |evt: FormEvent| confirm_password.set(evt.value()),
                        }
                    }

                    button {
                        r#type: "submit",
                        class: "btn btn--primary btn--block",
                        disabled: loading(),
                        if loading() { "Creating account..." } else { "Sign up" }
                    }
                }

                p {
                    class: "auth-switch",
                    "Already have an account? "
                    Link { to: Route::Login {}, "Log in" }
                }
            }
        }
    }
}
