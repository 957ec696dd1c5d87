//! The ValueKare login card: email/phone/password with phone OTP, family-head
//! Aadhaar verification, and demo quick-login.
//!
//! All state transitions go through [`LoginFormController`]; this module only
//! renders the current [`LoginForm`] and forwards events.

use dioxus::prelude::*;
use flow::{AadhaarStep, FlowConfig, LoginForm, LoginFormController, LoginTab, OtpState, Role};

use crate::auth::{use_auth, SessionAuth};
use crate::form_store::SignalForm;
use crate::icons::{FaHeartPulse, FaShieldHalved, FaStethoscope, FaUser};
use crate::notices::NoticeList;
use crate::otp_client::ApiOtp;
use crate::Icon;

type Controller = LoginFormController<SignalForm, SessionAuth, ApiOtp>;

/// Login card with three tabs.
#[component]
pub fn LoginFormView(#[props(default)] config: FlowConfig) -> Element {
    let auth = use_auth();
    let form = use_signal(LoginForm::new);

    let controller = LoginFormController::new(SignalForm(form), SessionAuth::new(auth), ApiOtp)
        .with_config(config);
    let state = form();

    let on_dismiss = {
        let c = controller.clone();
        move |id: u64| c.dismiss_notice(id)
    };

    rsx! {
        div {
            class: "login-page",

            div {
                class: "login-brand",
                div {
                    class: "login-brand-title",
                    span { class: "login-brand-icon", Icon { icon: FaHeartPulse, width: 40, height: 40 } }
                    h1 { "ValueKare EMR" }
                }
                p { "Electronic Medical Records & Patient Navigation" }
            }

            div {
                class: "login-card",
                h2 { "Login to Your Account" }
                p { class: "login-card-description", "Choose your preferred login method" }

                NoticeList { notices: state.notices().to_vec(), on_dismiss }

                {tab_list(&state, &controller)}

                {match state.tab {
                    LoginTab::Login => login_panel(&state, &controller),
                    LoginTab::FamilyHead => family_head_panel(&state, &controller),
                    LoginTab::Demo => demo_panel(&controller),
                }}
            }
        }
    }
}

fn tab_list(state: &LoginForm, controller: &Controller) -> Element {
    rsx! {
        div {
            class: "tabs-list",
            for tab in LoginTab::ALL {
                button {
                    key: "{tab.label()}",
                    r#type: "button",
                    class: if state.tab == tab { "tab-trigger tab-trigger--active" } else { "tab-trigger" },
                    onclick: {
                        let c = controller.clone();
                        move |_| c.select_tab(tab)
                    },
                    "{tab.label()}"
                }
            }
        }
    }
}

fn login_panel(state: &LoginForm, controller: &Controller) -> Element {
    let otp = &state.phone_otp;
    let min_phone = controller.config().phone.min_length;
    let code_hint = controller.config().otp.code_length_hint;

    let on_email = {
        let c = controller.clone();
        move |evt: FormEvent| c.set_email(evt.value())
    };
    let on_phone = {
        let c = controller.clone();
        move |evt: FormEvent| c.set_phone(evt.value())
    };
    let on_password = {
        let c = controller.clone();
        move |evt: FormEvent| c.set_password(evt.value())
    };
    let on_code = {
        let c = controller.clone();
        move |evt: FormEvent| c.set_otp_code(evt.value())
    };
    let on_send = {
        let c = controller.clone();
        move |_| {
            let c = c.clone();
            async move { c.send_otp().await }
        }
    };
    let on_verify = {
        let c = controller.clone();
        move |_| {
            let c = c.clone();
            async move { c.verify_otp().await }
        }
    };
    let on_submit = {
        let c = controller.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let c = c.clone();
            spawn(async move { c.submit().await });
        }
    };

    let send_label = match otp.state() {
        OtpState::Sending => "Sending OTP...",
        OtpState::Idle => "Send OTP",
        _ => "Resend",
    };

    rsx! {
        form {
            class: "tab-panel",
            onsubmit: on_submit,

            div {
                class: "field",
                label { r#for: "email", "Email" }
                input {
                    id: "email",
                    r#type: "email",
                    placeholder: "Enter your email",
                    required: true,
                    value: "{state.email()}",
                    oninput: on_email,
                }
            }

            div {
                class: "field",
                label { r#for: "phone", "Phone Number" }
                div {
                    class: "field-row",
                    input {
                        id: "phone",
                        r#type: "tel",
                        placeholder: "Enter your phone number",
                        required: true,
                        disabled: otp.is_pending(),
                        value: "{otp.phone()}",
                        oninput: on_phone,
                    }
                    if otp.is_verified() {
                        span { class: "badge badge--success", "Verified" }
                    } else {
                        button {
                            r#type: "button",
                            class: "btn btn--outline",
                            disabled: !otp.can_send(min_phone),
                            onclick: on_send,
                            "{send_label}"
                        }
                    }
                }
            }

            if otp.is_sent() && !otp.is_verified() {
                div {
                    class: "field",
                    label { r#for: "otp", "Enter OTP" }
                    div {
                        class: "field-row",
                        input {
                            id: "otp",
                            r#type: "text",
                            placeholder: "{code_hint}-digit OTP",
                            disabled: otp.is_pending(),
                            value: "{otp.code()}",
                            oninput: on_code,
                        }
                        button {
                            r#type: "button",
                            class: "btn btn--outline",
                            disabled: !otp.can_verify(),
                            onclick: on_verify,
                            if otp.state() == OtpState::Verifying { "Verifying..." } else { "Verify" }
                        }
                    }
                }
            }

            div {
                class: "field",
                label { r#for: "password", "Password" }
                input {
                    id: "password",
                    r#type: "password",
                    placeholder: "Enter your password",
                    required: true,
                    value: "{state.password()}",
                    oninput: on_password,
                }
                div {
                    class: "field-footer",
                    a { href: "/forgot-password", "Forgot Password?" }
                }
            }

            button {
                r#type: "submit",
                class: "btn btn--primary btn--block",
                disabled: !state.can_submit(),
                if state.is_submitting() { "Logging in..." } else { "Login" }
            }
        }
    }
}

fn family_head_panel(state: &LoginForm, controller: &Controller) -> Element {
    let fh = &state.family_head;
    let length = controller.config().aadhaar.length;
    let code_hint = controller.config().otp.code_length_hint;

    let on_aadhaar = {
        let c = controller.clone();
        move |evt: FormEvent| c.set_aadhaar(evt.value())
    };
    let on_code = {
        let c = controller.clone();
        move |evt: FormEvent| c.set_aadhaar_code(evt.value())
    };
    let on_send = {
        let c = controller.clone();
        move |_| {
            let c = c.clone();
            async move { c.send_aadhaar_otp().await }
        }
    };
    let on_verify = {
        let c = controller.clone();
        move |_| {
            let c = c.clone();
            async move { c.verify_aadhaar_otp().await }
        }
    };
    let on_change_number = {
        let c = controller.clone();
        move |_| c.restart_aadhaar()
    };

    rsx! {
        div {
            class: "tab-panel",
            p { class: "muted", "Verify your Aadhaar to login as Family Head" }

            {match fh.step() {
                AadhaarStep::EnterId => rsx! {
                    div {
                        class: "field",
                        label { r#for: "aadhaar", "Aadhaar Number" }
                        input {
                            id: "aadhaar",
                            r#type: "text",
                            maxlength: "{length}",
                            placeholder: "{length}-digit Aadhaar",
                            required: true,
                            disabled: fh.is_loading(),
                            value: "{fh.aadhaar()}",
                            oninput: on_aadhaar,
                        }
                    }
                    button {
                        r#type: "button",
                        class: "btn btn--primary btn--block",
                        disabled: !fh.can_send(length),
                        onclick: on_send,
                        if fh.is_loading() { "Sending OTP..." } else { "Send OTP" }
                    }
                },
                AadhaarStep::EnterCode => rsx! {
                    div {
                        class: "field",
                        label { r#for: "aadhaar-otp", "Enter OTP" }
                        input {
                            id: "aadhaar-otp",
                            r#type: "text",
                            placeholder: "{code_hint}-digit OTP",
                            required: true,
                            disabled: fh.is_loading() || fh.is_verified(),
                            value: "{fh.code()}",
                            oninput: on_code,
                        }
                    }
                    button {
                        r#type: "button",
                        class: "btn btn--primary btn--block",
                        disabled: !fh.can_verify(),
                        onclick: on_verify,
                        if fh.is_loading() { "Verifying..." } else { "Verify & Login" }
                    }
                    button {
                        r#type: "button",
                        class: "btn btn--link",
                        disabled: fh.is_loading(),
                        onclick: on_change_number,
                        "Use a different Aadhaar number"
                    }
                },
            }}
        }
    }
}

fn demo_panel(controller: &Controller) -> Element {
    rsx! {
        div {
            class: "tab-panel",
            p { class: "muted center", "Quick access for demo purposes" }
            for role in Role::DEMO {
                button {
                    key: "{role}",
                    r#type: "button",
                    class: "btn btn--outline btn--block btn--start",
                    onclick: {
                        let c = controller.clone();
                        move |_| c.quick_login(role)
                    },
                    {match role {
                        Role::Doctor => rsx! { Icon { icon: FaStethoscope, width: 16, height: 16 } },
                        Role::Patient => rsx! { Icon { icon: FaUser, width: 16, height: 16 } },
                        Role::Admin => rsx! { Icon { icon: FaShieldHalved, width: 16, height: 16 } },
                    }}
                    span { "Login as {role.label()}" }
                }
            }
        }
    }
}
