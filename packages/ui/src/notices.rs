use dioxus::prelude::*;
use flow::{Notice, NoticeLevel};

/// Dismissible notices queued by the login flow, newest last.
#[component]
pub fn NoticeList(notices: Vec<Notice>, on_dismiss: EventHandler<u64>) -> Element {
    if notices.is_empty() {
        return rsx! {};
    }

    rsx! {
        div {
            class: "notice-list",
            for notice in notices {
                div {
                    key: "{notice.id}",
                    class: match notice.level {
                        NoticeLevel::Error => "notice notice--error",
                        NoticeLevel::Warning => "notice notice--warning",
                        NoticeLevel::Success => "notice notice--success",
                        NoticeLevel::Info => "notice notice--info",
                    },
                    span { "{notice.message}" }
                    button {
                        r#type: "button",
                        class: "notice-dismiss",
                        title: "Dismiss",
                        onclick: move |_| on_dismiss.call(notice.id),
                        "×"
                    }
                }
            }
        }
    }
}
