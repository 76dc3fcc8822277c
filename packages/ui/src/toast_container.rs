use dioxus::prelude::*;

use crate::app::use_frame_spell;

const TOASTS_CSS: Asset = asset!("/assets/styling/toasts.css");

#[component]
pub fn ToastContainer() -> Element {
    let app = use_frame_spell();
    let toasts = app.toasts.read().toasts();

    rsx! {
        document::Stylesheet { href: TOASTS_CSS }

        div {
            class: "toast-stack",
            role: "status",
            for toast in toasts {
                div {
                    key: "{toast.id}",
                    class: toast.level.class(),
                    span { class: "toast-time", "{toast.timestamp}" }
                    span { class: "toast-message", "{toast.message}" }
                    button {
                        class: "toast-close",
                        title: "Dismiss",
                        onclick: {
                            let id = toast.id;
                            move |_| app.dismiss_toast(id)
                        },
                        "×"
                    }
                }
            }
        }
    }
}
