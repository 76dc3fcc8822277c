use dioxus::prelude::*;
use store::Language;

use crate::app::{use_frame_spell, Modal};
use crate::demo::{run_demo_check, CheckResult, DemoError};
use crate::loading::BusyGuard;
use crate::toast::ToastLevel;

#[component]
pub fn DemoWidget() -> Element {
    let app = use_frame_spell();
    let mut text = use_signal(|| "Ich habe heute keine Zeit fur das Treffen.".to_string());
    let language = use_signal(Language::default);
    let mut result = use_signal(|| Option::<CheckResult>::None);
    let mut error = use_signal(|| Option::<String>::None);
    let busy = use_signal(|| 0u32);
    let gate = (app.demo)();

    let handle_check = move |_| {
        spawn(async move {
            error.set(None);
            let gate = *app.demo.peek();
            let _busy = BusyGuard::start(busy);
            match run_demo_check(&app.client(), gate, &text(), language()).await {
                Ok(checked) => {
                    let mut demo = app.demo;
                    demo.write().record_completed();
                    result.set(Some(checked));
                }
                Err(DemoError::Exhausted) => {
                    app.notify(ToastLevel::Info, DemoError::Exhausted.to_string());
                    app.show_modal(Modal::Register);
                }
                Err(DemoError::Invalid(e)) => error.set(Some(e.to_string())),
                Err(DemoError::Api(e)) => app.report_error("Demo check", &e),
            }
        });
    };

    rsx! {
        div {
            class: "demo-widget",
            textarea {
                class: "demo-input",
                rows: "4",
                value: "{text}",
                oninput: move |evt| text.set(evt.value()),
            }
            div {
                class: "demo-controls",
                LanguageSelect { language }
                span {
                    class: "demo-remaining",
                    "{gate.remaining()} free checks left"
                }
                button {
                    class: "btn btn-primary",
                    disabled: busy() > 0 || gate.is_exhausted(),
                    onclick: handle_check,
                    if busy() > 0 { "Checking..." } else { "{gate.button_label()}" }
                }
            }
            if let Some(err) = error() {
                p { class: "form-error", "{err}" }
            }
            if let Some(checked) = result() {
                CheckResultView { result: checked }
            }
        }
    }
}

#[component]
pub fn LanguageSelect(language: Signal<Language>) -> Element {
    rsx! {
        select {
            class: "language-select",
            value: "{language().code()}",
            onchange: move |evt| {
                let mut language = language;
                if let Some(lang) = Language::from_code(&evt.value()) {
                    language.set(lang);
                }
            },
            for lang in Language::ALL {
                option {
                    key: "{lang.code()}",
                    value: "{lang.code()}",
                    selected: lang == language(),
                    "{lang.display_name()}"
                }
            }
        }
    }
}

/// Corrected text, timing and the list of corrections.
#[component]
pub fn CheckResultView(result: CheckResult) -> Element {
    let lines = result.correction_lines();

    rsx! {
        div {
            class: "check-result",
            p { class: "check-corrected", "{result.corrected}" }
            p {
                class: "check-meta",
                "Processed in {result.elapsed_ms} ms"
                if let Some(tokens) = result.tokens_used {
                    " · {tokens} tokens"
                }
            }
            if lines.is_empty() {
                p { class: "check-none", "No corrections needed" }
            } else {
                ul {
                    class: "check-corrections",
                    for line in lines {
                        li { "{line}" }
                    }
                }
            }
        }
    }
}
