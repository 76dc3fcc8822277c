use dioxus::prelude::*;
use store::Language;

use crate::app::{use_frame_spell, FrameSpell};
use crate::browser::WindowConfirm;
use crate::clipboard::{copy_text, CopyOutcome};
use crate::keys::{regenerate_account_key, run_key_action, KeyAction, KeyOutcome, KeySlot};
use crate::loading::BusyGuard;
use crate::toast::ToastLevel;
use crate::Icon;
use crate::icons::{FaCopy, FaRotate, FaTrash};

const ACCOUNT_KEY_INPUT: &str = "account-api-key";

fn language_key_input(language: Language) -> String {
    format!("language-key-{}", language.code())
}

fn copy_key(app: FrameSpell, key: String, input_id: String) {
    spawn(async move {
        let outcome = copy_text(&key, &input_id).await;
        let level = match outcome {
            CopyOutcome::Copied => ToastLevel::Success,
            CopyOutcome::ManualSelect => ToastLevel::Info,
            CopyOutcome::Failed => ToastLevel::Warning,
        };
        app.notify(level, outcome.message());
    });
}

#[component]
pub fn ApiKeysPage(selected: Language, account_key: Option<String>) -> Element {
    let app = use_frame_spell();
    let busy = use_signal(|| 0u32);
    let slot = app
        .key_slots
        .read()
        .get(&selected)
        .cloned()
        .unwrap_or_default();

    let regenerate_account = move |_| {
        spawn(async move {
            let _busy = BusyGuard::start(busy);
            match regenerate_account_key(&app.client(), &app.session, &WindowConfirm).await {
                Ok(Some(_)) => app.notify(ToastLevel::Success, "API key regenerated"),
                Ok(None) => {}
                Err(e) => app.report_error("Regenerating your API key", &e),
            }
        });
    };

    rsx! {
        div {
            class: "key-section",
            h3 { "Account key" }
            p { class: "section-lead", "Works for every language." }
            div {
                class: "key-row",
                input {
                    id: ACCOUNT_KEY_INPUT,
                    class: "key-value",
                    readonly: true,
                    value: account_key.clone().unwrap_or_default(),
                    placeholder: "No key yet",
                }
                button {
                    class: "btn btn-ghost",
                    title: "Copy",
                    disabled: account_key.is_none(),
                    onclick: {
                        let key = account_key.clone().unwrap_or_default();
                        move |_| copy_key(app, key.clone(), ACCOUNT_KEY_INPUT.to_string())
                    },
                    Icon { width: 14, height: 14, icon: FaCopy }
                }
                button {
                    class: "btn btn-ghost",
                    title: "Regenerate",
                    disabled: busy() > 0,
                    onclick: regenerate_account,
                    Icon { width: 14, height: 14, icon: FaRotate }
                    if account_key.is_some() { " Regenerate" } else { " Generate" }
                }
            }
        }

        div {
            class: "key-section",
            h3 { "Language keys" }
            div {
                class: "language-cards",
                for language in Language::ALL {
                    button {
                        key: "{language.code()}",
                        class: if language == selected { "language-card active" } else { "language-card" },
                        onclick: move |_| app.select_language(language),
                        span { class: "language-code", "{language.code().to_uppercase()}" }
                        span { "{language.display_name()}" }
                    }
                }
            }
            LanguageKeySlot { language: selected, slot }
        }
    }
}

#[component]
fn LanguageKeySlot(language: Language, slot: KeySlot) -> Element {
    let app = use_frame_spell();
    let busy = use_signal(|| 0u32);

    let run = move |action: KeyAction| {
        move |_: Event<MouseData>| {
            spawn(async move {
                let _busy = BusyGuard::start(busy);
                match run_key_action(&app.client(), &app.session, &WindowConfirm, action, language).await {
                    Ok(KeyOutcome::Updated(slot)) => {
                        app.set_key_slot(language, slot);
                        app.notify(ToastLevel::Success, action.success_message());
                    }
                    Ok(KeyOutcome::Cancelled | KeyOutcome::SignedOut) => {}
                    Err(e) => {
                        let what = match action {
                            KeyAction::Create => "Creating the key",
                            KeyAction::Regenerate => "Regenerating the key",
                            KeyAction::Delete => "Deleting the key",
                        };
                        app.report_error(what, &e);
                    }
                }
            });
        }
    };

    match slot {
        KeySlot::Loading => rsx! {
            p { class: "key-slot loading", "Loading keys..." }
        },
        KeySlot::Missing => rsx! {
            div {
                class: "key-slot empty",
                p { "No {language.display_name()} key yet." }
                button {
                    class: "btn btn-primary",
                    disabled: busy() > 0,
                    onclick: run(KeyAction::Create),
                    "Create key"
                }
            }
        },
        KeySlot::Present { key, usage } => {
            let input_id = language_key_input(language);
            rsx! {
                div {
                    class: "key-slot",
                    div {
                        class: "key-row",
                        input {
                            id: "{input_id}",
                            class: "key-value",
                            readonly: true,
                            value: "{key}",
                        }
                        button {
                            class: "btn btn-ghost",
                            title: "Copy",
                            onclick: {
                                let key = key.clone();
                                let input_id = input_id.clone();
                                move |_| copy_key(app, key.clone(), input_id.clone())
                            },
                            Icon { width: 14, height: 14, icon: FaCopy }
                        }
                        button {
                            class: "btn btn-ghost",
                            title: "Regenerate",
                            disabled: busy() > 0,
                            onclick: run(KeyAction::Regenerate),
                            Icon { width: 14, height: 14, icon: FaRotate }
                        }
                        button {
                            class: "btn btn-ghost danger",
                            title: "Delete",
                            disabled: busy() > 0,
                            onclick: run(KeyAction::Delete),
                            Icon { width: 14, height: 14, icon: FaTrash }
                        }
                    }
                    if let Some(usage) = usage {
                        dl {
                            class: "key-usage",
                            dt { "Today" }
                            dd { "{usage.today}" }
                            dt { "Remaining" }
                            dd {
                                {usage.remaining.map(|n| n.to_string()).unwrap_or_else(|| "Unlimited".to_string())}
                            }
                            dt { "Cost" }
                            dd { "{store::format_euro(usage.cost)}" }
                        }
                    }
                }
            }
        }
    }
}
