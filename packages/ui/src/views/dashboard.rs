//! The dashboard overlay and its profile, usage and settings panes.

use dioxus::prelude::*;
use store::{Language, UserSettings};

use crate::app::use_frame_spell;
use crate::dashboard::DashboardPage;
use crate::demo::CheckResult;
use crate::loading::BusyGuard;
use crate::tester::{run_usage_test, TesterError};
use crate::view_model::{ProfileView, Region, UsageView};
use crate::views::{ApiKeysPage, CheckResultView, LanguageSelect, PlanPanel};
use crate::Icon;
use crate::icons::FaXmark;

const DASHBOARD_CSS: Asset = asset!("/assets/styling/dashboard.css");

#[component]
pub fn DashboardOverlay() -> Element {
    let app = use_frame_spell();
    let Some(dashboard) = app.view.read().dashboard.clone() else {
        return rsx! {};
    };
    let active = dashboard.state.page;

    rsx! {
        document::Stylesheet { href: DASHBOARD_CSS }

        div {
            class: "dashboard-overlay",
            div {
                class: "dashboard",
                header {
                    class: "dashboard-header",
                    h2 { "Dashboard" }
                    button {
                        class: "dashboard-close",
                        title: "Close",
                        onclick: move |_| app.close_dashboard(),
                        Icon { width: 16, height: 16, icon: FaXmark }
                    }
                }
                nav {
                    class: "dashboard-tabs",
                    for page in DashboardPage::ALL {
                        button {
                            key: "{page.slug()}",
                            class: if page == active { "tab active" } else { "tab" },
                            onclick: move |_| app.switch_page(page),
                            "{page.title()}"
                        }
                    }
                }
                div {
                    class: "dashboard-content",
                    div {
                        class: "dashboard-page",
                        {match active {
                            DashboardPage::Profile => rsx! {
                                ProfilePage { profile: dashboard.profile.clone() }
                            },
                            DashboardPage::ApiKeys => rsx! {
                                ApiKeysPage {
                                    selected: dashboard.state.selected_language,
                                    account_key: dashboard.profile.api_key.clone(),
                                }
                            },
                            DashboardPage::Usage => rsx! {
                                UsagePage { usage: dashboard.usage.clone() }
                            },
                        }}
                    }
                    aside {
                        class: "dashboard-aside",
                        PlanPanel {}
                        SettingsPanel { settings: app.view.read().settings.clone() }
                    }
                }
            }
        }
    }
}

#[component]
fn ProfilePage(profile: ProfileView) -> Element {
    let app = use_frame_spell();

    rsx! {
        dl {
            class: "profile-fields",
            dt { "Email" }
            dd { "{profile.email}" }
            dt { "Plan" }
            dd {
                button {
                    class: profile.plan_badge_class,
                    title: "Compare plans",
                    onclick: move |_| {
                        app.close_dashboard();
                        app.scroll_to(Region::Pricing);
                    },
                    "{profile.plan_name}"
                }
            }
            dt { "Member since" }
            dd { "{profile.joined}" }
            dt { "User ID" }
            dd { code { "{profile.user_id}" } }
            dt { "Total requests" }
            dd { "{profile.total_requests}" }
            dt { "Requests today" }
            dd { "{profile.requests_today}" }
            dt { "Estimated cost today" }
            dd { "{profile.estimated_cost}" }
        }
    }
}

#[component]
fn UsagePage(usage: UsageView) -> Element {
    rsx! {
        div {
            class: "usage-stats",
            div { class: "stat", span { class: "stat-value", "{usage.today}" } span { class: "stat-label", "Requests today" } }
            div { class: "stat", span { class: "stat-value", "{usage.remaining}" } span { class: "stat-label", "Remaining" } }
            div { class: "stat", span { class: "stat-value", "{usage.bar_width}" } span { class: "stat-label", "Of your limit" } }
            div { class: "stat", span { class: "stat-value", "{usage.overage_cost}" } span { class: "stat-label", "Overage cost" } }
        }
        div {
            class: "usage-bar",
            div { class: "usage-bar-fill", style: "width: {usage.bar_width}" }
        }
        p { class: "usage-note", "{usage.note}" }

        h4 { "This month" }
        dl {
            class: "month-summary",
            dt { "Total requests" }
            dd { "{usage.month_total}" }
            dt { "Included" }
            dd { "{usage.month_free}" }
            dt { "Billable" }
            dd { "{usage.month_paid}" }
            dt { "Cost" }
            dd { "{usage.month_cost}" }
        }

        UsageTester {}
    }
}

/// Sends an authenticated check so the counters above move.
#[component]
fn UsageTester() -> Element {
    let app = use_frame_spell();
    let mut text = use_signal(String::new);
    let language = use_signal(Language::default);
    let mut result = use_signal(|| Option::<CheckResult>::None);
    let mut status = use_signal(|| Option::<String>::None);
    let busy = use_signal(|| 0u32);

    let handle_test = move |_| {
        spawn(async move {
            status.set(None);
            let _busy = BusyGuard::start(busy);
            match run_usage_test(&app.client(), &app.session, &text(), language()).await {
                Ok(checked) => {
                    status.set(Some("Request succeeded".to_string()));
                    result.set(Some(checked));
                }
                Err(TesterError::Api(e)) => {
                    status.set(Some("Request failed".to_string()));
                    app.report_error("Test request", &e);
                }
                Err(e) => status.set(Some(e.to_string())),
            }
        });
    };

    rsx! {
        div {
            class: "usage-tester",
            h4 { "Test the API" }
            textarea {
                rows: "3",
                placeholder: "Text to check",
                value: "{text}",
                oninput: move |evt| text.set(evt.value()),
            }
            div {
                class: "demo-controls",
                LanguageSelect { language }
                button {
                    class: "btn btn-primary",
                    disabled: busy() > 0,
                    onclick: handle_test,
                    if busy() > 0 { "Sending..." } else { "Send request" }
                }
            }
            if let Some(message) = status() {
                p { class: "tester-status", "{message}" }
            }
            if let Some(checked) = result() {
                CheckResultView { result: checked }
            }
        }
    }
}

#[component]
fn SettingsPanel(settings: UserSettings) -> Element {
    let app = use_frame_spell();
    let mut draft = use_signal(|| settings.clone());

    // Follow the stored settings when the user changes.
    use_effect(use_reactive((&settings,), move |(settings,)| draft.set(settings)));

    rsx! {
        div {
            class: "settings-panel",
            h3 { "Settings" }
            label {
                input {
                    r#type: "checkbox",
                    checked: draft().allow_paid_requests,
                    onchange: move |evt| draft.write().allow_paid_requests = evt.checked(),
                }
                " Allow paid requests above my limit"
            }
            label {
                input {
                    r#type: "checkbox",
                    checked: draft().email_notifications,
                    onchange: move |evt| draft.write().email_notifications = evt.checked(),
                }
                " Email notifications"
            }
            label {
                input {
                    r#type: "checkbox",
                    checked: draft().auto_upgrade,
                    onchange: move |evt| draft.write().auto_upgrade = evt.checked(),
                }
                " Upgrade automatically when I hit my limit"
            }
            button {
                class: "btn btn-primary",
                disabled: draft() == settings,
                onclick: move |_| app.save_settings(draft()),
                "Save settings"
            }
        }
    }
}
