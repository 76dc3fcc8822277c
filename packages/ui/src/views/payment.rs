use dioxus::prelude::*;

use crate::app::{use_frame_spell, Modal};
use crate::browser;
use crate::loading::BusyGuard;
use crate::navigation::AppPage;
use crate::payment::{
    check_eligibility, price_summary, start_checkout, BillingCycle, CheckoutError, Eligibility,
};
use crate::toast::ToastLevel;

/// Checkout page for the professional plan.
#[component]
pub fn PaymentView() -> Element {
    let app = use_frame_spell();
    let mut cycle = use_signal(BillingCycle::default);
    let mut error = use_signal(|| Option::<String>::None);
    let busy = use_signal(|| 0u32);
    let signed_in = use_memo(move || app.session.read().is_authenticated());

    // `None` while startup is running; `Some(Err)` when the account could
    // not be loaded, offering a retry.
    let mut eligibility = use_resource(move || async move {
        if !(app.ready)() {
            return None;
        }
        let _ = signed_in();
        match check_eligibility(&app.client(), &app.session).await {
            Ok(eligibility) => {
                if let Eligibility::AlreadySubscribed(plan) = &eligibility {
                    app.notify(ToastLevel::Info, format!("You are already on the {plan} plan"));
                }
                Some(Ok(eligibility))
            }
            Err(e) => {
                app.report_error("Loading your account", &e);
                Some(Err(e.to_string()))
            }
        }
    });

    let handle_checkout = move |_| {
        spawn(async move {
            error.set(None);
            let _busy = BusyGuard::start(busy);
            match start_checkout(&app.client(), &app.session, cycle()).await {
                Ok(url) => {
                    app.notify(ToastLevel::Info, "Redirecting to secure checkout...");
                    browser::redirect(&url);
                }
                Err(CheckoutError::Api(e)) => app.report_error("Starting checkout", &e),
                Err(e) => {
                    app.notify(ToastLevel::Error, e.to_string());
                    error.set(Some(e.to_string()));
                }
            }
        });
    };

    let summary = price_summary(cycle());
    let state = eligibility.read().clone().flatten();

    rsx! {
        main {
            class: "payment",
            h1 { "Upgrade to Professional" }
            button {
                class: "link",
                onclick: move |_| app.navigate(AppPage::Home),
                "← Back to FrameSpell"
            }

            {match state {
                None => rsx! {
                    p { class: "payment-status", "Checking your account..." }
                },
                Some(Err(message)) => rsx! {
                    div {
                        class: "payment-status",
                        p { class: "form-error", "Your account could not be loaded: {message}" }
                        button {
                            class: "btn btn-primary",
                            onclick: move |_| eligibility.restart(),
                            "Try again"
                        }
                    }
                },
                Some(Ok(Eligibility::NeedsLogin)) => rsx! {
                    div {
                        class: "payment-status",
                        p { "Log in to subscribe." }
                        button {
                            class: "btn btn-primary",
                            onclick: move |_| app.show_modal(Modal::Login),
                            "Log in"
                        }
                    }
                },
                Some(Ok(Eligibility::AlreadySubscribed(plan))) => rsx! {
                    div {
                        class: "payment-status",
                        p { "Your account is already on the {plan} plan." }
                        button {
                            class: "btn btn-ghost",
                            onclick: move |_| app.navigate(AppPage::Home),
                            "Back to the dashboard"
                        }
                    }
                },
                Some(Ok(Eligibility::Eligible(user))) => rsx! {
                    p { class: "payment-account", "Subscribing as {user.email}" }
                    div {
                        class: "cycle-toggle",
                        for choice in [BillingCycle::Monthly, BillingCycle::Yearly] {
                            button {
                                key: "{choice.price_id()}",
                                class: if choice == cycle() { "tab active" } else { "tab" },
                                onclick: move |_| cycle.set(choice),
                                "{choice.label()}"
                            }
                        }
                    }
                    dl {
                        class: "price-summary",
                        dt { "Plan" }
                        dd { "{summary.plan}" }
                        dt { "Billing" }
                        dd { "{summary.cycle}" }
                        dt { "Price" }
                        dd { "{summary.price} / {cycle().period()}" }
                        dt { "Included VAT (19 %)" }
                        dd { "{summary.vat}" }
                        dt { class: "total", "Total" }
                        dd { class: "total", "{summary.total}" }
                    }
                    if let Some(err) = error() {
                        p { class: "form-error", "{err}" }
                    }
                    button {
                        class: "btn btn-primary btn-lg",
                        disabled: busy() > 0,
                        onclick: handle_checkout,
                        if busy() > 0 { "Opening checkout..." } else { "Continue to payment" }
                    }
                },
            }}
        }
    }
}
