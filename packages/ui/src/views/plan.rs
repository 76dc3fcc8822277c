use dioxus::prelude::*;
use store::SubscriptionType;

use crate::app::{use_frame_spell, FrameSpell, Modal};
use crate::navigation::AppPage;
use crate::browser::WindowConfirm;
use crate::loading::BusyGuard;
use crate::plan::{action_for, downgrade_to_free, next_billing_date, PlanAction, PlanChange};
use crate::toast::ToastLevel;

fn contact_sales(app: FrameSpell) {
    let email = app.config().contact.support_email;
    app.notify(
        ToastLevel::Info,
        format!("Write to {email} and we will put together an Enterprise offer."),
    );
}

fn go_to_payment(app: FrameSpell) {
    app.close_modal();
    app.close_dashboard();
    app.navigate(AppPage::Payment);
}

/// One card per tier, with buttons for the signed-in user's plan.
#[component]
pub fn PlanTierCards() -> Element {
    let app = use_frame_spell();
    let tiers = app.view.read().tiers.clone();
    let busy = use_signal(|| 0u32);

    let downgrade = move |_| {
        spawn(async move {
            let _busy = BusyGuard::start(busy);
            match downgrade_to_free(&app.client(), &app.session, &WindowConfirm).await {
                Ok(PlanChange::Changed { message }) => app.notify(
                    ToastLevel::Success,
                    message.unwrap_or_else(|| "You are now on the free plan".to_string()),
                ),
                Ok(PlanChange::Cancelled | PlanChange::SignedOut) => {}
                Err(e) => app.report_error("Changing your plan", &e),
            }
        });
    };

    rsx! {
        div {
            class: "plan-cards",
            for card in tiers {
                {
                    let action = card.action;
                    let tier = card.subscription;
                    rsx! {
                        div {
                            key: "{tier.as_str()}",
                            class: if action == Some(PlanAction::Current) { "plan-card current" } else { "plan-card" },
                            h3 { "{card.name}" }
                            p { class: "plan-price", "{card.price}" }
                            ul {
                                li { "{card.rate_limit}" }
                                if let Some(overage) = &card.overage {
                                    li { "{overage} per extra request" }
                                } else {
                                    li { "No overage charges" }
                                }
                            }
                            {match (action, tier) {
                                (Some(PlanAction::Current), _) => rsx! {
                                    span { class: "plan-current-badge", "Current plan" }
                                },
                                (Some(PlanAction::UpgradeToProfessional), _) => rsx! {
                                    button { class: "btn btn-primary", onclick: move |_| go_to_payment(app), "Upgrade" }
                                },
                                (Some(PlanAction::DowngradeToFree), _) => rsx! {
                                    button {
                                        class: "btn btn-ghost",
                                        disabled: busy() > 0,
                                        onclick: downgrade,
                                        "Switch to Free"
                                    }
                                },
                                (Some(PlanAction::ContactSales), _) | (None, SubscriptionType::Enterprise) => rsx! {
                                    button { class: "btn btn-ghost", onclick: move |_| contact_sales(app), "Contact us" }
                                },
                                (None, _) => rsx! {
                                    button { class: "btn btn-primary", onclick: move |_| app.show_modal(Modal::Register), "Get started" }
                                },
                            }}
                        }
                    }
                }
            }
        }
    }
}

/// Current plan summary. Inside the dashboard it links to the full modal.
#[component]
pub fn PlanPanel(#[props(default)] in_modal: bool) -> Element {
    let app = use_frame_spell();
    let Some(plan) = app.view.read().plan.clone() else {
        return rsx! {};
    };
    let renews = next_billing_date(plan.subscription, chrono::Local::now().date_naive())
        .map(|d| d.format("%Y-%m-%d").to_string());

    rsx! {
        div {
            class: if in_modal { "plan-panel p-6" } else { "plan-panel" },
            h3 { if in_modal { "Change plan" } else { "Your plan" } }
            dl {
                class: "plan-summary",
                dt { "Plan" }
                dd { "{plan.name}" }
                dt { "Rate limit" }
                dd { "{plan.rate_limit}" }
                dt { "Monthly cost" }
                dd { "{plan.monthly_cost}" }
                if let Some(date) = renews {
                    dt { "Next billing date" }
                    dd { "{date}" }
                }
            }
            if in_modal {
                PlanTierCards {}
            } else {
                button {
                    class: "btn btn-ghost",
                    onclick: move |_| app.show_modal(Modal::Plan),
                    "Change plan"
                }
            }
        }
    }
}
