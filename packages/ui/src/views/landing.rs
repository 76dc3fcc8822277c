//! The public landing page: hero, demo and pricing sections.
//!
//! Each section registers itself in the view registry when mounted so the
//! navbar and the profile badge can scroll to it.

use dioxus::prelude::*;

use crate::app::use_frame_spell;
use crate::view_model::{NavView, Region};
use crate::views::{DashboardOverlay, DemoWidget, PlanTierCards};

#[component]
pub fn Landing() -> Element {
    rsx! {
        main {
            class: "landing",
            Hero {}
            DemoSection {}
            Pricing {}
        }
        DashboardOverlay {}
    }
}

/// Register `region` while the calling component is mounted.
fn use_region(region: Region) -> impl FnMut(MountedEvent) + Copy {
    let app = use_frame_spell();
    use_drop(move || app.unregister_region(region));
    move |evt: MountedEvent| app.register_region(region, evt.data())
}

#[component]
fn Hero() -> Element {
    let app = use_frame_spell();
    let on_mounted = use_region(Region::Hero);
    let signed_in = matches!(app.view.read().nav, NavView::SignedIn { .. });

    rsx! {
        section {
            id: "hero",
            class: "hero",
            onmounted: on_mounted,
            h1 { "Spell checking as an API" }
            p {
                class: "hero-lead",
                "FrameSpell corrects German, English, Spanish and French text with one request. "
                "Try it below, then grab an API key."
            }
            div {
                class: "hero-actions",
                button {
                    class: "btn btn-primary btn-lg",
                    onclick: move |_| app.get_started(),
                    if signed_in { "Open dashboard" } else { "Get started" }
                }
                button {
                    class: "btn btn-ghost btn-lg",
                    onclick: move |_| app.scroll_to(Region::Demo),
                    "Try the demo"
                }
            }
        }
    }
}

#[component]
fn DemoSection() -> Element {
    let on_mounted = use_region(Region::Demo);

    rsx! {
        section {
            id: "demo",
            class: "section",
            onmounted: on_mounted,
            h2 { "Try it" }
            p { class: "section-lead", "A few free checks, no account needed." }
            DemoWidget {}
        }
    }
}

#[component]
fn Pricing() -> Element {
    let on_mounted = use_region(Region::Pricing);

    rsx! {
        section {
            id: "pricing",
            class: "section",
            onmounted: on_mounted,
            h2 { "Pricing" }
            p { class: "section-lead", "Start free. Pay only for what goes over your plan." }
            PlanTierCards {}
        }
    }
}
