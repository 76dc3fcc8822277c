use dioxus::prelude::*;

use crate::app::{use_frame_spell, Modal};
use crate::dashboard::DashboardPage;
use crate::navigation::AppPage;
use crate::view_model::{NavView, Region};
use crate::Icon;
use crate::icons::{FaCaretDown, FaSpellCheck};

#[component]
pub fn Navbar() -> Element {
    let app = use_frame_spell();
    let nav_view = app.view.read().nav.clone();

    let scroll = move |region: Region| {
        move |evt: Event<MouseData>| {
            evt.prevent_default();
            app.close_dashboard();
            app.navigate(AppPage::Home);
            app.scroll_to(region);
        }
    };

    rsx! {
        nav {
            class: "navbar",
            a {
                class: "navbar-brand",
                href: "/",
                onclick: scroll(Region::Hero),
                Icon { width: 18, height: 18, icon: FaSpellCheck }
                span { "FrameSpell" }
            }
            div {
                class: "navbar-links",
                a { href: "#demo", onclick: scroll(Region::Demo), "Demo" }
                a { href: "#pricing", onclick: scroll(Region::Pricing), "Pricing" }
            }
            div {
                class: "navbar-auth",
                if !(app.ready)() {
                    span { class: "navbar-pending" }
                } else {
                    {match nav_view {
                        NavView::Anonymous => rsx! {
                            button {
                                class: "btn btn-ghost",
                                onclick: move |_| app.show_modal(Modal::Login),
                                "Log in"
                            }
                            button {
                                class: "btn btn-primary",
                                onclick: move |_| app.show_modal(Modal::Register),
                                "Sign up"
                            }
                        },
                        NavView::SignedIn { email } => rsx! {
                            UserMenu { email }
                        },
                    }}
                }
            }
        }
    }
}

#[component]
fn UserMenu(email: String) -> Element {
    let app = use_frame_spell();
    let mut open = use_signal(|| false);

    let go = move |page: DashboardPage| {
        move |_: Event<MouseData>| {
            open.set(false);
            app.open_dashboard(Some(page));
        }
    };

    rsx! {
        div {
            class: "user-menu",
            button {
                class: "user-menu-toggle",
                onclick: move |_| open.toggle(),
                span { "{email}" }
                Icon { width: 12, height: 12, icon: FaCaretDown }
            }
            if open() {
                div {
                    class: "user-menu-dropdown",
                    for page in DashboardPage::ALL {
                        button {
                            key: "{page.slug()}",
                            onclick: go(page),
                            "{page.title()}"
                        }
                    }
                    hr {}
                    button {
                        class: "danger",
                        onclick: move |_| {
                            open.set(false);
                            app.logout();
                        },
                        "Log out"
                    }
                }
            }
        }
    }
}
