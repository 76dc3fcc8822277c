use dioxus::prelude::*;

use store::ClientConfig;
use ui::views::{Landing, OAuthCallbackView, PaymentView};
use ui::{AppPage, FrameSpellProvider, Navbar};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(AppShell)]
        #[route("/")]
        Home {},
        #[route("/oauth-callback")]
        OAuthCallback {},
        #[route("/payment")]
        Payment {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(App);
}

/// Embedded `framespell.toml`, optionally pointed at another backend at build
/// time through `FRAMESPELL_API_URL`.
fn load_config() -> ClientConfig {
    let config = match ClientConfig::from_toml(include_str!("../assets/framespell.toml")) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid {}: {e}, using defaults", ClientConfig::filename());
            ClientConfig::default()
        }
    };
    match option_env!("FRAMESPELL_API_URL") {
        Some(url) => match store::config::normalize_base_url(url) {
            Ok(url) => config.with_base_url(url),
            Err(e) => {
                tracing::error!("Ignoring FRAMESPELL_API_URL: {e}");
                config
            }
        },
        None => config,
    }
}

#[component]
fn App() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        Router::<Route> {}
    }
}

/// Hosts the shared FrameSpell state above every route so the session,
/// dashboard and toasts survive navigation.
#[component]
fn AppShell() -> Element {
    let nav = use_navigator();
    let config = use_hook(load_config);
    let page = match use_route::<Route>() {
        Route::Home {} => AppPage::Home,
        Route::OAuthCallback {} => AppPage::OAuthCallback,
        Route::Payment {} => AppPage::Payment,
    };

    let on_navigate = move |page: AppPage| {
        let route = match page {
            AppPage::Home => Route::Home {},
            AppPage::OAuthCallback => Route::OAuthCallback {},
            AppPage::Payment => Route::Payment {},
        };
        nav.push(route);
    };

    rsx! {
        FrameSpellProvider {
            config,
            page,
            on_navigate,
            Outlet::<Route> {}
        }
    }
}

#[component]
fn Home() -> Element {
    rsx! {
        Navbar {}
        Landing {}
    }
}

#[component]
fn OAuthCallback() -> Element {
    rsx! {
        OAuthCallbackView {}
    }
}

#[component]
fn Payment() -> Element {
    rsx! {
        Navbar {}
        PaymentView {}
    }
}
