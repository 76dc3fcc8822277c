use dioxus::prelude::*;

use crate::app::use_frame_spell;
use crate::navigation::AppPage;

/// Landing spot for provider redirects. The provider has already consumed
/// the callback parameters during startup; once that finishes, go home.
#[component]
pub fn OAuthCallbackView() -> Element {
    let app = use_frame_spell();

    use_effect(move || {
        if (app.ready)() {
            app.navigate(AppPage::Home);
        }
    });

    rsx! {
        main {
            class: "oauth-callback",
            p { "Completing sign-in..." }
        }
    }
}
