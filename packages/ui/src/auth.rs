//! Login and registration modals with OAuth provider buttons.

use api::{ErrorKind, OAuthProvider};
use dioxus::prelude::*;

use crate::app::{use_frame_spell, FrameSpell, Modal};
use crate::browser;
use crate::loading::BusyGuard;
use crate::session;
use crate::toast::ToastLevel;
use crate::validation::{login_credentials, registration_credentials};
use crate::views::ModalOverlay;
use crate::Icon;
use crate::icons::{FaCircleNodes, FaGithub, FaGoogle};

/// Renders whichever auth modal is open, if any.
#[component]
pub fn AuthModal() -> Element {
    let app = use_frame_spell();

    match (app.modal)() {
        Modal::Login => rsx! {
            ModalOverlay { on_close: move |_| app.close_modal(),
                LoginForm {}
            }
        },
        Modal::Register => rsx! {
            ModalOverlay { on_close: move |_| app.close_modal(),
                RegisterForm {}
            }
        },
        Modal::Plan => rsx! {
            ModalOverlay { on_close: move |_| app.close_modal(), width: "max-w-3xl",
                crate::views::PlanPanel { in_modal: true }
            }
        },
        Modal::None => rsx! {},
    }
}

/// After a successful login or registration.
fn signed_in(app: FrameSpell, greeting: String) {
    app.close_modal();
    app.notify(ToastLevel::Success, greeting);
    // Signing in from the payment page continues the checkout there.
    if app.page.peek().hosts_dashboard() {
        app.open_dashboard(None);
    }
}

#[component]
fn LoginForm() -> Element {
    let app = use_frame_spell();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let busy = use_signal(|| 0u32);

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            error.set(None);
            let credentials = match login_credentials(&email(), &password()) {
                Ok(c) => c,
                Err(e) => {
                    error.set(Some(e.to_string()));
                    return;
                }
            };
            let _busy = BusyGuard::start(busy);
            match session::login(&app.client(), &app.session, &credentials).await {
                Ok(user) => signed_in(app, format!("Welcome back, {}", user.email)),
                Err(e) => {
                    if e.kind() == ErrorKind::Business {
                        error.set(Some(e.to_string()));
                    }
                    app.report_auth_error("Login", &e);
                }
            }
        });
    };

    rsx! {
        div {
            class: "auth-form p-6",
            h2 { class: "text-xl font-bold mb-1", "Log in" }
            p { class: "text-sm text-neutral-500 mb-4", "Welcome back to FrameSpell." }

            form {
                class: "flex flex-col gap-3",
                onsubmit: handle_login,
                input {
                    r#type: "email",
                    placeholder: "Email",
                    value: "{email}",
                    autocomplete: "email",
                    oninput: move |evt| email.set(evt.value()),
                }
                input {
                    r#type: "password",
                    placeholder: "Password",
                    value: "{password}",
                    autocomplete: "current-password",
                    oninput: move |evt| password.set(evt.value()),
                }
                if let Some(err) = error() {
                    p { class: "form-error", "{err}" }
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: busy() > 0,
                    if busy() > 0 { "Logging in..." } else { "Log in" }
                }
            }

            OAuthButtons {}

            p {
                class: "text-sm mt-4 text-center",
                "No account yet? "
                a {
                    class: "link",
                    href: "#",
                    onclick: move |evt| {
                        evt.prevent_default();
                        app.show_modal(Modal::Register);
                    },
                    "Sign up"
                }
            }
        }
    }
}

#[component]
fn RegisterForm() -> Element {
    let app = use_frame_spell();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirmation = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let busy = use_signal(|| 0u32);

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            error.set(None);
            let credentials =
                match registration_credentials(&email(), &password(), &confirmation()) {
                    Ok(c) => c,
                    Err(e) => {
                        error.set(Some(e.to_string()));
                        return;
                    }
                };
            let _busy = BusyGuard::start(busy);
            match session::register(&app.client(), &app.session, &credentials).await {
                Ok(user) => signed_in(app, format!("Welcome to FrameSpell, {}", user.email)),
                Err(e) => {
                    if e.kind() == ErrorKind::Business {
                        error.set(Some(e.to_string()));
                    }
                    app.report_auth_error("Registration", &e);
                }
            }
        });
    };

    rsx! {
        div {
            class: "auth-form p-6",
            h2 { class: "text-xl font-bold mb-1", "Create your account" }
            p { class: "text-sm text-neutral-500 mb-4", "Start with the free plan, upgrade any time." }

            form {
                class: "flex flex-col gap-3",
                onsubmit: handle_register,
                input {
                    r#type: "email",
                    placeholder: "Email",
                    value: "{email}",
                    autocomplete: "email",
                    oninput: move |evt| email.set(evt.value()),
                }
                input {
                    r#type: "password",
                    placeholder: "Password (at least 6 characters)",
                    value: "{password}",
                    autocomplete: "new-password",
                    oninput: move |evt| password.set(evt.value()),
                }
                input {
                    r#type: "password",
                    placeholder: "Confirm password",
                    value: "{confirmation}",
                    autocomplete: "new-password",
                    oninput: move |evt| confirmation.set(evt.value()),
                }
                if let Some(err) = error() {
                    p { class: "form-error", "{err}" }
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: busy() > 0,
                    if busy() > 0 { "Creating account..." } else { "Sign up" }
                }
            }

            OAuthButtons {}

            p {
                class: "text-sm mt-4 text-center",
                "Already registered? "
                a {
                    class: "link",
                    href: "#",
                    onclick: move |evt| {
                        evt.prevent_default();
                        app.show_modal(Modal::Login);
                    },
                    "Log in"
                }
            }
        }
    }
}

fn start_oauth(app: FrameSpell, provider: OAuthProvider) {
    if !provider.is_available() {
        app.notify(
            ToastLevel::Info,
            format!("{} sign-in is available soon", provider.display_name()),
        );
        return;
    }
    let redirect_uri = format!(
        "{}{}",
        browser::origin(),
        app.config().api.oauth_callback_path
    );
    let url = app.client().authorize_url(provider, &redirect_uri);
    tracing::info!("starting {} sign-in", provider.slug());
    browser::redirect(&url);
}

#[component]
fn OAuthButtons() -> Element {
    let app = use_frame_spell();

    rsx! {
        div {
            class: "oauth-divider",
            span { "or continue with" }
        }
        div {
            class: "flex flex-col gap-2",
            for provider in OAuthProvider::ALL {
                button {
                    key: "{provider.slug()}",
                    class: "btn oauth-btn {provider.slug()}-btn",
                    r#type: "button",
                    onclick: move |_| start_oauth(app, provider),
                    {match provider {
                        OAuthProvider::GitHub => rsx! { Icon { width: 16, height: 16, icon: FaGithub } },
                        OAuthProvider::Google => rsx! { Icon { width: 16, height: 16, icon: FaGoogle } },
                        OAuthProvider::FrameSphere => rsx! { Icon { width: 16, height: 16, icon: FaCircleNodes } },
                    }}
                    span { "{provider.display_name()}" }
                }
            }
        }
    }
}
