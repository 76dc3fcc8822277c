//! # Application context
//!
//! [`FrameSpellProvider`] owns every piece of client state and exposes it to
//! the component tree as one `Copy` handle, [`FrameSpell`], fetched with
//! [`use_frame_spell`]. Components never keep their own copy of the session;
//! they read it here and change it through the flows in [`crate::session`].
//!
//! Startup order inside the provider:
//!
//! 1. session store, settings, dashboard controller, toasts and the view
//!    registry are created;
//! 2. the OAuth bridge runs ([`crate::oauth::bootstrap`]), which either
//!    installs a callback session or restores the stored one;
//! 3. `ready` flips to true and the health check is scheduled.
//!
//! Background work (the dashboard refresh loop and toast timers) is spawned
//! in the provider's scope so it outlives whichever component triggered it.

use std::collections::BTreeMap;
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use api::{ApiClient, ApiError, Backend, ErrorKind};
use dioxus::html::ScrollBehavior;
use dioxus::prelude::*;
use store::{BrowserStorage, ClientConfig, Language, SessionStore, SettingsStore, UserSettings};

use crate::browser;
use crate::dashboard::{DashboardController, DashboardPage, Effect, RefreshSlot};
use crate::demo::DemoGate;
use crate::keys::{load_language_keys, KeySlot};
use crate::navigation::{dashboard_redirect, plan_navigation, AppPage};
use crate::oauth::{bootstrap, strip_callback_params};
use crate::registry::ViewRegistry;
use crate::session::{logout, refresh_profile, RestoreOutcome};
use crate::timer::sleep;
use crate::toast::{auth_error_toast, error_toast, ToastLevel, ToastStack};
use crate::view_model::{Region, ViewModel};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Delay before the one-off health check.
const HEALTH_CHECK_DELAY: Duration = Duration::from_secs(1);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Modal {
    #[default]
    None,
    Login,
    Register,
    Plan,
}

/// Shared handle to the application state.
#[derive(Clone, Copy)]
pub struct FrameSpell {
    pub session: Signal<SessionStore<BrowserStorage>>,
    pub dashboard: Signal<DashboardController>,
    pub settings: Signal<UserSettings>,
    pub demo: Signal<DemoGate>,
    pub modal: Signal<Modal>,
    pub key_slots: Signal<BTreeMap<Language, KeySlot>>,
    /// False until the startup sequence has finished.
    pub ready: Signal<bool>,
    pub view: Memo<ViewModel>,
    pub toasts: Signal<ToastStack<Task>>,
    pub registry: Signal<ViewRegistry<Rc<MountedData>>>,
    /// The page the router is showing.
    pub page: Signal<AppPage>,
    refresh: Signal<RefreshSlot<Task>>,
    settings_store: CopyValue<SettingsStore<BrowserStorage>>,
    client: CopyValue<ApiClient>,
    config: CopyValue<ClientConfig>,
    navigate: EventHandler<AppPage>,
    scope: ScopeId,
}

pub fn use_frame_spell() -> FrameSpell {
    use_context::<FrameSpell>()
}

impl FrameSpell {
    pub fn client(&self) -> ApiClient {
        self.client.cloned()
    }

    pub fn config(&self) -> ClientConfig {
        self.config.cloned()
    }

    pub fn navigate(&self, target: AppPage) {
        let current = *self.page.peek();
        let plan = plan_navigation(current, target);
        if plan.close_dashboard && self.dashboard.peek().is_open() {
            self.close_dashboard();
        }
        if plan.push {
            let mut page = self.page;
            page.set(target);
            self.navigate.call(target);
        }
    }

    /// Spawn `fut` in the provider's scope.
    fn spawn_owned(&self, fut: impl Future<Output = ()> + 'static) -> Task {
        self.scope.in_runtime(|| spawn(fut))
    }

    // --- notifications ---

    pub fn notify(&self, level: ToastLevel, message: impl Into<String>) {
        let mut toasts = self.toasts;
        let id = toasts.write().push(level, message);
        let duration = Duration::from_millis(self.config.read().notifications.toast_duration_ms as u64);
        let timer = self.spawn_owned(async move {
            sleep(duration).await;
            toasts.write().dismiss(id, true);
        });
        toasts.write().attach_timer(id, timer);
    }

    pub fn dismiss_toast(&self, id: u64) {
        let mut toasts = self.toasts;
        toasts.write().dismiss(id, false);
    }

    /// Show a failed backend call according to its error kind.
    pub fn report_error(&self, action: &str, error: &ApiError) {
        let (level, message) = error_toast(action, error);
        self.notify(level, message);
    }

    /// Show a failed login or registration.
    pub fn report_auth_error(&self, action: &str, error: &ApiError) {
        let (level, message) = auth_error_toast(action, error);
        self.notify(level, message);
    }

    // --- modals ---

    pub fn show_modal(&self, modal: Modal) {
        let mut signal = self.modal;
        signal.set(modal);
    }

    pub fn close_modal(&self) {
        self.show_modal(Modal::None);
    }

    // --- dashboard ---

    pub fn open_dashboard(&self, page: Option<DashboardPage>) {
        if let Some(home) = dashboard_redirect(*self.page.peek()) {
            self.navigate(home);
        }
        let signed_in = self.session.peek().is_authenticated();
        let mut dashboard = self.dashboard;
        let effects = dashboard.write().open(signed_in, page);
        for effect in effects {
            self.apply(effect);
        }
    }

    pub fn switch_page(&self, page: DashboardPage) {
        let mut dashboard = self.dashboard;
        let effect = dashboard.write().switch_page(page);
        if let Some(effect) = effect {
            self.apply(effect);
        }
    }

    pub fn select_language(&self, language: Language) {
        let mut dashboard = self.dashboard;
        dashboard.write().select_language(language);
    }

    pub fn close_dashboard(&self) {
        let mut dashboard = self.dashboard;
        let effect = dashboard.write().close();
        self.apply(effect);
    }

    fn apply(&self, effect: Effect) {
        match effect {
            Effect::LoadPage(page) => self.load_page(page),
            Effect::StartRefresh => self.start_refresh(),
            Effect::StopRefresh => {
                let mut refresh = self.refresh;
                refresh.write().cancel();
            }
            Effect::PromptRegistration => {
                self.show_modal(Modal::Register);
                self.notify(ToastLevel::Info, "Create an account to open your dashboard");
            }
        }
    }

    fn load_page(&self, page: DashboardPage) {
        tracing::debug!("loading dashboard page {}", page);
        let app = *self;
        match page {
            DashboardPage::ApiKeys => {
                self.spawn_owned(async move { app.reload_key_slots().await });
            }
            DashboardPage::Profile | DashboardPage::Usage => {
                self.spawn_owned(async move {
                    if let Err(e) = refresh_profile(&app.client(), &app.session).await {
                        app.report_error("Loading your profile", &e);
                    }
                });
            }
        }
    }

    pub async fn reload_key_slots(&self) {
        let mut slots = self.key_slots;
        slots.set(Language::ALL.iter().map(|l| (*l, KeySlot::Loading)).collect());
        match load_language_keys(&self.client(), &self.session).await {
            Ok(Some(keys)) => {
                slots.set(
                    Language::ALL
                        .iter()
                        .map(|l| (*l, KeySlot::from_keys(&keys, *l)))
                        .collect(),
                );
            }
            Ok(None) => slots.set(BTreeMap::new()),
            Err(e) => {
                slots.set(Language::ALL.iter().map(|l| (*l, KeySlot::Missing)).collect());
                self.report_error("Loading API keys", &e);
            }
        }
    }

    pub fn set_key_slot(&self, language: Language, slot: KeySlot) {
        let mut slots = self.key_slots;
        slots.write().insert(language, slot);
    }

    fn start_refresh(&self) {
        let secs = self.config.read().dashboard.refresh_interval_secs;
        let app = *self;
        let mut refresh = self.refresh;
        refresh.write().start(secs, |interval| {
            app.spawn_owned(async move {
                loop {
                    sleep(interval).await;
                    match refresh_profile(&app.client(), &app.session).await {
                        Ok(_) => {}
                        Err(e) if e.kind() == ErrorKind::AuthRejected => {
                            app.report_error("Refreshing your dashboard", &e);
                            break;
                        }
                        Err(e) => tracing::warn!("dashboard refresh failed: {}", e),
                    }
                }
            })
        });
    }

    // --- session ---

    pub fn logout(&self) {
        self.close_dashboard();
        logout(&self.session);
        self.close_modal();
        self.notify(ToastLevel::Info, "You have been logged out");
    }

    // --- landing page ---

    pub fn register_region(&self, region: Region, handle: Rc<MountedData>) {
        let mut registry = self.registry;
        registry.write().register(region, handle);
    }

    pub fn unregister_region(&self, region: Region) {
        let mut registry = self.registry;
        if let Ok(mut registry) = registry.try_write() {
            registry.unregister(region);
        };
    }

    /// Scroll a landing section into view; absent sections are skipped.
    pub fn scroll_to(&self, region: Region) {
        let handle = self.registry.peek().with(region, Rc::clone);
        if let Some(handle) = handle {
            self.spawn_owned(async move {
                if let Err(e) = handle.scroll_to(ScrollBehavior::Smooth).await {
                    tracing::warn!("scrolling to {:?} failed: {:?}", region, e);
                }
            });
        }
    }

    /// "Get started": the dashboard for members, sign-up for everyone else.
    pub fn get_started(&self) {
        if self.session.peek().is_authenticated() {
            self.open_dashboard(None);
        } else {
            self.show_modal(Modal::Register);
        }
    }

    // --- settings ---

    pub fn save_settings(&self, settings: UserSettings) {
        let user_id = self.session.peek().user().map(|u| u.id.clone());
        match self.settings_store.read().save(user_id.as_deref(), &settings) {
            Ok(()) => {
                let mut signal = self.settings;
                signal.set(settings);
                self.notify(ToastLevel::Success, "Settings saved");
            }
            Err(e) => {
                tracing::warn!("settings not saved: {}", e);
                self.notify(ToastLevel::Error, "Settings could not be saved");
            }
        }
    }
}

/// Owns the application state. Wrap the router with it.
#[component]
pub fn FrameSpellProvider(
    config: ClientConfig,
    /// The page the router is currently showing.
    page: AppPage,
    on_navigate: EventHandler<AppPage>,
    children: Element,
) -> Element {
    let storage = use_hook(BrowserStorage::new);
    let session = use_signal({
        let storage = storage.clone();
        move || SessionStore::new(storage)
    });
    let settings_store = use_hook({
        let storage = storage.clone();
        move || CopyValue::new(SettingsStore::new(storage))
    });
    let dashboard = use_signal(DashboardController::new);
    let refresh = use_signal(RefreshSlot::<Task>::new);
    let toasts = use_signal({
        let max = config.notifications.max_visible;
        move || ToastStack::<Task>::new(max)
    });
    let registry = use_signal(ViewRegistry::<Rc<MountedData>>::new);
    let demo = use_signal({
        let attempts = config.demo.attempts;
        move || DemoGate::new(attempts)
    });
    let modal = use_signal(Modal::default);
    let key_slots = use_signal(BTreeMap::new);
    let settings = use_signal(UserSettings::default);
    let ready = use_signal(|| false);
    let mut current_page = use_signal(|| page);
    let client = use_hook({
        let config = config.clone();
        move || CopyValue::new(ApiClient::from_config(&config))
    });
    let config_value = use_hook({
        let config = config.clone();
        move || CopyValue::new(config)
    });
    let scope = use_hook(|| current_scope_id().unwrap_or(ScopeId::ROOT));

    // Every rendered figure flows through this memo.
    let view = use_memo(move || {
        let session = session.read();
        ViewModel::derive(session.session(), dashboard.read().state(), &settings.read())
    });

    let app = use_context_provider(|| FrameSpell {
        session,
        dashboard,
        settings,
        demo,
        modal,
        key_slots,
        ready,
        view,
        toasts,
        registry,
        page: current_page,
        refresh,
        settings_store,
        client,
        config: config_value,
        navigate: on_navigate,
        scope,
    });

    // Settings follow the signed-in user.
    use_effect(move || {
        let user_id = app.session.read().user().map(|u| u.id.clone());
        let loaded = app.settings_store.read().load(user_id.as_deref());
        let mut settings = app.settings;
        settings.set(loaded);
    });

    // Back/forward navigation away from home closes the dashboard too.
    use_effect(use_reactive((&page,), move |(page,)| {
        current_page.set(page);
        if !page.hosts_dashboard() && app.dashboard.peek().is_open() {
            app.close_dashboard();
        }
    }));

    // Losing the session (logout, rejected token) closes the dashboard.
    use_effect(move || {
        let signed_in = app.session.read().is_authenticated();
        if !signed_in && app.dashboard.peek().is_open() {
            app.close_dashboard();
        }
    });

    use_hook(move || {
        spawn(async move {
            let query = browser::location_search();
            let report = bootstrap(&app.client(), &app.session, &query).await;

            if report.strip_url {
                let clean = format!("{}{}", browser::pathname(), strip_callback_params(&query));
                browser::replace_url(&clean);
            }
            if let Some(user) = report.signed_in_via_oauth {
                app.notify(ToastLevel::Success, format!("Signed in as {}", user.email));
                app.open_dashboard(None);
            }
            if let Some(e) = report.oauth_error {
                app.notify(ToastLevel::Error, format!("Sign-in failed: {e}"));
            }
            if let Some(RestoreOutcome::Rejected(e)) = report.restore {
                tracing::info!("starting signed out: {}", e);
            }
            let mut ready = app.ready;
            ready.set(true);

            sleep(HEALTH_CHECK_DELAY).await;
            match app.client().health().await {
                Ok(health) => tracing::info!(
                    "backend health: {}",
                    health.status.as_deref().unwrap_or("unknown")
                ),
                Err(e) => tracing::warn!("backend health check failed: {}", e),
            }
        });
    });

    use_drop(move || {
        let mut refresh = app.refresh;
        if let Ok(mut slot) = refresh.try_write() {
            slot.cancel();
        };
    });

    rsx! {
        document::Stylesheet { href: VIEWS_CSS }
        {children}
        crate::AuthModal {}
        crate::ToastContainer {}
    }
}
