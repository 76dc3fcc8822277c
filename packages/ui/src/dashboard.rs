//! # Dashboard controller
//!
//! One state machine drives the dashboard overlay:
//!
//! ```text
//!            open (signed in)              switch_page(p)
//!  Closed ─────────────────────▶ Open(page) ───────────────▶ Open(p)
//!    ▲                               │
//!    └────────── close ──────────────┘
//! ```
//!
//! Transitions return the [`Effect`]s the caller must perform (load page
//! data, start or stop the refresh timer, prompt registration). The
//! controller itself never touches the network or the timer, which keeps it
//! testable without a runtime.
//!
//! [`RefreshSlot`] holds the single profile-refresh timer. Putting a new
//! handle in cancels the previous one, so at most one timer is ever active.

use std::fmt;
use std::time::Duration;

use store::Language;

use crate::timer::Cancel;
use crate::validation::ValidationError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DashboardPage {
    #[default]
    Profile,
    ApiKeys,
    Usage,
}

impl DashboardPage {
    pub const ALL: [DashboardPage; 3] = [
        DashboardPage::Profile,
        DashboardPage::ApiKeys,
        DashboardPage::Usage,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            DashboardPage::Profile => "profile",
            DashboardPage::ApiKeys => "api-keys",
            DashboardPage::Usage => "usage",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            DashboardPage::Profile => "Profile",
            DashboardPage::ApiKeys => "API Keys",
            DashboardPage::Usage => "Usage",
        }
    }

    pub fn from_slug(slug: &str) -> Result<Self, ValidationError> {
        DashboardPage::ALL
            .into_iter()
            .find(|page| page.slug() == slug.trim())
            .ok_or_else(|| ValidationError::UnknownPage(slug.to_string()))
    }
}

impl fmt::Display for DashboardPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Page and language selection while the dashboard is open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DashboardState {
    pub page: DashboardPage,
    pub selected_language: Language,
}

/// Work requested by a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    LoadPage(DashboardPage),
    StartRefresh,
    StopRefresh,
    PromptRegistration,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashboardController {
    state: Option<DashboardState>,
}

impl DashboardController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.state.is_some()
    }

    pub fn state(&self) -> Option<DashboardState> {
        self.state
    }

    pub fn page(&self) -> Option<DashboardPage> {
        self.state.map(|s| s.page)
    }

    /// Open on `page` (or keep the current page when already open).
    ///
    /// The refresh timer is (re)started every time; [`RefreshSlot`] makes
    /// that safe.
    pub fn open(&mut self, signed_in: bool, page: Option<DashboardPage>) -> Vec<Effect> {
        if !signed_in {
            tracing::info!("dashboard requires a session, prompting registration");
            return vec![Effect::PromptRegistration];
        }
        let state = self.state.get_or_insert_with(DashboardState::default);
        if let Some(page) = page {
            state.page = page;
        }
        vec![Effect::LoadPage(state.page), Effect::StartRefresh]
    }

    /// Returns `None` when closed or already on `page`.
    pub fn switch_page(&mut self, page: DashboardPage) -> Option<Effect> {
        let state = self.state.as_mut()?;
        if state.page == page {
            return None;
        }
        state.page = page;
        Some(Effect::LoadPage(page))
    }

    pub fn switch_page_slug(&mut self, slug: &str) -> Result<Option<Effect>, ValidationError> {
        let page = DashboardPage::from_slug(slug)?;
        Ok(self.switch_page(page))
    }

    pub fn select_language(&mut self, language: Language) -> bool {
        match self.state.as_mut() {
            Some(state) if state.selected_language != language => {
                state.selected_language = language;
                true
            }
            _ => false,
        }
    }

    /// Closing resets page and language selection.
    pub fn close(&mut self) -> Effect {
        self.state = None;
        Effect::StopRefresh
    }
}

/// Holder for the one active refresh timer.
#[derive(Debug)]
pub struct RefreshSlot<H: Cancel> {
    active: Option<H>,
}

impl<H: Cancel> Default for RefreshSlot<H> {
    fn default() -> Self {
        Self { active: None }
    }
}

impl<H: Cancel> RefreshSlot<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Install `handle`, cancelling whatever timer was running.
    pub fn replace(&mut self, handle: H) {
        if let Some(previous) = self.active.replace(handle) {
            tracing::debug!("replacing dashboard refresh timer");
            previous.cancel();
        }
    }

    /// Start polling every `interval_secs`; 0 disables polling and stops
    /// any running timer. `spawn` is only called when polling is enabled.
    pub fn start(&mut self, interval_secs: u32, spawn: impl FnOnce(Duration) -> H) -> bool {
        if interval_secs == 0 {
            tracing::debug!("dashboard refresh disabled");
            self.cancel();
            return false;
        }
        self.replace(spawn(Duration::from_secs(u64::from(interval_secs))));
        true
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.active.take() {
            tracing::debug!("dashboard refresh timer stopped");
            handle.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Counts live timers: +1 when created, -1 when cancelled.
    struct FakeTimer(Rc<Cell<i32>>);

    impl FakeTimer {
        fn start(live: &Rc<Cell<i32>>) -> Self {
            live.set(live.get() + 1);
            FakeTimer(live.clone())
        }
    }

    impl Cancel for FakeTimer {
        fn cancel(self) {
            self.0.set(self.0.get() - 1);
        }
    }

    fn run(effects: &[Effect], slot: &mut RefreshSlot<FakeTimer>, live: &Rc<Cell<i32>>) {
        for effect in effects {
            match effect {
                Effect::StartRefresh => slot.replace(FakeTimer::start(live)),
                Effect::StopRefresh => slot.cancel(),
                _ => {}
            }
        }
    }

    #[test]
    fn test_open_requires_session() {
        let mut dashboard = DashboardController::new();
        assert_eq!(dashboard.open(false, None), vec![Effect::PromptRegistration]);
        assert!(!dashboard.is_open());
    }

    #[test]
    fn test_opening_twice_leaves_one_timer() {
        let live = Rc::new(Cell::new(0));
        let mut slot = RefreshSlot::new();
        let mut dashboard = DashboardController::new();

        let effects = dashboard.open(true, None);
        run(&effects, &mut slot, &live);
        let effects = dashboard.open(true, Some(DashboardPage::Usage));
        run(&effects, &mut slot, &live);

        assert_eq!(live.get(), 1);
        assert!(slot.is_active());
        assert_eq!(dashboard.page(), Some(DashboardPage::Usage));

        run(&[dashboard.close()], &mut slot, &live);
        assert_eq!(live.get(), 0);
        assert!(!slot.is_active());
    }

    #[test]
    fn test_zero_interval_disables_polling() {
        let live = Rc::new(Cell::new(0));
        let mut slot = RefreshSlot::new();

        assert!(slot.start(5, |interval| {
            assert_eq!(interval, Duration::from_secs(5));
            FakeTimer::start(&live)
        }));
        assert_eq!(live.get(), 1);

        let started = slot.start(0, |_| -> FakeTimer { panic!("no timer when polling is off") });
        assert!(!started);
        assert_eq!(live.get(), 0);
        assert!(!slot.is_active());
    }

    #[test]
    fn test_switch_page_is_idempotent() {
        let mut dashboard = DashboardController::new();
        assert_eq!(dashboard.switch_page(DashboardPage::Usage), None);

        dashboard.open(true, None);
        assert_eq!(
            dashboard.switch_page(DashboardPage::ApiKeys),
            Some(Effect::LoadPage(DashboardPage::ApiKeys))
        );
        assert_eq!(dashboard.switch_page(DashboardPage::ApiKeys), None);
    }

    #[test]
    fn test_unknown_page_is_rejected() {
        let mut dashboard = DashboardController::new();
        dashboard.open(true, None);
        assert_eq!(
            dashboard.switch_page_slug("billing"),
            Err(ValidationError::UnknownPage("billing".into()))
        );
        assert_eq!(dashboard.page(), Some(DashboardPage::Profile));
        assert_eq!(
            dashboard.switch_page_slug("usage"),
            Ok(Some(Effect::LoadPage(DashboardPage::Usage)))
        );
    }

    #[test]
    fn test_close_resets_state() {
        let mut dashboard = DashboardController::new();
        dashboard.open(true, Some(DashboardPage::ApiKeys));
        assert!(dashboard.select_language(Language::Fr));
        assert!(!dashboard.select_language(Language::Fr));

        dashboard.close();
        assert!(dashboard.state().is_none());
        dashboard.open(true, None);
        assert_eq!(dashboard.state(), Some(DashboardState::default()));
    }
}
