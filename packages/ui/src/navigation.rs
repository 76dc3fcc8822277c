//! Top-level pages and what moving between them means for the dashboard.
//!
//! The dashboard overlay lives on the home page only. Leaving home closes it
//! (and so stops its refresh timer); opening it from another page goes home
//! first.

/// Pages the router knows about.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AppPage {
    #[default]
    Home,
    OAuthCallback,
    Payment,
}

impl AppPage {
    pub fn hosts_dashboard(&self) -> bool {
        matches!(self, AppPage::Home)
    }
}

/// What a request to show `target` needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Navigation {
    /// A history entry must be pushed; false when already there.
    pub push: bool,
    /// The dashboard has to close before leaving.
    pub close_dashboard: bool,
}

pub fn plan_navigation(current: AppPage, target: AppPage) -> Navigation {
    Navigation {
        push: current != target,
        close_dashboard: !target.hosts_dashboard(),
    }
}

/// Page to switch to before the dashboard can be shown, if any.
pub fn dashboard_redirect(current: AppPage) -> Option<AppPage> {
    (!current.hosts_dashboard()).then_some(AppPage::Home)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_home_hosts_dashboard() {
        assert!(AppPage::Home.hosts_dashboard());
        assert!(!AppPage::Payment.hosts_dashboard());
        assert!(!AppPage::OAuthCallback.hosts_dashboard());
    }

    #[test]
    fn test_same_page_pushes_nothing() {
        let nav = plan_navigation(AppPage::Home, AppPage::Home);
        assert!(!nav.push);
        assert!(!nav.close_dashboard);
    }

    #[test]
    fn test_leaving_home_closes_dashboard() {
        assert_eq!(
            plan_navigation(AppPage::Home, AppPage::Payment),
            Navigation {
                push: true,
                close_dashboard: true,
            }
        );
        assert!(plan_navigation(AppPage::Payment, AppPage::Home).push);
        assert!(!plan_navigation(AppPage::Payment, AppPage::Home).close_dashboard);
    }

    #[test]
    fn test_dashboard_opens_on_home() {
        assert_eq!(dashboard_redirect(AppPage::Home), None);
        assert_eq!(dashboard_redirect(AppPage::Payment), Some(AppPage::Home));
        assert_eq!(dashboard_redirect(AppPage::OAuthCallback), Some(AppPage::Home));
    }
}
