//! # View model: everything the page shows, derived in one place
//!
//! [`ViewModel::derive`] is a pure function of the session, the dashboard
//! state and the user's settings. Components render from it and never compute
//! display values themselves, so every usage/cost figure comes from the one
//! plan table in `store::plans`.
//!
//! The `view` memo in [`crate::app`] is the single re-render entry point. It
//! only notifies readers when the derived model differs from the last one, so
//! deriving twice from the same state repaints nothing.

use store::{format_euro, PlanLimits, Session, SubscriptionType, UserRecord, UserSettings};

use crate::dashboard::DashboardState;
use crate::plan::{action_for, PlanAction};

/// Page sections the navbar can scroll to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    Hero,
    Demo,
    Pricing,
}

#[derive(Clone, Debug, PartialEq)]
pub enum NavView {
    Anonymous,
    SignedIn { email: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProfileView {
    pub email: String,
    pub user_id: String,
    pub plan_name: &'static str,
    pub plan_badge_class: &'static str,
    pub joined: String,
    pub total_requests: u64,
    pub requests_today: u64,
    pub estimated_cost: String,
    pub api_key: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UsageView {
    pub today: u64,
    pub remaining: String,
    pub percentage: f64,
    /// CSS width of the usage bar, e.g. `"42.5%"`.
    pub bar_width: String,
    pub overage_cost: String,
    pub note: String,
    pub month_total: u64,
    pub month_free: u64,
    pub month_paid: u64,
    pub month_cost: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlanView {
    pub subscription: SubscriptionType,
    pub name: &'static str,
    pub rate_limit: String,
    pub monthly_cost: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DashboardView {
    pub state: DashboardState,
    pub profile: ProfileView,
    pub usage: UsageView,
}

/// One pricing card.
#[derive(Clone, Debug, PartialEq)]
pub struct TierCardView {
    pub subscription: SubscriptionType,
    pub name: &'static str,
    pub price: String,
    pub rate_limit: String,
    /// `None` for tiers without overage charges.
    pub overage: Option<String>,
    /// What the card's button does for the signed-in user; `None` for visitors.
    pub action: Option<PlanAction>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewModel {
    pub nav: NavView,
    /// `None` while the dashboard is closed or nobody is signed in.
    pub dashboard: Option<DashboardView>,
    /// The signed-in user's plan, whether or not the dashboard is open.
    pub plan: Option<PlanView>,
    pub tiers: Vec<TierCardView>,
    pub settings: UserSettings,
}

impl ViewModel {
    pub fn derive(
        session: &Session,
        dashboard: Option<DashboardState>,
        settings: &UserSettings,
    ) -> Self {
        let user = session.user();
        let nav = match user {
            Some(user) => NavView::SignedIn {
                email: user.email.clone(),
            },
            None => NavView::Anonymous,
        };
        let dashboard = match (user, dashboard) {
            (Some(user), Some(state)) => Some(DashboardView {
                state,
                profile: profile_view(user),
                usage: usage_view(user),
            }),
            _ => None,
        };
        let current = user.map(|u| u.subscription_type);
        Self {
            nav,
            dashboard,
            plan: current.map(plan_view),
            tiers: SubscriptionType::ALL
                .into_iter()
                .map(|tier| tier_card(tier, current))
                .collect(),
            settings: settings.clone(),
        }
    }
}

fn profile_view(user: &UserRecord) -> ProfileView {
    let plan = PlanLimits::for_subscription(user.subscription_type);
    ProfileView {
        email: user.email.clone(),
        user_id: user.id.clone(),
        plan_name: plan.display_name(),
        plan_badge_class: match user.subscription_type {
            SubscriptionType::Free => "plan-badge free",
            SubscriptionType::Professional => "plan-badge professional",
            SubscriptionType::Enterprise => "plan-badge enterprise",
        },
        joined: user.joined_on().unwrap_or("-").to_string(),
        total_requests: user.total_requests,
        requests_today: user.tokens_used_today,
        estimated_cost: format_euro(plan.usage(user.tokens_used_today).overage_cost),
        api_key: user.api_key.clone(),
    }
}

fn usage_view(user: &UserRecord) -> UsageView {
    let plan = PlanLimits::for_subscription(user.subscription_type);
    let usage = plan.usage(user.tokens_used_today);
    let month = plan.month(user.total_requests);
    UsageView {
        today: usage.used,
        remaining: match usage.remaining {
            Some(n) => n.to_string(),
            None => "Unlimited".to_string(),
        },
        percentage: usage.percentage,
        bar_width: format!("{:.1}%", usage.percentage),
        overage_cost: format_euro(usage.overage_cost),
        note: plan.usage_note(),
        month_total: month.total_requests,
        month_free: month.free_requests,
        month_paid: month.paid_requests,
        month_cost: format_euro(month.cost),
    }
}

fn plan_view(subscription: SubscriptionType) -> PlanView {
    let plan = PlanLimits::for_subscription(subscription);
    PlanView {
        subscription,
        name: plan.display_name(),
        rate_limit: plan.rate_limit_label(),
        monthly_cost: plan.monthly_cost_label(),
    }
}

fn tier_card(tier: SubscriptionType, current: Option<SubscriptionType>) -> TierCardView {
    let plan = PlanLimits::for_subscription(tier);
    TierCardView {
        subscription: tier,
        name: plan.display_name(),
        price: plan.monthly_cost_label(),
        rate_limit: plan.rate_limit_label(),
        overage: (plan.cost_per_overage_unit > 0.0)
            .then(|| format_euro(plan.cost_per_overage_unit)),
        action: current.map(|c| action_for(c, tier)),
    }
}
