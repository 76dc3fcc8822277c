//! # Plan limits: the one table every usage and cost display reads
//!
//! [`PlanLimits::for_subscription`] is the only place tier-specific numbers
//! live. Enterprise accounts have no request cap, modelled as
//! [`RateLimit::Unlimited`] rather than a large sentinel number: their
//! remaining quota is reported as `None` and their usage bar stays at 0 %.
//!
//! | Tier | Requests / min | Overage per request | Monthly price |
//! |------|----------------|---------------------|---------------|
//! | free | 20 | €0.009 | €0 |
//! | professional | 100 | €0.005 | €29 |
//! | enterprise | unlimited | €0 | €290 |

use crate::models::SubscriptionType;

/// Request cap of a plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RateLimit {
    PerMinute(u64),
    Unlimited,
}

/// Limits and prices of a subscription tier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlanLimits {
    pub subscription: SubscriptionType,
    pub rate_limit: RateLimit,
    /// Price in euro for each request beyond the rate limit.
    pub cost_per_overage_unit: f64,
    /// Gross monthly price in euro (VAT included).
    pub monthly_price: f64,
}

/// Today's usage measured against a plan.
#[derive(Clone, Debug, PartialEq)]
pub struct UsageSummary {
    pub used: u64,
    /// `max(0, limit - used)`, or `None` for unlimited plans.
    pub remaining: Option<u64>,
    /// `min(100, 100 * used / limit)`; 0 for unlimited plans.
    pub percentage: f64,
    pub overage_cost: f64,
}

/// Monthly totals split into included and billable requests.
#[derive(Clone, Debug, PartialEq)]
pub struct MonthSummary {
    pub total_requests: u64,
    pub free_requests: u64,
    pub paid_requests: u64,
    pub cost: f64,
}

impl PlanLimits {
    pub const fn for_subscription(subscription: SubscriptionType) -> Self {
        match subscription {
            SubscriptionType::Free => Self {
                subscription,
                rate_limit: RateLimit::PerMinute(20),
                cost_per_overage_unit: 0.009,
                monthly_price: 0.0,
            },
            SubscriptionType::Professional => Self {
                subscription,
                rate_limit: RateLimit::PerMinute(100),
                cost_per_overage_unit: 0.005,
                monthly_price: 29.0,
            },
            SubscriptionType::Enterprise => Self {
                subscription,
                rate_limit: RateLimit::Unlimited,
                cost_per_overage_unit: 0.0,
                monthly_price: 290.0,
            },
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self.subscription {
            SubscriptionType::Free => "Free",
            SubscriptionType::Professional => "Professional",
            SubscriptionType::Enterprise => "Enterprise",
        }
    }

    pub fn rate_limit_label(&self) -> String {
        match self.rate_limit {
            RateLimit::PerMinute(n) => format!("{n} requests/min"),
            RateLimit::Unlimited => "Unlimited".to_string(),
        }
    }

    pub fn monthly_cost_label(&self) -> String {
        format!("€{:.0}/month", self.monthly_price)
    }

    /// Explanatory line shown under the usage bar.
    pub fn usage_note(&self) -> String {
        match (self.subscription, self.rate_limit) {
            (_, RateLimit::Unlimited) => format!("Unlimited requests ({})", self.display_name()),
            (SubscriptionType::Free, RateLimit::PerMinute(n)) => {
                format!("Based on {n} free requests per minute")
            }
            (_, RateLimit::PerMinute(n)) => {
                format!("Based on {n} requests per minute ({})", self.display_name())
            }
        }
    }

    fn overage(&self, used: u64) -> u64 {
        match self.rate_limit {
            RateLimit::PerMinute(limit) => used.saturating_sub(limit),
            RateLimit::Unlimited => 0,
        }
    }

    pub fn usage(&self, used: u64) -> UsageSummary {
        let (remaining, percentage) = match self.rate_limit {
            RateLimit::PerMinute(0) => (Some(0), 100.0),
            RateLimit::PerMinute(limit) => (
                Some(limit.saturating_sub(used)),
                (100.0 * used as f64 / limit as f64).min(100.0),
            ),
            RateLimit::Unlimited => (None, 0.0),
        };
        UsageSummary {
            used,
            remaining,
            percentage,
            overage_cost: self.overage(used) as f64 * self.cost_per_overage_unit,
        }
    }

    pub fn month(&self, total_requests: u64) -> MonthSummary {
        let paid_requests = self.overage(total_requests);
        MonthSummary {
            total_requests,
            free_requests: total_requests - paid_requests,
            paid_requests,
            cost: paid_requests as f64 * self.cost_per_overage_unit,
        }
    }
}

/// Euro amount with two decimals (`€1.23`).
pub fn format_euro(amount: f64) -> String {
    format!("€{amount:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remaining_and_percentage_for_every_tier() {
        for tier in SubscriptionType::ALL {
            let plan = PlanLimits::for_subscription(tier);
            for used in [0u64, 1, 19, 20, 21, 99, 100, 150, 10_000] {
                let usage = plan.usage(used);
                match plan.rate_limit {
                    RateLimit::PerMinute(limit) => {
                        assert_eq!(usage.remaining, Some(limit.saturating_sub(used)));
                        let expected = (100.0 * used as f64 / limit as f64).min(100.0);
                        assert!((usage.percentage - expected).abs() < f64::EPSILON);
                        assert!(usage.percentage <= 100.0);
                    }
                    RateLimit::Unlimited => {
                        assert_eq!(usage.remaining, None);
                        assert_eq!(usage.percentage, 0.0);
                    }
                }
            }
        }
    }

    #[test]
    fn test_overage_cost() {
        let free = PlanLimits::for_subscription(SubscriptionType::Free);
        assert_eq!(free.usage(20).overage_cost, 0.0);
        assert!((free.usage(120).overage_cost - 0.9).abs() < 1e-9);

        let enterprise = PlanLimits::for_subscription(SubscriptionType::Enterprise);
        assert_eq!(enterprise.usage(1_000_000).overage_cost, 0.0);
    }

    #[test]
    fn test_month_split() {
        let pro = PlanLimits::for_subscription(SubscriptionType::Professional);
        let month = pro.month(250);
        assert_eq!(month.free_requests, 100);
        assert_eq!(month.paid_requests, 150);
        assert!((month.cost - 0.75).abs() < 1e-9);

        let small = pro.month(30);
        assert_eq!(small.free_requests, 30);
        assert_eq!(small.paid_requests, 0);
    }

    #[test]
    fn test_labels() {
        let free = PlanLimits::for_subscription(SubscriptionType::Free);
        assert_eq!(free.rate_limit_label(), "20 requests/min");
        assert_eq!(free.monthly_cost_label(), "€0/month");
        let enterprise = PlanLimits::for_subscription(SubscriptionType::Enterprise);
        assert_eq!(enterprise.rate_limit_label(), "Unlimited");
        assert_eq!(format_euro(1.234), "€1.23");
    }
}
