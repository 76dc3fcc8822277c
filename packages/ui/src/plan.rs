//! Plan changes offered from the dashboard and the plan modal.

use api::{ApiError, Backend};
use chrono::{Days, NaiveDate};
use store::SubscriptionType;

use crate::keys::Confirm;
use crate::session::{forget_if_rejected, refresh_profile, SessionHandle};

/// Paid plans renew this many days after today.
pub const BILLING_PERIOD_DAYS: u64 = 30;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlanAction {
    /// Leave for the payment page.
    UpgradeToProfessional,
    /// Enterprise is sold by contact only.
    ContactSales,
    DowngradeToFree,
    /// The tier is already active.
    Current,
}

/// The button shown on each tier card for a user on `current`.
pub fn action_for(current: SubscriptionType, tier: SubscriptionType) -> PlanAction {
    if current == tier {
        return PlanAction::Current;
    }
    match tier {
        SubscriptionType::Free => PlanAction::DowngradeToFree,
        SubscriptionType::Professional => PlanAction::UpgradeToProfessional,
        SubscriptionType::Enterprise => PlanAction::ContactSales,
    }
}

pub fn next_billing_date(subscription: SubscriptionType, today: NaiveDate) -> Option<NaiveDate> {
    if !subscription.is_paid() {
        return None;
    }
    today.checked_add_days(Days::new(BILLING_PERIOD_DAYS))
}

#[derive(Clone, Debug, PartialEq)]
pub enum PlanChange {
    Cancelled,
    SignedOut,
    Changed { message: Option<String> },
}

/// Ask, then move the account to the free tier and re-read the profile.
pub async fn downgrade_to_free<B: Backend, H: SessionHandle, C: Confirm>(
    backend: &B,
    session: &H,
    confirm: &C,
) -> Result<PlanChange, ApiError> {
    if !confirm.confirm("Switch to the free plan? Paid features end immediately.") {
        return Ok(PlanChange::Cancelled);
    }
    let Some((token, generation)) = session.credentials() else {
        return Ok(PlanChange::SignedOut);
    };
    match backend.upgrade_plan(&token, SubscriptionType::Free).await {
        Ok(response) => {
            if let Err(e) = refresh_profile(backend, session).await {
                tracing::warn!("profile refresh after plan change failed: {}", e);
            }
            Ok(PlanChange::Changed {
                message: response.message,
            })
        }
        Err(e) => {
            forget_if_rejected(session, generation, &e);
            Err(e)
        }
    }
}
