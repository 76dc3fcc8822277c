//! # Payment page logic
//!
//! Only the professional plan is sold online. The page shows a monthly or
//! yearly price with 19 % VAT included, then hands off to the hosted checkout
//! returned by `POST /create-checkout-session`.

use api::{ApiError, Backend, CheckoutRequest};
use store::{format_euro, SubscriptionType, UserRecord};
use thiserror::Error;

use crate::session::{forget_if_rejected, SessionHandle};

pub const VAT_RATE: f64 = 0.19;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BillingCycle {
    #[default]
    Monthly,
    Yearly,
}

impl BillingCycle {
    pub fn price_id(&self) -> &'static str {
        match self {
            BillingCycle::Monthly => "price_monthly",
            BillingCycle::Yearly => "price_yearly",
        }
    }

    /// Gross price in euro.
    pub fn price(&self) -> f64 {
        match self {
            BillingCycle::Monthly => 29.0,
            BillingCycle::Yearly => 290.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BillingCycle::Monthly => "Monthly",
            BillingCycle::Yearly => "Yearly",
        }
    }

    pub fn period(&self) -> &'static str {
        match self {
            BillingCycle::Monthly => "month",
            BillingCycle::Yearly => "year",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PriceSummary {
    pub plan: &'static str,
    pub cycle: &'static str,
    pub price: String,
    /// VAT contained in the gross price.
    pub vat: String,
    pub total: String,
}

pub fn price_summary(cycle: BillingCycle) -> PriceSummary {
    let gross = cycle.price();
    let vat = gross - gross / (1.0 + VAT_RATE);
    PriceSummary {
        plan: "Professional",
        cycle: cycle.label(),
        price: format_euro(gross),
        vat: format_euro(vat),
        total: format_euro(gross),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Eligibility {
    NeedsLogin,
    AlreadySubscribed(SubscriptionType),
    Eligible(UserRecord),
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum CheckoutError {
    #[error("Please log in before subscribing")]
    NotSignedIn,
    #[error("The payment provider did not return a checkout page")]
    MissingCheckoutUrl,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Re-read the profile to decide whether the user can buy the plan.
pub async fn check_eligibility<B: Backend, H: SessionHandle>(
    backend: &B,
    session: &H,
) -> Result<Eligibility, ApiError> {
    let Some((token, generation)) = session.credentials() else {
        return Ok(Eligibility::NeedsLogin);
    };
    let user = match backend.me(&token).await {
        Ok(user) => user,
        Err(e) => {
            if forget_if_rejected(session, generation, &e) {
                return Ok(Eligibility::NeedsLogin);
            }
            return Err(e);
        }
    };
    session.write_with(|s| s.set_user_if_current(generation, user.clone()));
    if user.subscription_type.is_paid() {
        return Ok(Eligibility::AlreadySubscribed(user.subscription_type));
    }
    Ok(Eligibility::Eligible(user))
}

/// Create a checkout session and return the URL to redirect to.
pub async fn start_checkout<B: Backend, H: SessionHandle>(
    backend: &B,
    session: &H,
    cycle: BillingCycle,
) -> Result<String, CheckoutError> {
    let Some((token, generation)) = session.credentials() else {
        return Err(CheckoutError::NotSignedIn);
    };
    let request = CheckoutRequest {
        price_id: cycle.price_id().to_string(),
        subscription_type: SubscriptionType::Professional,
    };
    let checkout = match backend.create_checkout_session(&token, &request).await {
        Ok(checkout) => checkout,
        Err(e) => {
            forget_if_rejected(session, generation, &e);
            return Err(e.into());
        }
    };
    checkout
        .checkout_url
        .filter(|url| !url.trim().is_empty())
        .ok_or(CheckoutError::MissingCheckoutUrl)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{shared_session, signed_in, user, MockBackend};
    use api::CheckoutSession;

    #[test]
    fn test_price_summary() {
        let monthly = price_summary(BillingCycle::Monthly);
        assert_eq!(monthly.price, "€29.00");
        assert_eq!(monthly.vat, "€4.63");
        let yearly = price_summary(BillingCycle::Yearly);
        assert_eq!(yearly.total, "€290.00");
        assert_eq!(yearly.vat, "€46.30");
    }

    #[tokio::test]
    async fn test_checkout_returns_url() {
        let backend = MockBackend::new();
        backend.on_checkout(Ok(CheckoutSession {
            checkout_url: Some("https://checkout.example/cs_1".into()),
        }));
        let (_, session) = signed_in("u1");

        let url = start_checkout(&backend, &session, BillingCycle::Yearly)
            .await
            .unwrap();
        assert_eq!(url, "https://checkout.example/cs_1");
        assert_eq!(backend.args(), vec!["price_yearly"]);
    }

    #[tokio::test]
    async fn test_missing_checkout_url() {
        let backend = MockBackend::new();
        backend.on_checkout(Ok(CheckoutSession::default()));
        let (_, session) = signed_in("u1");
        let err = start_checkout(&backend, &session, BillingCycle::Monthly)
            .await
            .unwrap_err();
        assert_eq!(err, CheckoutError::MissingCheckoutUrl);
    }

    #[tokio::test]
    async fn test_eligibility() {
        let backend = MockBackend::new();
        let (_, anonymous) = shared_session();
        assert_eq!(
            check_eligibility(&backend, &anonymous).await.unwrap(),
            Eligibility::NeedsLogin
        );

        let mut pro = user("u1");
        pro.subscription_type = SubscriptionType::Professional;
        backend.on_me(Ok(pro));
        let (_, session) = signed_in("u1");
        assert_eq!(
            check_eligibility(&backend, &session).await.unwrap(),
            Eligibility::AlreadySubscribed(SubscriptionType::Professional)
        );
    }

    #[tokio::test]
    async fn test_eligibility_failure_is_reported_and_retryable() {
        let backend = MockBackend::new();
        backend.on_me(Err(ApiError::Transport("offline".into())));
        backend.on_me(Ok(user("u1")));
        let (_, session) = signed_in("u1");

        let err = check_eligibility(&backend, &session).await.unwrap_err();
        assert_eq!(err.kind(), api::ErrorKind::Transport);
        assert!(session.borrow().is_authenticated());

        let retried = check_eligibility(&backend, &session).await.unwrap();
        assert!(matches!(retried, Eligibility::Eligible(u) if u.id == "u1"));
        assert_eq!(backend.calls(), vec!["me", "me"]);
    }
}
