//! Request and response bodies for the backend's JSON API.
//!
//! Responses are decoded leniently: optional fields default, and the
//! `{ "data": ... }` envelope some endpoints use is removed by the client
//! before these types see the payload.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use store::{Language, SubscriptionType, UserRecord};

/// Body of `POST /login` and `POST /register`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Successful login or registration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AuthPayload {
    #[serde(alias = "access_token")]
    pub token: String,
    /// Some deployments omit the user; the client then fetches `/me`.
    #[serde(default)]
    pub user: Option<UserRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SpellcheckRequest {
    pub text: String,
    pub language: Language,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Correction {
    #[serde(default)]
    pub original: String,
    #[serde(default)]
    pub corrected: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SpellcheckResponse {
    #[serde(alias = "corrected_text")]
    pub corrected: String,
    #[serde(default)]
    pub tokens_used: Option<u64>,
    #[serde(default)]
    pub corrections_made: Vec<Correction>,
}

/// Response of every endpoint that issues a key.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ApiKeyResponse {
    pub api_key: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub(crate) struct LanguageKeyRequest {
    pub language: Language,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub(crate) struct UpgradeRequest {
    pub plan_type: SubscriptionType,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct UpgradeResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Per-language key usage counters.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct KeyUsage {
    #[serde(default)]
    pub today: u64,
    #[serde(default)]
    pub remaining: Option<u64>,
    #[serde(default)]
    pub cost: f64,
}

/// `GET /api/user-language-keys`. Maps are keyed by language code; codes
/// outside the supported set are ignored by the accessors.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct LanguageKeys {
    #[serde(default)]
    pub api_keys: BTreeMap<String, Option<String>>,
    #[serde(default)]
    pub usage_stats: BTreeMap<String, KeyUsage>,
}

impl LanguageKeys {
    pub fn key(&self, language: Language) -> Option<&str> {
        self.api_keys
            .get(language.code())
            .and_then(|k| k.as_deref())
            .filter(|k| !k.is_empty())
    }

    pub fn usage(&self, language: Language) -> Option<&KeyUsage> {
        self.usage_stats.get(language.code())
    }
}

/// Body of `POST /create-checkout-session`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CheckoutRequest {
    pub price_id: String,
    pub subscription_type: SubscriptionType,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct CheckoutSession {
    #[serde(default)]
    pub checkout_url: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: Option<String>,
}
