//! # Domain models shared by every crate in the workspace
//!
//! | Type | Represents |
//! |------|-----------|
//! | [`UserRecord`] | The authenticated user as returned by `GET /me`. Only ever replaced wholesale by backend responses. |
//! | [`SubscriptionType`] | The plan tier (`free`, `professional`, `enterprise`). Unknown tiers decode as `free`. |
//! | [`Language`] | The fixed set of languages a per-language API key can be issued for. |
//!
//! The backend is loose about types (numeric vs string ids, missing counters),
//! so deserialization here is forgiving: ids accept either form and counters
//! default to zero.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Plan tier of a user account.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", rename_all = "lowercase")]
pub enum SubscriptionType {
    #[default]
    Free,
    Professional,
    Enterprise,
}

impl SubscriptionType {
    pub const ALL: [SubscriptionType; 3] = [
        SubscriptionType::Free,
        SubscriptionType::Professional,
        SubscriptionType::Enterprise,
    ];

    /// Wire name used by the backend (`plan_type`, `subscription_type`).
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionType::Free => "free",
            SubscriptionType::Professional => "professional",
            SubscriptionType::Enterprise => "enterprise",
        }
    }

    pub fn is_paid(&self) -> bool {
        !matches!(self, SubscriptionType::Free)
    }
}

impl From<String> for SubscriptionType {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "professional" | "pro" => SubscriptionType::Professional,
            "enterprise" => SubscriptionType::Enterprise,
            _ => SubscriptionType::Free,
        }
    }
}

impl fmt::Display for SubscriptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Languages supported by the spellcheck API.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    De,
    En,
    Es,
    Fr,
}

impl Language {
    pub const ALL: [Language; 4] = [Language::De, Language::En, Language::Es, Language::Fr];

    /// ISO code sent to the backend.
    pub fn code(&self) -> &'static str {
        match self {
            Language::De => "de",
            Language::En => "en",
            Language::Es => "es",
            Language::Fr => "fr",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Language::De => "German",
            Language::En => "English",
            Language::Es => "Spanish",
            Language::Fr => "French",
        }
    }

    /// Parse an ISO code. Returns `None` for anything outside the supported set.
    pub fn from_code(code: &str) -> Option<Self> {
        Language::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(code.trim()))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The authenticated user, as reported by the backend.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub subscription_type: SubscriptionType,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default, deserialize_with = "count_or_null")]
    pub tokens_used_today: u64,
    #[serde(default, deserialize_with = "count_or_null")]
    pub total_requests: u64,
    /// ISO-8601 timestamp as sent by the backend.
    #[serde(default)]
    pub created_at: Option<String>,
}

impl UserRecord {
    /// Date part of `created_at` (`"2024-03-01T10:00:00Z"` → `"2024-03-01"`).
    pub fn joined_on(&self) -> Option<&str> {
        let created = self.created_at.as_deref()?.trim();
        if created.is_empty() {
            return None;
        }
        Some(created.split(['T', ' ']).next().unwrap_or(created))
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}

fn count_or_null<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_record_accepts_numeric_id_and_missing_counters() {
        let json = r#"{"id": 42, "email": "a@b.de", "subscription_type": "professional"}"#;
        let user: UserRecord = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, "42");
        assert_eq!(user.subscription_type, SubscriptionType::Professional);
        assert_eq!(user.tokens_used_today, 0);
        assert_eq!(user.total_requests, 0);
        assert!(user.api_key.is_none());
    }

    #[test]
    fn test_user_record_null_counters() {
        let json = r#"{"id": "u1", "email": "a@b.de", "tokens_used_today": null, "total_requests": 7}"#;
        let user: UserRecord = serde_json::from_str(json).unwrap();
        assert_eq!(user.tokens_used_today, 0);
        assert_eq!(user.total_requests, 7);
        assert_eq!(user.subscription_type, SubscriptionType::Free);
    }

    #[test]
    fn test_unknown_subscription_is_free() {
        let sub: SubscriptionType = serde_json::from_str(r#""gold""#).unwrap();
        assert_eq!(sub, SubscriptionType::Free);
        assert_eq!(serde_json::to_string(&SubscriptionType::Enterprise).unwrap(), r#""enterprise""#);
    }

    #[test]
    fn test_language_codes() {
        assert_eq!(Language::from_code("DE"), Some(Language::De));
        assert_eq!(Language::from_code("it"), None);
        assert_eq!(serde_json::to_string(&Language::Fr).unwrap(), r#""fr""#);
    }

    #[test]
    fn test_joined_on() {
        let mut user = UserRecord {
            created_at: Some("2024-03-01T10:00:00Z".to_string()),
            ..Default::default()
        };
        assert_eq!(user.joined_on(), Some("2024-03-01"));
        user.created_at = Some(String::new());
        assert_eq!(user.joined_on(), None);
    }
}
