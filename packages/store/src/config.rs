//! # Client configuration: `framespell.toml`
//!
//! The web build embeds this file and parses it once at startup. Every
//! section and field has a default, so an empty or partial file is equivalent
//! to the default configuration.
//!
//! ```toml
//! [api]
//! base_url = "https://api.framespell.de"
//! oauth_callback_path = "/oauth-callback"
//!
//! [dashboard]
//! refresh_interval_secs = 5
//!
//! [demo]
//! attempts = 3
//!
//! [notifications]
//! toast_duration_ms = 3000
//! max_visible = 5
//!
//! [contact]
//! support_email = "support@framespell.de"
//! ```

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Top-level client configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub demo: DemoConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
    #[serde(default)]
    pub contact: ContactConfig,
}

/// Backend location.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Path on this site the OAuth provider redirects back to.
    #[serde(default = "default_oauth_callback_path")]
    pub oauth_callback_path: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Profile poll interval while the dashboard is open. 0 disables polling.
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Anonymous spellchecks allowed per page load.
    #[serde(default = "default_demo_attempts")]
    pub attempts: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NotificationConfig {
    #[serde(default = "default_toast_duration")]
    pub toast_duration_ms: u32,
    #[serde(default = "default_max_visible")]
    pub max_visible: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContactConfig {
    #[serde(default = "default_support_email")]
    pub support_email: String,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_oauth_callback_path() -> String {
    "/oauth-callback".to_string()
}

fn default_refresh_interval() -> u32 {
    5
}

fn default_demo_attempts() -> u32 {
    3
}

fn default_toast_duration() -> u32 {
    3000
}

fn default_max_visible() -> usize {
    5
}

fn default_support_email() -> String {
    "support@framespell.de".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            oauth_callback_path: default_oauth_callback_path(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: default_refresh_interval(),
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            attempts: default_demo_attempts(),
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            toast_duration_ms: default_toast_duration(),
            max_visible: default_max_visible(),
        }
    }
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            support_email: default_support_email(),
        }
    }
}

impl ClientConfig {
    /// Builder method to point the client at another backend.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into();
        self
    }

    /// Builder method to set the dashboard poll interval.
    pub fn with_refresh_interval(mut self, secs: u32) -> Self {
        self.dashboard.refresh_interval_secs = secs;
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "framespell.toml"
    }

    /// Parse from TOML and normalise the base URL.
    pub fn from_toml(s: &str) -> Result<Self, StoreError> {
        let mut config: Self = toml::from_str(s)?;
        config.api.base_url = normalize_base_url(&config.api.base_url)?;
        Ok(config)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, StoreError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Trim whitespace and trailing slashes; require an http(s) scheme and a host.
pub fn normalize_base_url(raw: &str) -> Result<String, StoreError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let Some((scheme, host)) = trimmed.split_once("://") else {
        return Err(StoreError::InvalidBaseUrl(raw.to_string()));
    };
    if !matches!(scheme, "http" | "https") || host.is_empty() || host.starts_with('/') {
        return Err(StoreError::InvalidBaseUrl(raw.to_string()));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        let config = ClientConfig::from_toml("").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.dashboard.refresh_interval_secs, 5);
        assert_eq!(config.demo.attempts, 3);
        assert_eq!(config.notifications.toast_duration_ms, 3000);
    }

    #[test]
    fn test_partial_config() {
        let config = ClientConfig::from_toml(
            r#"
            [api]
            base_url = " https://api.framespell.de/ "

            [demo]
            attempts = 1
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://api.framespell.de");
        assert_eq!(config.api.oauth_callback_path, "/oauth-callback");
        assert_eq!(config.demo.attempts, 1);
        assert_eq!(config.dashboard.refresh_interval_secs, 5);
    }

    #[test]
    fn test_invalid_base_url() {
        let err = ClientConfig::from_toml("[api]\nbase_url = \"framespell.de\"").unwrap_err();
        assert!(matches!(err, StoreError::InvalidBaseUrl(_)));
        assert!(normalize_base_url("ftp://host").is_err());
        assert!(normalize_base_url("https://").is_err());
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = ClientConfig::default()
            .with_base_url("https://api.example.com")
            .with_refresh_interval(10);
        let text = config.to_toml().unwrap();
        assert_eq!(ClientConfig::from_toml(&text).unwrap(), config);
    }
}
