use thiserror::Error;

/// Errors raised by the client-side stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
    #[error("base url must use http:// or https:// and include a host: {0:?}")]
    InvalidBaseUrl(String),
    #[error("failed to encode settings: {0}")]
    SettingsEncode(#[from] serde_json::Error),
    #[error("no user is signed in")]
    NotSignedIn,
}
