//! Key/value persistence used by the session and settings stores.
//!
//! Implementations swallow backend failures (logging them) rather than
//! returning errors: an unavailable `localStorage` degrades to "nothing
//! persisted", which the stores already treat as the default state.

/// Fixed key holding the persisted session (`{token, user}` JSON).
pub const AUTH_TOKEN_KEY: &str = "authToken";

/// Generic settings key, used when no per-user entry exists.
pub const SETTINGS_KEY: &str = "userSettings";

/// Per-user settings key (`userSettings_<id>`).
pub fn user_settings_key(user_id: &str) -> String {
    format!("{SETTINGS_KEY}_{user_id}")
}

/// Synchronous string key/value store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}
