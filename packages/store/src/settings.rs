//! Per-user preferences kept in local storage only.
//!
//! Loading looks for `userSettings_<id>` first, then the generic
//! `userSettings` key, then falls back to defaults. Saving always writes the
//! per-user key.

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::storage::{user_settings_key, KeyValueStore, SETTINGS_KEY};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserSettings {
    pub allow_paid_requests: bool,
    pub email_notifications: bool,
    pub auto_upgrade: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            allow_paid_requests: true,
            email_notifications: true,
            auto_upgrade: false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SettingsStore<S> {
    storage: S,
}

impl<S: KeyValueStore> SettingsStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn load(&self, user_id: Option<&str>) -> UserSettings {
        let per_user = user_id.map(user_settings_key);
        per_user
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(SETTINGS_KEY))
            .find_map(|key| self.read(key))
            .unwrap_or_default()
    }

    pub fn save(&self, user_id: Option<&str>, settings: &UserSettings) -> Result<(), StoreError> {
        let user_id = user_id.ok_or(StoreError::NotSignedIn)?;
        let json = serde_json::to_string(settings)?;
        self.storage.set(&user_settings_key(user_id), &json);
        tracing::debug!("saved settings for user {}", user_id);
        Ok(())
    }

    fn read(&self, key: &str) -> Option<UserSettings> {
        let raw = self.storage.get(key)?;
        match serde_json::from_str(&raw) {
            Ok(settings) => Some(settings),
            Err(e) => {
                tracing::warn!("ignoring unreadable settings under {}: {}", key, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStorage;

    #[test]
    fn test_defaults_when_absent() {
        let store = SettingsStore::new(MemoryStorage::new());
        let settings = store.load(Some("u1"));
        assert!(settings.allow_paid_requests);
        assert!(settings.email_notifications);
        assert!(!settings.auto_upgrade);
    }

    #[test]
    fn test_save_is_per_user() {
        let storage = MemoryStorage::new();
        let store = SettingsStore::new(storage.clone());
        let settings = UserSettings {
            auto_upgrade: true,
            ..Default::default()
        };
        store.save(Some("u1"), &settings).unwrap();

        assert_eq!(store.load(Some("u1")), settings);
        assert_eq!(store.load(Some("u2")), UserSettings::default());
        assert!(storage.get("userSettings_u1").unwrap().contains("autoUpgrade"));
    }

    #[test]
    fn test_generic_key_fallback() {
        let storage = MemoryStorage::new();
        storage.set(SETTINGS_KEY, r#"{"allowPaidRequests": false}"#);
        let store = SettingsStore::new(storage);

        let settings = store.load(Some("u9"));
        assert!(!settings.allow_paid_requests);
        assert!(settings.email_notifications);
        assert_eq!(store.load(None), settings);
    }

    #[test]
    fn test_save_requires_user() {
        let store = SettingsStore::new(MemoryStorage::new());
        let err = store.save(None, &UserSettings::default()).unwrap_err();
        assert!(matches!(err, StoreError::NotSignedIn));
    }
}
