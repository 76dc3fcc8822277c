//! # Session store: the single owner of the bearer token and user record
//!
//! [`SessionStore`] is the only way to read or change the session. Every
//! mutation goes through one of its methods, which keep memory and the
//! persisted copy in step (a later write always overwrites an earlier one).
//!
//! ## Generations
//!
//! Network responses can arrive after the user has logged out or signed in as
//! someone else. Callers capture [`SessionStore::generation`] before issuing a
//! request and hand it back when applying the response; methods ending in
//! `_if_current` drop the update when the generation has moved on. The
//! generation advances whenever the session identity changes: on
//! [`install`](SessionStore::install) and on [`clear`](SessionStore::clear).
//!
//! ## Persisted format
//!
//! The `{token, user}` pair is stored as one JSON document under
//! [`AUTH_TOKEN_KEY`]. A bare token string (the format written by older
//! builds) is still accepted on restore; its user is fetched afterwards.

use serde::{Deserialize, Serialize};

use crate::models::UserRecord;
use crate::storage::{KeyValueStore, AUTH_TOKEN_KEY};

/// The client's record of who is signed in.
///
/// `user` is only exposed while a token is present.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    token: Option<String>,
    user: Option<UserRecord>,
}

impl Session {
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&UserRecord> {
        self.token.as_ref().and(self.user.as_ref())
    }

    /// A token and a user record are both present.
    pub fn is_authenticated(&self) -> bool {
        self.user().is_some()
    }
}

#[derive(Serialize, Deserialize)]
struct PersistedSession {
    token: String,
    #[serde(default)]
    user: Option<UserRecord>,
}

/// Session plus its persistence and generation counter.
#[derive(Clone, Debug)]
pub struct SessionStore<S> {
    storage: S,
    session: Session,
    generation: u64,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            session: Session::default(),
            generation: 0,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn token(&self) -> Option<&str> {
        self.session.token()
    }

    pub fn user(&self) -> Option<&UserRecord> {
        self.session.user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Load the persisted session into memory and return its token.
    ///
    /// A cached user record is shown immediately; callers are expected to
    /// re-fetch the profile to validate the token.
    pub fn load(&mut self) -> Option<String> {
        let raw = self.storage.get(AUTH_TOKEN_KEY)?;
        let raw = raw.trim();
        if raw.is_empty() {
            self.storage.remove(AUTH_TOKEN_KEY);
            return None;
        }

        let persisted = match serde_json::from_str::<PersistedSession>(raw) {
            Ok(persisted) => persisted,
            Err(_) if !raw.starts_with('{') => PersistedSession {
                token: raw.trim_matches('"').to_string(),
                user: None,
            },
            Err(e) => {
                tracing::warn!("discarding unreadable persisted session: {}", e);
                self.storage.remove(AUTH_TOKEN_KEY);
                return None;
            }
        };

        self.session = Session {
            token: Some(persisted.token.clone()),
            user: persisted.user,
        };
        Some(persisted.token)
    }

    /// Replace the session after a successful login, registration or OAuth
    /// callback.
    pub fn install(&mut self, token: String, user: UserRecord) {
        self.generation += 1;
        self.session = Session {
            token: Some(token),
            user: Some(user),
        };
        self.persist();
    }

    /// Apply a re-fetched profile, unless the session changed meanwhile.
    pub fn set_user_if_current(&mut self, generation: u64, user: UserRecord) -> bool {
        if !self.accepts(generation) {
            return false;
        }
        if self.session.user.as_ref() != Some(&user) {
            self.session.user = Some(user);
            self.persist();
        }
        true
    }

    /// Apply a freshly issued account API key, unless the session changed.
    pub fn set_api_key_if_current(&mut self, generation: u64, api_key: String) -> bool {
        if !self.accepts(generation) {
            return false;
        }
        let Some(user) = self.session.user.as_mut() else {
            return false;
        };
        user.api_key = Some(api_key);
        self.persist();
        true
    }

    /// Drop the session because the backend rejected its token, unless the
    /// rejection belongs to an older session.
    pub fn clear_if_current(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        self.clear();
        true
    }

    /// Forget the session in memory and in storage. Idempotent.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.session = Session::default();
        self.storage.remove(AUTH_TOKEN_KEY);
    }

    fn accepts(&self, generation: u64) -> bool {
        if generation != self.generation || self.session.token.is_none() {
            tracing::debug!(
                "discarding stale response (generation {} != {})",
                generation,
                self.generation
            );
            return false;
        }
        true
    }

    fn persist(&self) {
        let Some(token) = self.session.token.clone() else {
            self.storage.remove(AUTH_TOKEN_KEY);
            return;
        };
        let persisted = PersistedSession {
            token,
            user: self.session.user.clone(),
        };
        match serde_json::to_string(&persisted) {
            Ok(json) => self.storage.set(AUTH_TOKEN_KEY, &json),
            Err(e) => tracing::error!("failed to serialize session: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStorage;
    use crate::models::SubscriptionType;

    fn user(id: &str) -> UserRecord {
        UserRecord {
            id: id.to_string(),
            email: format!("{id}@example.com"),
            subscription_type: SubscriptionType::Free,
            api_key: Some("key-1".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_install_persists_and_reload_restores() {
        let storage = MemoryStorage::new();
        let mut store = SessionStore::new(storage.clone());
        store.install("tok".to_string(), user("u1"));
        assert!(store.is_authenticated());

        let mut reloaded = SessionStore::new(storage);
        assert_eq!(reloaded.load().as_deref(), Some("tok"));
        assert_eq!(reloaded.user().map(|u| u.id.as_str()), Some("u1"));
    }

    #[test]
    fn test_clear_purges_storage_and_is_idempotent() {
        let storage = MemoryStorage::new();
        let mut store = SessionStore::new(storage.clone());
        store.install("tok".to_string(), user("u1"));

        store.clear();
        store.clear();
        assert!(!store.is_authenticated());
        assert!(store.token().is_none());
        assert!(storage.get(AUTH_TOKEN_KEY).is_none());

        let mut reloaded = SessionStore::new(storage);
        assert!(reloaded.load().is_none());
        assert!(!reloaded.is_authenticated());
    }

    #[test]
    fn test_bare_token_is_accepted() {
        let storage = MemoryStorage::new();
        storage.set(AUTH_TOKEN_KEY, "legacy-token");
        let mut store = SessionStore::new(storage);
        assert_eq!(store.load().as_deref(), Some("legacy-token"));
        assert_eq!(store.token(), Some("legacy-token"));
        assert!(store.user().is_none());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_corrupt_json_is_discarded() {
        let storage = MemoryStorage::new();
        storage.set(AUTH_TOKEN_KEY, "{not json");
        let mut store = SessionStore::new(storage.clone());
        assert!(store.load().is_none());
        assert!(storage.get(AUTH_TOKEN_KEY).is_none());
    }

    #[test]
    fn test_stale_profile_after_logout_is_discarded() {
        let storage = MemoryStorage::new();
        let mut store = SessionStore::new(storage.clone());
        store.install("tok".to_string(), user("u1"));
        let generation = store.generation();

        store.clear();
        assert!(!store.set_user_if_current(generation, user("u1")));
        assert!(!store.is_authenticated());
        assert!(storage.get(AUTH_TOKEN_KEY).is_none());
    }

    #[test]
    fn test_stale_rejection_does_not_clear_new_session() {
        let mut store = SessionStore::new(MemoryStorage::new());
        store.install("old".to_string(), user("u1"));
        let old_generation = store.generation();
        store.install("new".to_string(), user("u2"));

        assert!(!store.clear_if_current(old_generation));
        assert_eq!(store.token(), Some("new"));
        assert!(store.clear_if_current(store.generation()));
        assert!(store.token().is_none());
    }

    #[test]
    fn test_profile_refresh_updates_user() {
        let mut store = SessionStore::new(MemoryStorage::new());
        store.install("tok".to_string(), user("u1"));
        let mut fresh = user("u1");
        fresh.tokens_used_today = 12;

        assert!(store.set_user_if_current(store.generation(), fresh));
        assert_eq!(store.user().map(|u| u.tokens_used_today), Some(12));
    }

    #[test]
    fn test_api_key_update() {
        let mut store = SessionStore::new(MemoryStorage::new());
        store.install("tok".to_string(), user("u1"));
        assert!(store.set_api_key_if_current(store.generation(), "key-2".to_string()));
        assert_eq!(store.user().and_then(|u| u.api_key.as_deref()), Some("key-2"));
    }
}
