//! # API key lifecycle
//!
//! Two kinds of keys are managed from the dashboard:
//!
//! - the **account key** (`UserRecord::api_key`), replaced by
//!   `POST /generate-api-key`;
//! - one **language key** per [`Language`], created, regenerated or deleted
//!   through the `/api/*-language-key` endpoints.
//!
//! Regenerating and deleting invalidate a key other systems may be using, so
//! both ask a [`Confirm`] first. A declined confirmation sends nothing.

use api::{ApiError, Backend, KeyUsage, LanguageKeys};
use store::Language;

use crate::session::{forget_if_rejected, SessionHandle};

/// Yes/no question to the user.
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Create,
    Regenerate,
    Delete,
}

impl KeyAction {
    pub fn needs_confirmation(&self) -> bool {
        !matches!(self, KeyAction::Create)
    }

    pub fn prompt(&self, language: Language) -> String {
        match self {
            KeyAction::Create => format!("Create an API key for {}?", language.display_name()),
            KeyAction::Regenerate => format!(
                "Regenerate the {} API key? The current key stops working immediately.",
                language.display_name()
            ),
            KeyAction::Delete => format!(
                "Delete the {} API key? This cannot be undone.",
                language.display_name()
            ),
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            KeyAction::Create => "API key created",
            KeyAction::Regenerate => "API key regenerated",
            KeyAction::Delete => "API key deleted",
        }
    }
}

/// What the key card for one language shows.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum KeySlot {
    #[default]
    Loading,
    Missing,
    Present {
        key: String,
        usage: Option<KeyUsage>,
    },
}

impl KeySlot {
    pub fn from_keys(keys: &LanguageKeys, language: Language) -> Self {
        match keys.key(language) {
            Some(key) => KeySlot::Present {
                key: key.to_string(),
                usage: keys.usage(language).cloned(),
            },
            None => KeySlot::Missing,
        }
    }

    pub fn key(&self) -> Option<&str> {
        match self {
            KeySlot::Present { key, .. } => Some(key),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum KeyOutcome {
    /// The user declined; nothing was sent.
    Cancelled,
    /// Signed out meanwhile; nothing was sent or the answer was dropped.
    SignedOut,
    /// The slot's new state.
    Updated(KeySlot),
}

pub async fn load_language_keys<B: Backend, H: SessionHandle>(
    backend: &B,
    session: &H,
) -> Result<Option<LanguageKeys>, ApiError> {
    let Some((token, generation)) = session.credentials() else {
        return Ok(None);
    };
    match backend.language_keys(&token).await {
        Ok(keys) if session.read_with(|s| s.generation()) == generation => Ok(Some(keys)),
        Ok(_) => Ok(None),
        Err(e) => {
            forget_if_rejected(session, generation, &e);
            Err(e)
        }
    }
}

pub async fn run_key_action<B: Backend, H: SessionHandle, C: Confirm>(
    backend: &B,
    session: &H,
    confirm: &C,
    action: KeyAction,
    language: Language,
) -> Result<KeyOutcome, ApiError> {
    if action.needs_confirmation() && !confirm.confirm(&action.prompt(language)) {
        tracing::debug!("{:?} of {} key cancelled", action, language);
        return Ok(KeyOutcome::Cancelled);
    }
    let Some((token, generation)) = session.credentials() else {
        return Ok(KeyOutcome::SignedOut);
    };

    let result = match action {
        KeyAction::Create => backend
            .create_language_key(&token, language)
            .await
            .map(|r| KeySlot::Present {
                key: r.api_key,
                usage: None,
            }),
        KeyAction::Regenerate => backend
            .regenerate_language_key(&token, language)
            .await
            .map(|r| KeySlot::Present {
                key: r.api_key,
                usage: None,
            }),
        KeyAction::Delete => backend
            .delete_language_key(&token, language)
            .await
            .map(|()| KeySlot::Missing),
    };

    match result {
        Ok(_) if session.read_with(|s| s.generation()) != generation => Ok(KeyOutcome::SignedOut),
        Ok(slot) => {
            tracing::info!("{:?} of {} key succeeded", action, language);
            Ok(KeyOutcome::Updated(slot))
        }
        Err(e) => {
            forget_if_rejected(session, generation, &e);
            Err(e)
        }
    }
}

/// Replace the account key. Returns the new key once it is stored in the
/// session, `None` if cancelled or signed out.
pub async fn regenerate_account_key<B: Backend, H: SessionHandle, C: Confirm>(
    backend: &B,
    session: &H,
    confirm: &C,
) -> Result<Option<String>, ApiError> {
    if !confirm.confirm("Regenerate your API key? The current key stops working immediately.") {
        return Ok(None);
    }
    let Some((token, generation)) = session.credentials() else {
        return Ok(None);
    };
    match backend.generate_api_key(&token).await {
        Ok(response) => {
            let stored = session
                .write_with(|s| s.set_api_key_if_current(generation, response.api_key.clone()));
            Ok(stored.then_some(response.api_key))
        }
        Err(e) => {
            forget_if_rejected(session, generation, &e);
            Err(e)
        }
    }
}
