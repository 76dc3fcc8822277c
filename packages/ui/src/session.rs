//! # Session flows: restore, login, register, logout, profile refresh
//!
//! These functions are the only code that talks to the backend about the
//! session. They are generic over [`Backend`] and over a [`SessionHandle`], so
//! the same flow runs against a Dioxus signal in the app and against a plain
//! `Rc<RefCell<_>>` in tests.
//!
//! Every flow snapshots the store's generation before awaiting the network and
//! applies the response through the store's `_if_current` methods. A response
//! that lands after logout (or after someone else signed in) is dropped.

use std::cell::RefCell;
use std::rc::Rc;

use api::{ApiError, AuthPayload, Backend, Credentials, ErrorKind};
use dioxus::prelude::*;
use store::{KeyValueStore, SessionStore, UserRecord};

/// Shared access to a [`SessionStore`].
///
/// Borrows are kept inside the closures so no borrow is ever held across an
/// `.await`.
pub trait SessionHandle {
    type Storage: KeyValueStore;

    fn read_with<R>(&self, f: impl FnOnce(&SessionStore<Self::Storage>) -> R) -> R;
    fn write_with<R>(&self, f: impl FnOnce(&mut SessionStore<Self::Storage>) -> R) -> R;

    /// Token and generation of the current session, if signed in.
    fn credentials(&self) -> Option<(String, u64)> {
        self.read_with(|s| s.token().map(|t| (t.to_string(), s.generation())))
    }
}

/// Reads don't subscribe; writes notify every component reading the session.
impl<S: KeyValueStore + 'static> SessionHandle for Signal<SessionStore<S>> {
    type Storage = S;

    fn read_with<R>(&self, f: impl FnOnce(&SessionStore<S>) -> R) -> R {
        f(&self.peek())
    }

    fn write_with<R>(&self, f: impl FnOnce(&mut SessionStore<S>) -> R) -> R {
        let mut signal = *self;
        let mut guard = signal.write();
        f(&mut guard)
    }
}

impl<S: KeyValueStore> SessionHandle for Rc<RefCell<SessionStore<S>>> {
    type Storage = S;

    fn read_with<R>(&self, f: impl FnOnce(&SessionStore<S>) -> R) -> R {
        f(&self.borrow())
    }

    fn write_with<R>(&self, f: impl FnOnce(&mut SessionStore<S>) -> R) -> R {
        f(&mut self.borrow_mut())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RestoreOutcome {
    /// Nothing was persisted.
    Anonymous,
    /// The stored token is valid and the profile is fresh.
    Restored(UserRecord),
    /// The stored session was dropped; the error says why.
    Rejected(ApiError),
    /// The session changed while the profile was loading.
    Superseded,
}

/// Load the persisted session and validate it against `GET /me`.
///
/// Any failure purges the stored token; the app then starts anonymous.
pub async fn restore<B: Backend, H: SessionHandle>(backend: &B, session: &H) -> RestoreOutcome {
    let Some(token) = session.write_with(|s| s.load()) else {
        return RestoreOutcome::Anonymous;
    };
    let generation = session.read_with(|s| s.generation());

    match backend.me(&token).await {
        Ok(user) => {
            if session.write_with(|s| s.set_user_if_current(generation, user.clone())) {
                tracing::info!("restored session for {}", user.email);
                RestoreOutcome::Restored(user)
            } else {
                RestoreOutcome::Superseded
            }
        }
        Err(e) => {
            tracing::warn!("stored session rejected: {}", e);
            if session.write_with(|s| s.clear_if_current(generation)) {
                RestoreOutcome::Rejected(e)
            } else {
                RestoreOutcome::Superseded
            }
        }
    }
}

pub async fn login<B: Backend, H: SessionHandle>(
    backend: &B,
    session: &H,
    credentials: &Credentials,
) -> Result<UserRecord, ApiError> {
    let payload = backend.login(credentials).await?;
    establish(backend, session, payload).await
}

pub async fn register<B: Backend, H: SessionHandle>(
    backend: &B,
    session: &H,
    credentials: &Credentials,
) -> Result<UserRecord, ApiError> {
    let payload = backend.register(credentials).await?;
    establish(backend, session, payload).await
}

async fn establish<B: Backend, H: SessionHandle>(
    backend: &B,
    session: &H,
    payload: AuthPayload,
) -> Result<UserRecord, ApiError> {
    let user = match payload.user {
        Some(user) => user,
        None => backend.me(&payload.token).await?,
    };
    session.write_with(|s| s.install(payload.token, user.clone()));
    tracing::info!("signed in as {}", user.email);
    Ok(user)
}

/// Forget the session. Safe to call when already signed out.
pub fn logout<H: SessionHandle>(session: &H) {
    session.write_with(|s| s.clear());
    tracing::info!("signed out");
}

/// Re-fetch the profile. `Ok(None)` when signed out or when the session
/// changed while the request was in flight.
pub async fn refresh_profile<B: Backend, H: SessionHandle>(
    backend: &B,
    session: &H,
) -> Result<Option<UserRecord>, ApiError> {
    let Some((token, generation)) = session.credentials() else {
        return Ok(None);
    };
    match backend.me(&token).await {
        Ok(user) => {
            let applied = session.write_with(|s| s.set_user_if_current(generation, user.clone()));
            Ok(applied.then_some(user))
        }
        Err(e) => {
            forget_if_rejected(session, generation, &e);
            Err(e)
        }
    }
}

/// Drop the session when `error` means its token was refused.
pub fn forget_if_rejected<H: SessionHandle>(session: &H, generation: u64, error: &ApiError) -> bool {
    if error.kind() != ErrorKind::AuthRejected {
        return false;
    }
    let cleared = session.write_with(|s| s.clear_if_current(generation));
    if cleared {
        tracing::warn!("token rejected, session cleared");
    }
    cleared
}
