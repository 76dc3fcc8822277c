//! # API crate: typed client for the FrameSpell backend
//!
//! Every request the dashboard makes goes through this crate. The UI never
//! touches `reqwest` directly; it talks to the [`Backend`] trait, which
//! [`ApiClient`] implements over HTTP and tests implement with a scripted mock.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`backend`] | The [`Backend`] trait: one async method per endpoint |
//! | [`client`] | [`ApiClient`], JSON request building, bearer auth, response decoding |
//! | [`error`] | [`ApiError`] and its mapping onto user-facing [`ErrorKind`]s |
//! | [`models`] | Request and response bodies |
//! | [`oauth`] | Supported OAuth providers and the authorize-URL format |
//!
//! ## Endpoints
//!
//! - **Auth**: `POST /login`, `POST /register`, `GET /me`
//! - **Spellcheck**: `POST /spellcheck`
//! - **Account**: `POST /generate-api-key`, `POST /upgrade-plan`, `POST /create-checkout-session`
//! - **Language keys**: `GET /api/user-language-keys`, `POST /api/create-language-key`,
//!   `POST /api/regenerate-language-key`, `DELETE /api/delete-language-key`
//! - **Ops**: `GET /health`

pub mod backend;
pub mod client;
pub mod error;
pub mod models;
pub mod oauth;

pub use backend::Backend;
pub use client::ApiClient;
pub use error::{ApiError, ErrorKind};
pub use models::{
    ApiKeyResponse, AuthPayload, CheckoutRequest, CheckoutSession, Correction, Credentials,
    HealthStatus, KeyUsage, LanguageKeys, SpellcheckRequest, SpellcheckResponse, UpgradeResponse,
};
pub use oauth::OAuthProvider;
