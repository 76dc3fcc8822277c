//! # [`Backend`] trait: one method per endpoint the dashboard uses
//!
//! Controllers in the `ui` crate are generic over this trait. The browser build
//! uses [`ApiClient`](crate::ApiClient); tests plug in a scripted mock that
//! records each call, which is how "no request was sent" is asserted.
//!
//! Methods taking `token` send it as a bearer credential. A 401 on such a
//! request comes back as [`ApiError::Unauthorized`].

use std::future::Future;

use store::{Language, SubscriptionType, UserRecord};

use crate::error::ApiError;
use crate::models::{
    ApiKeyResponse, AuthPayload, CheckoutRequest, CheckoutSession, Credentials, HealthStatus,
    LanguageKeys, SpellcheckRequest, SpellcheckResponse, UpgradeResponse,
};

pub trait Backend {
    fn login(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<AuthPayload, ApiError>>;
    fn register(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<AuthPayload, ApiError>>;
    fn me(&self, token: &str) -> impl Future<Output = Result<UserRecord, ApiError>>;
    /// Anonymous (demo) checks pass `None`.
    fn spellcheck(
        &self,
        token: Option<&str>,
        request: &SpellcheckRequest,
    ) -> impl Future<Output = Result<SpellcheckResponse, ApiError>>;
    /// Replace the account-wide API key.
    fn generate_api_key(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<ApiKeyResponse, ApiError>>;
    fn upgrade_plan(
        &self,
        token: &str,
        plan: SubscriptionType,
    ) -> impl Future<Output = Result<UpgradeResponse, ApiError>>;
    fn health(&self) -> impl Future<Output = Result<HealthStatus, ApiError>>;
    fn language_keys(&self, token: &str) -> impl Future<Output = Result<LanguageKeys, ApiError>>;
    fn create_language_key(
        &self,
        token: &str,
        language: Language,
    ) -> impl Future<Output = Result<ApiKeyResponse, ApiError>>;
    fn regenerate_language_key(
        &self,
        token: &str,
        language: Language,
    ) -> impl Future<Output = Result<ApiKeyResponse, ApiError>>;
    fn delete_language_key(
        &self,
        token: &str,
        language: Language,
    ) -> impl Future<Output = Result<(), ApiError>>;
    fn create_checkout_session(
        &self,
        token: &str,
        request: &CheckoutRequest,
    ) -> impl Future<Output = Result<CheckoutSession, ApiError>>;
}
