//! HTTP implementation of [`Backend`](crate::Backend).
//!
//! Requests carry `Content-Type: application/json` and, when a token is
//! given, `Authorization: Bearer <token>`. Responses are read as text and
//! handed to [`decode_response`], which is pure and holds all of the status
//! and envelope handling.

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use store::{ClientConfig, Language, SubscriptionType, UserRecord};

use crate::backend::Backend;
use crate::error::ApiError;
use crate::models::{
    ApiKeyResponse, AuthPayload, CheckoutRequest, CheckoutSession, Credentials, HealthStatus,
    LanguageKeyRequest, LanguageKeys, SpellcheckRequest, SpellcheckResponse, UpgradeRequest,
    UpgradeResponse,
};
use crate::oauth::{self, OAuthProvider};

#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// `base_url` is expected to be normalised already (see
    /// [`store::config::normalize_base_url`]).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.api.base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> String {
        let path = path.trim();
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    pub fn authorize_url(&self, provider: OAuthProvider, redirect_uri: &str) -> String {
        oauth::authorize_url(&self.base_url, provider, redirect_uri)
    }

    async fn send<Req, Res>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<&Req>,
    ) -> Result<Res, ApiError>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        let url = self.endpoint(path);
        tracing::debug!("{} {}", method, url);

        let mut request = self
            .http
            .request(method, url.as_str())
            .header("Content-Type", "application/json");
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!("request to {} failed: {}", path, e);
            ApiError::from(e)
        })?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        decode_response(status, &text, token.is_some())
    }

    async fn get<Res: DeserializeOwned>(&self, path: &str, token: Option<&str>) -> Result<Res, ApiError> {
        self.send::<(), Res>(Method::GET, path, token, None).await
    }

    async fn post<Req, Res>(&self, path: &str, token: Option<&str>, body: &Req) -> Result<Res, ApiError>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        self.send(Method::POST, path, token, Some(body)).await
    }
}

impl Backend for ApiClient {
    async fn login(&self, credentials: &Credentials) -> Result<AuthPayload, ApiError> {
        self.post("/login", None, credentials).await
    }

    async fn register(&self, credentials: &Credentials) -> Result<AuthPayload, ApiError> {
        self.post("/register", None, credentials).await
    }

    async fn me(&self, token: &str) -> Result<UserRecord, ApiError> {
        self.get("/me", Some(token)).await
    }

    async fn spellcheck(
        &self,
        token: Option<&str>,
        request: &SpellcheckRequest,
    ) -> Result<SpellcheckResponse, ApiError> {
        self.post("/spellcheck", token, request).await
    }

    async fn generate_api_key(&self, token: &str) -> Result<ApiKeyResponse, ApiError> {
        self.send::<(), _>(Method::POST, "/generate-api-key", Some(token), None)
            .await
    }

    async fn upgrade_plan(
        &self,
        token: &str,
        plan: SubscriptionType,
    ) -> Result<UpgradeResponse, ApiError> {
        self.post("/upgrade-plan", Some(token), &UpgradeRequest { plan_type: plan })
            .await
    }

    async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.get("/health", None).await
    }

    async fn language_keys(&self, token: &str) -> Result<LanguageKeys, ApiError> {
        self.get("/api/user-language-keys", Some(token)).await
    }

    async fn create_language_key(
        &self,
        token: &str,
        language: Language,
    ) -> Result<ApiKeyResponse, ApiError> {
        self.post("/api/create-language-key", Some(token), &LanguageKeyRequest { language })
            .await
    }

    async fn regenerate_language_key(
        &self,
        token: &str,
        language: Language,
    ) -> Result<ApiKeyResponse, ApiError> {
        self.post(
            "/api/regenerate-language-key",
            Some(token),
            &LanguageKeyRequest { language },
        )
        .await
    }

    async fn delete_language_key(&self, token: &str, language: Language) -> Result<(), ApiError> {
        let _: Value = self
            .send(
                Method::DELETE,
                "/api/delete-language-key",
                Some(token),
                Some(&LanguageKeyRequest { language }),
            )
            .await?;
        Ok(())
    }

    async fn create_checkout_session(
        &self,
        token: &str,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, ApiError> {
        self.post("/create-checkout-session", Some(token), request)
            .await
    }
}

/// Turn a status code and body into a typed result.
///
/// - 2xx: the body is parsed as JSON (empty means `null`); a `data` object,
///   when present, replaces the outer document.
/// - 401 on an authenticated request: [`ApiError::Unauthorized`].
/// - any other failure: [`ApiError::Rejected`] with the backend's message.
pub fn decode_response<T: DeserializeOwned>(
    status: u16,
    body: &str,
    authenticated: bool,
) -> Result<T, ApiError> {
    if !(200..300).contains(&status) {
        if status == 401 && authenticated {
            return Err(ApiError::Unauthorized);
        }
        let message = error_message(body)
            .unwrap_or_else(|| format!("request failed with status {status}"));
        return Err(ApiError::Rejected { status, message });
    }

    let value = if body.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str::<Value>(body)?
    };
    Ok(serde_json::from_value(unwrap_envelope(value))?)
}

fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut map) if matches!(map.get("data"), Some(Value::Object(_))) => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// First of `error`, `detail`, `message` in a JSON body, else the raw body.
pub fn error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    let Ok(Value::Object(map)) = serde_json::from_str::<Value>(trimmed) else {
        return Some(trimmed.to_string());
    };
    ["error", "detail", "message"]
        .iter()
        .filter_map(|field| map.get(*field))
        .find_map(|value| match value {
            Value::Null => None,
            Value::String(s) if s.trim().is_empty() => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        })
        .or_else(|| Some(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint() {
        let client = ApiClient::new("https://api.framespell.de/");
        assert_eq!(client.endpoint("/me"), "https://api.framespell.de/me");
        assert_eq!(client.endpoint("health"), "https://api.framespell.de/health");
    }

    #[test]
    fn test_decode_unwraps_data_envelope() {
        let user: UserRecord = decode_response(
            200,
            r#"{"success": true, "data": {"id": "u1", "email": "a@b.de"}}"#,
            true,
        )
        .unwrap();
        assert_eq!(user.id, "u1");

        let plain: UserRecord = decode_response(200, r#"{"id": 7, "email": "a@b.de"}"#, true).unwrap();
        assert_eq!(plain.id, "7");
    }

    #[test]
    fn test_decode_empty_body() {
        let value: Value = decode_response(204, "", true).unwrap();
        assert_eq!(value, Value::Null);
    }

    #[test]
    fn test_unauthorized_only_for_authenticated_requests() {
        let err = decode_response::<Value>(401, r#"{"error": "Invalid token"}"#, true).unwrap_err();
        assert_eq!(err, ApiError::Unauthorized);

        let err = decode_response::<Value>(401, r#"{"error": "Wrong password"}"#, false).unwrap_err();
        assert_eq!(
            err,
            ApiError::Rejected {
                status: 401,
                message: "Wrong password".into()
            }
        );
    }

    #[test]
    fn test_error_message_precedence() {
        assert_eq!(
            error_message(r#"{"detail": "d", "error": "e"}"#).as_deref(),
            Some("e")
        );
        assert_eq!(error_message(r#"{"detail": "d", "message": "m"}"#).as_deref(), Some("d"));
        assert_eq!(error_message(r#"{"message": "m"}"#).as_deref(), Some("m"));
        assert_eq!(error_message("Bad Gateway").as_deref(), Some("Bad Gateway"));
        assert_eq!(
            error_message(r#"{"code": 3}"#).as_deref(),
            Some(r#"{"code": 3}"#)
        );
        assert_eq!(error_message("  "), None);
    }

    #[test]
    fn test_malformed_success_body_is_decode_error() {
        let err = decode_response::<UserRecord>(200, "<html>", true).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
