//! # OAuth bridge
//!
//! After a provider login the backend redirects back to this site with
//! `oauth_token` and `user_data` (URL-encoded user JSON) in the query string.
//!
//! Startup is sequenced explicitly: the provider creates the session store
//! and the view registry first, then runs [`bootstrap`], which consults
//! [`startup_plan`] and either installs the callback session or restores the
//! persisted one. A malformed callback is reported and the session is left
//! exactly as storage had it.

use api::oauth::{TOKEN_PARAM, USER_DATA_PARAM};
use api::Backend;
use store::UserRecord;
use thiserror::Error;

use crate::session::{restore, RestoreOutcome, SessionHandle};

#[derive(Clone, Debug, PartialEq, Error)]
pub enum OAuthError {
    #[error("sign-in response did not include a token")]
    MissingToken,
    #[error("sign-in response did not include user data")]
    MissingUserData,
    #[error("sign-in user data is not valid URL encoding: {0}")]
    Encoding(String),
    #[error("sign-in user data is not a valid user: {0}")]
    InvalidUser(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct OAuthCallback {
    pub token: String,
    pub user: UserRecord,
}

/// Percent-decode a query component, treating `+` as a space.
fn decode_component(raw: &str) -> Result<String, OAuthError> {
    urlencoding::decode(&raw.replace('+', " "))
        .map(|s| s.into_owned())
        .map_err(|e| OAuthError::Encoding(e.to_string()))
}

fn query_pairs(query: &str) -> impl Iterator<Item = (&str, &str)> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
}

fn is_callback_param(key: &str) -> bool {
    key == TOKEN_PARAM || key == USER_DATA_PARAM
}

/// `None` when the query carries no callback at all.
pub fn parse_callback(query: &str) -> Option<Result<OAuthCallback, OAuthError>> {
    let mut token = None;
    let mut user_data = None;
    for (key, value) in query_pairs(query) {
        match key {
            TOKEN_PARAM => token = Some(value),
            USER_DATA_PARAM => user_data = Some(value),
            _ => {}
        }
    }
    let token = token?;
    Some(decode_callback(token, user_data))
}

fn decode_callback(token: &str, user_data: Option<&str>) -> Result<OAuthCallback, OAuthError> {
    let token = decode_component(token)?;
    if token.trim().is_empty() {
        return Err(OAuthError::MissingToken);
    }
    let raw = user_data
        .filter(|v| !v.is_empty())
        .ok_or(OAuthError::MissingUserData)?;

    // The backend encodes the JSON before putting it in the query, so it
    // usually arrives encoded twice.
    let mut json = decode_component(raw)?;
    if !json.trim_start().starts_with('{') {
        json = decode_component(&json)?;
    }
    let user: UserRecord =
        serde_json::from_str(&json).map_err(|e| OAuthError::InvalidUser(e.to_string()))?;
    Ok(OAuthCallback {
        token: token.trim().to_string(),
        user,
    })
}

/// The query string with the callback parameters removed (`""` or `?a=b`).
pub fn strip_callback_params(query: &str) -> String {
    let kept: Vec<&str> = query
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter(|pair| !is_callback_param(pair.split_once('=').map_or(*pair, |(k, _)| k)))
        .collect();
    if kept.is_empty() {
        String::new()
    } else {
        format!("?{}", kept.join("&"))
    }
}

/// What startup does, in order.
#[derive(Clone, Debug, PartialEq)]
pub enum StartupStep {
    InstallCallback(OAuthCallback),
    ReportCallbackError(OAuthError),
    RestoreSession,
}

pub fn startup_plan(query: &str) -> Vec<StartupStep> {
    match parse_callback(query) {
        // The callback session replaces whatever was stored.
        Some(Ok(callback)) => vec![StartupStep::InstallCallback(callback)],
        Some(Err(e)) => vec![StartupStep::ReportCallbackError(e), StartupStep::RestoreSession],
        None => vec![StartupStep::RestoreSession],
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StartupReport {
    /// Set when a callback session was installed.
    pub signed_in_via_oauth: Option<UserRecord>,
    pub oauth_error: Option<OAuthError>,
    pub restore: Option<RestoreOutcome>,
    /// Whether the address bar still shows callback parameters.
    pub strip_url: bool,
}

/// Run the startup plan for `query` against the session.
pub async fn bootstrap<B: Backend, H: SessionHandle>(
    backend: &B,
    session: &H,
    query: &str,
) -> StartupReport {
    let mut report = StartupReport::default();
    for step in startup_plan(query) {
        match step {
            StartupStep::InstallCallback(callback) => {
                tracing::info!("completing oauth sign-in for {}", callback.user.email);
                session.write_with(|s| s.install(callback.token, callback.user.clone()));
                report.signed_in_via_oauth = Some(callback.user);
                report.strip_url = true;
            }
            StartupStep::ReportCallbackError(e) => {
                tracing::error!("oauth callback rejected: {}", e);
                report.oauth_error = Some(e);
                report.strip_url = true;
            }
            StartupStep::RestoreSession => {
                report.restore = Some(restore(backend, session).await);
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{shared_session, MockBackend};
    use store::storage::AUTH_TOKEN_KEY;
    use store::KeyValueStore;

    const USER_JSON: &str = r#"{"id":5,"email":"oauth@example.com","subscription_type":"free"}"#;

    fn callback_query(user_json: &str) -> String {
        let once = urlencoding::encode(user_json).into_owned();
        let twice = urlencoding::encode(&once).into_owned();
        format!("?oauth_token=tok-123&user_data={twice}&ref=mail")
    }

    #[test]
    fn test_parse_double_encoded_payload() {
        let callback = parse_callback(&callback_query(USER_JSON)).unwrap().unwrap();
        assert_eq!(callback.token, "tok-123");
        assert_eq!(callback.user.id, "5");
    }

    #[test]
    fn test_parse_single_encoded_payload() {
        let query = format!(
            "oauth_token=t&user_data={}",
            urlencoding::encode(USER_JSON)
        );
        assert!(parse_callback(&query).unwrap().is_ok());
    }

    #[test]
    fn test_no_callback() {
        assert!(parse_callback("?ref=mail").is_none());
        assert!(parse_callback("").is_none());
    }

    #[test]
    fn test_malformed_payloads() {
        assert_eq!(
            parse_callback("?oauth_token=t").unwrap(),
            Err(OAuthError::MissingUserData)
        );
        assert!(matches!(
            parse_callback("?oauth_token=t&user_data=%7Bnot-json").unwrap(),
            Err(OAuthError::InvalidUser(_))
        ));
        assert!(matches!(
            parse_callback("?oauth_token=t&user_data=%E0%A4%A").unwrap(),
            Err(OAuthError::Encoding(_))
        ));
    }

    #[test]
    fn test_strip_params() {
        assert_eq!(strip_callback_params(&callback_query(USER_JSON)), "?ref=mail");
        assert_eq!(strip_callback_params("?oauth_token=a&user_data=b"), "");
    }

    #[tokio::test]
    async fn test_wellformed_callback_signs_in() {
        let backend = MockBackend::new();
        let (storage, session) = shared_session();

        let report = bootstrap(&backend, &session, &callback_query(USER_JSON)).await;

        assert!(report.strip_url);
        assert_eq!(
            report.signed_in_via_oauth.map(|u| u.email),
            Some("oauth@example.com".to_string())
        );
        assert!(session.borrow().is_authenticated());
        assert_eq!(session.borrow().token(), Some("tok-123"));
        assert!(storage.get(AUTH_TOKEN_KEY).is_some());
        // No restore round-trip for the old session.
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_malformed_callback_leaves_session_untouched() {
        let backend = MockBackend::new();
        let (storage, session) = shared_session();
        let generation = session.borrow().generation();

        let report = bootstrap(&backend, &session, "?oauth_token=t&user_data=%7Bbroken").await;

        assert!(matches!(report.oauth_error, Some(OAuthError::InvalidUser(_))));
        assert_eq!(report.restore, Some(RestoreOutcome::Anonymous));
        assert!(!session.borrow().is_authenticated());
        assert_eq!(session.borrow().generation(), generation);
        assert!(storage.get(AUTH_TOKEN_KEY).is_none());
    }

    #[test]
    fn test_plan_order() {
        assert_eq!(startup_plan(""), vec![StartupStep::RestoreSession]);
        let plan = startup_plan("?oauth_token=t");
        assert!(matches!(plan[0], StartupStep::ReportCallbackError(_)));
        assert_eq!(plan[1], StartupStep::RestoreSession);
    }
}
