//! Authenticated spellcheck from the usage page.

use api::{ApiError, Backend, SpellcheckRequest};
use store::Language;
use thiserror::Error;

use crate::demo::{now_millis, CheckResult};
use crate::session::{forget_if_rejected, refresh_profile, SessionHandle};
use crate::validation::{spellcheck_text, ValidationError};

#[derive(Clone, Debug, PartialEq, Error)]
pub enum TesterError {
    #[error("Please log in to test the API")]
    NotSignedIn,
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Check `text` with the user's token, then refresh the profile so the usage
/// counters include this request.
pub async fn run_usage_test<B: Backend, H: SessionHandle>(
    backend: &B,
    session: &H,
    text: &str,
    language: Language,
) -> Result<CheckResult, TesterError> {
    let Some((token, generation)) = session.credentials() else {
        return Err(TesterError::NotSignedIn);
    };
    let text = spellcheck_text(text)?;
    let started = now_millis();
    let response = match backend
        .spellcheck(Some(&token), &SpellcheckRequest { text, language })
        .await
    {
        Ok(response) => response,
        Err(e) => {
            forget_if_rejected(session, generation, &e);
            return Err(e.into());
        }
    };
    let elapsed_ms = now_millis() - started;

    if let Err(e) = refresh_profile(backend, session).await {
        tracing::warn!("profile refresh after test failed: {}", e);
    }
    Ok(CheckResult {
        corrected: response.corrected,
        elapsed_ms,
        tokens_used: response.tokens_used,
        corrections: response.corrections_made,
    })
}
