//! Anonymous demo spellcheck with a per-page-load attempt budget.
//!
//! The budget is a soft limit kept in memory only; a reload starts over. When
//! it reaches zero the check is refused before any request goes out.

use api::{ApiError, Backend, Correction, SpellcheckRequest};
use store::Language;
use thiserror::Error;

use crate::validation::{spellcheck_text, ValidationError};

#[derive(Clone, Debug, PartialEq, Error)]
pub enum DemoError {
    #[error("No demo attempts left. Sign up to keep checking text.")]
    Exhausted,
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DemoGate {
    remaining: u32,
}

impl DemoGate {
    pub fn new(attempts: u32) -> Self {
        Self {
            remaining: attempts,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// Count one completed check.
    pub fn record_completed(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    pub fn button_label(&self) -> &'static str {
        if self.is_exhausted() {
            "Demo limit reached"
        } else {
            "Check text"
        }
    }
}

/// Result of a spellcheck shown in the demo and the usage tester.
#[derive(Clone, Debug, PartialEq)]
pub struct CheckResult {
    pub corrected: String,
    pub elapsed_ms: i64,
    pub tokens_used: Option<u64>,
    pub corrections: Vec<Correction>,
}

impl CheckResult {
    pub fn correction_lines(&self) -> Vec<String> {
        self.corrections
            .iter()
            .map(|c| {
                if c.kind.is_empty() {
                    format!("\"{}\" → \"{}\"", c.original, c.corrected)
                } else {
                    format!("\"{}\" → \"{}\" ({})", c.original, c.corrected, c.kind)
                }
            })
            .collect()
    }
}

pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Run one demo check if the gate allows it.
///
/// The gate is not touched here; callers call
/// [`DemoGate::record_completed`] on success.
pub async fn run_demo_check<B: Backend>(
    backend: &B,
    gate: DemoGate,
    text: &str,
    language: Language,
) -> Result<CheckResult, DemoError> {
    if gate.is_exhausted() {
        return Err(DemoError::Exhausted);
    }
    let text = spellcheck_text(text)?;
    let started = now_millis();
    let response = backend
        .spellcheck(None, &SpellcheckRequest { text, language })
        .await?;
    Ok(CheckResult {
        corrected: response.corrected,
        elapsed_ms: now_millis() - started,
        tokens_used: response.tokens_used,
        corrections: response.corrections_made,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockBackend;
    use api::SpellcheckResponse;

    fn answer() -> Result<SpellcheckResponse, ApiError> {
        Ok(SpellcheckResponse {
            corrected: "Hallo Welt".into(),
            tokens_used: Some(2),
            corrections_made: vec![],
        })
    }

    #[tokio::test]
    async fn test_three_attempts_then_refused_without_request() {
        let backend = MockBackend::new();
        let mut gate = DemoGate::new(3);
        for expected_left in [2, 1, 0] {
            backend.on_spellcheck(answer());
            run_demo_check(&backend, gate, "Helo Welt", Language::De)
                .await
                .unwrap();
            gate.record_completed();
            assert_eq!(gate.remaining(), expected_left);
        }

        let err = run_demo_check(&backend, gate, "Helo Welt", Language::De)
            .await
            .unwrap_err();
        assert_eq!(err, DemoError::Exhausted);
        assert_eq!(backend.call_count(), 3);
        assert_eq!(gate.button_label(), "Demo limit reached");
    }

    #[tokio::test]
    async fn test_demo_is_anonymous() {
        let backend = MockBackend::new();
        backend.on_spellcheck(answer());
        run_demo_check(&backend, DemoGate::new(3), "Helo", Language::En)
            .await
            .unwrap();
        assert_eq!(backend.tokens(), vec![None]);
        assert_eq!(backend.args(), vec!["en"]);
    }

    #[tokio::test]
    async fn test_empty_text_sends_nothing() {
        let backend = MockBackend::new();
        let err = run_demo_check(&backend, DemoGate::new(3), "   ", Language::De)
            .await
            .unwrap_err();
        assert_eq!(err, DemoError::Invalid(ValidationError::EmptyText));
        assert_eq!(backend.call_count(), 0);
    }

    #[test]
    fn test_correction_lines() {
        let result = CheckResult {
            corrected: String::new(),
            elapsed_ms: 0,
            tokens_used: None,
            corrections: vec![Correction {
                original: "Helo".into(),
                corrected: "Hallo".into(),
                kind: "spelling".into(),
            }],
        };
        assert_eq!(result.correction_lines(), vec!["\"Helo\" → \"Hallo\" (spelling)"]);
    }
}
