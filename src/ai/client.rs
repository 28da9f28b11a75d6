//! Mood analysis client
//!
//! One call per journal entry: build the prompt, send it through the
//! configured provider under a timeout, and coerce the reply. Every failure
//! comes back as an `AnalysisError`; the caller decides what to substitute.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::prompt::build_analysis_prompt;
use super::provider::SharedProvider;
use super::response::{AnalysisResult, parse_analysis_response};
use super::timeout::with_timeout;
use crate::constants::analysis::RESPONSE_PREVIEW_CHARS;
use crate::types::{AnalysisError, ErrorClassifier, preview};

/// Anything that can derive a mood from journal text
#[async_trait]
pub trait MoodAnalyzer: Send + Sync {
    /// Analyze one journal entry. Never returns a partial result.
    async fn analyze(&self, journal_text: &str) -> Result<AnalysisResult, AnalysisError>;
}

/// Provider-backed analyzer
pub struct AnalysisClient {
    provider: SharedProvider,
    timeout: Duration,
}

impl AnalysisClient {
    pub fn new(provider: SharedProvider, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    pub fn provider(&self) -> &SharedProvider {
        &self.provider
    }

    async fn analyze_inner(&self, journal_text: &str) -> Result<AnalysisResult, AnalysisError> {
        let provider_name = self.provider.name();
        let prompt = build_analysis_prompt(journal_text);

        let response = with_timeout(self.timeout, self.provider.complete(&prompt), "mood analysis")
            .await
            .map_err(|e| ErrorClassifier::classify_journal_error(e, provider_name))?;

        debug!(
            provider = provider_name,
            model = %response.metadata.model,
            elapsed_ms = response.timing.total_ms,
            "Raw analysis output: {}",
            preview(&response.text, RESPONSE_PREVIEW_CHARS)
        );

        parse_analysis_response(&response.text).map_err(|e| e.provider(provider_name))
    }
}

#[async_trait]
impl MoodAnalyzer for AnalysisClient {
    async fn analyze(&self, journal_text: &str) -> Result<AnalysisResult, AnalysisError> {
        let result = self.analyze_inner(journal_text).await;

        match &result {
            Ok(analysis) => debug!(
                provider = self.provider.name(),
                mood_score = analysis.mood_score,
                "Mood analysis succeeded"
            ),
            Err(e) => warn!(
                provider = self.provider.name(),
                kind = %e.kind,
                "Mood analysis failed: {}",
                e.message
            ),
        }

        result
    }
}

/// Stand-in used when no provider could be configured
///
/// Every call fails with a transport error, so the ingestor files the entry
/// with the fallback analysis.
#[derive(Debug, Clone)]
pub struct UnavailableAnalyzer {
    reason: String,
}

impl UnavailableAnalyzer {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl MoodAnalyzer for UnavailableAnalyzer {
    async fn analyze(&self, _journal_text: &str) -> Result<AnalysisResult, AnalysisError> {
        Err(AnalysisError::transport(format!(
            "no analysis provider: {}",
            self.reason
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::provider::{LlmProvider, LlmResponse};
    use crate::types::{AnalysisErrorKind, ErrorClassifier, JournalError, Result};
    use std::sync::{Arc, Mutex};

    /// Replies with a fixed outcome and records prompts
    struct ScriptedProvider {
        reply: std::result::Result<String, u16>,
        delay: Option<Duration>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedProvider {
        fn text(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                delay: None,
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn status(status: u16) -> Self {
            Self {
                reply: Err(status),
                delay: None,
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn slow(text: &str, delay: Duration) -> Self {
            Self {
                delay: Some(delay),
                ..Self::text(text)
            }
        }
    }

    #[async_trait]
    impl LlmProvider for ScriptedProvider {
        async fn complete(&self, prompt: &str) -> Result<LlmResponse> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            match &self.reply {
                Ok(text) => Ok(LlmResponse::text_only(text.clone())),
                Err(status) => Err(JournalError::from(ErrorClassifier::classify_http_status(
                    *status,
                    "upstream said no",
                    "scripted",
                ))),
            }
        }

        fn name(&self) -> &str {
            "scripted"
        }

        fn model(&self) -> &str {
            "scripted-1"
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }
    }

    fn client(provider: ScriptedProvider) -> (AnalysisClient, Arc<ScriptedProvider>) {
        let provider = Arc::new(provider);
        (
            AnalysisClient::new(provider.clone(), Duration::from_secs(10)),
            provider,
        )
    }

    #[tokio::test]
    async fn test_analyze_success_sends_one_prompt() {
        let (client, provider) = client(ScriptedProvider::text(
            "```json\n{\"mood_score\": 8, \"summary\": \"Great run.\"}\n```",
        ));

        let result = client.analyze("Went for a run").await.unwrap();
        assert_eq!(result.mood_score, 8);
        assert_eq!(result.summary.as_deref(), Some("Great run."));

        let prompts = provider.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Went for a run"));
    }

    #[tokio::test]
    async fn test_analyze_string_score() {
        let (client, _) = client(ScriptedProvider::text(
            r#"{"mood_score": "7", "summary": "ok"}"#,
        ));
        assert_eq!(client.analyze("x").await.unwrap().mood_score, 7);
    }

    #[tokio::test]
    async fn test_analyze_shape_error_carries_provider() {
        let (client, _) = client(ScriptedProvider::text(r#"{"mood_score": "notanumber"}"#));
        let err = client.analyze("x").await.unwrap_err();
        assert_eq!(err.kind, AnalysisErrorKind::ResponseShape);
        assert_eq!(err.provider.as_deref(), Some("scripted"));
    }

    #[tokio::test]
    async fn test_analyze_http_status_error() {
        let (client, _) = client(ScriptedProvider::status(503));
        let err = client.analyze("x").await.unwrap_err();
        assert_eq!(err.kind, AnalysisErrorKind::Status);
        assert_eq!(err.status, Some(503));
    }

    #[tokio::test]
    async fn test_analyze_timeout() {
        let provider = Arc::new(ScriptedProvider::slow(
            r#"{"mood_score": 5}"#,
            Duration::from_secs(1),
        ));
        let client = AnalysisClient::new(provider, Duration::from_millis(20));

        let err = client.analyze("x").await.unwrap_err();
        assert_eq!(err.kind, AnalysisErrorKind::Timeout);
    }

    #[tokio::test]
    async fn test_unavailable_analyzer_always_fails() {
        let analyzer = UnavailableAnalyzer::new("GEMINI_API_KEY not set");
        let err = analyzer.analyze("anything").await.unwrap_err();
        assert_eq!(err.kind, AnalysisErrorKind::Transport);
        assert!(err.message.contains("GEMINI_API_KEY"));
    }
}
