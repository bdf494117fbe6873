//! AI enrichment: summaries, tags and question answering
//!
//! Every operation degrades to a harmless literal on provider failure;
//! callers never see a provider error through this module.

use std::sync::Arc;
use std::time::Instant;

use crate::documents::types::Document;
use crate::provider::GenerationProvider;
use crate::telemetry::{TelemetryCollector, TelemetryEvent};

/// Content is cut to this many chars before summarization
const SUMMARY_CONTENT_LIMIT: usize = 10_000;

/// Content is cut to this many chars before tag extraction
const TAG_CONTENT_LIMIT: usize = 5_000;

/// Per-document content chars included in question-answering context
const ANSWER_CONTEXT_LIMIT: usize = 1_000;

/// Maximum number of tags kept per document
const MAX_TAGS: usize = 5;

const SUMMARY_EMPTY: &str = "No content available for summarization.";
const SUMMARY_FAILED: &str = "Summary could not be generated.";
const ANSWER_FAILED: &str = "Sorry, I could not process your question at this time.";

/// Enrichment operations over an injected generation capability
pub struct Enricher {
    provider: Arc<dyn GenerationProvider>,
    telemetry: TelemetryCollector,
}

impl Enricher {
    /// Create a new enricher
    pub fn new(provider: Arc<dyn GenerationProvider>, telemetry: TelemetryCollector) -> Self {
        Self {
            provider,
            telemetry,
        }
    }

    /// Generate a 2-3 sentence summary of the content.
    ///
    /// Empty content and provider failures both yield fixed fallback
    /// strings rather than errors.
    pub async fn summarize(&self, content: &str) -> String {
        if content.trim().is_empty() {
            return SUMMARY_EMPTY.to_string();
        }

        let limited = truncate_chars(content, SUMMARY_CONTENT_LIMIT);
        let prompt = format!(
            "Please provide a concise summary (2-3 sentences) of the following text:\n\n{}\n\nSummary:",
            limited
        );

        match self.provider.generate(&prompt).await {
            Ok(text) => text.trim().to_string(),
            Err(_) => {
                self.record_fallback("summarize");
                SUMMARY_FAILED.to_string()
            }
        }
    }

    /// Extract up to five comma-separated tags from the content.
    ///
    /// Empty content and provider failures yield an empty tag list.
    pub async fn suggest_tags(&self, content: &str) -> Vec<String> {
        if content.trim().is_empty() {
            return Vec::new();
        }

        let limited = truncate_chars(content, TAG_CONTENT_LIMIT);
        let prompt = format!(
            "Extract 3-5 relevant tags (comma-separated) from the following text. Return only the tags, no other text:\n\n{}",
            limited
        );

        match self.provider.generate(&prompt).await {
            Ok(text) => text
                .trim()
                .split(',')
                .map(|tag| tag.trim().to_string())
                .filter(|tag| !tag.is_empty())
                .take(MAX_TAGS)
                .collect(),
            Err(_) => {
                self.record_fallback("suggest_tags");
                Vec::new()
            }
        }
    }

    /// Answer a question using the given documents as context.
    ///
    /// Provider failures yield a fixed apology string.
    pub async fn answer(&self, question: &str, documents: &[Document]) -> String {
        let context = documents
            .iter()
            .map(|doc| {
                format!(
                    "Document: {}\nContent: {}...",
                    doc.title,
                    truncate_chars(&doc.content, ANSWER_CONTEXT_LIMIT)
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n");

        let prompt = format!(
            "Based on the following documents, please answer the question. If the answer cannot be found in the documents, say so.\n\nContext:\n{}\n\nQuestion: {}\n\nAnswer:",
            context, question
        );

        match self.provider.generate(&prompt).await {
            Ok(text) => text,
            Err(_) => {
                self.record_fallback("answer");
                ANSWER_FAILED.to_string()
            }
        }
    }

    fn record_fallback(&self, operation: &str) {
        self.telemetry.record(TelemetryEvent::EnrichmentFallback {
            operation: operation.to_string(),
            timestamp: Instant::now(),
        });
    }
}

/// Truncate to at most `limit` chars, appending "..." when cut.
///
/// Operates on char boundaries so multi-byte text never panics.
fn truncate_chars(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }

    let cut: String = text.chars().take(limit).collect();
    format!("{}...", cut)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::types::UserRef;
    use crate::errors::ProviderError;
    use async_trait::async_trait;

    struct ScriptedProvider {
        response: Option<String>,
    }

    impl ScriptedProvider {
        fn replies(text: &str) -> Self {
            Self {
                response: Some(text.to_string()),
            }
        }

        fn down() -> Self {
            Self { response: None }
        }
    }

    #[async_trait]
    impl GenerationProvider for ScriptedProvider {
        async fn generate(&self, _prompt: &str) -> Result<String, ProviderError> {
            self.response
                .clone()
                .ok_or_else(|| ProviderError::Unreachable("down".to_string()))
        }
    }

    fn enricher(provider: ScriptedProvider) -> Enricher {
        Enricher::new(Arc::new(provider), TelemetryCollector::new())
    }

    #[tokio::test]
    async fn test_summarize_trims_response() {
        let e = enricher(ScriptedProvider::replies("  A summary.  "));
        assert_eq!(e.summarize("some content").await, "A summary.");
    }

    #[tokio::test]
    async fn test_summarize_empty_content() {
        let e = enricher(ScriptedProvider::replies("unused"));
        assert_eq!(e.summarize("   ").await, SUMMARY_EMPTY);
    }

    #[tokio::test]
    async fn test_summarize_provider_failure() {
        let e = enricher(ScriptedProvider::down());
        assert_eq!(e.summarize("content").await, SUMMARY_FAILED);
    }

    #[tokio::test]
    async fn test_tags_parsed_and_capped() {
        let e = enricher(ScriptedProvider::replies(
            "rust, search, , embeddings ,ranking, async, extra",
        ));
        let tags = e.suggest_tags("content").await;
        assert_eq!(tags, vec!["rust", "search", "embeddings", "ranking", "async"]);
    }

    #[tokio::test]
    async fn test_tags_empty_content_and_failure() {
        let e = enricher(ScriptedProvider::replies("unused"));
        assert!(e.suggest_tags("").await.is_empty());

        let e = enricher(ScriptedProvider::down());
        assert!(e.suggest_tags("content").await.is_empty());
    }

    #[tokio::test]
    async fn test_answer_provider_failure() {
        let e = enricher(ScriptedProvider::down());
        let docs = vec![Document::new(
            "T".to_string(),
            "c".to_string(),
            UserRef::member("tester"),
        )];
        assert_eq!(e.answer("why?", &docs).await, ANSWER_FAILED);
    }

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate_chars("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_long_text_appends_ellipsis() {
        assert_eq!(truncate_chars("hello world", 5), "hello...");
    }

    #[test]
    fn test_truncate_multibyte_safe() {
        let text = "héllo wörld ünïcode";
        let cut = truncate_chars(text, 7);
        assert!(cut.starts_with("héllo w"));
        assert!(cut.ends_with("..."));
    }
}
