//! Search over the document corpus
//!
//! Two modes behind one request type: semantic (embedding-based ranking
//! via the [`SemanticRanker`]) and keyword (case-insensitive literal
//! match). The corpus is fetched fully materialized by the caller and
//! handed in per request.

pub mod keyword;
pub mod semantic;
pub mod similarity;

pub use semantic::{RankingParams, SemanticRanker};
pub use similarity::cosine_similarity;

use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::documents::types::Document;
use crate::errors::Result;
use crate::telemetry::{TelemetryCollector, TelemetryEvent};

/// A search request: `{query, semantic}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Query text
    pub query: String,
    /// Use semantic ranking instead of keyword matching
    #[serde(default)]
    pub semantic: bool,
}

/// A search response: `{documents}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Matching documents, best first for semantic searches
    pub documents: Vec<Document>,
}

/// Search service dispatching between semantic and keyword modes
pub struct SearchService {
    ranker: SemanticRanker,
    telemetry: TelemetryCollector,
}

impl SearchService {
    /// Create a search service around a ranking engine
    pub fn new(ranker: SemanticRanker, telemetry: TelemetryCollector) -> Self {
        Self { ranker, telemetry }
    }

    /// Execute a search over the given candidates.
    ///
    /// Semantic searches never fail due to provider trouble; they
    /// degrade per the ranking engine's contract.
    pub async fn search(
        &self,
        request: &SearchRequest,
        candidates: Vec<Document>,
    ) -> Result<SearchResponse> {
        let start = Instant::now();
        let candidate_count = candidates.len();

        let documents = if request.semantic {
            self.ranker.rank(&request.query, candidates).await
        } else {
            keyword::keyword_filter(&request.query, candidates)?
        };

        self.telemetry.record(TelemetryEvent::SearchCompleted {
            semantic: request.semantic,
            candidates: candidate_count,
            results: documents.len(),
            duration_ms: start.elapsed().as_millis() as u64,
            timestamp: Instant::now(),
        });

        Ok(SearchResponse { documents })
    }

    /// The underlying ranking engine
    pub fn ranker(&self) -> &SemanticRanker {
        &self.ranker
    }
}
