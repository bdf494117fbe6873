//! Semantic ranking engine
//!
//! Ranks candidate documents against a query by cosine similarity of
//! their embeddings. The degradation contract is the load-bearing part:
//! a ranking call never fails because of the provider. A failed query
//! embedding returns the candidates in input order; a failed candidate
//! embedding drops only that candidate.

use futures_util::future::join_all;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use crate::documents::types::{Document, DocumentId, SimilarityResult};
use crate::provider::{EmbeddingProvider, EmbeddingVector};
use crate::search::similarity::cosine_similarity;
use crate::telemetry::{TelemetryCollector, TelemetryEvent};

/// Ranking parameters
#[derive(Debug, Clone)]
pub struct RankingParams {
    /// Candidates with similarity at or below this value are excluded.
    /// The comparison is strict: exactly the threshold is out.
    pub threshold: f32,
}

impl Default for RankingParams {
    fn default() -> Self {
        Self { threshold: 0.2 }
    }
}

/// Semantic ranking engine over an injected embedding capability.
///
/// Stateless per request apart from the embedding cache, which is keyed
/// by (document id, content hash) so a stale vector can never be served
/// after a content edit.
pub struct SemanticRanker {
    provider: Arc<dyn EmbeddingProvider>,
    params: RankingParams,
    cache: Mutex<HashMap<(DocumentId, u64), EmbeddingVector>>,
    telemetry: TelemetryCollector,
}

impl SemanticRanker {
    /// Create a ranker with default parameters
    pub fn new(provider: Arc<dyn EmbeddingProvider>, telemetry: TelemetryCollector) -> Self {
        Self::with_params(provider, telemetry, RankingParams::default())
    }

    /// Create a ranker with custom parameters
    pub fn with_params(
        provider: Arc<dyn EmbeddingProvider>,
        telemetry: TelemetryCollector,
        params: RankingParams,
    ) -> Self {
        Self {
            provider,
            params,
            cache: Mutex::new(HashMap::new()),
            telemetry,
        }
    }

    /// Rank candidates against the query, best match first.
    ///
    /// Returns documents only; similarity scores stay internal. Ties
    /// keep their input order. Never fails: provider trouble degrades
    /// the result instead.
    pub async fn rank(&self, query: &str, candidates: Vec<Document>) -> Vec<Document> {
        if candidates.is_empty() {
            return candidates;
        }

        // The query embedding gates everything else. Failure here is the
        // documented fallback path: hand the candidates back unordered.
        let query_vec = match self.provider.embed(query).await {
            Ok(vec) => vec,
            Err(_) => {
                self.telemetry.record(TelemetryEvent::ProviderFallback {
                    query_len: query.len(),
                    timestamp: Instant::now(),
                });
                return candidates;
            }
        };

        // Candidate embeddings are independent; fan them out concurrently.
        let embeddings = join_all(
            candidates
                .iter()
                .map(|doc| self.candidate_embedding(doc)),
        )
        .await;

        let mut scored: Vec<SimilarityResult> = candidates
            .into_iter()
            .zip(embeddings)
            .filter_map(|(document, embedding)| {
                embedding.map(|vec| SimilarityResult {
                    score: cosine_similarity(&query_vec, &vec),
                    document,
                })
            })
            .filter(|result| result.score > self.params.threshold)
            .collect();

        // Stable sort: equal scores keep their input order
        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        scored.into_iter().map(|r| r.document).collect()
    }

    /// Embedding for one candidate, via the content-hash cache.
    ///
    /// Returns `None` when the provider fails for this candidate; the
    /// caller excludes it from ranking.
    async fn candidate_embedding(&self, document: &Document) -> Option<EmbeddingVector> {
        let content_hash = Self::content_hash(&document.content);
        let key = (document.id, content_hash);

        {
            let cache = self.cache.lock().unwrap();
            if let Some(vec) = cache.get(&key) {
                self.telemetry.record(TelemetryEvent::CacheHit {
                    document_id: document.id,
                    timestamp: Instant::now(),
                });
                return Some(vec.clone());
            }
        }

        match self.provider.embed(&document.content).await {
            Ok(vec) => {
                let mut cache = self.cache.lock().unwrap();
                // Entries for superseded content of this document are dead
                cache.retain(|(id, _), _| *id != document.id);
                cache.insert(key, vec.clone());
                self.telemetry.record(TelemetryEvent::CacheMiss {
                    document_id: document.id,
                    timestamp: Instant::now(),
                });
                Some(vec)
            }
            Err(_) => {
                self.telemetry.record(TelemetryEvent::CandidateSkipped {
                    document_id: document.id,
                    timestamp: Instant::now(),
                });
                None
            }
        }
    }

    /// Number of cached embeddings
    pub fn cache_len(&self) -> usize {
        self.cache.lock().unwrap().len()
    }

    /// Drop all cached embeddings
    pub fn clear_cache(&self) {
        self.cache.lock().unwrap().clear();
    }

    /// Current ranking parameters
    pub fn params(&self) -> &RankingParams {
        &self.params
    }

    fn content_hash(content: &str) -> u64 {
        let mut hasher = DefaultHasher::new();
        content.hash(&mut hasher);
        hasher.finish()
    }
}
