//! Telemetry for search and enrichment operations
//!
//! In-process event collection with aggregate counters. Events are kept
//! in memory for inspection; nothing is shipped anywhere.

use std::sync::{Arc, Mutex};
use std::time::Instant;

/// Telemetry event types
#[derive(Debug, Clone)]
pub enum TelemetryEvent {
    /// Query embedding failed, ranking degraded to input order
    ProviderFallback {
        query_len: usize,
        timestamp: Instant,
    },
    /// A candidate was dropped because its embedding call failed
    CandidateSkipped {
        document_id: uuid::Uuid,
        timestamp: Instant,
    },
    /// Embedding served from the content-hash cache
    CacheHit {
        document_id: uuid::Uuid,
        timestamp: Instant,
    },
    /// Embedding recomputed and cached
    CacheMiss {
        document_id: uuid::Uuid,
        timestamp: Instant,
    },
    /// A search finished
    SearchCompleted {
        semantic: bool,
        candidates: usize,
        results: usize,
        duration_ms: u64,
        timestamp: Instant,
    },
    /// An enrichment call degraded to its fallback output
    EnrichmentFallback {
        operation: String,
        timestamp: Instant,
    },
}

/// Aggregate telemetry counters
#[derive(Debug, Clone, Default)]
pub struct TelemetryStats {
    pub searches_completed: usize,
    pub provider_fallbacks: usize,
    pub candidates_skipped: usize,
    pub cache_hits: usize,
    pub cache_misses: usize,
    pub enrichment_fallbacks: usize,
}

/// Telemetry collector, cheap to clone and share
#[derive(Clone)]
pub struct TelemetryCollector {
    events: Arc<Mutex<Vec<TelemetryEvent>>>,
    stats: Arc<Mutex<TelemetryStats>>,
}

impl TelemetryCollector {
    /// Create a new telemetry collector
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            stats: Arc::new(Mutex::new(TelemetryStats::default())),
        }
    }

    /// Record an event
    pub fn record(&self, event: TelemetryEvent) {
        {
            let mut stats = self.stats.lock().unwrap();
            match &event {
                TelemetryEvent::ProviderFallback { .. } => {
                    stats.provider_fallbacks += 1;
                }
                TelemetryEvent::CandidateSkipped { .. } => {
                    stats.candidates_skipped += 1;
                }
                TelemetryEvent::CacheHit { .. } => {
                    stats.cache_hits += 1;
                }
                TelemetryEvent::CacheMiss { .. } => {
                    stats.cache_misses += 1;
                }
                TelemetryEvent::SearchCompleted { .. } => {
                    stats.searches_completed += 1;
                }
                TelemetryEvent::EnrichmentFallback { .. } => {
                    stats.enrichment_fallbacks += 1;
                }
            }
        }

        let mut events = self.events.lock().unwrap();
        events.push(event);
    }

    /// Get current statistics
    pub fn stats(&self) -> TelemetryStats {
        self.stats.lock().unwrap().clone()
    }

    /// Get a copy of all recorded events
    pub fn events(&self) -> Vec<TelemetryEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Clear events and counters
    pub fn reset(&self) {
        self.events.lock().unwrap().clear();
        *self.stats.lock().unwrap() = TelemetryStats::default();
    }
}

impl Default for TelemetryCollector {
    fn default() -> Self {
        Self::new()
    }
}
