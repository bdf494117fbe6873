//! AI provider capabilities
//!
//! The knowledge base talks to one remote AI service for two things:
//! embeddings (semantic search) and text generation (summaries, tags,
//! question answering). Both are modeled as injectable capabilities so
//! the ranking and enrichment code never touches HTTP directly and
//! tests can supply deterministic in-process implementations.

pub mod client;

use async_trait::async_trait;

use crate::errors::ProviderError;

/// Fixed-length numeric vector representation of a text
pub type EmbeddingVector = Vec<f32>;

/// Capability: turn text into an embedding vector.
///
/// Calls are potentially slow (network round trip) and fail
/// independently per call.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, text: &str) -> Result<EmbeddingVector, ProviderError>;
}

/// Capability: generate free-form text from a prompt
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;
}

pub use client::OllamaProvider;
