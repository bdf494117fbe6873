//! Ollama-backed AI provider
//!
//! HTTP client for the embeddings and generation endpoints:
//! - POST /api/embeddings
//! - POST /api/generate (stream=false)
//!
//! One long-lived client is built at startup from configuration and
//! shared via `Arc`; nothing on it mutates at runtime.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::ProviderConfig;
use crate::errors::ProviderError;
use crate::provider::{EmbeddingProvider, EmbeddingVector, GenerationProvider};

/// HTTP client for an Ollama-style provider API
#[derive(Debug, Clone)]
pub struct OllamaProvider {
    client: Client,
    base_url: String,
    text_model: String,
    embedding_model: String,
    request_timeout: Duration,
    embed_timeout: Duration,
}

#[derive(Debug, Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    embedding: Vec<f32>,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaProvider {
    /// Create a provider client from configuration
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ProviderError::Unreachable(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            text_model: config.text_model.clone(),
            embedding_model: config.embedding_model.clone(),
            request_timeout: Duration::from_secs(config.request_timeout_secs),
            embed_timeout: Duration::from_secs(config.embed_timeout_secs),
        })
    }

    /// Check if the provider is reachable
    pub async fn is_available(&self) -> bool {
        let url = format!("{}/api/tags", self.base_url);
        self.client
            .get(&url)
            .timeout(Duration::from_secs(2))
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    /// Get the base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn classify(&self, err: reqwest::Error, timeout: Duration) -> ProviderError {
        if err.is_timeout() {
            ProviderError::Timeout {
                duration_ms: timeout.as_millis() as u64,
            }
        } else if err.is_connect() {
            ProviderError::Unreachable(err.to_string())
        } else {
            ProviderError::Malformed(err.to_string())
        }
    }

    async fn check_status(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ProviderError> {
        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaProvider {
    async fn embed(&self, text: &str) -> Result<EmbeddingVector, ProviderError> {
        let url = format!("{}/api/embeddings", self.base_url);

        let request = EmbeddingsRequest {
            model: &self.embedding_model,
            prompt: text,
        };

        let response = self
            .client
            .post(&url)
            .timeout(self.embed_timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.classify(e, self.embed_timeout))?;

        let response = Self::check_status(response).await?;

        let body: EmbeddingsResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;

        if body.embedding.is_empty() {
            return Err(ProviderError::Malformed(
                "provider returned an empty embedding".to_string(),
            ));
        }

        Ok(body.embedding)
    }
}

#[async_trait]
impl GenerationProvider for OllamaProvider {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let url = format!("{}/api/generate", self.base_url);

        let request = GenerateRequest {
            model: &self.text_model,
            prompt,
            stream: false,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.classify(e, self.request_timeout))?;

        let response = Self::check_status(response).await?;

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;

        Ok(body.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> ProviderConfig {
        ProviderConfig::default()
    }

    #[test]
    fn test_client_creation() {
        let provider = OllamaProvider::new(&test_config()).unwrap();
        assert_eq!(provider.base_url(), "http://127.0.0.1:11434");
    }

    #[test]
    fn test_client_custom_url() {
        let config = ProviderConfig {
            base_url: "http://localhost:8080".to_string(),
            ..ProviderConfig::default()
        };
        let provider = OllamaProvider::new(&config).unwrap();
        assert_eq!(provider.base_url(), "http://localhost:8080");
    }

    #[tokio::test]
    #[ignore] // Requires the provider service running
    async fn test_embed_integration() {
        let provider = OllamaProvider::new(&test_config()).unwrap();
        let embedding = provider.embed("hello world").await.unwrap();
        assert!(!embedding.is_empty());
    }

    #[tokio::test]
    #[ignore] // Requires the provider service running
    async fn test_is_available_integration() {
        let provider = OllamaProvider::new(&test_config()).unwrap();
        assert!(provider.is_available().await);
    }
}
