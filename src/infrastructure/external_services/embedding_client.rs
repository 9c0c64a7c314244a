use async_trait::async_trait;
use pgvector::Vector;
use reqwest::{Client, Error as ReqwestError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::embedding_provider::{EmbeddingProvider, EmbeddingProviderError};

#[derive(Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: Vec<&'a str>,
}

#[derive(Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[derive(Debug, Clone)]
pub struct EmbeddingClientConfig {
    pub service_url: String,
    pub model: String,
    pub dimension: usize,
    pub max_retries: u32,
    pub timeout_secs: u64,
    pub backoff_factor: f64,
}

impl EmbeddingClientConfig {
    pub fn new(service_url: String, model: String, dimension: usize) -> Self {
        Self {
            service_url,
            model,
            dimension,
            max_retries: 3,
            timeout_secs: 30,
            backoff_factor: 1.5,
        }
    }
}

/// HTTP client for an OpenAI-compatible embeddings endpoint. Transient
/// failures are retried with exponential backoff before giving up.
pub struct EmbeddingClient {
    client: Client,
    config: EmbeddingClientConfig,
}

impl EmbeddingClient {
    pub fn new(config: EmbeddingClientConfig) -> Result<Self, ReqwestError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    async fn request_embeddings(
        &self,
        inputs: Vec<&str>,
    ) -> Result<Vec<Vector>, EmbeddingProviderError> {
        let request = EmbeddingsRequest {
            model: &self.config.model,
            input: inputs,
        };

        let mut attempts = 0;

        loop {
            attempts += 1;

            let error = match self.execute_request(&request).await {
                Ok(embeddings) => return Ok(embeddings),
                Err(e) => e,
            };

            if attempts > self.config.max_retries {
                tracing::error!(attempts, error = %error, "Embedding request gave up");
                return Err(error);
            }

            let backoff = Duration::from_millis(
                (self.config.backoff_factor.powi(attempts as i32 - 1) * 1000.0) as u64,
            );
            tracing::warn!(attempts, error = %error, "Retrying embedding request");
            tokio::time::sleep(backoff).await;
        }
    }

    async fn execute_request(
        &self,
        request: &EmbeddingsRequest<'_>,
    ) -> Result<Vec<Vector>, EmbeddingProviderError> {
        let response = self
            .client
            .post(&self.config.service_url)
            .json(request)
            .send()
            .await
            .map_err(|e| EmbeddingProviderError::NetworkError(e.without_url().to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingProviderError::ApiError(format!(
                "{}: {}",
                status, body
            )));
        }

        let parsed = response
            .json::<EmbeddingsResponse>()
            .await
            .map_err(|e| EmbeddingProviderError::ApiError(e.to_string()))?;

        Ok(parsed
            .data
            .into_iter()
            .map(|d| Vector::from(d.embedding))
            .collect())
    }
}

#[async_trait]
impl EmbeddingProvider for EmbeddingClient {
    async fn embed_text(&self, text: &str) -> Result<Vector, EmbeddingProviderError> {
        if text.trim().is_empty() {
            return Err(EmbeddingProviderError::InvalidInput(
                "Cannot embed empty text".to_string(),
            ));
        }

        let mut embeddings = self.request_embeddings(vec![text]).await?;
        embeddings
            .pop()
            .ok_or_else(|| EmbeddingProviderError::ApiError("No embeddings returned".to_string()))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vector>, EmbeddingProviderError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        self.request_embeddings(texts.iter().map(String::as_str).collect())
            .await
    }

    fn embedding_dimension(&self) -> usize {
        self.config.dimension
    }
}
