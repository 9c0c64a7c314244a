use std::sync::Arc;

use uuid::Uuid;

use crate::application::ports::EmbeddingProvider;
use crate::domain::repositories::{ChunkRepository, ScoredChunk};

#[derive(Debug)]
pub enum RetrievalError {
    EmbeddingError(String),
    RepositoryError(String),
}

impl std::fmt::Display for RetrievalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RetrievalError::EmbeddingError(msg) => write!(f, "Embedding error: {}", msg),
            RetrievalError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for RetrievalError {}

/// Scoped semantic search over an equipment's knowledge base.
///
/// Every query carries a tenant and an equipment id; the repository applies
/// both as hard filters so one tenant's chunks can never surface for another.
pub struct RetrievalService {
    embedding_provider: Arc<dyn EmbeddingProvider>,
    chunk_repository: Arc<dyn ChunkRepository>,
    top_k: i64,
    min_score: Option<f32>,
}

impl RetrievalService {
    pub fn new(
        embedding_provider: Arc<dyn EmbeddingProvider>,
        chunk_repository: Arc<dyn ChunkRepository>,
        top_k: i64,
        min_score: Option<f32>,
    ) -> Self {
        Self {
            embedding_provider,
            chunk_repository,
            top_k,
            min_score,
        }
    }

    pub async fn retrieve(
        &self,
        query: &str,
        tenant_id: &str,
        equipment_id: Uuid,
    ) -> Result<Vec<ScoredChunk>, RetrievalError> {
        self.retrieve_top_k(query, tenant_id, equipment_id, self.top_k)
            .await
    }

    pub async fn retrieve_top_k(
        &self,
        query: &str,
        tenant_id: &str,
        equipment_id: Uuid,
        k: i64,
    ) -> Result<Vec<ScoredChunk>, RetrievalError> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let query_embedding = self
            .embedding_provider
            .embed_text(query)
            .await
            .map_err(|e| RetrievalError::EmbeddingError(e.to_string()))?;

        let mut results = self
            .chunk_repository
            .similarity_search(&query_embedding, tenant_id, equipment_id, k)
            .await
            .map_err(|e| RetrievalError::RepositoryError(e.to_string()))?;

        if let Some(min_score) = self.min_score {
            results.retain(|scored| scored.score >= min_score);
        }

        tracing::debug!(
            tenant_id,
            %equipment_id,
            results = results.len(),
            "Retrieval completed"
        );

        Ok(results)
    }

    /// Flatten retrieved chunks into a context block for prompt assembly.
    /// Chunks keep their ranked order and each is attributed to its file.
    pub fn format_context(results: &[ScoredChunk]) -> String {
        results
            .iter()
            .map(|scored| {
                format!(
                    "[Source: {}]\n{}",
                    scored.chunk.file_name(),
                    scored.chunk.chunk_text()
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pgvector::Vector;

    use crate::application::ports::embedding_provider::EmbeddingProviderError;
    use crate::domain::entities::{Document, DocumentChunk};
    use crate::domain::repositories::chunk_repository::ChunkRepositoryError;

    struct FixedEmbedder;

    #[async_trait]
    impl EmbeddingProvider for FixedEmbedder {
        async fn embed_text(&self, _text: &str) -> Result<Vector, EmbeddingProviderError> {
            Ok(Vector::from(vec![1.0, 0.0]))
        }

        async fn embed_batch(
            &self,
            texts: &[String],
        ) -> Result<Vec<Vector>, EmbeddingProviderError> {
            Ok(texts.iter().map(|_| Vector::from(vec![1.0, 0.0])).collect())
        }

        fn embedding_dimension(&self) -> usize {
            2
        }
    }

    struct CannedChunks {
        results: Vec<ScoredChunk>,
    }

    #[async_trait]
    impl ChunkRepository for CannedChunks {
        async fn save_batch(&self, _chunks: &[DocumentChunk]) -> Result<(), ChunkRepositoryError> {
            Ok(())
        }

        async fn similarity_search(
            &self,
            _query_embedding: &Vector,
            _tenant_id: &str,
            _equipment_id: Uuid,
            k: i64,
        ) -> Result<Vec<ScoredChunk>, ChunkRepositoryError> {
            Ok(self.results.iter().take(k as usize).cloned().collect())
        }

        async fn delete_by_equipment(
            &self,
            _equipment_id: Uuid,
        ) -> Result<usize, ChunkRepositoryError> {
            Ok(0)
        }
    }

    fn scored(text: &str, score: f32) -> ScoredChunk {
        let document = Document::new(
            Uuid::new_v4(),
            "tenant-a".to_string(),
            "manual.txt".to_string(),
            "text/plain".to_string(),
            128,
            None,
            "mvp_user".to_string(),
            "hash-manual".to_string(),
        );
        ScoredChunk {
            chunk: DocumentChunk::new(&document, 0, 0, text.to_string(), Vector::from(vec![1.0, 0.0])),
            score,
        }
    }

    #[tokio::test]
    async fn test_min_score_filters_weak_matches() {
        let repository = Arc::new(CannedChunks {
            results: vec![scored("strong", 0.92), scored("weak", 0.21)],
        });
        let service = RetrievalService::new(Arc::new(FixedEmbedder), repository, 5, Some(0.5));

        let results = service
            .retrieve("pump pressure", "tenant-a", Uuid::new_v4())
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].chunk.chunk_text(), "strong");
    }

    #[tokio::test]
    async fn test_empty_query_short_circuits() {
        let repository = Arc::new(CannedChunks {
            results: vec![scored("anything", 0.9)],
        });
        let service = RetrievalService::new(Arc::new(FixedEmbedder), repository, 5, None);

        let results = service
            .retrieve("   ", "tenant-a", Uuid::new_v4())
            .await
            .unwrap();

        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_top_k_limits_results() {
        let repository = Arc::new(CannedChunks {
            results: (0..10).map(|i| scored(&format!("chunk {}", i), 0.9)).collect(),
        });
        let service = RetrievalService::new(Arc::new(FixedEmbedder), repository, 3, None);

        let results = service
            .retrieve("valves", "tenant-a", Uuid::new_v4())
            .await
            .unwrap();

        assert_eq!(results.len(), 3);
    }

    #[test]
    fn test_format_context_attributes_sources() {
        let results = vec![scored("Prime the pump first.", 0.9)];
        let context = RetrievalService::format_context(&results);

        assert!(context.contains("[Source: manual.txt]"));
        assert!(context.contains("Prime the pump first."));
    }
}
