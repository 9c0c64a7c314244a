use async_trait::async_trait;
use pgvector::Vector;
use uuid::Uuid;

use crate::domain::entities::DocumentChunk;

#[derive(Debug)]
pub enum ChunkRepositoryError {
    DatabaseError(String),
}

impl std::fmt::Display for ChunkRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChunkRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for ChunkRepositoryError {}

/// A chunk with its cosine similarity to the query vector (1.0 = identical).
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    pub chunk: DocumentChunk,
    pub score: f32,
}

#[async_trait]
pub trait ChunkRepository: Send + Sync {
    async fn save_batch(&self, chunks: &[DocumentChunk]) -> Result<(), ChunkRepositoryError>;

    /// K nearest chunks by cosine distance, constrained to the tenant and
    /// equipment scope inside the query itself.
    async fn similarity_search(
        &self,
        query_embedding: &Vector,
        tenant_id: &str,
        equipment_id: Uuid,
        k: i64,
    ) -> Result<Vec<ScoredChunk>, ChunkRepositoryError>;

    async fn delete_by_equipment(
        &self,
        equipment_id: Uuid,
    ) -> Result<usize, ChunkRepositoryError>;
}
