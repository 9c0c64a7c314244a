use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::repositories::ScoredChunk;

#[derive(Debug, Deserialize)]
pub struct RetrievalRequestDto {
    pub query: String,
    /// Falls back to the equipment's own tenant when absent.
    pub tenant_id: Option<String>,
    pub top_k: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct RetrievedChunkDto {
    pub chunk_id: Uuid,
    pub document_id: Uuid,
    pub file_name: String,
    pub chunk_index: i32,
    pub text: String,
    pub score: f32,
}

#[derive(Debug, Serialize)]
pub struct RetrievalResponseDto {
    pub query: String,
    pub results: Vec<RetrievedChunkDto>,
    pub context: String,
    pub total_results: usize,
    pub search_time_ms: u64,
}

impl From<ScoredChunk> for RetrievedChunkDto {
    fn from(scored: ScoredChunk) -> Self {
        Self {
            chunk_id: scored.chunk.id(),
            document_id: scored.chunk.document_id(),
            file_name: scored.chunk.file_name().to_string(),
            chunk_index: scored.chunk.chunk_index(),
            text: scored.chunk.chunk_text().to_string(),
            score: scored.score,
        }
    }
}
