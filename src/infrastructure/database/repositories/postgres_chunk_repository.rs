use async_trait::async_trait;
use diesel::prelude::*;
use pgvector::{Vector, VectorExpressionMethods};
use uuid::Uuid;

use crate::domain::entities::DocumentChunk;
use crate::domain::repositories::{
    ChunkRepository, ScoredChunk, chunk_repository::ChunkRepositoryError,
};
use crate::infrastructure::database::models::{DocumentChunkModel, NewDocumentChunkModel};
use crate::infrastructure::database::schema::document_chunks::dsl::*;
use crate::infrastructure::database::{DbPool, get_connection_from_pool};

pub struct PostgresChunkRepository {
    pool: DbPool,
}

impl PostgresChunkRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChunkRepository for PostgresChunkRepository {
    async fn save_batch(&self, chunks: &[DocumentChunk]) -> Result<(), ChunkRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ChunkRepositoryError::DatabaseError(e.to_string()))?;

        let new_chunks: Vec<NewDocumentChunkModel> =
            chunks.iter().map(NewDocumentChunkModel::from).collect();

        diesel::insert_into(document_chunks)
            .values(&new_chunks)
            .execute(&mut conn)
            .map_err(|e| ChunkRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn similarity_search(
        &self,
        query_embedding: &Vector,
        tenant: &str,
        equipment: Uuid,
        k: i64,
    ) -> Result<Vec<ScoredChunk>, ChunkRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ChunkRepositoryError::DatabaseError(e.to_string()))?;

        // Scope filters are part of the SQL so an out-of-scope chunk can
        // never reach the application layer.
        let rows = document_chunks
            .filter(tenant_id.eq(tenant))
            .filter(equipment_id.eq(equipment))
            .select((
                DocumentChunkModel::as_select(),
                embedding.cosine_distance(query_embedding.clone()),
            ))
            .order(embedding.cosine_distance(query_embedding.clone()))
            .limit(k)
            .load::<(DocumentChunkModel, f64)>(&mut conn)
            .map_err(|e| ChunkRepositoryError::DatabaseError(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(model, distance)| ScoredChunk {
                chunk: DocumentChunk::from(model),
                score: similarity(distance),
            })
            .collect())
    }

    async fn delete_by_equipment(&self, equipment: Uuid) -> Result<usize, ChunkRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ChunkRepositoryError::DatabaseError(e.to_string()))?;

        diesel::delete(document_chunks.filter(equipment_id.eq(equipment)))
            .execute(&mut conn)
            .map_err(|e| ChunkRepositoryError::DatabaseError(e.to_string()))
    }
}

/// Cosine distance from pgvector is in [0, 2]; callers rank by similarity
/// where 1.0 means identical direction.
fn similarity(distance: f64) -> f32 {
    (1.0 - distance) as f32
}
