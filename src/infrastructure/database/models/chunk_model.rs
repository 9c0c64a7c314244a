use chrono::{DateTime, Utc};
use diesel::prelude::*;
use pgvector::Vector;
use uuid::Uuid;

use crate::domain::entities::DocumentChunk;
use crate::infrastructure::database::schema::document_chunks;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(belongs_to(super::DocumentModel, foreign_key = document_id))]
#[diesel(table_name = document_chunks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DocumentChunkModel {
    pub id: Uuid,
    pub document_id: Uuid,
    pub equipment_id: Uuid,
    pub tenant_id: String,
    pub file_name: String,
    pub chunk_index: i32,
    pub start_offset: i32,
    pub chunk_text: String,
    pub embedding: Vector,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = document_chunks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewDocumentChunkModel {
    pub id: Uuid,
    pub document_id: Uuid,
    pub equipment_id: Uuid,
    pub tenant_id: String,
    pub file_name: String,
    pub chunk_index: i32,
    pub start_offset: i32,
    pub chunk_text: String,
    pub embedding: Vector,
    pub created_at: DateTime<Utc>,
}

impl From<&DocumentChunk> for NewDocumentChunkModel {
    fn from(chunk: &DocumentChunk) -> Self {
        Self {
            id: chunk.id(),
            document_id: chunk.document_id(),
            equipment_id: chunk.equipment_id(),
            tenant_id: chunk.tenant_id().to_string(),
            file_name: chunk.file_name().to_string(),
            chunk_index: chunk.chunk_index(),
            start_offset: chunk.start_offset(),
            chunk_text: chunk.chunk_text().to_string(),
            embedding: chunk.embedding().clone(),
            created_at: chunk.created_at(),
        }
    }
}

impl From<DocumentChunkModel> for DocumentChunk {
    fn from(model: DocumentChunkModel) -> Self {
        DocumentChunk::from_parts(
            model.id,
            model.document_id,
            model.equipment_id,
            model.tenant_id,
            model.file_name,
            model.chunk_index,
            model.start_offset,
            model.chunk_text,
            model.embedding,
            model.created_at,
        )
    }
}
