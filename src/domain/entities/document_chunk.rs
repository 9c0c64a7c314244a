use chrono::{DateTime, Utc};
use pgvector::Vector;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::Document;

/// A bounded span of extracted document text stored with its embedding.
/// Immutable after creation. Scope (tenant/equipment) always comes from the
/// parent document, never from the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentChunk {
    id: Uuid,
    document_id: Uuid,
    equipment_id: Uuid,
    tenant_id: String,
    file_name: String,
    chunk_index: i32,
    start_offset: i32,
    chunk_text: String,
    embedding: Vector,
    created_at: DateTime<Utc>,
}

impl DocumentChunk {
    pub fn new(
        document: &Document,
        chunk_index: i32,
        start_offset: i32,
        chunk_text: String,
        embedding: Vector,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            document_id: document.id(),
            equipment_id: document.equipment_id(),
            tenant_id: document.tenant_id().to_string(),
            file_name: document.file_name().to_string(),
            chunk_index,
            start_offset,
            chunk_text,
            embedding,
            created_at: Utc::now(),
        }
    }

    /// Reconstruct from persisted values.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: Uuid,
        document_id: Uuid,
        equipment_id: Uuid,
        tenant_id: String,
        file_name: String,
        chunk_index: i32,
        start_offset: i32,
        chunk_text: String,
        embedding: Vector,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            document_id,
            equipment_id,
            tenant_id,
            file_name,
            chunk_index,
            start_offset,
            chunk_text,
            embedding,
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn document_id(&self) -> Uuid {
        self.document_id
    }

    pub fn equipment_id(&self) -> Uuid {
        self.equipment_id
    }

    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn chunk_index(&self) -> i32 {
        self.chunk_index
    }

    pub fn start_offset(&self) -> i32 {
        self.start_offset
    }

    pub fn chunk_text(&self) -> &str {
        &self.chunk_text
    }

    pub fn embedding(&self) -> &Vector {
        &self.embedding
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_in_scope(&self, tenant_id: &str, equipment_id: Uuid) -> bool {
        self.tenant_id == tenant_id && self.equipment_id == equipment_id
    }
}
