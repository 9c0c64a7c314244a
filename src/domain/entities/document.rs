use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::EmbeddingStatus;

/// Metadata for an uploaded file. Only the ingestion pipeline mutates the
/// embedding status, and it must leave the document in a terminal state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    id: Uuid,
    equipment_id: Uuid,
    tenant_id: String,
    file_name: String,
    content_type: String,
    size: i64,
    description: Option<String>,
    uploaded_by: String,
    content_hash: String,
    embedding_status: EmbeddingStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Document {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        equipment_id: Uuid,
        tenant_id: String,
        file_name: String,
        content_type: String,
        size: i64,
        description: Option<String>,
        uploaded_by: String,
        content_hash: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            equipment_id,
            tenant_id,
            file_name,
            content_type,
            size,
            description,
            uploaded_by,
            content_hash,
            embedding_status: EmbeddingStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstruct from persisted values.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: Uuid,
        equipment_id: Uuid,
        tenant_id: String,
        file_name: String,
        content_type: String,
        size: i64,
        description: Option<String>,
        uploaded_by: String,
        content_hash: String,
        embedding_status: EmbeddingStatus,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            equipment_id,
            tenant_id,
            file_name,
            content_type,
            size,
            description,
            uploaded_by,
            content_hash,
            embedding_status,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
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

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn size(&self) -> i64 {
        self.size
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn uploaded_by(&self) -> &str {
        &self.uploaded_by
    }

    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }

    pub fn embedding_status(&self) -> &EmbeddingStatus {
        &self.embedding_status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn start_processing(&mut self) -> Result<(), String> {
        self.transition(EmbeddingStatus::Processing)
    }

    pub fn complete_processing(&mut self) -> Result<(), String> {
        self.transition(EmbeddingStatus::Completed)
    }

    pub fn fail_processing(&mut self, error: String) -> Result<(), String> {
        self.transition(EmbeddingStatus::Failed(error))
    }

    fn transition(&mut self, new_status: EmbeddingStatus) -> Result<(), String> {
        if !self.embedding_status.can_transition_to(&new_status) {
            return Err(format!(
                "Invalid status transition: {} -> {}",
                self.embedding_status, new_status
            ));
        }
        self.embedding_status = new_status;
        self.updated_at = Utc::now();
        Ok(())
    }
}
