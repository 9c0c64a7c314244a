use std::sync::Arc;
use uuid::Uuid;

use crate::domain::repositories::{
    ChunkRepository, DocumentRepository, EquipmentRepository,
    equipment_repository::EquipmentRepositoryError,
};

#[derive(Debug)]
pub enum DeleteEquipmentError {
    RepositoryError(String),
    NotFound(Uuid),
}

impl std::fmt::Display for DeleteEquipmentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeleteEquipmentError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
            DeleteEquipmentError::NotFound(id) => write!(f, "Equipment not found: {}", id),
        }
    }
}

impl std::error::Error for DeleteEquipmentError {}

impl From<EquipmentRepositoryError> for DeleteEquipmentError {
    fn from(error: EquipmentRepositoryError) -> Self {
        DeleteEquipmentError::RepositoryError(error.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct DeleteEquipmentResponse {
    pub equipment_id: Uuid,
    pub documents_deleted: usize,
    pub chunks_deleted: usize,
}

/// Removes an equipment and everything ingested under it, so a deleted
/// knowledge base can never surface in later retrievals.
pub struct DeleteEquipmentUseCase {
    equipment_repository: Arc<dyn EquipmentRepository>,
    document_repository: Arc<dyn DocumentRepository>,
    chunk_repository: Arc<dyn ChunkRepository>,
}

impl DeleteEquipmentUseCase {
    pub fn new(
        equipment_repository: Arc<dyn EquipmentRepository>,
        document_repository: Arc<dyn DocumentRepository>,
        chunk_repository: Arc<dyn ChunkRepository>,
    ) -> Self {
        Self {
            equipment_repository,
            document_repository,
            chunk_repository,
        }
    }

    pub async fn execute(
        &self,
        equipment_id: Uuid,
    ) -> Result<DeleteEquipmentResponse, DeleteEquipmentError> {
        if self
            .equipment_repository
            .find_by_id(equipment_id)
            .await?
            .is_none()
        {
            return Err(DeleteEquipmentError::NotFound(equipment_id));
        }

        // Chunks first, then documents, then the equipment row itself.
        let chunks_deleted = self
            .chunk_repository
            .delete_by_equipment(equipment_id)
            .await
            .map_err(|e| DeleteEquipmentError::RepositoryError(e.to_string()))?;

        let documents_deleted = self
            .document_repository
            .delete_by_equipment(equipment_id)
            .await
            .map_err(|e| DeleteEquipmentError::RepositoryError(e.to_string()))?;

        self.equipment_repository.delete(equipment_id).await?;

        tracing::info!(
            %equipment_id,
            documents_deleted,
            chunks_deleted,
            "Equipment deleted"
        );

        Ok(DeleteEquipmentResponse {
            equipment_id,
            documents_deleted,
            chunks_deleted,
        })
    }
}
