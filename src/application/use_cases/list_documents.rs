use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::Document;
use crate::domain::repositories::{
    DocumentRepository, EquipmentRepository,
    equipment_repository::EquipmentRepositoryError,
};

#[derive(Debug)]
pub enum ListDocumentsError {
    RepositoryError(String),
    EquipmentNotFound(Uuid),
}

impl std::fmt::Display for ListDocumentsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListDocumentsError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
            ListDocumentsError::EquipmentNotFound(id) => {
                write!(f, "Equipment not found: {}", id)
            }
        }
    }
}

impl std::error::Error for ListDocumentsError {}

impl From<EquipmentRepositoryError> for ListDocumentsError {
    fn from(error: EquipmentRepositoryError) -> Self {
        ListDocumentsError::RepositoryError(error.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct ListDocumentsResponse {
    pub equipment_id: Uuid,
    pub documents: Vec<Document>,
    pub total: usize,
}

pub struct ListDocumentsUseCase {
    equipment_repository: Arc<dyn EquipmentRepository>,
    document_repository: Arc<dyn DocumentRepository>,
}

impl ListDocumentsUseCase {
    pub fn new(
        equipment_repository: Arc<dyn EquipmentRepository>,
        document_repository: Arc<dyn DocumentRepository>,
    ) -> Self {
        Self {
            equipment_repository,
            document_repository,
        }
    }

    pub async fn execute(
        &self,
        equipment_id: Uuid,
    ) -> Result<ListDocumentsResponse, ListDocumentsError> {
        if self
            .equipment_repository
            .find_by_id(equipment_id)
            .await?
            .is_none()
        {
            return Err(ListDocumentsError::EquipmentNotFound(equipment_id));
        }

        let documents = self
            .document_repository
            .list_by_equipment(equipment_id)
            .await
            .map_err(|e| ListDocumentsError::RepositoryError(e.to_string()))?;

        let total = documents.len();
        Ok(ListDocumentsResponse {
            equipment_id,
            documents,
            total,
        })
    }
}
