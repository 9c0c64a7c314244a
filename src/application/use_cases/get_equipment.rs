use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::Equipment;
use crate::domain::repositories::{EquipmentRepository, equipment_repository::EquipmentRepositoryError};

#[derive(Debug)]
pub enum GetEquipmentError {
    RepositoryError(String),
    NotFound(Uuid),
}

impl std::fmt::Display for GetEquipmentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GetEquipmentError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
            GetEquipmentError::NotFound(id) => write!(f, "Equipment not found: {}", id),
        }
    }
}

impl std::error::Error for GetEquipmentError {}

impl From<EquipmentRepositoryError> for GetEquipmentError {
    fn from(error: EquipmentRepositoryError) -> Self {
        GetEquipmentError::RepositoryError(error.to_string())
    }
}

pub struct GetEquipmentUseCase {
    equipment_repository: Arc<dyn EquipmentRepository>,
}

impl GetEquipmentUseCase {
    pub fn new(equipment_repository: Arc<dyn EquipmentRepository>) -> Self {
        Self {
            equipment_repository,
        }
    }

    pub async fn execute(&self, equipment_id: Uuid) -> Result<Equipment, GetEquipmentError> {
        self.equipment_repository
            .find_by_id(equipment_id)
            .await?
            .ok_or(GetEquipmentError::NotFound(equipment_id))
    }
}
