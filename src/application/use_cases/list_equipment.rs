use std::sync::Arc;

use crate::domain::entities::Equipment;
use crate::domain::repositories::{EquipmentRepository, equipment_repository::EquipmentRepositoryError};

#[derive(Debug)]
pub enum ListEquipmentError {
    RepositoryError(String),
}

impl std::fmt::Display for ListEquipmentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListEquipmentError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for ListEquipmentError {}

impl From<EquipmentRepositoryError> for ListEquipmentError {
    fn from(error: EquipmentRepositoryError) -> Self {
        ListEquipmentError::RepositoryError(error.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct ListEquipmentResponse {
    pub equipment: Vec<Equipment>,
    pub total: usize,
}

pub struct ListEquipmentUseCase {
    equipment_repository: Arc<dyn EquipmentRepository>,
}

impl ListEquipmentUseCase {
    pub fn new(equipment_repository: Arc<dyn EquipmentRepository>) -> Self {
        Self {
            equipment_repository,
        }
    }

    pub async fn execute(&self) -> Result<ListEquipmentResponse, ListEquipmentError> {
        let equipment = self.equipment_repository.list_all().await?;
        let total = equipment.len();
        Ok(ListEquipmentResponse { equipment, total })
    }
}
