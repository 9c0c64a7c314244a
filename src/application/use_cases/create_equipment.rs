use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::Equipment;
use crate::domain::repositories::{EquipmentRepository, equipment_repository::EquipmentRepositoryError};

#[derive(Debug)]
pub enum CreateEquipmentError {
    RepositoryError(String),
    ValidationError(String),
    DuplicateName(String),
}

impl std::fmt::Display for CreateEquipmentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CreateEquipmentError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
            CreateEquipmentError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            CreateEquipmentError::DuplicateName(msg) => write!(f, "Duplicate name: {}", msg),
        }
    }
}

impl std::error::Error for CreateEquipmentError {}

impl From<EquipmentRepositoryError> for CreateEquipmentError {
    fn from(error: EquipmentRepositoryError) -> Self {
        CreateEquipmentError::RepositoryError(error.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct CreateEquipmentRequest {
    pub tenant_id: String,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateEquipmentResponse {
    pub equipment_id: Uuid,
    pub equipment: Equipment,
}

pub struct CreateEquipmentUseCase {
    equipment_repository: Arc<dyn EquipmentRepository>,
}

impl CreateEquipmentUseCase {
    pub fn new(equipment_repository: Arc<dyn EquipmentRepository>) -> Self {
        Self {
            equipment_repository,
        }
    }

    pub async fn execute(
        &self,
        request: CreateEquipmentRequest,
    ) -> Result<CreateEquipmentResponse, CreateEquipmentError> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(CreateEquipmentError::ValidationError(
                "Equipment name cannot be empty".to_string(),
            ));
        }

        // Names are unique per tenant.
        if let Some(existing) = self
            .equipment_repository
            .find_by_name(&request.tenant_id, name)
            .await?
        {
            return Err(CreateEquipmentError::DuplicateName(format!(
                "Equipment '{}' already exists for this tenant ({})",
                name,
                existing.id()
            )));
        }

        let equipment = Equipment::new(request.tenant_id, name.to_string(), request.description);
        self.equipment_repository.save(&equipment).await?;

        tracing::info!(equipment_id = %equipment.id(), name, "Equipment created");

        Ok(CreateEquipmentResponse {
            equipment_id: equipment.id(),
            equipment,
        })
    }
}
