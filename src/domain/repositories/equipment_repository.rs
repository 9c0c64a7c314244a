use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::Equipment;

#[derive(Debug)]
pub enum EquipmentRepositoryError {
    DatabaseError(String),
    NotFound(Uuid),
}

impl std::fmt::Display for EquipmentRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EquipmentRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            EquipmentRepositoryError::NotFound(id) => write!(f, "Equipment not found: {}", id),
        }
    }
}

impl std::error::Error for EquipmentRepositoryError {}

#[async_trait]
pub trait EquipmentRepository: Send + Sync {
    async fn save(&self, equipment: &Equipment) -> Result<(), EquipmentRepositoryError>;

    async fn find_by_id(&self, equipment_id: Uuid)
        -> Result<Option<Equipment>, EquipmentRepositoryError>;

    async fn find_by_name(
        &self,
        tenant_id: &str,
        name: &str,
    ) -> Result<Option<Equipment>, EquipmentRepositoryError>;

    async fn list_all(&self) -> Result<Vec<Equipment>, EquipmentRepositoryError>;

    async fn delete(&self, equipment_id: Uuid) -> Result<bool, EquipmentRepositoryError>;
}
