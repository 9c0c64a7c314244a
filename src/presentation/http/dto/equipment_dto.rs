use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::Equipment;

#[derive(Debug, Deserialize)]
pub struct CreateEquipmentDto {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EquipmentResponseDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Serialize)]
pub struct EquipmentListResponseDto {
    pub equipment: Vec<EquipmentResponseDto>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct DeleteEquipmentResponseDto {
    pub equipment_id: Uuid,
    pub documents_deleted: usize,
    pub chunks_deleted: usize,
}

impl From<Equipment> for EquipmentResponseDto {
    fn from(equipment: Equipment) -> Self {
        Self {
            id: equipment.id(),
            name: equipment.name().to_string(),
            description: equipment.description().map(|s| s.to_string()),
            created_at: equipment.created_at().to_rfc3339(),
            updated_at: equipment.updated_at().to_rfc3339(),
        }
    }
}
