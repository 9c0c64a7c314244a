use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::Equipment;
use crate::infrastructure::database::schema::equipment;

#[derive(Debug, Clone, Queryable, Selectable, Serialize, Identifiable)]
#[diesel(table_name = equipment)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct EquipmentModel {
    pub id: Uuid,
    pub tenant_id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = equipment)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewEquipmentModel {
    pub id: Uuid,
    pub tenant_id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Equipment> for NewEquipmentModel {
    fn from(equipment: &Equipment) -> Self {
        Self {
            id: equipment.id(),
            tenant_id: equipment.tenant_id().to_string(),
            name: equipment.name().to_string(),
            description: equipment.description().map(|s| s.to_string()),
            created_at: equipment.created_at(),
            updated_at: equipment.updated_at(),
        }
    }
}

impl From<EquipmentModel> for Equipment {
    fn from(model: EquipmentModel) -> Self {
        Equipment::from_parts(
            model.id,
            model.tenant_id,
            model.name,
            model.description,
            model.created_at,
            model.updated_at,
        )
    }
}
