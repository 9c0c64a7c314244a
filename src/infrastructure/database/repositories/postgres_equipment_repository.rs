use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::Equipment;
use crate::domain::repositories::{EquipmentRepository, equipment_repository::EquipmentRepositoryError};
use crate::infrastructure::database::models::{EquipmentModel, NewEquipmentModel};
use crate::infrastructure::database::schema::equipment::dsl::*;
use crate::infrastructure::database::{DbPool, get_connection_from_pool};

pub struct PostgresEquipmentRepository {
    pool: DbPool,
}

impl PostgresEquipmentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EquipmentRepository for PostgresEquipmentRepository {
    async fn save(&self, item: &Equipment) -> Result<(), EquipmentRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| EquipmentRepositoryError::DatabaseError(e.to_string()))?;

        let new_equipment = NewEquipmentModel::from(item);

        diesel::insert_into(equipment)
            .values(&new_equipment)
            .execute(&mut conn)
            .map_err(|e| EquipmentRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_id(
        &self,
        equipment_id: Uuid,
    ) -> Result<Option<Equipment>, EquipmentRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| EquipmentRepositoryError::DatabaseError(e.to_string()))?;

        let result = equipment
            .find(equipment_id)
            .first::<EquipmentModel>(&mut conn)
            .optional()
            .map_err(|e| EquipmentRepositoryError::DatabaseError(e.to_string()))?;

        Ok(result.map(Equipment::from))
    }

    async fn find_by_name(
        &self,
        tenant: &str,
        equipment_name: &str,
    ) -> Result<Option<Equipment>, EquipmentRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| EquipmentRepositoryError::DatabaseError(e.to_string()))?;

        let result = equipment
            .filter(tenant_id.eq(tenant))
            .filter(name.eq(equipment_name))
            .first::<EquipmentModel>(&mut conn)
            .optional()
            .map_err(|e| EquipmentRepositoryError::DatabaseError(e.to_string()))?;

        Ok(result.map(Equipment::from))
    }

    async fn list_all(&self) -> Result<Vec<Equipment>, EquipmentRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| EquipmentRepositoryError::DatabaseError(e.to_string()))?;

        let models = equipment
            .order(created_at.desc())
            .load::<EquipmentModel>(&mut conn)
            .map_err(|e| EquipmentRepositoryError::DatabaseError(e.to_string()))?;

        Ok(models.into_iter().map(Equipment::from).collect())
    }

    async fn delete(&self, equipment_id: Uuid) -> Result<bool, EquipmentRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| EquipmentRepositoryError::DatabaseError(e.to_string()))?;

        let deleted_count = diesel::delete(equipment.find(equipment_id))
            .execute(&mut conn)
            .map_err(|e| EquipmentRepositoryError::DatabaseError(e.to_string()))?;

        Ok(deleted_count > 0)
    }
}
