use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named, tenant-scoped knowledge-base container grouping documents for one
/// support context. Not physical hardware.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    id: Uuid,
    tenant_id: String,
    name: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Equipment {
    pub fn new(tenant_id: String, name: String, description: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            name,
            description,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstruct from persisted values.
    pub fn from_parts(
        id: Uuid,
        tenant_id: String,
        name: String,
        description: Option<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            tenant_id,
            name,
            description,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equipment_creation() {
        let equipment = Equipment::new(
            "tenant-a".to_string(),
            "Conveyor X200".to_string(),
            Some("Belt conveyor line".to_string()),
        );

        assert_eq!(equipment.tenant_id(), "tenant-a");
        assert_eq!(equipment.name(), "Conveyor X200");
        assert_eq!(equipment.description(), Some("Belt conveyor line"));
        assert_eq!(equipment.created_at(), equipment.updated_at());
    }
}
