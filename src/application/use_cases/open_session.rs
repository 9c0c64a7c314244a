use std::sync::Arc;
use uuid::Uuid;

use crate::application::services::SessionRegistry;
use crate::domain::repositories::{EquipmentRepository, equipment_repository::EquipmentRepositoryError};
use crate::domain::value_objects::PromptType;

#[derive(Debug)]
pub enum OpenSessionError {
    RepositoryError(String),
    EquipmentNotFound(Uuid),
}

impl std::fmt::Display for OpenSessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OpenSessionError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
            OpenSessionError::EquipmentNotFound(id) => write!(f, "Equipment not found: {}", id),
        }
    }
}

impl std::error::Error for OpenSessionError {}

impl From<EquipmentRepositoryError> for OpenSessionError {
    fn from(error: EquipmentRepositoryError) -> Self {
        OpenSessionError::RepositoryError(error.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct OpenSessionRequest {
    pub equipment_id: Uuid,
    /// When absent, the session binds to the equipment's own tenant.
    pub tenant_id: Option<String>,
    /// Unknown or missing values fall back to the call center persona.
    pub prompt_type: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OpenSessionResponse {
    pub session_id: Uuid,
    pub equipment_id: Uuid,
    pub prompt_type: PromptType,
    /// Path the client connects its WebSocket to.
    pub websocket_path: String,
}

/// Bootstraps a conversation session: validates the equipment binding,
/// registers the pending session, and hands back the WebSocket path.
pub struct OpenSessionUseCase {
    equipment_repository: Arc<dyn EquipmentRepository>,
    session_registry: Arc<SessionRegistry>,
}

impl OpenSessionUseCase {
    pub fn new(
        equipment_repository: Arc<dyn EquipmentRepository>,
        session_registry: Arc<SessionRegistry>,
    ) -> Self {
        Self {
            equipment_repository,
            session_registry,
        }
    }

    pub async fn execute(
        &self,
        request: OpenSessionRequest,
    ) -> Result<OpenSessionResponse, OpenSessionError> {
        let equipment = self
            .equipment_repository
            .find_by_id(request.equipment_id)
            .await?
            .ok_or(OpenSessionError::EquipmentNotFound(request.equipment_id))?;

        // A supplied tenant must match the equipment's; a mismatch is
        // indistinguishable from a missing equipment on purpose.
        let tenant_id = match request.tenant_id {
            Some(tenant) if tenant != equipment.tenant_id() => {
                return Err(OpenSessionError::EquipmentNotFound(request.equipment_id));
            }
            Some(tenant) => tenant,
            None => equipment.tenant_id().to_string(),
        };

        let prompt_type = PromptType::parse_or_default(request.prompt_type.as_deref());

        let session_id =
            self.session_registry
                .register(request.equipment_id, tenant_id, prompt_type);

        tracing::info!(
            %session_id,
            equipment_id = %request.equipment_id,
            prompt_type = prompt_type.as_str(),
            "Session registered"
        );

        Ok(OpenSessionResponse {
            session_id,
            equipment_id: request.equipment_id,
            prompt_type,
            websocket_path: format!("/api/v1/stream/ws/{}", session_id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::domain::entities::Equipment;

    struct SingleEquipment {
        equipment: Equipment,
    }

    #[async_trait]
    impl EquipmentRepository for SingleEquipment {
        async fn save(&self, _equipment: &Equipment) -> Result<(), EquipmentRepositoryError> {
            Ok(())
        }

        async fn find_by_id(
            &self,
            equipment_id: Uuid,
        ) -> Result<Option<Equipment>, EquipmentRepositoryError> {
            if equipment_id == self.equipment.id() {
                Ok(Some(self.equipment.clone()))
            } else {
                Ok(None)
            }
        }

        async fn find_by_name(
            &self,
            _tenant_id: &str,
            _name: &str,
        ) -> Result<Option<Equipment>, EquipmentRepositoryError> {
            Ok(None)
        }

        async fn list_all(&self) -> Result<Vec<Equipment>, EquipmentRepositoryError> {
            Ok(vec![self.equipment.clone()])
        }

        async fn delete(&self, _equipment_id: Uuid) -> Result<bool, EquipmentRepositoryError> {
            Ok(false)
        }
    }

    fn use_case(equipment: Equipment) -> (OpenSessionUseCase, Arc<SessionRegistry>) {
        let registry = Arc::new(SessionRegistry::new());
        let use_case = OpenSessionUseCase::new(
            Arc::new(SingleEquipment { equipment }),
            registry.clone(),
        );
        (use_case, registry)
    }

    #[tokio::test]
    async fn test_absent_tenant_binds_to_equipment_tenant() {
        let equipment = Equipment::new("tenant-b".to_string(), "Lathe L5".to_string(), None);
        let equipment_id = equipment.id();
        let (use_case, registry) = use_case(equipment);

        let response = use_case
            .execute(OpenSessionRequest {
                equipment_id,
                tenant_id: None,
                prompt_type: None,
            })
            .await
            .unwrap();

        let config = registry.take(response.session_id).unwrap();
        assert_eq!(config.tenant_id, "tenant-b");
        assert_eq!(config.equipment_id, equipment_id);
    }

    #[tokio::test]
    async fn test_matching_tenant_is_accepted() {
        let equipment = Equipment::new("tenant-b".to_string(), "Lathe L5".to_string(), None);
        let equipment_id = equipment.id();
        let (use_case, registry) = use_case(equipment);

        let response = use_case
            .execute(OpenSessionRequest {
                equipment_id,
                tenant_id: Some("tenant-b".to_string()),
                prompt_type: Some("technical".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(response.prompt_type, PromptType::Technical);
        let config = registry.take(response.session_id).unwrap();
        assert_eq!(config.tenant_id, "tenant-b");
    }

    #[tokio::test]
    async fn test_mismatched_tenant_reads_as_not_found() {
        let equipment = Equipment::new("tenant-b".to_string(), "Lathe L5".to_string(), None);
        let equipment_id = equipment.id();
        let (use_case, registry) = use_case(equipment);

        let result = use_case
            .execute(OpenSessionRequest {
                equipment_id,
                tenant_id: Some("tenant-a".to_string()),
                prompt_type: None,
            })
            .await;

        assert!(matches!(
            result,
            Err(OpenSessionError::EquipmentNotFound(id)) if id == equipment_id
        ));
        assert_eq!(registry.pending_count(), 0);
    }
}
