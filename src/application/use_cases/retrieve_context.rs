use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

use crate::application::services::RetrievalService;
use crate::domain::repositories::{
    EquipmentRepository, ScoredChunk,
    equipment_repository::EquipmentRepositoryError,
};

#[derive(Debug)]
pub enum RetrieveContextError {
    RepositoryError(String),
    ValidationError(String),
    EquipmentNotFound(Uuid),
    RetrievalError(String),
}

impl std::fmt::Display for RetrieveContextError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RetrieveContextError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
            RetrieveContextError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            RetrieveContextError::EquipmentNotFound(id) => {
                write!(f, "Equipment not found: {}", id)
            }
            RetrieveContextError::RetrievalError(msg) => write!(f, "Retrieval error: {}", msg),
        }
    }
}

impl std::error::Error for RetrieveContextError {}

impl From<EquipmentRepositoryError> for RetrieveContextError {
    fn from(error: EquipmentRepositoryError) -> Self {
        RetrieveContextError::RepositoryError(error.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct RetrieveContextRequest {
    pub equipment_id: Uuid,
    /// When absent, the search runs in the equipment's own tenant.
    pub tenant_id: Option<String>,
    pub query: String,
    pub top_k: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct RetrieveContextResponse {
    pub query: String,
    pub results: Vec<ScoredChunk>,
    pub context: String,
    pub search_time_ms: u64,
}

/// Direct retrieval endpoint for debugging and for text-only clients that
/// assemble their own prompts.
pub struct RetrieveContextUseCase {
    equipment_repository: Arc<dyn EquipmentRepository>,
    retrieval_service: Arc<RetrievalService>,
}

impl RetrieveContextUseCase {
    pub fn new(
        equipment_repository: Arc<dyn EquipmentRepository>,
        retrieval_service: Arc<RetrievalService>,
    ) -> Self {
        Self {
            equipment_repository,
            retrieval_service,
        }
    }

    pub async fn execute(
        &self,
        request: RetrieveContextRequest,
    ) -> Result<RetrieveContextResponse, RetrieveContextError> {
        let start_time = Instant::now();

        if request.query.trim().is_empty() {
            return Err(RetrieveContextError::ValidationError(
                "Query cannot be empty".to_string(),
            ));
        }

        if let Some(k) = request.top_k {
            if k <= 0 || k > 50 {
                return Err(RetrieveContextError::ValidationError(
                    "top_k must be between 1 and 50".to_string(),
                ));
            }
        }

        let equipment = self
            .equipment_repository
            .find_by_id(request.equipment_id)
            .await?
            .ok_or(RetrieveContextError::EquipmentNotFound(request.equipment_id))?;

        // A supplied tenant must match the equipment's tenant; a mismatch
        // is indistinguishable from a missing equipment on purpose.
        let tenant_id = match request.tenant_id {
            Some(tenant) if tenant != equipment.tenant_id() => {
                return Err(RetrieveContextError::EquipmentNotFound(request.equipment_id));
            }
            Some(tenant) => tenant,
            None => equipment.tenant_id().to_string(),
        };

        let results = match request.top_k {
            Some(k) => {
                self.retrieval_service
                    .retrieve_top_k(&request.query, &tenant_id, request.equipment_id, k)
                    .await
            }
            None => {
                self.retrieval_service
                    .retrieve(&request.query, &tenant_id, request.equipment_id)
                    .await
            }
        }
        .map_err(|e| RetrieveContextError::RetrievalError(e.to_string()))?;

        let context = RetrievalService::format_context(&results);

        Ok(RetrieveContextResponse {
            query: request.query,
            results,
            context,
            search_time_ms: start_time.elapsed().as_millis() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pgvector::Vector;
    use std::sync::Mutex;

    use crate::application::ports::EmbeddingProvider;
    use crate::application::ports::embedding_provider::EmbeddingProviderError;
    use crate::domain::entities::{DocumentChunk, Equipment};
    use crate::domain::repositories::ChunkRepository;
    use crate::domain::repositories::chunk_repository::ChunkRepositoryError;

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

    struct FixedEmbedder;

    #[async_trait]
    impl EmbeddingProvider for FixedEmbedder {
        async fn embed_text(&self, _text: &str) -> Result<Vector, EmbeddingProviderError> {
            Ok(Vector::from(vec![1.0, 0.0]))
        }

        async fn embed_batch(
            &self,
            texts: &[String],
        ) -> Result<Vec<Vector>, EmbeddingProviderError> {
            Ok(texts.iter().map(|_| Vector::from(vec![1.0, 0.0])).collect())
        }

        fn embedding_dimension(&self) -> usize {
            2
        }
    }

    /// Records the tenant each similarity search ran under.
    #[derive(Default)]
    struct TenantRecordingChunks {
        searched_tenants: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ChunkRepository for TenantRecordingChunks {
        async fn save_batch(&self, _chunks: &[DocumentChunk]) -> Result<(), ChunkRepositoryError> {
            Ok(())
        }

        async fn similarity_search(
            &self,
            _query_embedding: &Vector,
            tenant_id: &str,
            _equipment_id: Uuid,
            _k: i64,
        ) -> Result<Vec<ScoredChunk>, ChunkRepositoryError> {
            self.searched_tenants
                .lock()
                .unwrap()
                .push(tenant_id.to_string());
            Ok(Vec::new())
        }

        async fn delete_by_equipment(
            &self,
            _equipment_id: Uuid,
        ) -> Result<usize, ChunkRepositoryError> {
            Ok(0)
        }
    }

    fn use_case(equipment: Equipment) -> (RetrieveContextUseCase, Arc<TenantRecordingChunks>) {
        let chunks = Arc::new(TenantRecordingChunks::default());
        let retrieval_service = Arc::new(RetrievalService::new(
            Arc::new(FixedEmbedder),
            chunks.clone(),
            5,
            None,
        ));
        let use_case = RetrieveContextUseCase::new(
            Arc::new(SingleEquipment { equipment }),
            retrieval_service,
        );
        (use_case, chunks)
    }

    #[tokio::test]
    async fn test_absent_tenant_searches_equipment_tenant() {
        let equipment = Equipment::new("tenant-b".to_string(), "Mixer M1".to_string(), None);
        let equipment_id = equipment.id();
        let (use_case, chunks) = use_case(equipment);

        use_case
            .execute(RetrieveContextRequest {
                equipment_id,
                tenant_id: None,
                query: "agitator speed".to_string(),
                top_k: None,
            })
            .await
            .unwrap();

        assert_eq!(
            chunks.searched_tenants.lock().unwrap().as_slice(),
            ["tenant-b"]
        );
    }

    #[tokio::test]
    async fn test_matching_tenant_is_accepted() {
        let equipment = Equipment::new("tenant-b".to_string(), "Mixer M1".to_string(), None);
        let equipment_id = equipment.id();
        let (use_case, chunks) = use_case(equipment);

        use_case
            .execute(RetrieveContextRequest {
                equipment_id,
                tenant_id: Some("tenant-b".to_string()),
                query: "agitator speed".to_string(),
                top_k: Some(3),
            })
            .await
            .unwrap();

        assert_eq!(
            chunks.searched_tenants.lock().unwrap().as_slice(),
            ["tenant-b"]
        );
    }

    #[tokio::test]
    async fn test_mismatched_tenant_reads_as_not_found() {
        let equipment = Equipment::new("tenant-b".to_string(), "Mixer M1".to_string(), None);
        let equipment_id = equipment.id();
        let (use_case, chunks) = use_case(equipment);

        let result = use_case
            .execute(RetrieveContextRequest {
                equipment_id,
                tenant_id: Some("tenant-a".to_string()),
                query: "agitator speed".to_string(),
                top_k: None,
            })
            .await;

        assert!(matches!(
            result,
            Err(RetrieveContextError::EquipmentNotFound(id)) if id == equipment_id
        ));
        // The search must never run under the wrong tenant.
        assert!(chunks.searched_tenants.lock().unwrap().is_empty());
    }
}
