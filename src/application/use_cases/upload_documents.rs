use std::collections::HashSet;
use std::sync::Arc;

use futures::future::join_all;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::application::services::IngestionService;
use crate::application::services::ingestion_service::IngestionError;
use crate::domain::entities::Document;
use crate::domain::repositories::{
    DocumentRepository, EquipmentRepository, document_repository::DocumentRepositoryError,
    equipment_repository::EquipmentRepositoryError,
};

#[derive(Debug)]
pub enum UploadDocumentsError {
    RepositoryError(String),
    ValidationError(String),
    EquipmentNotFound(Uuid),
    DuplicateFile(String),
    IngestionError(String),
}

impl std::fmt::Display for UploadDocumentsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadDocumentsError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
            UploadDocumentsError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            UploadDocumentsError::EquipmentNotFound(id) => {
                write!(f, "Equipment not found: {}", id)
            }
            UploadDocumentsError::DuplicateFile(name) => {
                write!(f, "File already uploaded: {}", name)
            }
            UploadDocumentsError::IngestionError(msg) => write!(f, "Ingestion error: {}", msg),
        }
    }
}

impl std::error::Error for UploadDocumentsError {}

impl From<EquipmentRepositoryError> for UploadDocumentsError {
    fn from(error: EquipmentRepositoryError) -> Self {
        UploadDocumentsError::RepositoryError(error.to_string())
    }
}

impl From<DocumentRepositoryError> for UploadDocumentsError {
    fn from(error: DocumentRepositoryError) -> Self {
        UploadDocumentsError::RepositoryError(error.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct UploadDocumentsRequest {
    pub equipment_id: Uuid,
    pub files: Vec<UploadedFile>,
    pub description: Option<String>,
    pub uploaded_by: String,
}

#[derive(Debug, Clone)]
pub struct UploadDocumentsResponse {
    pub equipment_id: Uuid,
    pub documents: Vec<Document>,
}

/// Ingests a batch of uploaded files into one equipment's knowledge base.
///
/// Re-uploads are rejected up front by content hash, both against rows
/// already stored for the equipment and within the batch itself. Accepted
/// files are ingested concurrently; a bad file fails its own document row
/// without aborting the rest of the batch.
pub struct UploadDocumentsUseCase {
    equipment_repository: Arc<dyn EquipmentRepository>,
    document_repository: Arc<dyn DocumentRepository>,
    ingestion_service: Arc<IngestionService>,
}

impl UploadDocumentsUseCase {
    pub fn new(
        equipment_repository: Arc<dyn EquipmentRepository>,
        document_repository: Arc<dyn DocumentRepository>,
        ingestion_service: Arc<IngestionService>,
    ) -> Self {
        Self {
            equipment_repository,
            document_repository,
            ingestion_service,
        }
    }

    pub async fn execute(
        &self,
        request: UploadDocumentsRequest,
    ) -> Result<UploadDocumentsResponse, UploadDocumentsError> {
        if request.files.is_empty() {
            return Err(UploadDocumentsError::ValidationError(
                "No files in upload".to_string(),
            ));
        }

        let equipment = self
            .equipment_repository
            .find_by_id(request.equipment_id)
            .await?
            .ok_or(UploadDocumentsError::EquipmentNotFound(request.equipment_id))?;

        let mut seen_hashes = HashSet::new();
        let mut hashes = Vec::with_capacity(request.files.len());
        for file in &request.files {
            if file.file_name.trim().is_empty() {
                return Err(UploadDocumentsError::ValidationError(
                    "File name cannot be empty".to_string(),
                ));
            }
            if file.data.is_empty() {
                return Err(UploadDocumentsError::ValidationError(format!(
                    "File '{}' is empty",
                    file.file_name
                )));
            }

            let hash = content_hash(&file.data);
            if !seen_hashes.insert(hash.clone()) {
                return Err(UploadDocumentsError::DuplicateFile(file.file_name.clone()));
            }
            if self
                .document_repository
                .find_by_equipment_and_hash(request.equipment_id, &hash)
                .await?
                .is_some()
            {
                return Err(UploadDocumentsError::DuplicateFile(file.file_name.clone()));
            }
            hashes.push(hash);
        }

        let ingestions = request.files.iter().zip(&hashes).map(|(file, hash)| {
            self.ingestion_service.ingest_file(
                &equipment,
                &file.file_name,
                &file.content_type,
                &file.data,
                request.description.clone(),
                &request.uploaded_by,
                hash,
            )
        });

        let mut documents = Vec::with_capacity(request.files.len());
        for (file, result) in request.files.iter().zip(join_all(ingestions).await) {
            // A concurrent upload can slip past the pre-check; the unique
            // hash index surfaces it here instead.
            let document = match result {
                Ok(document) => document,
                Err(IngestionError::DuplicateDocument) => {
                    return Err(UploadDocumentsError::DuplicateFile(file.file_name.clone()));
                }
                Err(e) => return Err(UploadDocumentsError::IngestionError(e.to_string())),
            };
            documents.push(document);
        }

        Ok(UploadDocumentsResponse {
            equipment_id: request.equipment_id,
            documents,
        })
    }
}

fn content_hash(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pgvector::Vector;

    use crate::application::ports::{EmbeddingProvider, TextExtractor};
    use crate::application::ports::embedding_provider::EmbeddingProviderError;
    use crate::application::ports::text_extractor::TextExtractionError;
    use crate::application::services::WindowSplitter;
    use crate::domain::entities::{DocumentChunk, Equipment};
    use crate::domain::repositories::ChunkRepository;
    use crate::domain::repositories::chunk_repository::ChunkRepositoryError;
    use crate::domain::repositories::chunk_repository::ScoredChunk;

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

    struct FakeExtractor;

    #[async_trait]
    impl TextExtractor for FakeExtractor {
        fn can_extract(&self, content_type: &str, _file_name: &str) -> bool {
            content_type == "text/plain"
        }

        async fn extract_text(
            &self,
            data: &[u8],
            _content_type: &str,
            _file_name: &str,
        ) -> Result<String, TextExtractionError> {
            Ok(String::from_utf8_lossy(data).to_string())
        }
    }

    struct FakeEmbedder;

    #[async_trait]
    impl EmbeddingProvider for FakeEmbedder {
        async fn embed_text(&self, _text: &str) -> Result<Vector, EmbeddingProviderError> {
            Ok(Vector::from(vec![0.5, 0.5]))
        }

        async fn embed_batch(
            &self,
            texts: &[String],
        ) -> Result<Vec<Vector>, EmbeddingProviderError> {
            Ok(texts.iter().map(|_| Vector::from(vec![0.5, 0.5])).collect())
        }

        fn embedding_dimension(&self) -> usize {
            2
        }
    }

    struct NullChunks;

    #[async_trait]
    impl ChunkRepository for NullChunks {
        async fn save_batch(&self, _chunks: &[DocumentChunk]) -> Result<(), ChunkRepositoryError> {
            Ok(())
        }

        async fn similarity_search(
            &self,
            _query_embedding: &Vector,
            _tenant_id: &str,
            _equipment_id: Uuid,
            _k: i64,
        ) -> Result<Vec<ScoredChunk>, ChunkRepositoryError> {
            Ok(Vec::new())
        }

        async fn delete_by_equipment(
            &self,
            _equipment_id: Uuid,
        ) -> Result<usize, ChunkRepositoryError> {
            Ok(0)
        }
    }

    /// Passes the pre-insert hash check but rejects the insert itself, the
    /// way the unique index behaves when a concurrent upload wins the race.
    struct RacyDocuments;

    #[async_trait]
    impl DocumentRepository for RacyDocuments {
        async fn save(&self, _document: &Document) -> Result<(), DocumentRepositoryError> {
            Err(DocumentRepositoryError::DuplicateContent)
        }

        async fn update_status(
            &self,
            _document: &Document,
        ) -> Result<(), DocumentRepositoryError> {
            Ok(())
        }

        async fn find_by_id(
            &self,
            _document_id: Uuid,
        ) -> Result<Option<Document>, DocumentRepositoryError> {
            Ok(None)
        }

        async fn find_by_equipment_and_hash(
            &self,
            _equipment_id: Uuid,
            _content_hash: &str,
        ) -> Result<Option<Document>, DocumentRepositoryError> {
            Ok(None)
        }

        async fn list_by_equipment(
            &self,
            _equipment_id: Uuid,
        ) -> Result<Vec<Document>, DocumentRepositoryError> {
            Ok(Vec::new())
        }

        async fn delete_by_equipment(
            &self,
            _equipment_id: Uuid,
        ) -> Result<usize, DocumentRepositoryError> {
            Ok(0)
        }
    }

    fn use_case(document_repository: Arc<dyn DocumentRepository>) -> (UploadDocumentsUseCase, Uuid) {
        let equipment = Equipment::new("tenant-a".to_string(), "Boiler B2".to_string(), None);
        let equipment_id = equipment.id();
        let ingestion_service = Arc::new(IngestionService::new(
            Arc::new(FakeExtractor),
            Arc::new(FakeEmbedder),
            document_repository.clone(),
            Arc::new(NullChunks),
            WindowSplitter::new(50, 10),
        ));
        let use_case = UploadDocumentsUseCase::new(
            Arc::new(SingleEquipment { equipment }),
            document_repository,
            ingestion_service,
        );
        (use_case, equipment_id)
    }

    fn file(name: &str, data: &[u8]) -> UploadedFile {
        UploadedFile {
            file_name: name.to_string(),
            content_type: "text/plain".to_string(),
            data: data.to_vec(),
        }
    }

    #[tokio::test]
    async fn test_duplicate_within_batch_rejected() {
        let (use_case, equipment_id) = use_case(Arc::new(RacyDocuments));

        let result = use_case
            .execute(UploadDocumentsRequest {
                equipment_id,
                files: vec![
                    file("manual.txt", b"identical content"),
                    file("manual-copy.txt", b"identical content"),
                ],
                description: None,
                uploaded_by: "mvp_user".to_string(),
            })
            .await;

        assert!(matches!(
            result,
            Err(UploadDocumentsError::DuplicateFile(name)) if name == "manual-copy.txt"
        ));
    }

    #[tokio::test]
    async fn test_concurrent_duplicate_insert_reported_as_duplicate_file() {
        let (use_case, equipment_id) = use_case(Arc::new(RacyDocuments));

        let result = use_case
            .execute(UploadDocumentsRequest {
                equipment_id,
                files: vec![file("manual.txt", b"fresh content")],
                description: None,
                uploaded_by: "mvp_user".to_string(),
            })
            .await;

        assert!(matches!(
            result,
            Err(UploadDocumentsError::DuplicateFile(name)) if name == "manual.txt"
        ));
    }
}
