use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::Document;

#[derive(Debug)]
pub enum DocumentRepositoryError {
    DatabaseError(String),
    NotFound(Uuid),
    /// The equipment already holds a document with this content hash.
    DuplicateContent,
}

impl std::fmt::Display for DocumentRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            DocumentRepositoryError::NotFound(id) => write!(f, "Document not found: {}", id),
            DocumentRepositoryError::DuplicateContent => {
                write!(f, "Duplicate document content for equipment")
            }
        }
    }
}

impl std::error::Error for DocumentRepositoryError {}

#[async_trait]
pub trait DocumentRepository: Send + Sync {
    async fn save(&self, document: &Document) -> Result<(), DocumentRepositoryError>;

    /// Persist the current embedding status (and error detail, if failed).
    async fn update_status(&self, document: &Document) -> Result<(), DocumentRepositoryError>;

    async fn find_by_id(&self, document_id: Uuid)
        -> Result<Option<Document>, DocumentRepositoryError>;

    /// Lookup by content hash, used to reject re-uploads of the same file.
    async fn find_by_equipment_and_hash(
        &self,
        equipment_id: Uuid,
        content_hash: &str,
    ) -> Result<Option<Document>, DocumentRepositoryError>;

    /// Documents for an equipment, newest first.
    async fn list_by_equipment(
        &self,
        equipment_id: Uuid,
    ) -> Result<Vec<Document>, DocumentRepositoryError>;

    async fn delete_by_equipment(
        &self,
        equipment_id: Uuid,
    ) -> Result<usize, DocumentRepositoryError>;
}
