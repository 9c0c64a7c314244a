use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::Document;

#[derive(Debug, Serialize)]
pub struct DocumentResponseDto {
    pub id: Uuid,
    pub equipment_id: Uuid,
    pub file_name: String,
    pub content_type: String,
    pub size: i64,
    pub description: Option<String>,
    pub uploaded_by: String,
    pub embedding_status: String,
    pub embedding_error: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Serialize)]
pub struct UploadDocumentsResponseDto {
    pub equipment_id: Uuid,
    pub documents: Vec<DocumentResponseDto>,
}

#[derive(Debug, Serialize)]
pub struct DocumentListResponseDto {
    pub equipment_id: Uuid,
    pub documents: Vec<DocumentResponseDto>,
    pub total: usize,
}

impl From<Document> for DocumentResponseDto {
    fn from(document: Document) -> Self {
        Self {
            id: document.id(),
            equipment_id: document.equipment_id(),
            file_name: document.file_name().to_string(),
            content_type: document.content_type().to_string(),
            size: document.size(),
            description: document.description().map(|s| s.to_string()),
            uploaded_by: document.uploaded_by().to_string(),
            embedding_status: document.embedding_status().as_str().to_string(),
            embedding_error: document
                .embedding_status()
                .error_detail()
                .map(|s| s.to_string()),
            created_at: document.created_at().to_rfc3339(),
            updated_at: document.updated_at().to_rfc3339(),
        }
    }
}
