use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::Document;
use crate::domain::value_objects::EmbeddingStatus;
use crate::infrastructure::database::schema::documents;

#[derive(Debug, Clone, Queryable, Selectable, Serialize, Identifiable, Associations)]
#[diesel(belongs_to(super::EquipmentModel, foreign_key = equipment_id))]
#[diesel(table_name = documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DocumentModel {
    pub id: Uuid,
    pub equipment_id: Uuid,
    pub tenant_id: String,
    pub file_name: String,
    pub content_type: String,
    pub size: i64,
    pub description: Option<String>,
    pub uploaded_by: String,
    pub content_hash: String,
    pub embedding_status: String,
    pub embedding_error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewDocumentModel {
    pub id: Uuid,
    pub equipment_id: Uuid,
    pub tenant_id: String,
    pub file_name: String,
    pub content_type: String,
    pub size: i64,
    pub description: Option<String>,
    pub uploaded_by: String,
    pub content_hash: String,
    pub embedding_status: String,
    pub embedding_error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Document> for NewDocumentModel {
    fn from(document: &Document) -> Self {
        Self {
            id: document.id(),
            equipment_id: document.equipment_id(),
            tenant_id: document.tenant_id().to_string(),
            file_name: document.file_name().to_string(),
            content_type: document.content_type().to_string(),
            size: document.size(),
            description: document.description().map(|s| s.to_string()),
            uploaded_by: document.uploaded_by().to_string(),
            content_hash: document.content_hash().to_string(),
            embedding_status: document.embedding_status().as_str().to_string(),
            embedding_error: document
                .embedding_status()
                .error_detail()
                .map(|s| s.to_string()),
            created_at: document.created_at(),
            updated_at: document.updated_at(),
        }
    }
}

impl From<DocumentModel> for Document {
    fn from(model: DocumentModel) -> Self {
        let status =
            EmbeddingStatus::from_str_with_error(&model.embedding_status, model.embedding_error);
        Document::from_parts(
            model.id,
            model.equipment_id,
            model.tenant_id,
            model.file_name,
            model.content_type,
            model.size,
            model.description,
            model.uploaded_by,
            model.content_hash,
            status,
            model.created_at,
            model.updated_at,
        )
    }
}
