use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use uuid::Uuid;

use crate::domain::entities::Document;
use crate::domain::repositories::{DocumentRepository, document_repository::DocumentRepositoryError};
use crate::infrastructure::database::models::{DocumentModel, NewDocumentModel};
use crate::infrastructure::database::schema::documents::dsl::*;
use crate::infrastructure::database::{DbPool, get_connection_from_pool};

pub struct PostgresDocumentRepository {
    pool: DbPool,
}

impl PostgresDocumentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentRepository for PostgresDocumentRepository {
    async fn save(&self, document: &Document) -> Result<(), DocumentRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        let new_document = NewDocumentModel::from(document);

        // The unique (equipment_id, content_hash) index closes the race
        // between the pre-insert duplicate check and the insert itself.
        diesel::insert_into(documents)
            .values(&new_document)
            .execute(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                    DocumentRepositoryError::DuplicateContent
                }
                e => DocumentRepositoryError::DatabaseError(e.to_string()),
            })?;

        Ok(())
    }

    async fn update_status(&self, document: &Document) -> Result<(), DocumentRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        let status = document.embedding_status();

        diesel::update(documents.find(document.id()))
            .set((
                embedding_status.eq(status.as_str()),
                embedding_error.eq(status.error_detail()),
                updated_at.eq(document.updated_at()),
            ))
            .execute(&mut conn)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_id(
        &self,
        document_id: Uuid,
    ) -> Result<Option<Document>, DocumentRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        let result = documents
            .find(document_id)
            .first::<DocumentModel>(&mut conn)
            .optional()
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        Ok(result.map(Document::from))
    }

    async fn find_by_equipment_and_hash(
        &self,
        equipment: Uuid,
        hash: &str,
    ) -> Result<Option<Document>, DocumentRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        let result = documents
            .filter(equipment_id.eq(equipment))
            .filter(content_hash.eq(hash))
            .first::<DocumentModel>(&mut conn)
            .optional()
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        Ok(result.map(Document::from))
    }

    async fn list_by_equipment(
        &self,
        equipment: Uuid,
    ) -> Result<Vec<Document>, DocumentRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        let models = documents
            .filter(equipment_id.eq(equipment))
            .order(created_at.desc())
            .load::<DocumentModel>(&mut conn)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        Ok(models.into_iter().map(Document::from).collect())
    }

    async fn delete_by_equipment(
        &self,
        equipment: Uuid,
    ) -> Result<usize, DocumentRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        diesel::delete(documents.filter(equipment_id.eq(equipment)))
            .execute(&mut conn)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))
    }
}
