use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::use_cases::{
    ListDocumentsUseCase, UploadDocumentsUseCase,
    list_documents::ListDocumentsError,
    upload_documents::{UploadDocumentsError, UploadDocumentsRequest, UploadedFile},
};
use crate::presentation::http::dto::{
    ApiResponse, DocumentListResponseDto, DocumentResponseDto, UploadDocumentsResponseDto,
};

pub struct DocumentHandler {
    upload_use_case: Arc<UploadDocumentsUseCase>,
    list_use_case: Arc<ListDocumentsUseCase>,
    default_user_id: String,
}

impl DocumentHandler {
    pub fn new(
        upload_use_case: Arc<UploadDocumentsUseCase>,
        list_use_case: Arc<ListDocumentsUseCase>,
        default_user_id: String,
    ) -> Self {
        Self {
            upload_use_case,
            list_use_case,
            default_user_id,
        }
    }

    pub async fn upload_documents(
        State(handler): State<Arc<DocumentHandler>>,
        Path(equipment_id): Path<Uuid>,
        mut multipart: Multipart,
    ) -> Result<impl IntoResponse, StatusCode> {
        let mut files = Vec::new();
        let mut description = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|_| StatusCode::BAD_REQUEST)?
        {
            match field.name() {
                Some("description") => {
                    description = field.text().await.ok().filter(|s| !s.trim().is_empty());
                }
                _ => {
                    let file_name = match field.file_name() {
                        Some(name) => name.to_string(),
                        None => continue,
                    };
                    let content_type = field
                        .content_type()
                        .map(|ct| ct.to_string())
                        .unwrap_or_else(|| "application/octet-stream".to_string());
                    let data = field
                        .bytes()
                        .await
                        .map_err(|_| StatusCode::BAD_REQUEST)?
                        .to_vec();

                    files.push(UploadedFile {
                        file_name,
                        content_type,
                        data,
                    });
                }
            }
        }

        let request = UploadDocumentsRequest {
            equipment_id,
            files,
            description,
            uploaded_by: handler.default_user_id.clone(),
        };

        match handler.upload_use_case.execute(request).await {
            Ok(response) => {
                let dto = UploadDocumentsResponseDto {
                    equipment_id: response.equipment_id,
                    documents: response
                        .documents
                        .into_iter()
                        .map(DocumentResponseDto::from)
                        .collect(),
                };
                Ok((StatusCode::CREATED, Json(ApiResponse::success(dto))))
            }
            Err(UploadDocumentsError::EquipmentNotFound(id)) => Ok((
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error(
                    "EQUIPMENT_NOT_FOUND".to_string(),
                    format!("Equipment not found: {}", id),
                    None,
                )),
            )),
            Err(UploadDocumentsError::ValidationError(msg)) => Ok((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error("INVALID_UPLOAD".to_string(), msg, None)),
            )),
            Err(UploadDocumentsError::DuplicateFile(name)) => Ok((
                StatusCode::CONFLICT,
                Json(ApiResponse::error(
                    "DUPLICATE_FILE".to_string(),
                    format!("File already uploaded: {}", name),
                    None,
                )),
            )),
            Err(e) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(
                    "UPLOAD_FAILED".to_string(),
                    e.to_string(),
                    None,
                )),
            )),
        }
    }

    pub async fn list_documents(
        State(handler): State<Arc<DocumentHandler>>,
        Path(equipment_id): Path<Uuid>,
    ) -> Result<impl IntoResponse, StatusCode> {
        match handler.list_use_case.execute(equipment_id).await {
            Ok(response) => {
                let dto = DocumentListResponseDto {
                    equipment_id: response.equipment_id,
                    total: response.total,
                    documents: response
                        .documents
                        .into_iter()
                        .map(DocumentResponseDto::from)
                        .collect(),
                };
                Ok((StatusCode::OK, Json(ApiResponse::success(dto))))
            }
            Err(ListDocumentsError::EquipmentNotFound(id)) => Ok((
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error(
                    "EQUIPMENT_NOT_FOUND".to_string(),
                    format!("Equipment not found: {}", id),
                    None,
                )),
            )),
            Err(e) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(
                    "LIST_FAILED".to_string(),
                    e.to_string(),
                    None,
                )),
            )),
        }
    }
}
