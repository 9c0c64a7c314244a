use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::use_cases::{
    CreateEquipmentUseCase, DeleteEquipmentUseCase, GetEquipmentUseCase, ListEquipmentUseCase,
    create_equipment::{CreateEquipmentError, CreateEquipmentRequest},
    delete_equipment::DeleteEquipmentError,
    get_equipment::GetEquipmentError,
};
use crate::presentation::http::dto::{
    ApiResponse, CreateEquipmentDto, DeleteEquipmentResponseDto, EquipmentListResponseDto,
    EquipmentResponseDto,
};

pub struct EquipmentHandler {
    create_use_case: Arc<CreateEquipmentUseCase>,
    list_use_case: Arc<ListEquipmentUseCase>,
    get_use_case: Arc<GetEquipmentUseCase>,
    delete_use_case: Arc<DeleteEquipmentUseCase>,
    default_tenant_id: String,
}

impl EquipmentHandler {
    pub fn new(
        create_use_case: Arc<CreateEquipmentUseCase>,
        list_use_case: Arc<ListEquipmentUseCase>,
        get_use_case: Arc<GetEquipmentUseCase>,
        delete_use_case: Arc<DeleteEquipmentUseCase>,
        default_tenant_id: String,
    ) -> Self {
        Self {
            create_use_case,
            list_use_case,
            get_use_case,
            delete_use_case,
            default_tenant_id,
        }
    }

    pub async fn create_equipment(
        State(handler): State<Arc<EquipmentHandler>>,
        Json(body): Json<CreateEquipmentDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let request = CreateEquipmentRequest {
            tenant_id: handler.default_tenant_id.clone(),
            name: body.name,
            description: body.description,
        };

        match handler.create_use_case.execute(request).await {
            Ok(response) => {
                let dto = EquipmentResponseDto::from(response.equipment);
                Ok((StatusCode::CREATED, Json(ApiResponse::success(dto))))
            }
            Err(CreateEquipmentError::ValidationError(msg)) => Ok((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(
                    "INVALID_EQUIPMENT".to_string(),
                    msg,
                    None,
                )),
            )),
            Err(CreateEquipmentError::DuplicateName(msg)) => Ok((
                StatusCode::CONFLICT,
                Json(ApiResponse::error("DUPLICATE_NAME".to_string(), msg, None)),
            )),
            Err(e) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(
                    "CREATE_FAILED".to_string(),
                    e.to_string(),
                    None,
                )),
            )),
        }
    }

    pub async fn list_equipment(
        State(handler): State<Arc<EquipmentHandler>>,
    ) -> Result<impl IntoResponse, StatusCode> {
        match handler.list_use_case.execute().await {
            Ok(response) => {
                let dto = EquipmentListResponseDto {
                    total: response.total,
                    equipment: response
                        .equipment
                        .into_iter()
                        .map(EquipmentResponseDto::from)
                        .collect(),
                };
                Ok((StatusCode::OK, Json(ApiResponse::success(dto))))
            }
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

    pub async fn get_equipment(
        State(handler): State<Arc<EquipmentHandler>>,
        Path(equipment_id): Path<Uuid>,
    ) -> Result<impl IntoResponse, StatusCode> {
        match handler.get_use_case.execute(equipment_id).await {
            Ok(equipment) => {
                let dto = EquipmentResponseDto::from(equipment);
                Ok((StatusCode::OK, Json(ApiResponse::success(dto))))
            }
            Err(GetEquipmentError::NotFound(id)) => Ok((
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
                    "GET_FAILED".to_string(),
                    e.to_string(),
                    None,
                )),
            )),
        }
    }

    pub async fn delete_equipment(
        State(handler): State<Arc<EquipmentHandler>>,
        Path(equipment_id): Path<Uuid>,
    ) -> Result<impl IntoResponse, StatusCode> {
        match handler.delete_use_case.execute(equipment_id).await {
            Ok(response) => {
                let dto = DeleteEquipmentResponseDto {
                    equipment_id: response.equipment_id,
                    documents_deleted: response.documents_deleted,
                    chunks_deleted: response.chunks_deleted,
                };
                Ok((StatusCode::OK, Json(ApiResponse::success(dto))))
            }
            Err(DeleteEquipmentError::NotFound(id)) => Ok((
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
                    "DELETE_FAILED".to_string(),
                    e.to_string(),
                    None,
                )),
            )),
        }
    }
}
