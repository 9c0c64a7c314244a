use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::use_cases::{
    RetrieveContextUseCase,
    retrieve_context::{RetrieveContextError, RetrieveContextRequest},
};
use crate::presentation::http::dto::{
    ApiResponse, RetrievalRequestDto, RetrievalResponseDto, RetrievedChunkDto,
};

pub struct RetrievalHandler {
    retrieve_use_case: Arc<RetrieveContextUseCase>,
}

impl RetrievalHandler {
    pub fn new(retrieve_use_case: Arc<RetrieveContextUseCase>) -> Self {
        Self { retrieve_use_case }
    }

    pub async fn retrieve(
        State(handler): State<Arc<RetrievalHandler>>,
        Path(equipment_id): Path<Uuid>,
        Json(body): Json<RetrievalRequestDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let request = RetrieveContextRequest {
            equipment_id,
            tenant_id: body.tenant_id,
            query: body.query,
            top_k: body.top_k,
        };

        match handler.retrieve_use_case.execute(request).await {
            Ok(response) => {
                let dto = RetrievalResponseDto {
                    query: response.query,
                    total_results: response.results.len(),
                    results: response
                        .results
                        .into_iter()
                        .map(RetrievedChunkDto::from)
                        .collect(),
                    context: response.context,
                    search_time_ms: response.search_time_ms,
                };
                Ok((StatusCode::OK, Json(ApiResponse::success(dto))))
            }
            Err(RetrieveContextError::EquipmentNotFound(id)) => Ok((
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error(
                    "EQUIPMENT_NOT_FOUND".to_string(),
                    format!("Equipment not found: {}", id),
                    None,
                )),
            )),
            Err(RetrieveContextError::ValidationError(msg)) => Ok((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error("INVALID_QUERY".to_string(), msg, None)),
            )),
            Err(e) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(
                    "RETRIEVAL_FAILED".to_string(),
                    e.to_string(),
                    None,
                )),
            )),
        }
    }
}
