use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::presentation::http::handlers::{DocumentHandler, EquipmentHandler, RetrievalHandler};

pub fn equipment_routes(equipment_handler: Arc<EquipmentHandler>) -> Router {
    Router::new()
        .route(
            "/api/v1/equipment",
            post(EquipmentHandler::create_equipment).get(EquipmentHandler::list_equipment),
        )
        .route(
            "/api/v1/equipment/{equipment_id}",
            get(EquipmentHandler::get_equipment).delete(EquipmentHandler::delete_equipment),
        )
        .with_state(equipment_handler)
}

pub fn document_routes(document_handler: Arc<DocumentHandler>) -> Router {
    Router::new()
        .route(
            "/api/v1/equipment/{equipment_id}/documents",
            post(DocumentHandler::upload_documents).get(DocumentHandler::list_documents),
        )
        .with_state(document_handler)
}

pub fn retrieval_routes(retrieval_handler: Arc<RetrievalHandler>) -> Router {
    Router::new()
        .route(
            "/api/v1/equipment/{equipment_id}/retrieve",
            post(RetrievalHandler::retrieve),
        )
        .with_state(retrieval_handler)
}
