use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::presentation::http::handlers::SessionHandler;

pub fn stream_routes(session_handler: Arc<SessionHandler>) -> Router {
    Router::new()
        .route("/api/v1/stream/connect", post(SessionHandler::connect))
        .route(
            "/api/v1/stream/ws/{session_id}",
            get(SessionHandler::websocket),
        )
        .with_state(session_handler)
}
