use axum::{Router, middleware};
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::classify::ServerErrorsFailureClass;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::presentation::http::middleware::trace_id;
use crate::presentation::http::{
    handlers::{DocumentHandler, EquipmentHandler, RetrievalHandler, SessionHandler},
    routes::{
        document_routes, equipment_routes, health_routes, retrieval_routes, stream_routes,
    },
};

pub struct HttpServer {
    equipment_handler: Arc<EquipmentHandler>,
    document_handler: Arc<DocumentHandler>,
    retrieval_handler: Arc<RetrievalHandler>,
    session_handler: Arc<SessionHandler>,
    allowed_origins: Vec<String>,
    port: u16,
}

impl HttpServer {
    pub fn new(
        equipment_handler: Arc<EquipmentHandler>,
        document_handler: Arc<DocumentHandler>,
        retrieval_handler: Arc<RetrievalHandler>,
        session_handler: Arc<SessionHandler>,
        allowed_origins: Vec<String>,
        port: u16,
    ) -> Self {
        Self {
            equipment_handler,
            document_handler,
            retrieval_handler,
            session_handler,
            allowed_origins,
            port,
        }
    }

    fn cors_layer(&self) -> CorsLayer {
        if self.allowed_origins.is_empty() {
            return CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
        }

        let origins: Vec<_> = self
            .allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }

    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let cors = self.cors_layer();

        let app = Router::new()
            .merge(health_routes())
            .merge(equipment_routes(self.equipment_handler))
            .merge(document_routes(self.document_handler))
            .merge(retrieval_routes(self.retrieval_handler))
            .merge(stream_routes(self.session_handler))
            .layer(middleware::from_fn(trace_id))
            .layer(cors)
            .layer(RequestBodyLimitLayer::new(50 * 1024 * 1024)) // 50MB cap
            .layer(
                TraceLayer::new_for_http()
                    .on_request(
                        |request: &axum::http::Request<axum::body::Body>, _span: &tracing::Span| {
                            tracing::info!(
                                "Received request: {} {}",
                                request.method(),
                                request.uri()
                            );
                        },
                    )
                    .on_response(
                        |response: &axum::http::Response<axum::body::Body>,
                         latency: std::time::Duration,
                         _span: &tracing::Span| {
                            tracing::info!(
                                "Response: {} (took {} ms)",
                                response.status(),
                                latency.as_millis()
                            );
                        },
                    )
                    .on_failure(
                        |error: ServerErrorsFailureClass,
                         latency: std::time::Duration,
                         _span: &tracing::Span| {
                            tracing::error!(
                                "Request failed: {:?} (took {} ms)",
                                error,
                                latency.as_millis()
                            );
                        },
                    ),
            );

        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));

        tracing::info!("Listening on {}", addr);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}
