use axum::{
    body::Body,
    http::{HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

pub const TRACE_ID_HEADER: &str = "x-trace-id";

/// Attaches a trace id to every request. Incoming ids are kept so callers
/// can correlate across services; requests without one get a fresh UUID.
/// The id is echoed back on the response.
pub async fn trace_id(mut request: Request<Body>, next: Next) -> Response {
    let trace_id = request
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    if let Ok(value) = HeaderValue::from_str(&trace_id) {
        request.headers_mut().insert(TRACE_ID_HEADER, value.clone());

        // The span must wrap the whole downstream future so handler logs
        // carry the trace id, not just this middleware's own line.
        let span = tracing::info_span!("request", trace_id = %trace_id);
        let mut response = async {
            tracing::debug!(method = %request.method(), uri = %request.uri(), "Handling request");
            next.run(request).await
        }
        .instrument(span)
        .await;

        response.headers_mut().insert(TRACE_ID_HEADER, value);
        response
    } else {
        next.run(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, middleware, routing::get};
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(middleware::from_fn(trace_id))
    }

    #[tokio::test]
    async fn test_incoming_trace_id_is_echoed() {
        let request = Request::builder()
            .uri("/")
            .header(TRACE_ID_HEADER, "trace-abc-123")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(
            response.headers().get(TRACE_ID_HEADER).unwrap(),
            "trace-abc-123"
        );
    }

    #[tokio::test]
    async fn test_missing_trace_id_gets_generated() {
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();

        let response = app().oneshot(request).await.unwrap();
        let generated = response
            .headers()
            .get(TRACE_ID_HEADER)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(Uuid::parse_str(generated).is_ok());
    }
}
