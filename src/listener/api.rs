//! HTTP handlers for the listener
//!
//! Two endpoints: the optional shutdown route, and a fallback that serves
//! every other path from the static directory.

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use serde::Serialize;

use crate::resource::{serve_content, ResourceError};

use super::server::AppState;

// ============================================================================
// Response Types
// ============================================================================

/// JSON body sent for every failed resource request
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub error: String,
    pub status: u16,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl ErrorEnvelope {
    pub fn new(message: impl Into<String>, status: StatusCode, kind: &'static str) -> Self {
        Self {
            error: message.into(),
            status: status.as_u16(),
            kind,
        }
    }
}

/// Body of the shutdown acknowledgement
#[derive(Debug, Serialize)]
pub struct ShutdownResponse {
    pub status: &'static str,
}

// ============================================================================
// Routes
// ============================================================================

/// Create the listener router
pub fn create_router(state: AppState) -> Router {
    let mut router = Router::new();

    if let Some(route) = state.config.shutdown_route() {
        tracing::info!(route = %route, "Shutdown endpoint registered");
        router = router.route(&route, any(shutdown_handler));
    }

    router.fallback(resource_handler).with_state(state)
}

// ============================================================================
// Handlers
// ============================================================================

/// Serve a file from the static directory
async fn resource_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let raw = uri.path();
    let decoded = urlencoding::decode(raw)
        .map(|p| p.into_owned())
        .unwrap_or_else(|_| raw.to_string());
    let title = decoded.strip_prefix('/').unwrap_or(&decoded);

    tracing::info!(method = %method, path = %title, "Resource request");

    let mut response = match state.resolver.resolve(title).await {
        Ok(resource) => {
            let response = serve_content(&method, &headers, &resource);
            tracing::info!(
                path = %title,
                status = response.status().as_u16(),
                mime = %resource.mime_type,
                "Resource served"
            );
            response
        }
        Err(err) => error_response(&err),
    };

    set_server_header(&mut response, &state.config.app_name);
    response
}

/// Acknowledge the shutdown request, then let the serve loop drain
async fn shutdown_handler(State(state): State<AppState>) -> Response {
    let started = state.shutdown.trigger();
    tracing::info!(
        timeout_secs = state.drain_timeout.as_secs(),
        started,
        "Shutdown requested"
    );

    let mut response = (
        StatusCode::OK,
        Json(ShutdownResponse {
            status: "shutting-down",
        }),
    )
        .into_response();
    set_server_header(&mut response, &state.config.app_name);
    response
}

// ============================================================================
// Helpers
// ============================================================================

/// Log a resource failure and render its JSON envelope
fn error_response(err: &ResourceError) -> Response {
    let status = err.status_code();
    tracing::error!(
        status = status.as_u16(),
        error = %err,
        kind = "resource",
        "Resource failure"
    );
    (status, Json(ErrorEnvelope::new(err.to_string(), status, "resource"))).into_response()
}

fn set_server_header(response: &mut Response, app_name: &str) {
    match HeaderValue::from_str(app_name) {
        Ok(value) => {
            response.headers_mut().insert(header::SERVER, value);
        }
        Err(_) => tracing::warn!(app_name = %app_name, "App name is not a valid header value"),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::listener::ShutdownState;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    fn state_for(dir: &std::path::Path, shutdown: &str) -> AppState {
        let config = Config::builder()
            .app_name("test-listener")
            .static_dir(dir)
            .shutdown_path(shutdown)
            .build()
            .unwrap();
        AppState::new(config)
    }

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_error_envelope_shape() {
        let envelope = ErrorEnvelope::new("not found [x]", StatusCode::NOT_FOUND, "resource");
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"error": "not found [x]", "status": 404, "type": "resource"})
        );
    }

    #[tokio::test]
    async fn test_serves_default_extension() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("schedule.txt"), "[420,1860]").unwrap();
        let app = create_router(state_for(dir.path(), ""));

        let response = app
            .oneshot(Request::get("/schedule").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/plain; charset=utf-8");
        assert_eq!(response.headers()[header::SERVER], "test-listener");
        assert_eq!(body_string(response).await, "[420,1860]");
    }

    #[tokio::test]
    async fn test_missing_file_returns_envelope() {
        let dir = tempfile::tempdir().unwrap();
        let app = create_router(state_for(dir.path(), ""));

        let response = app
            .oneshot(Request::get("/absent.json").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["status"], 404);
        assert_eq!(body["type"], "resource");
        assert_eq!(body["error"], "not found [absent.json]");
    }

    #[tokio::test]
    async fn test_encoded_traversal_is_forbidden() {
        let dir = tempfile::tempdir().unwrap();
        let app = create_router(state_for(dir.path(), ""));

        let response = app
            .oneshot(Request::get("/%2e%2e/secret").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_absolute_path_is_forbidden() {
        let dir = tempfile::tempdir().unwrap();
        let app = create_router(state_for(dir.path(), ""));

        let response = app
            .oneshot(Request::get("/%2Fetc/passwd").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_shutdown_route_acknowledges_and_triggers() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_for(dir.path(), "exit");
        let controller = state.shutdown.clone();
        let app = create_router(state);

        let response = app
            .oneshot(Request::post("/exit").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, r#"{"status":"shutting-down"}"#);
        assert_eq!(controller.state(), ShutdownState::Draining);
    }

    #[tokio::test]
    async fn test_no_shutdown_route_when_unconfigured() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_for(dir.path(), "");
        let controller = state.shutdown.clone();
        let app = create_router(state);

        let response = app
            .oneshot(Request::get("/exit").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(controller.state(), ShutdownState::Running);
    }
}
