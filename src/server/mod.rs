#![allow(clippy::result_large_err)]

//! Inbound HTTP surface: `POST /api/process` plus a liveness probe.

use crate::core::config::RelayConfig;
use crate::core::error::AppError;
use crate::core::pipeline::{SubmissionPipeline, ValidationError};
use crate::core::types::ErrorCategory;
use axum::{
    body::{Body, Bytes},
    extract::{DefaultBodyLimit, Extension},
    http::{header, HeaderValue, Response, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use std::any::Any;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower::util::MapResponseLayer;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{info, Instrument};
use uuid::Uuid;

/// State shared across requests. Read-only after startup.
struct ServerState {
    pipeline: SubmissionPipeline,
}

/// Start the relay listener and block until the service terminates.
pub async fn serve(config: &RelayConfig) -> Result<(), AppError> {
    serve_internal(config, None).await
}

/// Start the relay listener and notify once the bind address is known (test helper).
pub async fn serve_with_ready_notifier(
    config: &RelayConfig,
    ready_notifier: oneshot::Sender<SocketAddr>,
) -> Result<(), AppError> {
    serve_internal(config, Some(ready_notifier)).await
}

async fn serve_internal(
    config: &RelayConfig,
    ready_notifier: Option<oneshot::Sender<SocketAddr>>,
) -> Result<(), AppError> {
    let pipeline = SubmissionPipeline::from_config(config)?;
    let bind_addr: SocketAddr = config.server.bind.parse().map_err(|err| {
        AppError::new(
            ErrorCategory::ConfigError,
            format!("invalid bind address {}: {}", config.server.bind, err),
        )
    })?;
    let endpoint = pipeline.dispatcher().endpoint().clone();
    let timeout = pipeline.dispatcher().timeout();
    let app = router(pipeline, config.server.max_body_bytes);

    let listener = TcpListener::bind(bind_addr).await.map_err(|err| {
        AppError::new(
            ErrorCategory::IoError,
            format!("failed to bind relay listener {}: {}", bind_addr, err),
        )
    })?;
    let local_addr = listener.local_addr().map_err(|err| {
        AppError::new(
            ErrorCategory::IoError,
            format!("failed to determine relay listener address: {}", err),
        )
    })?;
    if let Some(tx) = ready_notifier {
        let _ = tx.send(local_addr);
    }
    info!(
        "relay listening on {} (webhook {}, timeout {} ms)",
        local_addr,
        endpoint,
        timeout.as_millis()
    );
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| {
            AppError::new(
                ErrorCategory::InternalError,
                format!("relay server terminated: {}", err),
            )
        })
}

/// Build the HTTP router around an already-configured pipeline.
pub fn router(pipeline: SubmissionPipeline, max_body_bytes: usize) -> Router {
    let state = Arc::new(ServerState { pipeline });
    Router::new()
        .route("/api/process", post(handle_process))
        .route("/api/process-article", post(handle_process))
        .route("/api/health", get(handle_health))
        .layer(Extension(state))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(CorsLayer::permissive())
        .layer(MapResponseLayer::new(|mut response: Response<Body>| {
            if response.status() == StatusCode::PAYLOAD_TOO_LARGE {
                *response.body_mut() = Body::from(json!({"error": "payload too large"}).to_string());
                response.headers_mut().insert(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("application/json"),
                );
                response.headers_mut().remove(header::CONTENT_LENGTH);
            }
            response
        }))
}

async fn handle_process(
    Extension(state): Extension<Arc<ServerState>>,
    body: Bytes,
) -> Result<Json<Value>, ApiRejection> {
    let span = tracing::info_span!("submission", request_id = %Uuid::new_v4());
    async move {
        let raw: Value = serde_json::from_slice(&body)
            .map_err(|_| ApiRejection::bad_request("invalid JSON payload"))?;
        let pipeline = state.pipeline.clone();
        let payload = tokio::task::spawn_blocking(move || pipeline.prepare(&raw))
            .await
            .map_err(|err| {
                ApiRejection::internal(AppError::new(
                    ErrorCategory::InternalError,
                    format!("submission preparation task failed: {}", err),
                ))
            })?
            .map_err(ApiRejection::validation)?;
        let result = state.pipeline.deliver(payload).await;
        let body = serde_json::to_value(&result)
            .map_err(|err| ApiRejection::internal(AppError::from(err)))?;
        Ok::<_, ApiRejection>(Json(body))
    }
    .instrument(span)
    .await
}

async fn handle_health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "message": "API is running",
    }))
}

fn handle_panic(_panic: Box<dyn Any + Send + 'static>) -> Response<Body> {
    tracing::error!("request handler panicked");
    ApiRejection::internal_response()
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received, draining connections");
    }
}

struct ApiRejection {
    status: StatusCode,
    message: String,
}

impl ApiRejection {
    fn bad_request<T: Into<String>>(message: T) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn validation(err: ValidationError) -> Self {
        tracing::debug!("submission rejected: {}", err);
        Self::bad_request(err.to_string())
    }

    fn internal(err: AppError) -> Self {
        tracing::error!("submission processing error: {}", err);
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "internal server error".to_string(),
        }
    }

    fn internal_response() -> Response<Body> {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "internal server error".to_string(),
        }
        .into_response()
    }
}

impl IntoResponse for ApiRejection {
    fn into_response(self) -> Response<Body> {
        let mut resp = Json(json!({ "error": self.message })).into_response();
        *resp.status_mut() = self.status;
        resp
    }
}
