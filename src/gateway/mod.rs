//! HTTP gateway (Axum) over the decision pipeline.
//!
//! Routes:
//! - `GET /healthz` liveness
//! - `GET /ready` readiness (index reachable, model modes)
//! - `POST /v1/answer` run one query through the pipeline
//! - `POST /v1/reload` re-index the configured corpus

pub mod error;
pub mod handler;
pub mod payload;
pub mod state;


use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header::HeaderValue},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::GatewayError;
pub use handler::{answer_handler, reload_handler};
pub use state::HandlerState;

use crate::constants::VERDICT_STATUS_HEADER;
use crate::retrieval::FaqIndex;

pub fn create_router_with_state<I>(state: HandlerState<I>) -> Router
where
    I: FaqIndex + 'static,
{
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/v1/answer", post(answer_handler))
        .route("/v1/reload", post(reload_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(serde::Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub components: ComponentStatus,
}

#[derive(serde::Serialize)]
pub struct ComponentStatus {
    pub http: &'static str,
    pub vectordb: &'static str,
    pub embedder_mode: &'static str,
    pub reranker_mode: &'static str,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(VERDICT_STATUS_HEADER, HeaderValue::from_static("healthy"));

    (
        StatusCode::OK,
        headers,
        Json(HealthResponse { status: "ok" }),
    )
        .into_response()
}

#[tracing::instrument(skip(state))]
pub async fn ready_handler<I>(State(state): State<HandlerState<I>>) -> Response
where
    I: FaqIndex + 'static,
{
    let vectordb_status = match state.engine.ensure_ready().await {
        Ok(()) => "ready",
        Err(_) => "pending",
    };

    let embedder_mode = if state.engine.retriever().embedder().is_stub() {
        "stub"
    } else {
        "real"
    };
    let reranker_mode = if state.engine.encoder().is_model_loaded() {
        "real"
    } else {
        "stub"
    };

    let components = ComponentStatus {
        http: "ready",
        vectordb: vectordb_status,
        embedder_mode,
        reranker_mode,
    };

    let is_ready = components.vectordb == "ready";
    let status_code = if is_ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    let status_msg = if is_ready { "ok" } else { "pending" };

    let mut headers = HeaderMap::new();
    headers.insert(
        VERDICT_STATUS_HEADER,
        HeaderValue::from_str(status_msg).unwrap_or(HeaderValue::from_static("error")),
    );

    (
        status_code,
        headers,
        Json(ReadyResponse {
            status: status_msg,
            components,
        }),
    )
        .into_response()
}
