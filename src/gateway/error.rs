use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::constants::VERDICT_STATUS_HEADER;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A pipeline collaborator (index, model) failed. Distinct from an
    /// escalation, which is a successful decision.
    #[error("decision failed: {0}")]
    DecisionFailed(String),

    #[error("corpus reload failed: {0}")]
    ReloadFailed(String),

    #[error("no corpus file configured; set VERDICT_CORPUS_PATH")]
    NoCorpusConfigured,
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, verdict_status) = match &self {
            GatewayError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            GatewayError::DecisionFailed(_) => (StatusCode::BAD_GATEWAY, "decision_error"),
            GatewayError::ReloadFailed(_) => (StatusCode::INTERNAL_SERVER_ERROR, "reload_error"),
            GatewayError::NoCorpusConfigured => (StatusCode::BAD_REQUEST, "no_corpus"),
        };

        let mut headers = HeaderMap::new();
        headers.insert(
            VERDICT_STATUS_HEADER,
            HeaderValue::from_str(verdict_status).unwrap_or(HeaderValue::from_static("error")),
        );

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        });

        (status, headers, body).into_response()
    }
}
