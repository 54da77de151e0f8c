use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{info, instrument, warn};

use crate::constants::VERDICT_STATUS_HEADER;
use crate::gateway::error::GatewayError;
use crate::gateway::payload::{AnswerRequest, AnswerResponse, ReloadResponse};
use crate::gateway::state::HandlerState;
use crate::policy::Decision;
use crate::retrieval::FaqIndex;

/// POST `/v1/answer`: run the decision pipeline for one query.
///
/// Escalations come back as HTTP 200 with `status: "escalated"`; an HTTP
/// error means the pipeline itself failed, not that the query was judged
/// unanswerable.
#[instrument(skip(state, request), fields(language = %request.language))]
pub async fn answer_handler<I>(
    State(state): State<HandlerState<I>>,
    Json(request): Json<AnswerRequest>,
) -> Result<Response, GatewayError>
where
    I: FaqIndex + 'static,
{
    let decision = state
        .engine
        .decide_for_query(&request.query, request.language)
        .await
        .map_err(|e| GatewayError::DecisionFailed(e.to_string()))?;

    match decision {
        Decision::Answer { answer, confidence } => {
            make_response(AnswerResponse::answered(answer, confidence), "answered")
        }
        Decision::Escalate { reason } => {
            let reason_str = reason.as_str();

            if let Some(ref fallback) = state.fallback {
                let context = state
                    .engine
                    .build_context(&request.query, request.language)
                    .await
                    .unwrap_or_else(|e| {
                        warn!(error = %e, "Context build failed, fallback runs without excerpts");
                        String::new()
                    });

                match fallback.answer(&request.query, &context).await {
                    Ok(Some(answer)) => {
                        info!(reason = reason_str, "Escalation answered by fallback model");
                        return make_response(
                            AnswerResponse::from_fallback(answer, reason_str),
                            "fallback",
                        );
                    }
                    Ok(None) => {
                        info!(reason = reason_str, "Fallback model declined");
                    }
                    Err(e) => {
                        // The policy verdict still stands; a broken fallback
                        // must not turn an escalation into an outage.
                        warn!(error = %e, "Fallback completion failed");
                    }
                }
            }

            make_response(AnswerResponse::escalated(reason_str), reason_str)
        }
    }
}

/// POST `/v1/reload`: re-read the configured CSV corpus and rebuild the index.
#[instrument(skip(state))]
pub async fn reload_handler<I>(
    State(state): State<HandlerState<I>>,
) -> Result<Response, GatewayError>
where
    I: FaqIndex + 'static,
{
    let path = state
        .corpus_path
        .as_deref()
        .ok_or(GatewayError::NoCorpusConfigured)?;

    let indexed = state
        .engine
        .reload_corpus(path)
        .await
        .map_err(|e| GatewayError::ReloadFailed(e.to_string()))?;

    Ok((StatusCode::OK, Json(ReloadResponse { indexed })).into_response())
}

fn make_response(payload: AnswerResponse, status: &str) -> Result<Response, GatewayError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        VERDICT_STATUS_HEADER,
        HeaderValue::from_str(status).unwrap_or(HeaderValue::from_static("error")),
    );

    Ok((StatusCode::OK, headers, Json(payload)).into_response())
}
