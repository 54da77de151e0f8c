//! Request and response shapes for the gateway routes.

use serde::{Deserialize, Serialize};

use crate::corpus::LanguageCode;

#[derive(Debug, Clone, Deserialize)]
pub struct AnswerRequest {
    pub query: String,
    pub language: LanguageCode,
}

/// Reply for `/v1/answer`. Escalations are successful replies (HTTP 200)
/// with `status: "escalated"`; only collaborator failures become HTTP errors.
#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    /// `"answered"` or `"escalated"`.
    pub status: &'static str,

    /// `"faq"` for a corpus answer, `"fallback"` for a generated one,
    /// `"none"` on escalation.
    pub source: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,

    /// Cross-encoder score of the accepted entry. Absent for fallback
    /// answers, which carry no calibrated confidence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,

    /// Escalation reason; also set on fallback answers to show what the
    /// policy originally decided.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
}

impl AnswerResponse {
    pub fn answered(answer: String, confidence: f32) -> Self {
        Self {
            status: "answered",
            source: "faq",
            answer: Some(answer),
            confidence: Some(confidence),
            reason: None,
        }
    }

    pub fn from_fallback(answer: String, reason: &'static str) -> Self {
        Self {
            status: "answered",
            source: "fallback",
            answer: Some(answer),
            confidence: None,
            reason: Some(reason),
        }
    }

    pub fn escalated(reason: &'static str) -> Self {
        Self {
            status: "escalated",
            source: "none",
            answer: None,
            confidence: None,
            reason: Some(reason),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub indexed: usize,
}
