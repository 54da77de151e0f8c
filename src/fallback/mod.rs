//! Generative fallback for escalated queries.
//!
//! When the decision policy refuses to answer, the caller may hand the query
//! to a chat model, grounded in the context blocks the engine built. The
//! model is instructed to emit a fixed marker instead of guessing; a marker
//! reply maps to `None` so downstream code keeps a single "no answer" path.
//!
//! Provider credentials come from the environment via `genai` (for example
//! `OPENAI_API_KEY`), matching how the client resolves every other provider.

pub mod error;

pub use error::FallbackError;

use genai::Client;
use genai::chat::{ChatMessage, ChatRequest};
use tracing::{debug, warn};

/// Marker the model is told to return when the context cannot answer.
pub const NO_ANSWER_MARKER: &str = "[NO_ANSWER]";

/// Default chat model for fallback completions.
pub const DEFAULT_FALLBACK_MODEL: &str = "gpt-4o-mini";

const SYSTEM_PROMPT: &str = "You are a support assistant for an internship program. \
Answer the user's question using ONLY the FAQ excerpts provided. \
Keep the answer short and factual, in the language of the question. \
If the excerpts do not contain the answer, reply with exactly [NO_ANSWER] and nothing else.";

/// Chat-model responder for queries the policy escalated.
#[derive(Clone)]
pub struct FallbackResponder {
    client: Client,
    model: String,
}

impl std::fmt::Debug for FallbackResponder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackResponder")
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl FallbackResponder {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            client: Client::default(),
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Asks the model to answer `query` from `context`.
    ///
    /// `Ok(None)` means the model declined via the marker. Transient provider
    /// failures get one retry before surfacing as an error.
    pub async fn answer(
        &self,
        query: &str,
        context: &str,
    ) -> Result<Option<String>, FallbackError> {
        let user_message = if context.is_empty() {
            format!("FAQ excerpts: (none)\n\nQuestion: {query}")
        } else {
            format!("FAQ excerpts:\n{context}\n\nQuestion: {query}")
        };

        let request = ChatRequest::new(vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(user_message),
        ]);

        let response = match self.client.exec_chat(&self.model, request.clone(), None).await {
            Ok(response) => response,
            Err(first_err) => {
                warn!(model = %self.model, error = %first_err, "Fallback completion failed, retrying once");
                self.client
                    .exec_chat(&self.model, request, None)
                    .await
                    .map_err(|e| FallbackError::CompletionFailed {
                        message: e.to_string(),
                    })?
            }
        };

        let text = response
            .first_text()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(FallbackError::EmptyCompletion)?;

        if is_no_answer(text) {
            debug!(model = %self.model, "Fallback model declined to answer");
            return Ok(None);
        }

        Ok(Some(text.to_string()))
    }
}

/// A reply counts as "no answer" when the marker appears anywhere in it;
/// models sometimes wrap the marker in apologies despite the instruction.
pub fn is_no_answer(text: &str) -> bool {
    text.contains(NO_ANSWER_MARKER)
}
