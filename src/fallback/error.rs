use thiserror::Error;

#[derive(Debug, Error)]
pub enum FallbackError {
    #[error("chat completion failed after retry: {message}")]
    CompletionFailed { message: String },

    #[error("model returned an empty completion")]
    EmptyCompletion,
}
