//! Retrieval error types.
//!
//! These are collaborator failures: they propagate to the caller untouched
//! (distinct from "no confident match", which is a normal decision outcome).

use thiserror::Error;

use crate::embedding::EmbeddingError;

#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("failed to connect to vector index at {url}: {message}")]
    ConnectionFailed { url: String, message: String },

    #[error("collection '{collection}' setup failed: {message}")]
    CollectionFailed { collection: String, message: String },

    #[error("upsert into '{collection}' failed: {message}")]
    UpsertFailed { collection: String, message: String },

    #[error("search in '{collection}' failed: {message}")]
    SearchFailed { collection: String, message: String },

    #[error("index returned a malformed point: {reason}")]
    MalformedPoint { reason: String },
}
