//! Pipeline errors: infrastructure failures only.
//!
//! A confident "no" is a [`Decision`](crate::policy::Decision), not an error.
//! Errors here mean a collaborator (vector index, scoring model) failed and
//! the caller should treat the query as unanswered.

use thiserror::Error;

use crate::corpus::CorpusError;
use crate::reranker::RerankerError;
use crate::retrieval::RetrievalError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("retrieval failed: {0}")]
    Retrieval(#[from] RetrievalError),

    #[error("relevance scoring failed: {0}")]
    Rerank(#[from] RerankerError),

    #[error("corpus load failed: {0}")]
    Corpus(#[from] CorpusError),
}
