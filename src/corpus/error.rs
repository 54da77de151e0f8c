//! Corpus loading error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating a FAQ corpus.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// Corpus file missing on disk.
    #[error("corpus file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// CSV-level read/parse failure.
    #[error("failed to read corpus: {source}")]
    ReadFailed {
        #[from]
        source: csv::Error,
    },

    /// Header row does not carry the expected per-language columns.
    #[error("invalid corpus header: {reason}")]
    InvalidHeader { reason: String },

    /// Language tag outside the supported set.
    #[error("unknown language tag: '{tag}'")]
    UnknownLanguage { tag: String },

    /// Loader produced zero entries (empty corpora cannot back a retriever).
    #[error("corpus at {path} contains no usable entries")]
    EmptyCorpus { path: PathBuf },
}
