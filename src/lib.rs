//! FAQ relevance decision engine (library crate, used by the server binary
//! and integration tests).
//!
//! Answers one question per query: does the curated FAQ corpus confidently
//! answer it, or should it escalate? The pipeline is retrieve, rerank, then
//! threshold-gate with lexical confirmation; every stage is deterministic and
//! every rejection names its reason.
//!
//! # Public API Surface
//!
//! - [`Config`], [`ConfigError`] - Service configuration
//! - [`FaqEngine`], [`EngineError`] - The decision pipeline
//! - [`Decision`], [`EscalationReason`], [`DecisionPolicy`], [`Thresholds`] - Policy layer
//! - [`Normalizer`], [`SmallTalkFilter`] - Lexical front-end
//! - [`QueryEmbedder`], [`SemanticRetriever`], [`QdrantFaqIndex`] - Retrieval
//! - [`CrossEncoder`], [`ScoredCandidate`] - Relevance scoring
//! - [`FaqEntry`], [`LanguageCode`], [`load_csv_corpus`] - Corpus handling
//! - [`FallbackResponder`] - Generative fallback for escalations
//!
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod corpus;
pub mod embedding;
pub mod engine;
pub mod fallback;
pub mod gateway;
pub mod hashing;
pub mod lexical;
pub mod policy;
pub mod reranker;
pub mod retrieval;
pub mod smalltalk;

pub use config::{Config, ConfigError};
pub use corpus::{CorpusError, FaqEntry, LanguageCode, load_csv_corpus};
pub use embedding::{EmbedderConfig, EmbeddingError, QueryEmbedder};
pub use engine::{EngineError, FaqEngine};
pub use fallback::{FallbackError, FallbackResponder, NO_ANSWER_MARKER};
pub use hashing::{faq_point_id, hash_to_u64};
pub use lexical::{Normalizer, TokenSet};
pub use policy::{Decision, DecisionPolicy, EscalationReason, ThresholdError, Thresholds};
pub use reranker::{CrossEncoder, CrossEncoderConfig, RerankerError, ScoredCandidate, rank_by_score};
pub use retrieval::{
    Candidate, FaqIndex, IndexHit, QdrantFaqIndex, RetrievalError, SemanticRetriever,
};
#[cfg(any(test, feature = "mock"))]
pub use retrieval::MockFaqIndex;
pub use smalltalk::{SmallTalkError, SmallTalkFilter};
