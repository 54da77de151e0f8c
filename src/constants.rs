//! Shared defaults used across modules.
//!
//! Threshold constants live in [`crate::policy::Thresholds`]; everything here
//! is structural (collection naming, candidate counts, embedding geometry).

/// Qdrant collection holding the FAQ corpus.
pub const FAQ_COLLECTION_NAME: &str = "faq_entries";

/// Candidates fetched from the index per decision call.
pub const DEFAULT_TOP_K: usize = 15;

/// FAQ documents placed into the generative-fallback context.
pub const CONTEXT_TOP_N: usize = 4;

/// Default embedding dimension (multilingual sentence-transformer family).
pub const DEFAULT_EMBEDDING_DIM: usize = 768;

/// Default max sequence length for the embedder and cross-encoder tokenizers.
pub const DEFAULT_MAX_SEQ_LEN: usize = 512;

/// Payload field carrying the language tag on each indexed point.
pub const PAYLOAD_LANG: &str = "lang";

/// Payload field carrying the FAQ question text.
pub const PAYLOAD_QUESTION: &str = "question";

/// Payload field carrying the curated answer.
pub const PAYLOAD_ANSWER: &str = "answer";

/// Response header carrying the decision outcome on gateway replies.
pub const VERDICT_STATUS_HEADER: &str = "x-verdict-status";
