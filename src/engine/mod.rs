//! The decision pipeline, end to end.
//!
//! Composes the normalizer, small-talk filter, semantic retriever,
//! cross-encoder and decision policy into a single `decide_for_query` call:
//!
//! ```text
//! query → small-talk gate → retrieve(k) → score → sort → policy → Decision
//! ```
//!
//! The engine owns no mutable state besides what the index holds; a corpus
//! reload rebuilds the index and every later decision sees the new corpus.

pub mod error;

mod context;


pub use error::EngineError;

use tracing::{debug, info};

use crate::constants::DEFAULT_TOP_K;
use crate::corpus::{self, LanguageCode};
use crate::lexical::Normalizer;
use crate::policy::{Decision, DecisionPolicy, EscalationReason};
use crate::reranker::{CrossEncoder, rank_by_score};
use crate::retrieval::{FaqIndex, SemanticRetriever};
use crate::smalltalk::SmallTalkFilter;

/// FAQ answering engine over a vector index `I`.
pub struct FaqEngine<I: FaqIndex> {
    normalizer: Normalizer,
    small_talk: SmallTalkFilter,
    retriever: SemanticRetriever<I>,
    encoder: CrossEncoder,
    policy: DecisionPolicy,
    top_k: usize,
}

impl<I: FaqIndex> std::fmt::Debug for FaqEngine<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FaqEngine")
            .field("encoder", &self.encoder)
            .field("top_k", &self.top_k)
            .finish_non_exhaustive()
    }
}

impl<I: FaqIndex> FaqEngine<I> {
    pub fn new(
        normalizer: Normalizer,
        small_talk: SmallTalkFilter,
        retriever: SemanticRetriever<I>,
        encoder: CrossEncoder,
        policy: DecisionPolicy,
    ) -> Self {
        Self {
            normalizer,
            small_talk,
            retriever,
            encoder,
            policy,
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Verifies the index is reachable and the collection exists.
    pub async fn ensure_ready(&self) -> Result<(), EngineError> {
        self.retriever.ensure_ready().await?;
        Ok(())
    }

    /// Runs the full pipeline for one query.
    ///
    /// `Err` means a collaborator failed; every judgement about the query
    /// itself (small talk, weak match, ambiguity) comes back as a
    /// [`Decision`].
    pub async fn decide_for_query(
        &self,
        query: &str,
        language: LanguageCode,
    ) -> Result<Decision, EngineError> {
        let query = query.trim();

        if self.small_talk.is_small_talk(query, &self.normalizer) {
            debug!(%language, "Query classified as small talk");
            return Ok(Decision::escalate(EscalationReason::SmallTalk));
        }

        let candidates = self.retriever.retrieve(query, language, self.top_k).await?;
        debug!(num_candidates = candidates.len(), %language, "Candidates retrieved");

        let mut scored = self.encoder.score_batch(query, candidates)?;
        rank_by_score(&mut scored);

        let decision = self.policy.decide(query, &scored);
        info!(%language, %decision, "Query decided");

        Ok(decision)
    }

    /// Loads a CSV corpus from disk and rebuilds the index from it.
    /// Returns the number of indexed entries.
    pub async fn reload_corpus(&self, path: &std::path::Path) -> Result<usize, EngineError> {
        let entries = corpus::loader::load_csv_corpus(path)?;
        let indexed = self.retriever.rebuild(entries).await?;
        info!(indexed, corpus = %path.display(), "Corpus reloaded");
        Ok(indexed)
    }

    pub fn retriever(&self) -> &SemanticRetriever<I> {
        &self.retriever
    }

    pub fn encoder(&self) -> &CrossEncoder {
        &self.encoder
    }

    pub fn policy(&self) -> &DecisionPolicy {
        &self.policy
    }
}
