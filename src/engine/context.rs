use tracing::debug;

use crate::constants::CONTEXT_TOP_N;
use crate::corpus::LanguageCode;
use crate::reranker::rank_by_score;

use super::{EngineError, FaqEngine};
use crate::retrieval::FaqIndex;

impl<I: FaqIndex> FaqEngine<I> {
    /// Builds a grounding context for a generative fallback: the top
    /// reranked FAQ entries rendered as question/answer blocks.
    ///
    /// Retrieves a wider slice than it keeps so the reranker has room to
    /// reorder. Empty string when nothing relevant exists, which the caller
    /// should treat as "answer from general knowledge only".
    pub async fn build_context(
        &self,
        query: &str,
        language: LanguageCode,
    ) -> Result<String, EngineError> {
        let candidates = self
            .retriever
            .retrieve(query, language, CONTEXT_TOP_N * 2)
            .await?;

        if candidates.is_empty() {
            return Ok(String::new());
        }

        let mut scored = self.encoder.score_batch(query, candidates)?;
        rank_by_score(&mut scored);
        scored.truncate(CONTEXT_TOP_N);

        debug!(blocks = scored.len(), "Built fallback context");

        let blocks: Vec<String> = scored
            .iter()
            .map(|sc| {
                format!(
                    "Q: {}\nA: {}",
                    sc.candidate.entry.question, sc.candidate.entry.answer
                )
            })
            .collect();

        Ok(blocks.join("\n\n"))
    }
}
