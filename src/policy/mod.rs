//! Decision policy: accept the top candidate or escalate.
//!
//! Runs a fixed sequence of guards over the scored, score-descending
//! candidate list. The guards are ordered cheapest-first and every failure
//! maps to a distinct [`EscalationReason`], so a transcript of decisions can
//! be audited threshold by threshold. Pure and deterministic: same query,
//! same scores, same verdict.

pub mod config;
pub mod error;
mod types;

#[cfg(test)]
mod tests;

pub use config::Thresholds;
pub use error::ThresholdError;
pub use types::{Decision, EscalationReason};

use tracing::debug;

use crate::lexical::Normalizer;
use crate::reranker::ScoredCandidate;

/// Threshold-gated acceptance over reranked candidates.
///
/// Expects candidates sorted by score descending (see
/// [`rank_by_score`](crate::reranker::rank_by_score)); the margin guard is
/// meaningless otherwise.
#[derive(Debug, Clone)]
pub struct DecisionPolicy {
    thresholds: Thresholds,
    normalizer: Normalizer,
}

impl DecisionPolicy {
    pub fn new(thresholds: Thresholds, normalizer: Normalizer) -> Result<Self, ThresholdError> {
        thresholds.validate()?;
        Ok(Self {
            thresholds,
            normalizer,
        })
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Decides whether the best candidate answers `query`.
    ///
    /// Guard order: candidate count, absolute score, margin, lexical
    /// confirmation. The first failing guard wins.
    pub fn decide(&self, query: &str, scored: &[ScoredCandidate]) -> Decision {
        let t = &self.thresholds;

        if scored.len() < 2 {
            debug!(num_candidates = scored.len(), "Too few candidates to judge");
            return Decision::escalate(EscalationReason::InsufficientCandidates);
        }

        let best = &scored[0];
        let second = &scored[1];
        let margin = best.score - second.score;

        debug!(
            best_score = best.score,
            margin,
            best_question = %best.candidate.entry.question,
            "Evaluating top candidates"
        );

        if best.score < t.abs_th {
            debug!(best_score = best.score, abs_th = t.abs_th, "Below absolute threshold");
            return Decision::escalate(EscalationReason::BelowAbsoluteThreshold);
        }

        if margin < t.rel_diff {
            debug!(margin, rel_diff = t.rel_diff, "Top candidates too close");
            return Decision::escalate(EscalationReason::AmbiguousMargin);
        }

        if self.has_lexical_support(query, best, margin) {
            return Decision::Answer {
                answer: best.candidate.entry.answer.clone(),
                confidence: best.score,
            };
        }

        Decision::escalate(EscalationReason::NoLexicalSupport)
    }

    /// Lexical confirmation: the semantic winner must also share vocabulary
    /// with the query, unless its score is so dominant the overlap check
    /// would only add noise.
    fn has_lexical_support(&self, query: &str, best: &ScoredCandidate, margin: f32) -> bool {
        let t = &self.thresholds;

        // Dominant winner skips the overlap check entirely.
        if best.score >= t.override_score * t.scale && margin >= t.override_margin * t.scale {
            debug!(best.score, margin, "High-confidence override, skipping lexical check");
            return true;
        }

        let shared = self
            .normalizer
            .shared_tokens(query, &best.candidate.entry.confirmation_text());

        debug!(shared_tokens = shared.len(), "Lexical overlap with winner");

        match shared.len() {
            0 => false,
            1 => {
                // One shared lemma only carries the decision when the scores
                // are strong enough on their own.
                best.score >= t.backoff_score * t.scale && margin >= t.backoff_margin * t.scale
            }
            _ => true,
        }
    }
}
