/// Outcome of one decision call.
///
/// Escalation is the default: every guard failure lands here, and the caller
/// decides what escalation means (human handoff, generative fallback).
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// Confidently matched FAQ answer.
    Answer {
        /// Curated answer of the winning entry.
        answer: String,
        /// Cross-encoder score of the winning entry.
        confidence: f32,
    },
    /// No confident match; defer to the caller.
    Escalate {
        /// Which guard forced the escalation.
        reason: EscalationReason,
    },
}

/// Why a query escalated instead of being answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscalationReason {
    /// Conversational filler, rejected before retrieval.
    SmallTalk,
    /// Fewer than two scored candidates: no margin, no reliability.
    InsufficientCandidates,
    /// Best score under the absolute threshold.
    BelowAbsoluteThreshold,
    /// Gap between top-1 and top-2 too small: genuine ambiguity.
    AmbiguousMargin,
    /// No lexical overlap backing up the semantic match.
    NoLexicalSupport,
}

impl EscalationReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            EscalationReason::SmallTalk => "small_talk",
            EscalationReason::InsufficientCandidates => "insufficient_candidates",
            EscalationReason::BelowAbsoluteThreshold => "below_absolute_threshold",
            EscalationReason::AmbiguousMargin => "ambiguous_margin",
            EscalationReason::NoLexicalSupport => "no_lexical_support",
        }
    }
}

impl Decision {
    pub fn escalate(reason: EscalationReason) -> Self {
        Decision::Escalate { reason }
    }

    /// Returns the answer text (`None` means escalate).
    pub fn answer(&self) -> Option<&str> {
        match self {
            Decision::Answer { answer, .. } => Some(answer),
            Decision::Escalate { .. } => None,
        }
    }

    /// Returns the confidence score (`None` means escalate).
    pub fn confidence(&self) -> Option<f32> {
        match self {
            Decision::Answer { confidence, .. } => Some(*confidence),
            Decision::Escalate { .. } => None,
        }
    }

    pub fn is_escalation(&self) -> bool {
        matches!(self, Decision::Escalate { .. })
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Decision::Answer { confidence, .. } => {
                write!(f, "ANSWER (confidence: {confidence:.4})")
            }
            Decision::Escalate { reason } => write!(f, "ESCALATE ({})", reason.as_str()),
        }
    }
}
