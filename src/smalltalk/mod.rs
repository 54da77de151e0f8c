//! Small-talk gate.
//!
//! Conversational filler must never reach the (externally billed) retrieval
//! and reranking models, so this runs first and is pure CPU: a token-count
//! heuristic plus a fixed, precompiled multilingual pattern list.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::SmallTalkError;

use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::lexical::Normalizer;

/// Queries with at most this many normalized tokens are treated as small
/// talk: one or two content words almost never describe an FAQ-answerable
/// question.
pub const SMALL_TALK_MAX_TOKENS: usize = 2;

/// Default pattern list: greetings and farewells anchored at start of
/// message, "how are you" / "what's new" style phrases matched anywhere.
pub const DEFAULT_SMALL_TALK_PATTERNS: &[&str] = &[
    // greetings
    r"^\s*(привет|здра[вв]ствуй|здор[оа]во|салют|хай)\b",
    r"^\s*добро[еия]\s+(утро|время|день|вечер)\b",
    r"^\s*(hello|hi|hey|good\s+(morning|afternoon|evening))\b",
    // "how are you"
    r"\bкак\s+(дела|ты|жизнь|оно|life|it\s+going)\b",
    // "what's new"
    r"\bч(е|т)о\s+нов(ого|енького)\b",
    r"\bwhat'?s?\s+up\b",
    // chit-chat
    r"\b(чем\s+занят|how\s+are\s+you\s+doing)\b",
    // thanks / goodbye as a standalone message
    r"^\s*(спасибо|thanks|thank\s+you)\b",
    r"^\s*(пока|bye|see\s+you)\b",
];

/// Precompiled small-talk classifier.
///
/// Immutable after construction; safe to share across concurrent calls
/// without synchronization. An empty or malformed pattern list is rejected
/// here rather than silently letting every query through.
#[derive(Debug, Clone)]
pub struct SmallTalkFilter {
    patterns: Vec<Regex>,
    max_tokens: usize,
}

impl SmallTalkFilter {
    /// Compiles `patterns` case-insensitively.
    pub fn new(patterns: &[&str]) -> Result<Self, SmallTalkError> {
        Self::with_max_tokens(patterns, SMALL_TALK_MAX_TOKENS)
    }

    /// Compiles `patterns` with a custom token-count cutoff.
    pub fn with_max_tokens(
        patterns: &[&str],
        max_tokens: usize,
    ) -> Result<Self, SmallTalkError> {
        if patterns.is_empty() {
            return Err(SmallTalkError::EmptyPatternList);
        }

        let compiled = patterns
            .iter()
            .map(|pat| {
                RegexBuilder::new(pat)
                    .case_insensitive(true)
                    .build()
                    .map_err(|source| SmallTalkError::InvalidPattern {
                        pattern: (*pat).to_string(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            patterns: compiled,
            max_tokens,
        })
    }

    /// Filter with the built-in pattern list.
    pub fn standard() -> Result<Self, SmallTalkError> {
        Self::new(DEFAULT_SMALL_TALK_PATTERNS)
    }

    /// Classifies `text` as small talk.
    ///
    /// O(len(text) × patterns); never errors, never does I/O.
    pub fn is_small_talk(&self, text: &str, normalizer: &Normalizer) -> bool {
        let text = text.trim();

        let token_count = normalizer.token_count(text);
        if token_count <= self.max_tokens {
            debug!(token_count, "Query classified as small talk (token count)");
            return true;
        }

        let matched = self.patterns.iter().any(|rx| rx.is_match(text));
        if matched {
            debug!("Query classified as small talk (pattern match)");
        }
        matched
    }

    /// Number of compiled patterns (non-zero by construction).
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }
}
