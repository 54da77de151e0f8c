//! Lexical normalization: tokenization plus lemma substitution.
//!
//! Produces the [`TokenSet`]s used by the small-talk gate and the decision
//! policy's lexical-confirmation guard. Pure CPU, no I/O, deterministic for a
//! fixed lemmatizer.

pub mod lemma;

#[cfg(test)]
mod tests;

pub use lemma::{IdentityLemmatizer, Lemmatize, SnowballLemmatizer};

use std::collections::BTreeSet;
use std::sync::{Arc, LazyLock};

use regex::Regex;

/// Set of normalized tokens. Order-independent, deduplicated.
pub type TokenSet = BTreeSet<String>;

/// Tokens at or below this length are kept verbatim; stemming short tokens is
/// unreliable and mangles abbreviations ("ID", "CV", "ИНН").
pub const MIN_LEMMA_LEN: usize = 4;

// Letter runs and digit runs, matching the corpus importer's notion of a word.
static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\p{L}+|\p{N}+").expect("token pattern is valid"));

/// Tokenizer + lemmatizer pair shared across concurrent decision calls.
///
/// Read-only after construction; clone freely (the lemmatizer is behind an
/// [`Arc`]).
#[derive(Clone)]
pub struct Normalizer {
    lemmatizer: Arc<dyn Lemmatize>,
}

impl std::fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Normalizer")
            .field("lemmatizer", &self.lemmatizer.name())
            .finish()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(Arc::new(SnowballLemmatizer::new()))
    }
}

impl Normalizer {
    pub fn new(lemmatizer: Arc<dyn Lemmatize>) -> Self {
        Self { lemmatizer }
    }

    /// Extracts the normalized token set of `text`.
    ///
    /// Alphanumeric runs are case-folded; runs longer than
    /// [`MIN_LEMMA_LEN`]` - 1` characters are replaced by their lemma.
    /// Duplicates collapse; empty input yields an empty set.
    pub fn token_set(&self, text: &str) -> TokenSet {
        TOKEN_RE
            .find_iter(text)
            .map(|m| {
                let token = m.as_str().to_lowercase();
                if token.chars().count() < MIN_LEMMA_LEN {
                    token
                } else {
                    self.lemmatizer.lemma(&token)
                }
            })
            .collect()
    }

    /// Number of distinct normalized tokens in `text`.
    pub fn token_count(&self, text: &str) -> usize {
        self.token_set(text).len()
    }

    /// Shared non-trivial tokens between two texts (length ≥ 2 after
    /// normalization). This is the `good` set of the lexical-confirmation
    /// guard.
    pub fn shared_tokens(&self, a: &str, b: &str) -> TokenSet {
        let set_a = self.token_set(a);
        let set_b = self.token_set(b);

        set_a
            .intersection(&set_b)
            .filter(|t| t.chars().count() >= 2)
            .cloned()
            .collect()
    }
}
