//! Lemmatizer seam.
//!
//! The morphological model is an injected dependency so the decision policy
//! can be tested (or redeployed) without a specific dictionary. Implementors
//! must be deterministic and idempotent: `lemma(lemma(t)) == lemma(t)`.

use rust_stemmers::{Algorithm, Stemmer};

/// Maps an already-lowercased token to its base form.
pub trait Lemmatize: Send + Sync {
    /// Returns the lemma of `token`. Must be a pure function.
    fn lemma(&self, token: &str) -> String;

    /// Short implementation name, for logs and `Debug` output.
    fn name(&self) -> &'static str;
}

/// Snowball-based lemmatizer: Cyrillic tokens go through the Russian
/// algorithm, ASCII-alphabetic tokens through English, everything else is
/// returned unchanged.
///
/// This matches the corpus profile (Russian-heavy with Latin-script
/// questions mixed in) without claiming per-language morphology for the rest
/// of the supported set.
pub struct SnowballLemmatizer {
    russian: Stemmer,
    english: Stemmer,
}

impl SnowballLemmatizer {
    pub fn new() -> Self {
        Self {
            russian: Stemmer::create(Algorithm::Russian),
            english: Stemmer::create(Algorithm::English),
        }
    }
}

impl Default for SnowballLemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lemmatize for SnowballLemmatizer {
    fn lemma(&self, token: &str) -> String {
        if token.chars().any(is_cyrillic) {
            self.russian.stem(token).into_owned()
        } else if token.chars().all(|c| c.is_ascii_alphabetic()) {
            self.english.stem(token).into_owned()
        } else {
            token.to_string()
        }
    }

    fn name(&self) -> &'static str {
        "snowball"
    }
}

fn is_cyrillic(c: char) -> bool {
    ('\u{0400}'..='\u{04FF}').contains(&c)
}

/// No-op lemmatizer for tests that need exact token identity.
pub struct IdentityLemmatizer;

impl Lemmatize for IdentityLemmatizer {
    fn lemma(&self, token: &str) -> String {
        token.to_string()
    }

    fn name(&self) -> &'static str {
        "identity"
    }
}
