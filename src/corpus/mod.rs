//! FAQ corpus model and tabular loader.
//!
//! A corpus is a flat list of [`FaqEntry`] values, immutable once loaded.
//! Reloading replaces the whole set (see
//! [`SemanticRetriever::rebuild`](crate::retrieval::SemanticRetriever::rebuild)).

pub mod error;
pub mod loader;

#[cfg(test)]
mod tests;

pub use error::CorpusError;
pub use loader::load_csv_corpus;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of supported languages.
///
/// Used both to filter retrieval candidates and to select the response
/// language. Matching is exhaustive everywhere; unknown tags are rejected at
/// the boundary ([`FromStr`]), never compared as free-form strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCode {
    Ru,
    En,
    Es,
    Fr,
    Pt,
    Ar,
}

impl LanguageCode {
    /// All supported languages, in corpus column order.
    pub const ALL: [LanguageCode; 6] = [
        LanguageCode::Ru,
        LanguageCode::En,
        LanguageCode::Es,
        LanguageCode::Fr,
        LanguageCode::Pt,
        LanguageCode::Ar,
    ];

    /// Lowercase two-letter tag, as stored in index payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageCode::Ru => "ru",
            LanguageCode::En => "en",
            LanguageCode::Es => "es",
            LanguageCode::Fr => "fr",
            LanguageCode::Pt => "pt",
            LanguageCode::Ar => "ar",
        }
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LanguageCode {
    type Err = CorpusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ru" => Ok(LanguageCode::Ru),
            "en" => Ok(LanguageCode::En),
            "es" => Ok(LanguageCode::Es),
            "fr" => Ok(LanguageCode::Fr),
            "pt" => Ok(LanguageCode::Pt),
            "ar" => Ok(LanguageCode::Ar),
            other => Err(CorpusError::UnknownLanguage {
                tag: other.to_string(),
            }),
        }
    }
}

/// One curated question/answer pair, tagged with its language.
///
/// Entries are never mutated in place; a corpus reload produces a fresh set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqEntry {
    /// Canonical question text (what gets embedded and reranked against).
    pub question: String,
    /// Language of both question and answer.
    pub language: LanguageCode,
    /// Curated answer returned on a confident match.
    pub answer: String,
}

impl FaqEntry {
    pub fn new(
        question: impl Into<String>,
        language: LanguageCode,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            question: question.into(),
            language,
            answer: answer.into(),
        }
    }

    /// Text used for the lexical-confirmation guard: question plus answer,
    /// so an answer mentioning the queried term still counts as overlap.
    pub fn confirmation_text(&self) -> String {
        format!("{} {}", self.question, self.answer)
    }
}
