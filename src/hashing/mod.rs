//! Deterministic point ids for indexed FAQ entries.
//!
//! Ids are derived from `(language, question)` so that re-importing the same
//! corpus overwrites points in place instead of accumulating duplicates.

use blake3::Hasher;

use crate::corpus::LanguageCode;

/// Computes a 64-bit id from arbitrary bytes (BLAKE3, truncated to 8 bytes).
///
/// 64 bits is plenty for a curated FAQ corpus (hundreds to low thousands of
/// entries); a collision would surface as one entry shadowing another at
/// import time, not as data corruption.
#[inline]
pub fn hash_to_u64(data: &[u8]) -> u64 {
    let hash = blake3::hash(data);
    let bytes: [u8; 8] = hash.as_bytes()[0..8]
        .try_into()
        .expect("BLAKE3 always produces at least 8 bytes");
    u64::from_le_bytes(bytes)
}

/// Point id for a FAQ entry, stable across reloads.
///
/// The language tag and question are hashed with a separator so that
/// `("ru", "ab")` and `("r", "uab")` cannot collide by concatenation.
#[inline]
pub fn faq_point_id(language: LanguageCode, question: &str) -> u64 {
    let mut hasher = Hasher::new();
    hasher.update(language.as_str().as_bytes());
    hasher.update(b"|");
    hasher.update(question.as_bytes());

    let hash = hasher.finalize();
    let bytes: [u8; 8] = hash.as_bytes()[0..8]
        .try_into()
        .expect("BLAKE3 always produces at least 8 bytes");
    u64::from_le_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_point_id_determinism() {
        let a = faq_point_id(LanguageCode::Ru, "Как подать документы?");
        let b = faq_point_id(LanguageCode::Ru, "Как подать документы?");
        assert_eq!(a, b);
    }

    #[test]
    fn test_point_id_language_sensitivity() {
        let ru = faq_point_id(LanguageCode::Ru, "visa");
        let en = faq_point_id(LanguageCode::En, "visa");
        assert_ne!(ru, en);
    }

    #[test]
    fn test_point_id_question_sensitivity() {
        let questions = [
            "How do I apply?",
            "How do I apply? ",
            "how do I apply?",
            "How do I appeal?",
        ];

        let ids: HashSet<_> = questions
            .iter()
            .map(|q| faq_point_id(LanguageCode::En, q))
            .collect();

        assert_eq!(ids.len(), questions.len());
    }

    #[test]
    fn test_separator_prevents_concatenation_ambiguity() {
        // "es" + "panol" vs "es" + "panol" with shifted boundaries cannot be
        // constructed through the typed API, but the raw hash must still
        // differ from a plain concatenation of the two fields.
        let id = faq_point_id(LanguageCode::Es, "panol");
        let concat = hash_to_u64(b"espanol");
        assert_ne!(id, concat);
    }

    #[test]
    fn test_hash_to_u64_empty_input() {
        assert_eq!(hash_to_u64(b""), hash_to_u64(b""));
    }
}
