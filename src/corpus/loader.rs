//! CSV corpus loader.
//!
//! Expected layout mirrors the curated FAQ sheet: one row per FAQ item, a
//! question column per language (`q_ru`, `q_en`, ...) followed by an answer
//! column per language (`a_ru`, `a_en`, ...). A row contributes one
//! [`FaqEntry`] per language where both cells are non-blank; blank cells are
//! skipped silently so partially translated rows still load.

use std::path::Path;

use tracing::{debug, info};

use super::error::CorpusError;
use super::{FaqEntry, LanguageCode};

/// Loads every usable `(question, answer)` pair from `path`.
///
/// Returns [`CorpusError::EmptyCorpus`] if the file parses but yields no
/// entries, since an empty corpus cannot back the retriever.
pub fn load_csv_corpus(path: &Path) -> Result<Vec<FaqEntry>, CorpusError> {
    if !path.exists() {
        return Err(CorpusError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let columns = resolve_columns(reader.headers()?)?;

    let mut entries = Vec::new();
    for record in reader.records() {
        let record = record?;

        for (language, q_idx, a_idx) in &columns {
            let question = record.get(*q_idx).unwrap_or_default();
            let answer = record.get(*a_idx).unwrap_or_default();

            if question.is_empty() || answer.is_empty() {
                continue;
            }

            entries.push(FaqEntry::new(question, *language, answer));
        }
    }

    if entries.is_empty() {
        return Err(CorpusError::EmptyCorpus {
            path: path.to_path_buf(),
        });
    }

    info!(
        path = %path.display(),
        entries = entries.len(),
        "Corpus loaded"
    );

    Ok(entries)
}

/// Maps each supported language to its `(question, answer)` column indices.
///
/// Column order in the file is irrelevant; only the `q_<lang>` / `a_<lang>`
/// names matter. A language is included only when both columns are present.
fn resolve_columns(
    headers: &csv::StringRecord,
) -> Result<Vec<(LanguageCode, usize, usize)>, CorpusError> {
    let find = |name: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
    };

    let mut columns = Vec::new();
    for language in LanguageCode::ALL {
        let q_name = format!("q_{language}");
        let a_name = format!("a_{language}");

        match (find(&q_name), find(&a_name)) {
            (Some(q_idx), Some(a_idx)) => columns.push((language, q_idx, a_idx)),
            (None, None) => {
                debug!(lang = %language, "No corpus columns for language, skipping");
            }
            _ => {
                return Err(CorpusError::InvalidHeader {
                    reason: format!(
                        "language '{language}' has only one of '{q_name}'/'{a_name}'"
                    ),
                });
            }
        }
    }

    if columns.is_empty() {
        return Err(CorpusError::InvalidHeader {
            reason: "no q_<lang>/a_<lang> column pairs found".to_string(),
        });
    }

    Ok(columns)
}
