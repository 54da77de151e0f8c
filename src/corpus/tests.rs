use super::*;
use std::io::Write;
use std::str::FromStr;
use tempfile::NamedTempFile;

fn write_corpus(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp corpus");
    file.write_all(contents.as_bytes()).expect("write corpus");
    file.flush().expect("flush corpus");
    file
}

#[test]
fn test_language_roundtrip() {
    for lang in LanguageCode::ALL {
        assert_eq!(LanguageCode::from_str(lang.as_str()).unwrap(), lang);
    }
}

#[test]
fn test_language_parse_is_case_insensitive() {
    assert_eq!(LanguageCode::from_str(" RU ").unwrap(), LanguageCode::Ru);
    assert_eq!(LanguageCode::from_str("En").unwrap(), LanguageCode::En);
}

#[test]
fn test_language_parse_rejects_unknown() {
    let err = LanguageCode::from_str("de").unwrap_err();
    assert!(matches!(err, CorpusError::UnknownLanguage { tag } if tag == "de"));
}

#[test]
fn test_confirmation_text_joins_question_and_answer() {
    let entry = FaqEntry::new("How to apply?", LanguageCode::En, "Use the portal.");
    assert_eq!(entry.confirmation_text(), "How to apply? Use the portal.");
}

#[test]
fn test_load_basic_corpus() {
    let file = write_corpus(
        "q_ru,q_en,a_ru,a_en\n\
         Как подать документы?,How do I apply?,Через портал.,Via the portal.\n",
    );

    let entries = load_csv_corpus(file.path()).expect("load");
    assert_eq!(entries.len(), 2);

    let en: Vec<_> = entries
        .iter()
        .filter(|e| e.language == LanguageCode::En)
        .collect();
    assert_eq!(en.len(), 1);
    assert_eq!(en[0].question, "How do I apply?");
    assert_eq!(en[0].answer, "Via the portal.");
}

#[test]
fn test_blank_cells_are_skipped() {
    let file = write_corpus(
        "q_ru,q_en,a_ru,a_en\n\
         Вопрос?,,Ответ.,\n\
         ,Question?,,Answer.\n",
    );

    let entries = load_csv_corpus(file.path()).expect("load");
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().any(|e| e.language == LanguageCode::Ru));
    assert!(entries.iter().any(|e| e.language == LanguageCode::En));
}

#[test]
fn test_missing_answer_column_is_invalid_header() {
    let file = write_corpus("q_ru,q_en,a_ru\nВопрос?,Question?,Ответ.\n");

    let err = load_csv_corpus(file.path()).unwrap_err();
    assert!(matches!(err, CorpusError::InvalidHeader { .. }));
}

#[test]
fn test_header_without_language_columns_is_rejected() {
    let file = write_corpus("foo,bar\n1,2\n");

    let err = load_csv_corpus(file.path()).unwrap_err();
    assert!(matches!(err, CorpusError::InvalidHeader { .. }));
}

#[test]
fn test_all_blank_rows_yield_empty_corpus() {
    let file = write_corpus("q_ru,a_ru\n,\n,\n");

    let err = load_csv_corpus(file.path()).unwrap_err();
    assert!(matches!(err, CorpusError::EmptyCorpus { .. }));
}

#[test]
fn test_missing_file() {
    let err = load_csv_corpus(std::path::Path::new("/nonexistent/faq.csv")).unwrap_err();
    assert!(matches!(err, CorpusError::FileNotFound { .. }));
}
