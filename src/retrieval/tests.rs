use super::*;
use crate::corpus::{FaqEntry, LanguageCode};
use crate::embedding::QueryEmbedder;

fn sample_corpus() -> Vec<FaqEntry> {
    vec![
        FaqEntry::new(
            "How do I apply for the internship visa?",
            LanguageCode::En,
            "Submit the visa form through the portal.",
        ),
        FaqEntry::new(
            "What documents are required for registration?",
            LanguageCode::En,
            "Passport, photo, and the signed agreement.",
        ),
        FaqEntry::new(
            "When is the application deadline?",
            LanguageCode::En,
            "Applications close on May 31.",
        ),
        FaqEntry::new(
            "Как подать документы на визу?",
            LanguageCode::Ru,
            "Загрузите форму через портал.",
        ),
    ]
}

fn retriever() -> SemanticRetriever<MockFaqIndex> {
    SemanticRetriever::new(QueryEmbedder::stub().unwrap(), MockFaqIndex::new())
}

#[tokio::test]
async fn test_rebuild_reports_entry_count() {
    let r = retriever();
    let count = r.rebuild(sample_corpus()).await.unwrap();
    assert_eq!(count, 4);
    assert_eq!(r.index().point_count(), 4);
}

#[tokio::test]
async fn test_language_filter_excludes_other_languages() {
    let r = retriever();
    r.rebuild(sample_corpus()).await.unwrap();

    let candidates = r
        .retrieve("документы на визу", LanguageCode::Ru, 10)
        .await
        .unwrap();

    assert_eq!(candidates.len(), 1);
    assert!(candidates.iter().all(|c| c.entry.language == LanguageCode::Ru));
}

#[tokio::test]
async fn test_small_language_subset_returns_all_without_padding() {
    let r = retriever();
    r.rebuild(sample_corpus()).await.unwrap();

    // k larger than the English subset: all three come back, no padding.
    let candidates = r
        .retrieve("visa application", LanguageCode::En, 15)
        .await
        .unwrap();
    assert_eq!(candidates.len(), 3);
}

#[tokio::test]
async fn test_retrieval_ranks_are_sequential() {
    let r = retriever();
    r.rebuild(sample_corpus()).await.unwrap();

    let candidates = r
        .retrieve("deadline for applications", LanguageCode::En, 3)
        .await
        .unwrap();

    for (i, c) in candidates.iter().enumerate() {
        assert_eq!(c.retrieval_rank, i);
    }

    // Similarity ordering is descending.
    for pair in candidates.windows(2) {
        assert!(pair[0].similarity >= pair[1].similarity);
    }
}

#[tokio::test]
async fn test_empty_language_subset_is_empty_not_error() {
    let r = retriever();
    r.rebuild(sample_corpus()).await.unwrap();

    let candidates = r.retrieve("visa", LanguageCode::Ar, 5).await.unwrap();
    assert!(candidates.is_empty());
}

#[tokio::test]
async fn test_rebuild_is_idempotent_for_identical_corpus() {
    let r = retriever();
    r.rebuild(sample_corpus()).await.unwrap();
    r.rebuild(sample_corpus()).await.unwrap();
    assert_eq!(r.index().point_count(), 4);
}

#[tokio::test]
async fn test_index_outage_propagates_as_error() {
    let r = retriever();
    r.rebuild(sample_corpus()).await.unwrap();
    r.index().fail_searches(true);

    let err = r.retrieve("visa", LanguageCode::En, 5).await.unwrap_err();
    assert!(matches!(err, RetrievalError::SearchFailed { .. }));
}

#[test]
fn test_cosine_similarity_edge_cases() {
    assert_eq!(cosine_similarity(&[], &[]), 0.0);
    assert_eq!(cosine_similarity(&[1.0], &[1.0, 0.0]), 0.0);
    assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-6);
    assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
}
