use super::*;
use crate::corpus::{FaqEntry, LanguageCode};

fn candidate(question: &str, rank: usize) -> Candidate {
    Candidate {
        entry: FaqEntry::new(question, LanguageCode::En, "some answer"),
        retrieval_rank: rank,
        similarity: 0.5,
    }
}

fn scored(score: f32, rank: usize) -> ScoredCandidate {
    ScoredCandidate {
        candidate: candidate("q", rank),
        score,
    }
}

#[test]
fn test_stub_scores_are_deterministic() {
    let encoder = CrossEncoder::stub().unwrap();
    let a = encoder.score_pair("visa application", "how to apply for a visa").unwrap();
    let b = encoder.score_pair("visa application", "how to apply for a visa").unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_stub_prefers_overlapping_candidate() {
    let encoder = CrossEncoder::stub().unwrap();

    let relevant = encoder
        .score_pair(
            "how do I apply for the internship visa",
            "How do I apply for the internship visa?",
        )
        .unwrap();
    let irrelevant = encoder
        .score_pair(
            "how do I apply for the internship visa",
            "What is the cafeteria menu on weekends?",
        )
        .unwrap();

    assert!(relevant > irrelevant);
}

#[test]
fn test_stub_empty_query_scores_zero() {
    let encoder = CrossEncoder::stub().unwrap();
    assert_eq!(encoder.score_pair("", "anything").unwrap(), 0.0);
    assert_eq!(encoder.score_pair("???", "anything").unwrap(), 0.0);
}

#[test]
fn test_batch_preserves_length_order_and_identity() {
    let encoder = CrossEncoder::stub().unwrap();
    let candidates = vec![
        candidate("first question about visas", 0),
        candidate("second question about deadlines", 1),
        candidate("third question about housing", 2),
    ];

    let batch = encoder.score_batch("visa deadline", candidates).unwrap();

    assert_eq!(batch.len(), 3);
    for (i, sc) in batch.iter().enumerate() {
        assert_eq!(sc.candidate.retrieval_rank, i);
    }
}

#[test]
fn test_batch_of_one_still_scores() {
    let encoder = CrossEncoder::stub().unwrap();
    let batch = encoder
        .score_batch("visa", vec![candidate("visa question", 0)])
        .unwrap();
    assert_eq!(batch.len(), 1);
}

#[test]
fn test_rank_by_score_descending() {
    let mut batch = vec![scored(0.3, 0), scored(0.9, 1), scored(0.6, 2)];
    rank_by_score(&mut batch);

    let scores: Vec<f32> = batch.iter().map(|s| s.score).collect();
    assert_eq!(scores, vec![0.9, 0.6, 0.3]);
}

#[test]
fn test_rank_by_score_breaks_ties_by_retrieval_rank() {
    let mut batch = vec![scored(0.5, 2), scored(0.5, 0), scored(0.5, 1)];
    rank_by_score(&mut batch);

    let ranks: Vec<usize> = batch.iter().map(|s| s.candidate.retrieval_rank).collect();
    assert_eq!(ranks, vec![0, 1, 2]);
}

#[test]
fn test_missing_model_dir_fails_load() {
    let err = CrossEncoder::load(CrossEncoderConfig::new("/nonexistent/reranker")).unwrap_err();
    assert!(matches!(err, RerankerError::ModelNotFound { .. }));
}

#[test]
fn test_zero_seq_len_config_rejected() {
    let config = CrossEncoderConfig {
        max_seq_len: 0,
        ..CrossEncoderConfig::stub()
    };
    let err = CrossEncoder::load(config).unwrap_err();
    assert!(matches!(err, RerankerError::InvalidConfig { .. }));
}
