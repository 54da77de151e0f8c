use serial_test::serial;

use super::*;
use crate::corpus::{FaqEntry, LanguageCode};
use crate::reranker::ScoredCandidate;
use crate::retrieval::Candidate;

fn sc(question: &str, answer: &str, score: f32, rank: usize) -> ScoredCandidate {
    ScoredCandidate {
        candidate: Candidate {
            entry: FaqEntry::new(question, LanguageCode::En, answer),
            retrieval_rank: rank,
            similarity: 0.5,
        },
        score,
    }
}

fn policy() -> DecisionPolicy {
    DecisionPolicy::new(Thresholds::default(), crate::lexical::Normalizer::default()).unwrap()
}

#[test]
fn test_no_candidates_escalates() {
    let decision = policy().decide("when is the visa deadline", &[]);
    assert_eq!(
        decision,
        Decision::escalate(EscalationReason::InsufficientCandidates)
    );
}

#[test]
fn test_single_candidate_escalates() {
    let scored = vec![sc("When is the visa deadline?", "June 1st.", 0.95, 0)];
    let decision = policy().decide("when is the visa deadline", &scored);
    assert_eq!(
        decision,
        Decision::escalate(EscalationReason::InsufficientCandidates)
    );
}

#[test]
fn test_low_best_score_escalates() {
    let scored = vec![
        sc("When is the visa deadline?", "June 1st.", 0.20, 0),
        sc("How do I get housing?", "Apply via the portal.", 0.15, 1),
    ];
    let decision = policy().decide("completely unrelated topic", &scored);
    assert_eq!(
        decision,
        Decision::escalate(EscalationReason::BelowAbsoluteThreshold)
    );
}

#[test]
fn test_narrow_margin_escalates() {
    // Margin 0.08 < 0.10 even though both clear the absolute threshold.
    let scored = vec![
        sc("When is the visa deadline?", "June 1st.", 0.50, 0),
        sc("When is the housing deadline?", "May 15th.", 0.42, 1),
    ];
    let decision = policy().decide("when is the deadline", &scored);
    assert_eq!(
        decision,
        Decision::escalate(EscalationReason::AmbiguousMargin)
    );
}

#[test]
fn test_zero_margin_escalates() {
    let scored = vec![
        sc("When is the visa deadline?", "June 1st.", 0.60, 0),
        sc("When is the housing deadline?", "May 15th.", 0.60, 1),
    ];
    let decision = policy().decide("when is the deadline", &scored);
    assert_eq!(
        decision,
        Decision::escalate(EscalationReason::AmbiguousMargin)
    );
}

#[test]
fn test_high_confidence_overrides_missing_overlap() {
    // Zero shared vocabulary, but 0.92 with a 0.37 margin is accepted anyway.
    let scored = vec![
        sc("Orbital mechanics of launches?", "Consult the handbook.", 0.92, 0),
        sc("Cafeteria weekend hours?", "Closed on weekends.", 0.55, 1),
    ];
    let decision = policy().decide("rocket trajectory question", &scored);
    assert_eq!(decision.answer(), Some("Consult the handbook."));
    assert_eq!(decision.confidence(), Some(0.92));
}

#[test]
fn test_two_shared_tokens_accept_at_modest_score() {
    let scored = vec![
        sc("When is the visa deadline?", "June 1st.", 0.55, 0),
        sc("Cafeteria weekend hours?", "Closed on weekends.", 0.30, 1),
    ];
    let decision = policy().decide("visa deadline for interns", &scored);
    assert_eq!(decision.answer(), Some("June 1st."));
}

#[test]
fn test_single_shared_token_needs_strong_scores() {
    // One shared lemma ("visa"). At 0.60 the back-off floor (0.65) is not
    // met; at 0.70 it is.
    let weak = vec![
        sc("Visa processing time?", "Processing takes two weeks.", 0.60, 0),
        sc("Cafeteria weekend hours?", "Closed on weekends.", 0.30, 1),
    ];
    let strong = vec![
        sc("Visa processing time?", "Processing takes two weeks.", 0.70, 0),
        sc("Cafeteria weekend hours?", "Closed on weekends.", 0.30, 1),
    ];

    let p = policy();
    assert_eq!(
        p.decide("visa status please", &weak),
        Decision::escalate(EscalationReason::NoLexicalSupport)
    );
    assert_eq!(
        p.decide("visa status please", &strong).answer(),
        Some("Processing takes two weeks.")
    );
}

#[test]
fn test_no_overlap_escalates_below_override() {
    let scored = vec![
        sc("Orbital mechanics of launches?", "Consult the handbook.", 0.70, 0),
        sc("Cafeteria weekend hours?", "Closed on weekends.", 0.40, 1),
    ];
    let decision = policy().decide("rocket trajectory question", &scored);
    assert_eq!(
        decision,
        Decision::escalate(EscalationReason::NoLexicalSupport)
    );
}

#[test]
fn test_answer_overlap_counts_toward_confirmation() {
    // "weeks" only appears in the answer text, yet still confirms the match
    // together with "visa" from the question.
    let scored = vec![
        sc("Visa processing time?", "Processing takes two weeks.", 0.55, 0),
        sc("Cafeteria weekend hours?", "Closed on Saturdays.", 0.30, 1),
    ];
    let decision = policy().decide("visa in two weeks", &scored);
    assert_eq!(decision.answer(), Some("Processing takes two weeks."));
}

#[test]
fn test_decide_is_deterministic() {
    let scored = vec![
        sc("When is the visa deadline?", "June 1st.", 0.55, 0),
        sc("Cafeteria weekend hours?", "Closed on weekends.", 0.30, 1),
    ];
    let p = policy();
    let first = p.decide("visa deadline for interns", &scored);
    for _ in 0..5 {
        assert_eq!(p.decide("visa deadline for interns", &scored), first);
    }
}

#[test]
fn test_display_formats() {
    let answer = Decision::Answer {
        answer: "June 1st.".into(),
        confidence: 0.9123,
    };
    assert_eq!(answer.to_string(), "ANSWER (confidence: 0.9123)");

    let escalate = Decision::escalate(EscalationReason::AmbiguousMargin);
    assert_eq!(escalate.to_string(), "ESCALATE (ambiguous_margin)");
    assert!(escalate.is_escalation());
    assert_eq!(escalate.answer(), None);
    assert_eq!(escalate.confidence(), None);
}

#[test]
fn test_zero_rel_diff_rejected() {
    let thresholds = Thresholds {
        rel_diff: 0.0,
        ..Thresholds::default()
    };
    assert!(matches!(
        thresholds.validate(),
        Err(ThresholdError::NotPositive { name: "rel_diff", .. })
    ));
}

#[test]
fn test_negative_abs_th_rejected() {
    let thresholds = Thresholds {
        abs_th: -0.1,
        ..Thresholds::default()
    };
    assert!(thresholds.validate().is_err());
}

#[test]
fn test_abs_th_above_scale_rejected() {
    let thresholds = Thresholds {
        abs_th: 1.5,
        ..Thresholds::default()
    };
    assert!(matches!(
        thresholds.validate(),
        Err(ThresholdError::AboveScale { .. })
    ));
}

#[test]
fn test_override_fraction_out_of_range_rejected() {
    let thresholds = Thresholds {
        override_score: 1.2,
        ..Thresholds::default()
    };
    assert!(matches!(
        thresholds.validate(),
        Err(ThresholdError::FractionOutOfRange { .. })
    ));
}

#[test]
#[serial]
fn test_thresholds_from_env_overrides() {
    unsafe {
        std::env::set_var("VERDICT_ABS_TH", "0.5");
        std::env::set_var("VERDICT_REL_DIFF", "0.2");
    }

    let thresholds = Thresholds::from_env();
    assert_eq!(thresholds.abs_th, 0.5);
    assert_eq!(thresholds.rel_diff, 0.2);
    assert_eq!(thresholds.scale, 1.0);

    unsafe {
        std::env::remove_var("VERDICT_ABS_TH");
        std::env::remove_var("VERDICT_REL_DIFF");
    }
}

#[test]
#[serial]
fn test_thresholds_from_env_ignores_garbage() {
    unsafe {
        std::env::set_var("VERDICT_ABS_TH", "not-a-number");
    }

    let thresholds = Thresholds::from_env();
    assert_eq!(thresholds.abs_th, config::DEFAULT_ABS_TH);

    unsafe {
        std::env::remove_var("VERDICT_ABS_TH");
    }
}
