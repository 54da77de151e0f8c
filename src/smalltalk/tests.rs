use super::*;
use crate::lexical::Normalizer;

fn filter() -> SmallTalkFilter {
    SmallTalkFilter::standard().expect("built-in patterns compile")
}

fn normalizer() -> Normalizer {
    Normalizer::default()
}

#[test]
fn test_empty_pattern_list_is_rejected() {
    let err = SmallTalkFilter::new(&[]).unwrap_err();
    assert!(matches!(err, SmallTalkError::EmptyPatternList));
}

#[test]
fn test_invalid_pattern_is_rejected() {
    let err = SmallTalkFilter::new(&[r"(unclosed"]).unwrap_err();
    assert!(matches!(err, SmallTalkError::InvalidPattern { .. }));
}

#[test]
fn test_greetings_match() {
    let f = filter();
    let n = normalizer();

    for text in [
        "привет, как дела?",
        "Здравствуй, подскажи пожалуйста про общежитие",
        "hello there, quick question about the visa process please",
        "Good morning everyone, hope you are doing well today",
    ] {
        assert!(f.is_small_talk(text, &n), "expected small talk: {text:?}");
    }
}

#[test]
fn test_embedded_how_are_you_matches_unanchored() {
    let f = filter();
    let n = normalizer();
    assert!(f.is_small_talk("so tell me, how are you doing these days my friend", &n));
}

#[test]
fn test_short_queries_are_small_talk_regardless_of_content() {
    let f = filter();
    let n = normalizer();

    // ≤ 2 normalized tokens → small talk, even for on-topic words.
    assert!(f.is_small_talk("visa", &n));
    assert!(f.is_small_talk("internship visa", &n));
    assert!(f.is_small_talk("??", &n));
    assert!(f.is_small_talk("", &n));
}

#[test]
fn test_real_questions_pass_through() {
    let f = filter();
    let n = normalizer();

    for text in [
        "how do I apply for the internship visa",
        "какие документы нужны для оформления визы участника",
        "when does the registration deadline close this year",
    ] {
        assert!(!f.is_small_talk(text, &n), "false positive: {text:?}");
    }
}

#[test]
fn test_greeting_word_mid_sentence_is_not_anchored_match() {
    let f = filter();
    let n = normalizer();

    // "привет" only counts at the start of the message.
    let text = "передай привет координатору и скажи когда дедлайн подачи документов";
    assert!(!f.is_small_talk(text, &n));
}

#[test]
fn test_custom_cutoff() {
    let f = SmallTalkFilter::with_max_tokens(DEFAULT_SMALL_TALK_PATTERNS, 0)
        .expect("patterns compile");
    let n = normalizer();

    // Cutoff 0 disables the token heuristic for non-empty queries.
    assert!(!f.is_small_talk("internship visa", &n));
}
