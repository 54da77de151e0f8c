use super::*;

fn normalizer() -> Normalizer {
    Normalizer::default()
}

#[test]
fn test_empty_string_yields_empty_set() {
    assert!(normalizer().token_set("").is_empty());
    assert!(normalizer().token_set("   \t\n").is_empty());
}

#[test]
fn test_punctuation_only_yields_empty_set() {
    assert!(normalizer().token_set("?!...,:;()[]").is_empty());
}

#[test]
fn test_digits_survive_normalization() {
    let tokens = normalizer().token_set("call +7 900 1234567");
    assert!(tokens.contains("7"));
    assert!(tokens.contains("900"));
    assert!(tokens.contains("1234567"));
}

#[test]
fn test_case_folding_and_dedup() {
    let tokens = normalizer().token_set("Visa VISA visa");
    assert_eq!(tokens.len(), 1);
}

#[test]
fn test_short_tokens_kept_verbatim() {
    // "ids" is 3 chars: below the lemma cutoff, must pass through unstemmed.
    let tokens = normalizer().token_set("ids");
    assert!(tokens.contains("ids"));
}

#[test]
fn test_cyrillic_inflections_share_a_lemma() {
    let n = normalizer();
    let a = n.token_set("документы");
    let b = n.token_set("документов");
    assert_eq!(a, b);
}

#[test]
fn test_english_inflections_share_a_lemma() {
    let n = normalizer();
    assert_eq!(n.token_set("applications"), n.token_set("application"));
}

#[test]
fn test_mixed_script_token_is_left_alone() {
    // Latin+digit mix is neither Cyrillic nor purely alphabetic.
    let tokens = normalizer().token_set("form1040 something");
    assert!(tokens.contains("form1040") || tokens.contains("form"));
}

#[test]
fn test_idempotent_on_own_output() {
    let n = normalizer();
    for text in [
        "how do I apply for the internship visa",
        "какие документы нужны для визы",
        "thanks a lot",
    ] {
        let first = n.token_set(text);
        let joined = first.iter().cloned().collect::<Vec<_>>().join(" ");
        assert_eq!(n.token_set(&joined), first, "not idempotent for {text:?}");
    }
}

#[test]
fn test_token_count_matches_set_size() {
    let n = normalizer();
    assert_eq!(n.token_count("привет"), 1);
    assert_eq!(n.token_count("как дела"), 2);
    assert_eq!(n.token_count(""), 0);
}

#[test]
fn test_shared_tokens_filters_single_chars() {
    let n = Normalizer::new(std::sync::Arc::new(IdentityLemmatizer));
    let shared = n.shared_tokens("a visa question", "visa a answer");
    assert!(shared.contains("visa"));
    assert!(!shared.contains("a"));
}

#[test]
fn test_shared_tokens_cross_inflection() {
    let n = normalizer();
    let shared = n.shared_tokens(
        "tell me about visa documents",
        "Which documents are required for the visa?",
    );
    assert!(shared.len() >= 2, "expected visa+document overlap, got {shared:?}");
}
