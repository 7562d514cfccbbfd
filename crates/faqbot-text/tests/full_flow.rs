use faqbot_core::corpus::builtin_corpus;
use faqbot_core::traits::AnswerMatcher;
use faqbot_core::types::FaqEntry;
use faqbot_text::TfIdfMatcher;

fn matcher() -> TfIdfMatcher {
    TfIdfMatcher::new(builtin_corpus().expect("builtin corpus")).expect("matcher")
}

#[test]
fn reset_password_is_an_exact_hit() {
    let m = matcher().find_best_match("How do I reset my password?").expect("match");
    assert_eq!(m.id, 1);
    assert_eq!(m.question, "How do I reset my password?");
    assert!(m.score > 1.0, "raw score exceeds 1 before clamping, got {}", m.score);
    assert!((m.confidence - 1.0).abs() < 1e-12);
}

#[test]
fn track_my_order() {
    let m = matcher().find_best_match("track my order").expect("match");
    assert_eq!(m.id, 4);
}

#[test]
fn nonsense_has_no_match() {
    assert!(matcher().find_best_match("xyzzy plugh quux").is_none());
}

#[test]
fn single_word_refund() {
    let m = matcher().find_best_match("refund").expect("match");
    assert_eq!(m.id, 8);
    assert!(m.confidence > 0.1 && m.confidence < 1.0, "confidence {}", m.confidence);
    assert_eq!(m.confidence, m.score);
}

#[test]
fn empty_query_has_no_match() {
    let matcher = matcher();
    assert!(matcher.find_best_match("").is_none());
    assert!(matcher.find_best_match("   ?!  ").is_none());
    assert!(matcher.find_best_match("how do I do it?").is_none(), "stop words only");
}

#[test]
fn every_question_finds_its_own_entry() {
    let corpus = builtin_corpus().expect("builtin corpus");
    let matcher = TfIdfMatcher::new(corpus.clone()).expect("matcher");
    for entry in &corpus {
        let m = matcher.find_best_match(&entry.question).expect("self match");
        assert_eq!(m.id, entry.id, "question {:?}", entry.question);
    }
}

#[test]
fn returned_confidence_is_bounded() {
    let matcher = matcher();
    for q in [
        "shipping",
        "my account is locked",
        "payment declined",
        "software crash",
        "cancel",
        "Can I get a student discount?",
        "hours",
    ] {
        let m = matcher.find_best_match(q).expect("match");
        assert!(m.score > 0.1, "{q:?} scored {}", m.score);
        assert!(m.confidence > 0.1 && m.confidence <= 1.0, "{q:?} confidence {}", m.confidence);
    }
}

#[test]
fn keyword_order_does_not_change_results() {
    let corpus = builtin_corpus().expect("builtin corpus");
    let shuffled: Vec<FaqEntry> = corpus
        .iter()
        .cloned()
        .map(|mut e| {
            e.keywords.reverse();
            e
        })
        .collect();
    let a = TfIdfMatcher::new(corpus).expect("matcher");
    let b = TfIdfMatcher::new(shuffled).expect("matcher");
    for q in ["shipping address", "refund", "software won't start", "email change", "student"] {
        let sa = a.score_all(q);
        let sb = b.score_all(q);
        for (x, y) in sa.iter().zip(&sb) {
            assert_eq!(x.id, y.id);
            assert!((x.score - y.score).abs() < 1e-12, "{q:?} id {}", x.id);
        }
        assert_eq!(a.find_best_match(q), b.find_best_match(q));
    }
}

#[test]
fn best_match_is_deterministic() {
    let matcher = matcher();
    let q = "How long does shipping take?";
    assert_eq!(matcher.find_best_match(q), matcher.find_best_match(q));
}

#[test]
fn ranking_lists_runners_up() {
    let ranked = matcher().rank("shipping", 3);
    let ids: Vec<u32> = ranked.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![6, 5, 17]);
    assert!(ranked.iter().all(|m| m.score > 0.1));
}

#[test]
fn shared_matcher_across_threads() {
    let matcher = std::sync::Arc::new(matcher());
    let handles: Vec<_> = ["refund", "track my order", "hours"]
        .into_iter()
        .map(|q| {
            let m = std::sync::Arc::clone(&matcher);
            std::thread::spawn(move || m.find_best_match(q).map(|r| r.id))
        })
        .collect();
    let ids: Vec<Option<u32>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(ids, vec![Some(8), Some(4), Some(13)]);
}
