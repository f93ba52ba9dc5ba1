use super::*;
use tabpilot_protocols::CorrectionContext;

#[test]
fn test_embeds_kind_and_text_verbatim() {
    let q = QuestionPayload::new(QuestionKind::TrueFalse, "The sky is blue.")
        .with_choices(vec!["True".into(), "False".into()]);
    let prompt = compose(&q);
    assert!(prompt.contains("true/false question: The sky is blue."));
    assert!(prompt.contains("- True"));
    assert!(prompt.contains("- False"));
    assert!(prompt.contains("exactly as written"));
}

#[test]
fn test_json_contract_always_present() {
    let q = QuestionPayload::new(QuestionKind::FillInTheBlank, "Water is H2O: _____.");
    let prompt = compose(&q);
    assert!(prompt.contains("\"answer\""));
    assert!(prompt.contains("\"explanation\""));
    assert!(prompt.contains("at most one sentence"));
}

#[test]
fn test_multiple_select_asks_for_array() {
    let q = QuestionPayload::new(QuestionKind::MultipleSelect, "Pick primes.").with_choices(vec![
        "2".into(),
        "3".into(),
        "4".into(),
    ]);
    let prompt = compose(&q);
    assert!(prompt.contains("every option that applies"));
    assert!(prompt.contains("array of strings"));
}

#[test]
fn test_matching_gets_numbered_lists() {
    let q = QuestionPayload::new(QuestionKind::Matching, "Match terms.").with_matching(
        vec!["Mitochondria".into(), "Ribosome".into()],
        vec!["Energy".into(), "Protein".into()],
    );
    let prompt = compose(&q);
    assert!(prompt.contains("1. Mitochondria"));
    assert!(prompt.contains("2. Ribosome"));
    assert!(prompt.contains("1. Energy"));
    assert!(prompt.contains("<prompt number> -> <choice text>"));
}

#[test]
fn test_fill_in_blank_multi_blank_instruction() {
    let q = QuestionPayload::new(QuestionKind::FillInTheBlank, "_____ and _____.");
    let prompt = compose(&q);
    assert!(prompt.contains("one per blank in order"));
}

#[test]
fn test_correction_preamble_comes_first_and_is_silent() {
    let q = QuestionPayload::new(QuestionKind::MultipleChoice, "Next?")
        .with_choices(vec!["A".into(), "B".into()])
        .with_correction(CorrectionContext {
            question: "Capital of France?".into(),
            correct_answer: "Paris".into(),
        });
    let prompt = compose(&q);
    assert!(prompt.starts_with("Note: my previous answer"));
    assert!(prompt.contains("\"Paris\""));
    assert!(prompt.contains("Do not acknowledge"));
}

#[test]
fn test_no_correction_no_preamble() {
    let q = QuestionPayload::new(QuestionKind::MultipleChoice, "Next?");
    assert!(!compose(&q).contains("previous answer"));
}
