use super::*;

#[test]
fn test_kind_serializes_snake_case() {
    let json = serde_json::to_string(&QuestionKind::FillInTheBlank).unwrap();
    assert_eq!(json, "\"fill_in_the_blank\"");
    let json = serde_json::to_string(&QuestionKind::TrueFalse).unwrap();
    assert_eq!(json, "\"true_false\"");
}

#[test]
fn test_payload_type_field_name() {
    let payload = QuestionPayload::new(QuestionKind::TrueFalse, "The sky is blue.")
        .with_choices(vec!["True".into(), "False".into()]);
    let value = serde_json::to_value(&payload).unwrap();
    assert_eq!(value["type"], "true_false");
    assert_eq!(value["question"], "The sky is blue.");
    assert_eq!(value["options"][0], "True");
    assert!(value.get("previous_correction").is_none());
}

#[test]
fn test_matching_options_round_trip() {
    let payload = QuestionPayload::new(QuestionKind::Matching, "Match terms.").with_matching(
        vec!["Mitochondria".into(), "Nucleus".into()],
        vec!["Powerhouse".into(), "Control center".into()],
    );
    let json = serde_json::to_string(&payload).unwrap();
    let back: QuestionPayload = serde_json::from_str(&json).unwrap();
    assert_eq!(back, payload);
    match back.options.unwrap() {
        QuestionOptions::Matching { prompts, choices } => {
            assert_eq!(prompts.len(), 2);
            assert_eq!(choices[1], "Control center");
        }
        other => panic!("expected matching options, got {other:?}"),
    }
}

#[test]
fn test_fill_in_the_blank_has_no_options() {
    let payload = QuestionPayload::new(QuestionKind::FillInTheBlank, "The capital is _____.");
    let value = serde_json::to_value(&payload).unwrap();
    assert!(value.get("options").is_none());
    assert!(payload.choices().is_none());
}

#[test]
fn test_correction_embeds_and_parses() {
    let payload = QuestionPayload::new(QuestionKind::MultipleChoice, "Next question?")
        .with_correction(CorrectionContext {
            question: "Capital of France?".into(),
            correct_answer: "Paris".into(),
        });
    let json = serde_json::to_string(&payload).unwrap();
    let back: QuestionPayload = serde_json::from_str(&json).unwrap();
    assert_eq!(back.previous_correction.unwrap().correct_answer, "Paris");
}

#[test]
fn test_multi_answer_kinds() {
    assert!(!QuestionKind::MultipleChoice.multi_answer());
    assert!(!QuestionKind::TrueFalse.multi_answer());
    assert!(QuestionKind::MultipleSelect.multi_answer());
    assert!(QuestionKind::FillInTheBlank.multi_answer());
    assert!(QuestionKind::Matching.multi_answer());
}
