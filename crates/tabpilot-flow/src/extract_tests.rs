use super::*;
use tabpilot_protocols::QuestionOptions;

fn raw(json: &str) -> RawQuestion {
    serde_json::from_str(json).unwrap()
}

#[test]
fn test_into_payload_multiple_choice() {
    let payload = into_payload(raw(
        r#"{"kind":"multiple_choice","question":"Capital of France?","options":["Paris","Lyon"]}"#,
    ))
    .unwrap();
    assert_eq!(payload.kind, QuestionKind::MultipleChoice);
    assert_eq!(payload.question, "Capital of France?");
    assert_eq!(
        payload.choices().unwrap(),
        &["Paris".to_string(), "Lyon".to_string()]
    );
}

#[test]
fn test_into_payload_fill_in_blank_has_no_options() {
    let payload = into_payload(raw(
        r#"{"kind":"fill_in_the_blank","question":"The capital of France is _____ ."}"#,
    ))
    .unwrap();
    assert_eq!(payload.kind, QuestionKind::FillInTheBlank);
    assert!(payload.options.is_none());
}

#[test]
fn test_into_payload_matching_pairs_lists() {
    let payload = into_payload(raw(
        r#"{"kind":"matching","question":"Match each country.","prompts":["France","Spain"],"choices":["Paris","Madrid"]}"#,
    ))
    .unwrap();
    match payload.options.unwrap() {
        QuestionOptions::Matching { prompts, choices } => {
            assert_eq!(prompts, vec!["France", "Spain"]);
            assert_eq!(choices, vec!["Paris", "Madrid"]);
        }
        other => panic!("unexpected options: {:?}", other),
    }
}

#[test]
fn test_into_payload_rejects_empty_prompt() {
    assert!(into_payload(raw(r#"{"kind":"true_false","question":"   ","options":[]}"#)).is_none());
}

#[test]
fn test_into_payload_trims_prompt() {
    let payload =
        into_payload(raw(r#"{"kind":"true_false","question":"  Water boils at 100C.  ","options":["True","False"]}"#))
            .unwrap();
    assert_eq!(payload.question, "Water boils at 100C.");
}

#[test]
fn test_extraction_script_embeds_selectors() {
    let script = extraction_script();
    assert!(script.contains("question-container"));
    assert!(script.contains("matching"));
    assert!(script.contains("fill_in_the_blank"));
}
