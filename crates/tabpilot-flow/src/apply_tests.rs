use super::*;
use tabpilot_protocols::AnswerValue;

fn opts(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_matches_exact() {
    assert!(matches("Paris", "Paris"));
    assert!(!matches("Paris", "Lyon"));
}

#[test]
fn test_matches_both_trailing_periods_stripped() {
    assert!(matches("Paris.", "Paris"));
    assert!(matches("Paris", "Paris."));
    assert!(matches("Paris.", "Paris."));
}

#[test]
fn test_matches_option_with_appended_period() {
    assert!(matches("The mitochondria.", "The mitochondria"));
    // Only a trailing period is forgiven, not other suffixes.
    assert!(!matches("The mitochondria!", "The mitochondria"));
}

#[test]
fn test_matches_is_case_sensitive() {
    assert!(!matches("paris", "Paris"));
}

#[test]
fn test_selection_single_answer_takes_first_candidate_hit() {
    let options = opts(&["True", "False"]);
    let answer = AnswerValue::Many(vec!["False".into(), "True".into()]);
    assert_eq!(selection_indices(&options, &answer, false), vec![1]);
}

#[test]
fn test_selection_multi_answer_collects_all_hits() {
    let options = opts(&["Red", "Green", "Blue"]);
    let answer = AnswerValue::Many(vec!["Blue".into(), "Red".into()]);
    assert_eq!(selection_indices(&options, &answer, true), vec![2, 0]);
}

#[test]
fn test_selection_drops_unmatched_candidates() {
    let options = opts(&["Red", "Green"]);
    let answer = AnswerValue::Many(vec!["Purple".into(), "Green".into()]);
    assert_eq!(selection_indices(&options, &answer, true), vec![1]);
}

#[test]
fn test_selection_dedupes_repeat_hits() {
    let options = opts(&["Red."]);
    let answer = AnswerValue::Many(vec!["Red".into(), "Red.".into()]);
    assert_eq!(selection_indices(&options, &answer, true), vec![0]);
}

#[test]
fn test_selection_empty_when_nothing_matches() {
    let options = opts(&["Red", "Green"]);
    let answer = AnswerValue::One("Purple".into());
    assert!(selection_indices(&options, &answer, false).is_empty());
}

#[test]
fn test_matching_alert_lists_pairings_in_order() {
    let answer = AnswerValue::Many(vec!["Paris".into(), "Madrid".into()]);
    let text = matching_alert(&answer);
    assert!(text.contains("1 -> Paris"));
    assert!(text.contains("2 -> Madrid"));
    assert!(text.contains("manually"));
}
