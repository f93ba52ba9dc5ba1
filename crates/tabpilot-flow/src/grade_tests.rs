use super::*;

#[test]
fn test_normalize_strips_field_prefix_and_alternatives() {
    assert_eq!(normalize_revealed("Field 1: Paris or Paris, France"), "Paris");
}

#[test]
fn test_normalize_plain_answer_unchanged() {
    assert_eq!(normalize_revealed("mitochondria"), "mitochondria");
}

#[test]
fn test_normalize_prefix_only() {
    assert_eq!(normalize_revealed("Field 12: osmosis"), "osmosis");
}

#[test]
fn test_normalize_alternatives_only() {
    assert_eq!(normalize_revealed("two or 2"), "two");
}

#[test]
fn test_normalize_trims_whitespace() {
    assert_eq!(normalize_revealed("  Field 2: Berlin  "), "Berlin");
}

#[test]
fn test_normalize_keeps_mid_word_or() {
    // " or " needs surrounding spaces; words containing "or" survive.
    assert_eq!(normalize_revealed("orchestra"), "orchestra");
}
