//! Small helpers for building JavaScript snippets.

/// Quote a Rust string as a JavaScript string literal.
///
/// JSON string escaping is a strict subset of JS string syntax, so the
/// serde encoder is safe to reuse here.
pub fn quote(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_plain() {
        assert_eq!(quote("hello"), "\"hello\"");
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("a\"b"), "\"a\\\"b\"");
        assert_eq!(quote("line\nbreak"), "\"line\\nbreak\"");
    }
}
