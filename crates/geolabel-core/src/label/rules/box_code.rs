//! Box code extraction.

use super::first_match;
use super::patterns::{BOX_CODE_RULES, WHITESPACE_RUN};

/// Extract the box code, normalized to dot separators and upper case.
pub fn parse_box_code(text: &str) -> String {
    first_match(&BOX_CODE_RULES, text)
        .map(|m| normalize_box_code(m.value))
        .unwrap_or_default()
}

/// Turn whitespace runs into single dots and upper-case the code.
pub fn normalize_box_code(code: &str) -> String {
    WHITESPACE_RUN
        .replace_all(code.trim(), ".")
        .to_uppercase()
}
