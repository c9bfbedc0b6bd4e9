//! Company name extraction.

use super::first_match;
use super::patterns::COMPANY_RULES;

/// Extract the company, or an empty string when no anchor matches.
pub fn parse_company(text: &str) -> String {
    first_match(&COMPANY_RULES, text)
        .map(|m| m.value.to_string())
        .unwrap_or_default()
}
