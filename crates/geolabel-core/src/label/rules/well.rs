//! Well name extraction.

use super::patterns::WELL_RULES;
use super::RuleMatch;

/// Extract the well name, or an empty string when no anchor matches.
pub fn parse_well(text: &str) -> String {
    match_well(text)
        .map(|m| m.value.to_string())
        .unwrap_or_default()
}

/// First well rule that matches.
///
/// The bare `Well <text>` rule skips a value starting with the word "Name",
/// so an unfilled "Well Name:" field is not read as a well called "Name:".
pub fn match_well(text: &str) -> Option<RuleMatch<'_>> {
    WELL_RULES.iter().find_map(|rule| {
        let value = rule.capture(text)?;
        if rule.name == "well_bare" && starts_with_name_word(value) {
            return None;
        }
        Some(RuleMatch {
            rule: rule.name,
            value,
        })
    })
}

fn starts_with_name_word(value: &str) -> bool {
    match value.get(..4) {
        Some(head) if head.eq_ignore_ascii_case("name") => {
            value[4..].chars().next().is_none_or(|c| !c.is_alphanumeric())
        }
        _ => false,
    }
}
