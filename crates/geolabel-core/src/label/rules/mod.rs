//! Rule-based field extractors for sample labels.
//!
//! Every field is read by an ordered list of rules evaluated first-match-wins.
//! Unmatched fields come back empty or `None`; nothing here fails.

pub mod box_code;
pub mod company;
pub mod depth;
pub mod patterns;
pub mod well;

pub use box_code::parse_box_code;
pub use company::parse_company;
pub use depth::{parse_depth, DepthRange, DepthTier};
pub use well::{match_well, parse_well};

use regex::Regex;

/// One extraction rule: a named pattern whose first group is the value.
#[derive(Debug)]
pub struct TextRule {
    /// Short name, reported with matches.
    pub name: &'static str,
    /// Pattern with the value in capture group 1.
    pub pattern: Regex,
}

impl TextRule {
    pub fn new(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).unwrap(),
        }
    }

    /// Trimmed first capture group, if the rule matches with a non-blank value.
    pub fn capture<'t>(&self, text: &'t str) -> Option<&'t str> {
        let caps = self.pattern.captures(text)?;
        let value = caps.get(1)?.as_str().trim();
        if value.is_empty() { None } else { Some(value) }
    }
}

/// Value found by a rule, tagged with the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleMatch<'t> {
    pub rule: &'static str,
    pub value: &'t str,
}

/// Evaluate `rules` in order and return the first hit.
pub fn first_match<'t>(rules: &[TextRule], text: &'t str) -> Option<RuleMatch<'t>> {
    rules.iter().find_map(|rule| {
        rule.capture(text).map(|value| RuleMatch {
            rule: rule.name,
            value,
        })
    })
}
