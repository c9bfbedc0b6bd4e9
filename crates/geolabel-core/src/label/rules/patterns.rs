//! Patterns for sample label extraction.
//!
//! Rule lists are ordered: earlier rules take priority over later ones.

use lazy_static::lazy_static;
use regex::Regex;

use super::TextRule;

/// A depth number: digits with optional comma grouping and decimals.
const NUMBER: &str = r"(\d[\d,]*(?:\.\d+)?)";

lazy_static! {
    // Well name, "Well:" before "Well Name:" before a bare "Well"
    pub static ref WELL_RULES: Vec<TextRule> = vec![
        TextRule::new("well", r"(?i)\bWell[ \t]*:[ \t]*([^\n\r]+)"),
        TextRule::new("well_name", r"(?i)\bWell[ \t]*Name(?:[ \t]*:|[ \t])[ \t]*([^\n\r]+)"),
        TextRule::new("well_bare", r"(?i)\bWell[ \t]+([^\n\r]+)"),
    ];

    // Company, "Company:" before "Operator:"
    pub static ref COMPANY_RULES: Vec<TextRule> = vec![
        TextRule::new("company", r"(?i)\bCompany(?:[ \t]*:|[ \t])[ \t]*([^\n\r]+)"),
        TextRule::new("operator", r"(?i)\bOperator(?:[ \t]*:|[ \t])[ \t]*([^\n\r]+)"),
    ];

    // "Depth: 2,480 - 2,490" or "Depth 2480 to 2490"
    pub static ref DEPTH_RANGE: Regex = Regex::new(&format!(
        r"(?i)\bDepth(?:\s*:\s*|\s+){NUMBER}\s*(?:[-–—]|to)\s*{NUMBER}"
    )).unwrap();

    pub static ref DEPTH_FROM: Regex = Regex::new(&format!(
        r"(?i)\bFrom(?:\s*:\s*|\s+){NUMBER}"
    )).unwrap();

    pub static ref DEPTH_TO: Regex = Regex::new(&format!(
        r"(?i)\bTo(?:\s*:\s*|\s+){NUMBER}"
    )).unwrap();

    // Any dash-joined number pair, for the unlabeled fallback
    pub static ref NUMBER_PAIR: Regex = Regex::new(&format!(
        r"{NUMBER}\s*[-–—]\s*{NUMBER}"
    )).unwrap();

    // Box code, strictest shapes first, space-separated OCR variants last
    pub static ref BOX_CODE_RULES: Vec<TextRule> = vec![
        TextRule::new("digits_letters", r"(?i)\b(\d{3}\.[A-Z]{2}\.\d{3})\b"),
        TextRule::new("digits", r"\b(\d{3}\.\d{2}\.\d{3})\b"),
        TextRule::new("alphanumeric", r"(?i)\b([A-Z0-9]{3}\.[A-Z0-9]{2}\.[A-Z0-9]{3})\b"),
        TextRule::new("labeled", r"(?i)\bBox[ \t]*Code(?:[ \t]*:|[ \t])[ \t]*([^\n\r]+)"),
        TextRule::new("spaced_digits_letters", r"(?i)\b(\d{3}[ \t]+[A-Z]{2}[ \t]+\d{3})\b"),
        TextRule::new("spaced_digits", r"\b(\d{3}[ \t]+\d{2}[ \t]+\d{3})\b"),
    ];

    pub static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}
