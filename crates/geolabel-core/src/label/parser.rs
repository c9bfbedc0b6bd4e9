//! Label parser combining the per-field rules.

use std::time::Instant;

use tracing::debug;

use crate::models::fields::{ExtractedFields, FieldIssue};

use super::rules::{
    depth::parse_depth_with_tier,
    first_match,
    match_well,
    patterns::{BOX_CODE_RULES, COMPANY_RULES},
    box_code::normalize_box_code,
};

/// Result of parsing one block of label text.
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Extracted fields.
    pub fields: ExtractedFields,
    /// Advisory problems with the extracted fields.
    pub issues: Vec<FieldIssue>,
    /// Processing time in microseconds.
    pub processing_time_us: u64,
}

/// Rule-based label parser.
///
/// Works on any text: a model's unstructured reply or a raw OCR dump.
/// It never fails; unmatched fields stay empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabelParser;

impl LabelParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse label text into fields plus advisory issues.
    pub fn parse(&self, text: &str) -> ParseResult {
        let start = Instant::now();
        let fields = self.extract(text);
        let issues = fields.validate();

        ParseResult {
            fields,
            issues,
            processing_time_us: start.elapsed().as_micros() as u64,
        }
    }

    /// Parse label text into fields only.
    pub fn extract(&self, text: &str) -> ExtractedFields {
        let well = match_well(text);
        let company = first_match(&COMPANY_RULES, text);
        let box_code = first_match(&BOX_CODE_RULES, text);
        let depth = parse_depth_with_tier(text);

        debug!(
            well_rule = well.map(|m| m.rule),
            company_rule = company.map(|m| m.rule),
            box_code_rule = box_code.map(|m| m.rule),
            depth_tier = ?depth.map(|(_, tier)| tier),
            "Parsed {} characters of label text",
            text.len()
        );

        let depth = depth.map(|(range, _)| range).unwrap_or_default();

        ExtractedFields {
            well: well.map(|m| m.value.to_string()).unwrap_or_default(),
            company: company.map(|m| m.value.to_string()).unwrap_or_default(),
            depth_from: depth.from,
            depth_to: depth.to,
            box_code: box_code.map(|m| normalize_box_code(m.value)).unwrap_or_default(),
        }
    }
}

/// Parse all label fields from text.
pub fn parse_sample_label(text: &str) -> ExtractedFields {
    LabelParser::new().extract(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_full_label() {
        let text = r#"
            GEOLOGICAL SAMPLE
            Well: Tapis B-12
            Company: PETRONAS Carigali
            Depth: 2,480 - 2,490 m
            040.BB.020
        "#;

        let result = LabelParser::new().parse(text);

        assert_eq!(
            result.fields,
            ExtractedFields {
                well: "Tapis B-12".to_string(),
                company: "PETRONAS Carigali".to_string(),
                depth_from: Some(2480.0),
                depth_to: Some(2490.0),
                box_code: "040.BB.020".to_string(),
            }
        );
        assert!(result.issues.is_empty());
    }

    #[test]
    fn test_parse_partial_label() {
        let text = "Operator: Shell\nFrom: 1200\nbox 001 02 003";

        let result = LabelParser::new().parse(text);

        assert_eq!(result.fields.well, "");
        assert_eq!(result.fields.company, "Shell");
        assert_eq!(result.fields.depth_from, Some(1200.0));
        assert_eq!(result.fields.depth_to, None);
        assert_eq!(result.fields.box_code, "001.02.003");
        assert_eq!(
            result.issues,
            vec![FieldIssue::MissingWell, FieldIssue::MissingDepthTo]
        );
    }

    #[test]
    fn test_parse_model_reply_text() {
        let reply = "I could read the following:\nWell Name: Bekok-3\nDepth: 1500 to 1510\nBox Code: 012 AB 345";

        let fields = parse_sample_label(reply);

        assert_eq!(fields.well, "Bekok-3");
        assert_eq!(fields.depth_from, Some(1500.0));
        assert_eq!(fields.depth_to, Some(1510.0));
        assert_eq!(fields.box_code, "012.AB.345");
    }

    #[test]
    fn test_blank_well_name_field_stays_empty() {
        let result = LabelParser::new().parse("Well Name:\nCompany: Carigali\nDepth: 900 - 950");

        assert_eq!(result.fields.well, "");
        assert_eq!(result.fields.company, "Carigali");
        assert_eq!(result.issues.first(), Some(&FieldIssue::MissingWell));
    }

    #[test]
    fn test_parse_empty_text() {
        assert_eq!(parse_sample_label(""), ExtractedFields::default());
    }
}
