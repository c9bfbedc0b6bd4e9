//! The canonical label schema produced by every extraction path.

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Fields read from one geological sample label.
///
/// Empty strings mean "not found" for the text fields and `None` means
/// "not found" for the depths. A value is built once per image and never
/// mutated by the extraction layer afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtractedFields {
    /// Well name.
    #[serde(deserialize_with = "text_or_null")]
    pub well: String,

    /// Operating company.
    #[serde(deserialize_with = "text_or_null")]
    pub company: String,

    /// Top of the sampled interval.
    #[serde(deserialize_with = "depth_value")]
    pub depth_from: Option<f64>,

    /// Bottom of the sampled interval.
    #[serde(deserialize_with = "depth_value")]
    pub depth_to: Option<f64>,

    /// Three-segment storage box code, e.g. `040.BB.020`.
    #[serde(deserialize_with = "text_or_null")]
    pub box_code: String,
}

impl ExtractedFields {
    /// Report missing or inconsistent fields, in a fixed order.
    ///
    /// Advisory only: nothing is mutated and nothing fails.
    pub fn validate(&self) -> Vec<FieldIssue> {
        let mut issues = Vec::new();

        if self.well.is_empty() {
            issues.push(FieldIssue::MissingWell);
        }
        if self.company.is_empty() {
            issues.push(FieldIssue::MissingCompany);
        }
        if self.depth_from.is_none() {
            issues.push(FieldIssue::MissingDepthFrom);
        }
        if self.depth_to.is_none() {
            issues.push(FieldIssue::MissingDepthTo);
        }
        if let (Some(from), Some(to)) = (self.depth_from, self.depth_to) {
            if from > to {
                issues.push(FieldIssue::InvertedDepth { from, to });
            }
        }
        if self.box_code.is_empty() {
            issues.push(FieldIssue::MissingBoxCode);
        }

        issues
    }

    /// Whether every field was found.
    pub fn is_complete(&self) -> bool {
        !self.well.is_empty()
            && !self.company.is_empty()
            && self.depth_from.is_some()
            && self.depth_to.is_some()
            && !self.box_code.is_empty()
    }

    /// Fill fields that are still empty from another extraction.
    ///
    /// Used to back up a provider reply with the local rule parser.
    pub fn or_else(self, fallback: ExtractedFields) -> ExtractedFields {
        ExtractedFields {
            well: if self.well.is_empty() { fallback.well } else { self.well },
            company: if self.company.is_empty() { fallback.company } else { self.company },
            depth_from: self.depth_from.or(fallback.depth_from),
            depth_to: self.depth_to.or(fallback.depth_to),
            box_code: if self.box_code.is_empty() { fallback.box_code } else { self.box_code },
        }
    }
}

/// A problem found by [`ExtractedFields::validate`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldIssue {
    MissingWell,
    MissingCompany,
    MissingDepthFrom,
    MissingDepthTo,
    InvertedDepth { from: f64, to: f64 },
    MissingBoxCode,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldIssue::MissingWell => write!(f, "Well name is missing"),
            FieldIssue::MissingCompany => write!(f, "Company name is missing"),
            FieldIssue::MissingDepthFrom => write!(f, "Depth From is missing"),
            FieldIssue::MissingDepthTo => write!(f, "Depth To is missing"),
            FieldIssue::InvertedDepth { from, to } => {
                write!(f, "Depth From ({}) should be less than Depth To ({})", from, to)
            }
            FieldIssue::MissingBoxCode => write!(f, "Box Code is missing"),
        }
    }
}

fn text_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Models sometimes quote numbers or keep thousands separators.
fn depth_value<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawDepth {
        Number(f64),
        Text(String),
    }

    match Option::<RawDepth>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawDepth::Number(n)) => Ok(Some(n)),
        Some(RawDepth::Text(text)) => {
            if text.trim().is_empty() {
                return Ok(None);
            }
            crate::label::rules::depth::parse_number(&text)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid depth value: {:?}", text)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_validate_reports_in_order() {
        let fields = ExtractedFields {
            well: String::new(),
            company: "X".to_string(),
            depth_from: Some(5.0),
            depth_to: Some(2.0),
            box_code: String::new(),
        };

        assert_eq!(
            fields.validate(),
            vec![
                FieldIssue::MissingWell,
                FieldIssue::InvertedDepth { from: 5.0, to: 2.0 },
                FieldIssue::MissingBoxCode,
            ]
        );
    }

    #[test]
    fn test_validate_empty_fields() {
        let issues: Vec<String> = ExtractedFields::default()
            .validate()
            .iter()
            .map(|i| i.to_string())
            .collect();

        assert_eq!(
            issues,
            vec![
                "Well name is missing",
                "Company name is missing",
                "Depth From is missing",
                "Depth To is missing",
                "Box Code is missing",
            ]
        );
    }

    #[test]
    fn test_equal_depths_are_fine() {
        let fields = ExtractedFields {
            well: "W-1".to_string(),
            company: "Acme".to_string(),
            depth_from: Some(2480.0),
            depth_to: Some(2480.0),
            box_code: "040.BB.020".to_string(),
        };
        assert!(fields.validate().is_empty());
        assert!(fields.is_complete());
    }

    #[test]
    fn test_deserialize_camel_case() {
        let fields: ExtractedFields = serde_json::from_str(
            r#"{"well":"PL-7","company":"Petro","depthFrom":2480,"depthTo":2490.5,"boxCode":"040.BB.020"}"#,
        )
        .unwrap();

        assert_eq!(fields.well, "PL-7");
        assert_eq!(fields.depth_from, Some(2480.0));
        assert_eq!(fields.depth_to, Some(2490.5));
        assert_eq!(fields.box_code, "040.BB.020");
    }

    #[test]
    fn test_deserialize_nulls_and_missing_keys() {
        let fields: ExtractedFields =
            serde_json::from_str(r#"{"well":null,"depthFrom":null}"#).unwrap();
        assert_eq!(fields, ExtractedFields::default());
    }

    #[test]
    fn test_deserialize_quoted_depths() {
        let fields: ExtractedFields =
            serde_json::from_str(r#"{"depthFrom":"2,480","depthTo":""}"#).unwrap();
        assert_eq!(fields.depth_from, Some(2480.0));
        assert_eq!(fields.depth_to, None);
    }

    #[test]
    fn test_deserialize_rejects_wrong_types() {
        assert!(serde_json::from_str::<ExtractedFields>(r#"{"depthFrom":"deep"}"#).is_err());
        assert!(serde_json::from_str::<ExtractedFields>(r#"{"depthTo":true}"#).is_err());
        assert!(serde_json::from_str::<ExtractedFields>(r#"{"well":42}"#).is_err());
    }

    #[test]
    fn test_serialize_keeps_nulls() {
        let json = serde_json::to_value(ExtractedFields::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "well": "",
                "company": "",
                "depthFrom": null,
                "depthTo": null,
                "boxCode": ""
            })
        );
    }

    #[test]
    fn test_or_else_only_fills_gaps() {
        let reply = ExtractedFields {
            well: "W-1".to_string(),
            depth_from: Some(100.0),
            ..Default::default()
        };
        let parsed = ExtractedFields {
            well: "ignored".to_string(),
            company: "Acme".to_string(),
            depth_from: Some(1.0),
            depth_to: Some(200.0),
            box_code: "001.02.003".to_string(),
        };

        let merged = reply.or_else(parsed);
        assert_eq!(merged.well, "W-1");
        assert_eq!(merged.company, "Acme");
        assert_eq!(merged.depth_from, Some(100.0));
        assert_eq!(merged.depth_to, Some(200.0));
        assert_eq!(merged.box_code, "001.02.003");
    }
}
