//! Sample label field extraction from raw text.

mod parser;
pub mod rules;

pub use parser::{parse_sample_label, LabelParser, ParseResult};
pub use rules::{parse_box_code, parse_company, parse_depth, parse_well, DepthRange};

use crate::models::fields::{ExtractedFields, FieldIssue};

/// Report missing or inconsistent fields; see [`ExtractedFields::validate`].
pub fn validate(fields: &ExtractedFields) -> Vec<FieldIssue> {
    fields.validate()
}
